use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether the position points at a character of the scanned text.
    pub fn is_positional(&self) -> bool {
        matches!(self.internal_error, ErrorImpl::InvalidCharacter { .. })
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { .. } => "InvalidCharacter",
            ErrorImpl::SourceTooLarge { .. } => "SourceTooLarge",
            ErrorImpl::MalformedRequest { .. } => "MalformedRequest",
            ErrorImpl::InvalidPattern { .. } => "InvalidPattern",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::InvalidCharacter { character: '"' } => {
                ErrorTip::Suggestion(String::from("Unterminated string literal"))
            }
            ErrorImpl::InvalidCharacter { character: '\'' } => {
                ErrorTip::Suggestion(String::from("Unterminated character literal"))
            }
            ErrorImpl::InvalidCharacter { character: '#' } => ErrorTip::Suggestion(String::from(
                "Preprocessor directives must start their own line",
            )),
            ErrorImpl::InvalidCharacter { .. } => ErrorTip::None,
            ErrorImpl::SourceTooLarge { limit, .. } => ErrorTip::Suggestion(format!(
                "Split the input into pieces of at most {} bytes",
                limit
            )),
            ErrorImpl::MalformedRequest { .. } => ErrorTip::Suggestion(String::from(
                "Expected a JSON object of the form {\"code\": \"...\"}",
            )),
            ErrorImpl::InvalidPattern { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_positional() {
            write!(f, "{} at position {}", self.internal_error, self.position.0)
        } else {
            write!(f, "{}", self.internal_error)
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("Invalid character '{character}'")]
    InvalidCharacter { character: char },
    #[error("Source is {len} bytes, exceeding the {limit} byte limit")]
    SourceTooLarge { len: usize, limit: usize },
    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },
    #[error("Invalid pattern for {kind}: {message}")]
    InvalidPattern { kind: String, message: String },
}
