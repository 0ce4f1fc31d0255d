use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

lazy_static! {
    static ref DEFAULT_CLEANER: Result<CodeCleaner, Error> = CodeCleaner::new();
}

/// Counts of what the cleaning pass removed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StripStats {
    pub directive_lines: usize,
    pub block_comments: usize,
    pub line_comments: usize,
}

impl StripStats {
    pub fn comments(&self) -> usize {
        self.block_comments + self.line_comments
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaned {
    pub text: String,
    pub stripped: StripStats,
}

/// Drops directive lines, then block comments, then line comments.
///
/// Runs purely on text, so a `//` inside a string literal is treated as a
/// comment start like any other.
#[derive(Debug, Clone)]
pub struct CodeCleaner {
    block_comment: Regex,
    line_comment: Regex,
}

impl CodeCleaner {
    pub fn new() -> Result<CodeCleaner, Error> {
        Ok(CodeCleaner {
            block_comment: compile(r"/\*(?s:.)*?\*/")?,
            line_comment: compile(r"//[^\n\r\x{2028}\x{2029}]*")?,
        })
    }

    pub fn clean(&self, source: &str) -> Cleaned {
        let mut stripped = StripStats::default();

        let lines: Vec<&str> = source
            .split('\n')
            .filter(|line| {
                let directive = line.trim_start_matches(is_blank).starts_with('#');
                stripped.directive_lines += usize::from(directive);
                !directive
            })
            .collect();
        let text = lines.join("\n");

        stripped.block_comments = self.block_comment.find_iter(&text).count();
        let text = self.block_comment.replace_all(&text, "");

        stripped.line_comments = self.line_comment.find_iter(&text).count();
        let text = self.line_comment.replace_all(&text, "").into_owned();

        tracing::trace!(
            directive_lines = stripped.directive_lines,
            comments = stripped.comments(),
            "cleaned source"
        );

        Cleaned { text, stripped }
    }
}

fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn compile(pattern: &str) -> Result<Regex, Error> {
    Regex::new(pattern).map_err(|err| {
        Error::new(
            ErrorImpl::InvalidPattern {
                kind: String::from("comment"),
                message: err.to_string(),
            },
            Position(0, "<rules>".into()),
        )
    })
}

/// Strip directive lines and comments with the shared cleaner.
pub fn clean_code(source: &str) -> Result<String, Error> {
    let cleaner = DEFAULT_CLEANER.as_ref().map_err(Clone::clone)?;
    Ok(cleaner.clean(source).text)
}
