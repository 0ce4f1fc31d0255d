//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Creates a rule that emits a token when it matches
//! - `MK_SKIP_RULE!` - Creates a rule that only advances the cursor
//!
//! The rule macros expand to a `Result`, so they are used with `?` inside
//! the table builders.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The matched lexeme
/// * `$start` - Byte offset of the lexeme
/// * `$file` - `Arc<str>` naming the source
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), 0, &file);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $start:expr, $file:expr) => {{
        let value: String = $value;
        let start: usize = $start;
        $crate::lexer::tokens::Token {
            kind: $kind,
            span: $crate::Span {
                start: $crate::Position::new(start, $file),
                end: $crate::Position::new(start + value.len(), $file),
            },
            value,
        }
    }};
}

/// Creates a rule that emits a token of the given kind.
///
/// An optional third argument sets the word-boundary requirement.
///
/// # Example
///
/// ```ignore
/// rules.push(MK_RULE!(TokenKind::Plus, r"\+")?);
/// rules.push(MK_RULE!(TokenKind::Int, "int", WordBoundary::Both)?);
/// ```
#[macro_export]
macro_rules! MK_RULE {
    ($kind:expr, $pattern:expr) => {
        $crate::MK_RULE!($kind, $pattern, $crate::lexer::rules::WordBoundary::None)
    };
    ($kind:expr, $pattern:expr, $boundary:expr) => {
        $crate::lexer::rules::RulePattern::new(
            $kind,
            $pattern,
            $boundary,
            $crate::lexer::lexer::emit_handler,
        )
    };
}

/// Creates a rule whose match is consumed without producing a token.
#[macro_export]
macro_rules! MK_SKIP_RULE {
    ($kind:expr, $pattern:expr) => {
        $crate::lexer::rules::RulePattern::new(
            $kind,
            $pattern,
            $crate::lexer::rules::WordBoundary::None,
            $crate::lexer::lexer::skip_handler,
        )
    };
}
