#![allow(clippy::module_inception)]

use std::sync::{Arc, Once};

use crate::errors::errors::{Error, ErrorTip};

pub mod analysis;
pub mod errors;
pub mod lexer;
pub mod macros;

extern crate regex;

/// Byte offset into the scanned text, paired with the name of its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub usize, pub Arc<str>);

impl Position {
    pub fn new(offset: usize, file: &Arc<str>) -> Self {
        Position(offset, Arc::clone(file))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

static TRACING_INIT: Once = Once::new();

/// Install the `tracing` subscriber for the binary.
///
/// Honours `RUST_LOG`, defaulting to `warn`. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    });
}

/// Returns `(line_number, line_text, column)` for a byte offset, where the
/// line number is 1-based and the column counts characters from the line start.
pub fn line_at_offset(source: &str, offset: usize) -> Option<(usize, String, usize)> {
    if offset >= source.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&offset) {
            let column = line.get(..offset - start)?.chars().count();
            return Some((line_number, line.to_string(), column));
        }

        start = end;
        line_number += 1;
    }

    None
}

/// Render an error as a caret diagnostic against the text that was scanned.
pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: InvalidCharacter
        -> main.c
          |
        2 | int x = @;
          | --------^
    */

    let mut out = match error.get_tip() {
        ErrorTip::None => format!("Error: {}\n", error.get_error_name()),
        tip => format!("Error: {} ({})\n", error.get_error_name(), tip),
    };
    out.push_str(&format!("-> {}\n", file));

    let location = error
        .is_positional()
        .then(|| line_at_offset(source, error.get_position().0))
        .flatten();
    let Some((line, line_text, column)) = location else {
        out.push_str(&format!("   {}\n", error));
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    eprint!("{}", format_error(error, source, file));
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}
