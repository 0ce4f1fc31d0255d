//! Error types for lexing and request handling.
//!
//! - `ErrorImpl` enumerates what went wrong (`thiserror` messages)
//! - `Error` pairs it with the offset where it happened
//! - `ErrorTip` carries an optional hint for diagnostics

pub mod errors;

#[cfg(test)]
mod tests;
