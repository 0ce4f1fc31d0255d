//! Lexical analysis for a C-like language subset.
//!
//! This module turns source text into a stream of typed tokens:
//!
//! - An ordered table of anchored regex rules; the first rule to match wins
//! - A cleaning pass that drops directive lines and comments before scanning
//! - Token categories and display helpers for front ends
//! - Byte-offset positions for error reporting

pub mod display;
pub mod lexer;
pub mod preprocess;
pub mod rules;
pub mod tokens;
