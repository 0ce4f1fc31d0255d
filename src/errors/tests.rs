//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;
use std::sync::Arc;

fn at(offset: usize) -> Position {
    Position(offset, Arc::from("test.c"))
}

#[test]
fn test_error_creation() {
    let error = Error::new(ErrorImpl::InvalidCharacter { character: '@' }, at(10));

    assert_eq!(error.get_error_name(), "InvalidCharacter");
    assert_eq!(error.get_position().0, 10);
    assert!(error.is_positional());
}

#[test]
fn test_invalid_character_message() {
    let error = Error::new(ErrorImpl::InvalidCharacter { character: '@' }, at(8));

    assert_eq!(error.to_string(), "Invalid character '@' at position 8");
}

#[test]
fn test_source_too_large_message() {
    let error = Error::new(
        ErrorImpl::SourceTooLarge {
            len: 600_000,
            limit: 524_288,
        },
        at(524_288),
    );

    assert_eq!(error.get_error_name(), "SourceTooLarge");
    assert!(!error.is_positional());
    assert_eq!(
        error.to_string(),
        "Source is 600000 bytes, exceeding the 524288 byte limit"
    );
}

#[test]
fn test_malformed_request_message() {
    let error = Error::new(
        ErrorImpl::MalformedRequest {
            message: String::from("EOF while parsing"),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "MalformedRequest");
    assert_eq!(error.to_string(), "Malformed request: EOF while parsing");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::InvalidCharacter { character: '@' }, at(0));

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_unterminated_string() {
    let error = Error::new(ErrorImpl::InvalidCharacter { character: '"' }, at(0));

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Unterminated string literal"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_stray_hash() {
    let error = Error::new(ErrorImpl::InvalidCharacter { character: '#' }, at(7));

    assert!(matches!(error.get_tip(), ErrorTip::Suggestion(_)));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
