//! Integration tests for end-to-end lexical analysis.
//!
//! These tests drive the public API the way a front end does: tokenize a
//! source text, classify the tokens, and build the JSON response.

use lexviz::{
    analysis::{analyze, handle_request_json, AnalysisConfig, LexRequest, LexResponse},
    lexer::{
        display::{color_of, display_value_of},
        lexer::{tokenize, LanguageProfile, Lexer, ScanMode},
        preprocess::clean_code,
        tokens::{category_of, Category, TokenKind},
    },
};
use pretty_assertions::assert_eq;

const PROGRAM: &str = r#"#include <stdio.h>
#define MAX 10

/* Sum the first MAX squares. */
static int sum_squares(void) {
    int total = 0;
    for (int i = 0; i < MAX; i++) {
        total += i * i; // accumulate
    }
    return total;
}

int main(void) {
    printf("%d\n", sum_squares());
    return 0;
}
"#;

#[test]
fn test_tokenize_program_in_clean_mode() {
    let tokens = tokenize(PROGRAM).unwrap();

    let kinds: Vec<TokenKind> = tokens.iter().take(6).map(|token| token.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Static,
            TokenKind::Int,
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Void,
            TokenKind::RParen,
        ]
    );

    assert!(tokens
        .iter()
        .all(|token| !matches!(token.category(), Category::Preprocessor | Category::Comment)));
    assert!(!tokens.iter().any(|token| token.value == "stdio"));
}

#[test]
fn test_positions_index_into_cleaned_text() {
    let cleaned = clean_code(PROGRAM).unwrap();
    let tokens = tokenize(PROGRAM).unwrap();

    let mut cursor = 0;
    for token in &tokens {
        assert!(token.position() >= cursor);
        assert_eq!(&cleaned[token.position()..token.position() + token.len()], token.value);
        cursor = token.position() + token.len();
    }
}

#[test]
fn test_direct_mode_keeps_directives_and_comments() {
    let lexer = Lexer::builder().mode(ScanMode::Direct).build().unwrap();
    let tokens = lexer.tokenize(PROGRAM).unwrap();

    let directives: Vec<(TokenKind, &str)> = tokens
        .iter()
        .filter(|token| token.category() == Category::Preprocessor)
        .map(|token| (token.kind, token.value.as_str()))
        .collect();
    assert_eq!(
        directives,
        vec![(TokenKind::Include, "#include"), (TokenKind::Define, "#define")]
    );

    let comments: Vec<&str> = tokens
        .iter()
        .filter(|token| token.category() == Category::Comment)
        .map(|token| token.value.as_str())
        .collect();
    assert_eq!(comments, vec!["/* Sum the first MAX squares. */", "// accumulate"]);

    for token in &tokens {
        assert_eq!(&PROGRAM[token.position()..token.position() + token.len()], token.value);
    }
}

#[test]
fn test_analysis_of_program() {
    let lexer = Lexer::builder().build().unwrap();
    let request = LexRequest {
        code: PROGRAM.to_string(),
    };

    let LexResponse::Success(success) = analyze(&lexer, &request, &AnalysisConfig::default())
    else {
        panic!("Expected success");
    };

    let names: Vec<&str> = success
        .symbol_table
        .entries()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["sum_squares", "total", "i", "MAX", "main", "printf"]);

    let total = success.symbol_table.get("total").unwrap();
    assert_eq!(total.occurrences, 3);

    assert_eq!(success.statistics.skipped_directives, 2);
    assert_eq!(success.statistics.skipped_comments, 2);
    assert_eq!(success.statistics.unique_identifiers, 6);
    assert_eq!(success.statistics.total_tokens, success.tokens.len());
}

#[test]
fn test_request_round_trip_through_json() {
    let lexer = Lexer::builder().build().unwrap();
    let body = serde_json::json!({ "code": "int x = @;" }).to_string();

    let response = handle_request_json(&lexer, &body, &AnalysisConfig::default());
    let rendered = serde_json::to_string(&response).unwrap();

    assert_eq!(
        rendered,
        r#"{"success":false,"error":"Invalid character '@' at position 8"}"#
    );
}

#[test]
fn test_expression_profile_end_to_end() {
    let lexer = Lexer::builder()
        .profile(LanguageProfile::Expression)
        .build()
        .unwrap();
    let request = LexRequest {
        code: String::from("int total = price * 3.5 + tax;"),
    };

    let LexResponse::Success(success) = analyze(&lexer, &request, &AnalysisConfig::default())
    else {
        panic!("Expected success");
    };

    let types: Vec<&str> = success.tokens.iter().map(|token| token.kind.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "INT",
            "IDENTIFIER",
            "ASSIGN",
            "IDENTIFIER",
            "MULTIPLY",
            "NUMBER",
            "PLUS",
            "IDENTIFIER",
            "SEMICOLON",
        ]
    );
    assert_eq!(success.symbol_table.len(), 3);
}

#[test]
fn test_display_helpers_for_tokens() {
    let tokens = tokenize(r#"char *message = "a rather long message";"#).unwrap();

    let shown: Vec<String> = tokens
        .iter()
        .map(|token| display_value_of(&token.value, token.category()))
        .collect();
    assert_eq!(shown, vec!["char", "*", "message", "=", "\"a rathe...", ";"]);

    assert_eq!(
        color_of(category_of(TokenKind::String)),
        color_of(Category::Literal)
    );
}
