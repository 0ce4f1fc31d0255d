//! Unit tests for the analysis contract.

use serde_json::json;

use super::{
    analyze, analyze_source, handle_request_json, AnalysisConfig, LexRequest, LexResponse,
    SymbolTable,
};
use crate::lexer::{
    lexer::{Lexer, ScanMode},
    tokens::TokenKind,
};

fn lexer() -> Lexer {
    Lexer::builder().build().unwrap()
}

fn request(code: &str) -> LexRequest {
    LexRequest {
        code: code.to_string(),
    }
}

#[test]
fn test_symbol_table_orders_by_first_appearance() {
    let tokens = lexer().tokenize("int b = a + b; a = c * b;").unwrap();
    let table = SymbolTable::from_tokens(&tokens);

    let names: Vec<&str> = table.entries().iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a", "c"]);

    let b = table.get("b").unwrap();
    assert_eq!(b.id, 1);
    assert_eq!(b.occurrences, 3);
    assert_eq!(b.first_position, 4);
    assert_eq!(table.get("c").unwrap().id, 3);
    assert!(table.get("int").is_none());
}

#[test]
fn test_statistics_for_clean_mode() {
    let source = "#include <stdio.h>\n/* doc */\nint main() { return x; } // end\n";
    let analysis = analyze_source(&lexer(), source, &AnalysisConfig::default()).unwrap();
    let stats = analysis.statistics;

    assert_eq!(stats.total_tokens, 9);
    assert_eq!(stats.keywords, 2);
    assert_eq!(stats.identifiers, 2);
    assert_eq!(stats.delimiters, 5);
    assert_eq!(stats.unique_identifiers, 2);
    assert_eq!(stats.skipped_comments, 2);
    assert_eq!(stats.skipped_directives, 1);
    assert_eq!(stats.preprocessor, 0);
    assert_eq!(stats.lexical_errors, 0);
}

#[test]
fn test_statistics_for_direct_mode() {
    let lexer = Lexer::builder().mode(ScanMode::Direct).build().unwrap();
    let source = "#define N 10\n// note\nint n = N; /* x */";
    let analysis = analyze_source(&lexer, source, &AnalysisConfig::default()).unwrap();
    let stats = analysis.statistics;

    assert_eq!(stats.preprocessor, 1);
    assert_eq!(stats.comments, 2);
    assert_eq!(stats.skipped_comments, 2);
    assert_eq!(stats.skipped_directives, 0);
    assert_eq!(analysis.symbol_table.get("N").unwrap().occurrences, 2);
}

#[test]
fn test_success_response_shape() {
    let response = analyze(&lexer(), &request("int x;"), &AnalysisConfig::default());
    assert!(response.is_success());

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["success"], json!(true));
    assert_eq!(
        value["tokens"],
        json!([
            {"type": "INT", "value": "int", "position": 0, "category": "Keyword"},
            {"type": "IDENTIFIER", "value": "x", "position": 4, "category": "Identifier"},
            {"type": "SEMICOLON", "value": ";", "position": 5, "category": "Delimiter"}
        ])
    );
    assert_eq!(
        value["symbol_table"],
        json!([{"id": 1, "name": "x", "type": "IDENTIFIER", "occurrences": 1, "first_position": 4}])
    );
    assert_eq!(value["statistics"]["total_tokens"], json!(3));
    assert_eq!(value["statistics"]["lexical_errors"], json!(0));
}

#[test]
fn test_failure_response_shape() {
    let response = analyze(&lexer(), &request("int x = @;"), &AnalysisConfig::default());
    assert!(!response.is_success());

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(
        value,
        json!({"success": false, "error": "Invalid character '@' at position 8"})
    );
}

#[test]
fn test_oversized_source_is_rejected() {
    let config = AnalysisConfig { max_source_len: 8 };
    let response = analyze(&lexer(), &request("int abc = 1;"), &config);

    match response {
        LexResponse::Failure(failure) => {
            assert_eq!(failure.error, "Source is 12 bytes, exceeding the 8 byte limit")
        }
        LexResponse::Success(_) => panic!("Expected failure"),
    }

    assert!(analyze(&lexer(), &request("int a;"), &config).is_success());
}

#[test]
fn test_handle_request_json() {
    let lexer = lexer();
    let config = AnalysisConfig::default();

    let response = handle_request_json(&lexer, r#"{"code": "x = 1;"}"#, &config);
    assert!(response.is_success());

    // A missing `code` field is treated as empty source.
    let response = handle_request_json(&lexer, "{}", &config);
    match response {
        LexResponse::Success(success) => assert!(success.tokens.is_empty()),
        LexResponse::Failure(_) => panic!("Expected success"),
    }

    let response = handle_request_json(&lexer, "not json", &config);
    match response {
        LexResponse::Failure(failure) => assert!(failure.error.starts_with("Malformed request: ")),
        LexResponse::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_symbol_entries_carry_identifier_kind() {
    let tokens = lexer().tokenize("a b a").unwrap();
    let table = SymbolTable::from_tokens(&tokens);

    assert_eq!(table.len(), 2);
    assert!(table
        .entries()
        .iter()
        .all(|entry| entry.kind == TokenKind::Identifier));
}
