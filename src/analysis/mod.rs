//! The lexical-analysis request/response contract.
//!
//! A front end posts `{"code": "..."}` and receives either the token stream
//! with a derived symbol table and statistics, or a single error message.
//! Everything beyond the token stream is computed here from the tokens.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::{Lexer, ScanMode},
        tokens::{Category, Token, TokenKind},
    },
    Position,
};

#[cfg(test)]
mod tests;

pub const DEFAULT_MAX_SOURCE_LEN: usize = 512 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Inputs longer than this many bytes are rejected before scanning.
    pub max_source_len: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub value: String,
    pub position: usize,
    pub category: Category,
}

impl From<&Token> for TokenRecord {
    fn from(token: &Token) -> Self {
        TokenRecord {
            kind: token.kind,
            value: token.value.clone(),
            position: token.position(),
            category: token.category(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolEntry {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub occurrences: usize,
    pub first_position: usize,
}

/// Distinct identifiers in order of first appearance, ids starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
}

impl SymbolTable {
    pub fn from_tokens(tokens: &[Token]) -> SymbolTable {
        let mut entries: Vec<SymbolEntry> = vec![];
        let mut index: HashMap<&str, usize> = HashMap::new();

        for token in tokens.iter().filter(|token| token.kind == TokenKind::Identifier) {
            match index.get(token.value.as_str()) {
                Some(&slot) => entries[slot].occurrences += 1,
                None => {
                    index.insert(&token.value, entries.len());
                    entries.push(SymbolEntry {
                        id: entries.len() + 1,
                        name: token.value.clone(),
                        kind: TokenKind::Identifier,
                        occurrences: 1,
                        first_position: token.position(),
                    });
                }
            }
        }

        SymbolTable { entries }
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total_tokens: usize,
    pub unique_identifiers: usize,
    pub skipped_comments: usize,
    pub skipped_directives: usize,
    pub lexical_errors: usize,
    pub identifiers: usize,
    pub keywords: usize,
    pub operators: usize,
    pub literals: usize,
    pub delimiters: usize,
    pub preprocessor: usize,
    pub comments: usize,
}

impl Statistics {
    fn count(&mut self, token: &Token) {
        self.total_tokens += 1;
        match token.category() {
            Category::Identifier => self.identifiers += 1,
            Category::Keyword => self.keywords += 1,
            Category::Operator => self.operators += 1,
            Category::Literal => self.literals += 1,
            Category::Delimiter => self.delimiters += 1,
            Category::Preprocessor => self.preprocessor += 1,
            Category::Comment => self.comments += 1,
            Category::Unknown => {}
        }
    }
}

/// Successful result of analysing one source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub symbol_table: SymbolTable,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexSuccess {
    pub success: bool,
    pub tokens: Vec<TokenRecord>,
    pub symbol_table: SymbolTable,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LexFailure {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LexResponse {
    Success(LexSuccess),
    Failure(LexFailure),
}

impl LexResponse {
    pub fn success(analysis: &Analysis) -> LexResponse {
        LexResponse::Success(LexSuccess {
            success: true,
            tokens: analysis.tokens.iter().map(TokenRecord::from).collect(),
            symbol_table: analysis.symbol_table.clone(),
            statistics: analysis.statistics,
        })
    }

    pub fn failure(error: &Error) -> LexResponse {
        LexResponse::Failure(LexFailure {
            success: false,
            error: error.to_string(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LexResponse::Success(_))
    }
}

/// Tokenize `code` and derive the symbol table and statistics.
#[tracing::instrument(level = "debug", skip_all, fields(len = code.len()))]
pub fn analyze_source(lexer: &Lexer, code: &str, config: &AnalysisConfig) -> Result<Analysis, Error> {
    if code.len() > config.max_source_len {
        warn!(len = code.len(), limit = config.max_source_len, "source too large");
        return Err(Error::new(
            ErrorImpl::SourceTooLarge {
                len: code.len(),
                limit: config.max_source_len,
            },
            Position(config.max_source_len, "request".into()),
        ));
    }

    let prepared = lexer.prepare(code);
    let tokens = lexer.scan(&prepared.text, Some("request"))?;

    let symbol_table = SymbolTable::from_tokens(&tokens);
    let mut statistics = Statistics {
        unique_identifiers: symbol_table.len(),
        skipped_directives: prepared.stripped.directive_lines,
        ..Statistics::default()
    };
    for token in &tokens {
        statistics.count(token);
    }
    statistics.skipped_comments = match lexer.config().mode {
        ScanMode::Clean => prepared.stripped.comments(),
        ScanMode::Direct => tokens
            .iter()
            .filter(|token| {
                token.is_one_of_many(&[TokenKind::SingleComment, TokenKind::MultiComment])
            })
            .count(),
    };

    Ok(Analysis {
        tokens,
        symbol_table,
        statistics,
    })
}

pub fn analyze(lexer: &Lexer, request: &LexRequest, config: &AnalysisConfig) -> LexResponse {
    match analyze_source(lexer, &request.code, config) {
        Ok(analysis) => LexResponse::success(&analysis),
        Err(error) => LexResponse::failure(&error),
    }
}

/// Handle a raw JSON request body, as the HTTP endpoint would.
pub fn handle_request_json(lexer: &Lexer, body: &str, config: &AnalysisConfig) -> LexResponse {
    match serde_json::from_str::<LexRequest>(body) {
        Ok(request) => analyze(lexer, &request, config),
        Err(err) => {
            let error = Error::new(
                ErrorImpl::MalformedRequest {
                    message: err.to_string(),
                },
                Position(0, "request".into()),
            );
            warn!(%error, "rejected request");
            LexResponse::failure(&error)
        }
    }
}
