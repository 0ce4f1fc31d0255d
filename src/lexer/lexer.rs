use std::{borrow::Cow, sync::Arc};

use lazy_static::lazy_static;
use tracing::{debug, trace, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::{
    preprocess::{CodeCleaner, StripStats},
    rules::{build_rules, RulePattern},
    tokens::{Token, TokenKind},
};

lazy_static! {
    static ref DEFAULT_LEXER: Result<Lexer, Error> = Lexer::new(LexerConfig::default());
}

/// Which rule set the lexer is built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LanguageProfile {
    /// C89/C99/C11 subset: literals, keywords, operators, delimiters.
    #[default]
    C,
    /// Arithmetic expressions with a handful of keywords.
    Expression,
}

/// How directives and comments are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    /// Strip directive lines and comments from the text, then scan what is left.
    #[default]
    Clean,
    /// Scan the raw text and emit directive heads and comments as tokens.
    Direct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LexerConfig {
    pub profile: LanguageProfile,
    pub mode: ScanMode,
}

#[derive(Debug, Default)]
pub struct LexerBuilder {
    config: LexerConfig,
}

impl LexerBuilder {
    pub fn profile(mut self, profile: LanguageProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.config.mode = mode;
        self
    }

    pub fn build(self) -> Result<Lexer, Error> {
        Lexer::new(self.config)
    }
}

/// Text handed to the scan loop, plus what was removed to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared<'src> {
    pub text: Cow<'src, str>,
    pub stripped: StripStats,
}

/// An immutable rule table. Every `tokenize` call runs on its own `Scanner`,
/// so one `Lexer` can be shared across threads.
#[derive(Debug, Clone)]
pub struct Lexer {
    config: LexerConfig,
    patterns: Vec<RulePattern>,
    cleaner: Option<CodeCleaner>,
}

impl Lexer {
    pub fn new(config: LexerConfig) -> Result<Lexer, Error> {
        let patterns = build_rules(config.profile, config.mode)?;
        let cleaner = match (config.profile, config.mode) {
            (LanguageProfile::C, ScanMode::Clean) => Some(CodeCleaner::new()?),
            _ => None,
        };

        debug!(
            profile = ?config.profile,
            mode = ?config.mode,
            rules = patterns.len(),
            "built lexer"
        );

        Ok(Lexer {
            config,
            patterns,
            cleaner,
        })
    }

    pub fn builder() -> LexerBuilder {
        LexerBuilder::default()
    }

    pub fn config(&self) -> LexerConfig {
        self.config
    }

    pub fn patterns(&self) -> &[RulePattern] {
        &self.patterns
    }

    /// Produce the text the scan loop runs over.
    ///
    /// The C profile applies the cleaning pass in clean mode. The expression
    /// profile decodes HTML character references, since its input arrives
    /// escaped from an editor.
    pub fn prepare<'src>(&self, source: &'src str) -> Prepared<'src> {
        if self.config.profile == LanguageProfile::Expression {
            return Prepared {
                text: html_escape::decode_html_entities(source),
                stripped: StripStats::default(),
            };
        }

        match &self.cleaner {
            Some(cleaner) => {
                let cleaned = cleaner.clean(source);
                Prepared {
                    text: Cow::Owned(cleaned.text),
                    stripped: cleaned.stripped,
                }
            }
            None => Prepared {
                text: Cow::Borrowed(source),
                stripped: StripStats::default(),
            },
        }
    }

    pub fn tokenize(&self, source: &str) -> Result<Vec<Token>, Error> {
        self.tokenize_with_file(source, None)
    }

    pub fn tokenize_with_file(&self, source: &str, file: Option<&str>) -> Result<Vec<Token>, Error> {
        let prepared = self.prepare(source);
        self.scan(&prepared.text, file)
    }

    /// Run the scan loop over `text` as-is. Positions are offsets into `text`.
    pub fn scan(&self, text: &str, file: Option<&str>) -> Result<Vec<Token>, Error> {
        let mut scanner = Scanner::new(text, file);
        debug!(file = %scanner.file, len = text.len(), "tokenizing");

        while !scanner.at_eof() {
            let matched = self
                .patterns
                .iter()
                .find_map(|pattern| pattern.match_at(text, scanner.pos).map(|len| (pattern, len)));

            match matched {
                Some((pattern, len)) => (pattern.handler())(&mut scanner, pattern.kind(), len),
                None => {
                    let error = Error::new(
                        ErrorImpl::InvalidCharacter {
                            character: scanner.at(),
                        },
                        Position::new(scanner.pos, &scanner.file),
                    );
                    warn!(%error, "lexical error");
                    return Err(error);
                }
            }
        }

        debug!(tokens = scanner.tokens.len(), "tokenized");
        Ok(scanner.tokens)
    }
}

/// Per-call cursor state.
pub struct Scanner<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    file: Arc<str>,
}

impl<'src> Scanner<'src> {
    fn new(source: &'src str, file: Option<&str>) -> Scanner<'src> {
        Scanner {
            source,
            tokens: vec![],
            pos: 0,
            file: Arc::from(file.unwrap_or("shell")),
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Character under the cursor. Only called before EOF.
    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &'src str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

pub fn emit_handler(scanner: &mut Scanner, kind: TokenKind, len: usize) {
    let value = scanner.remainder()[..len].to_string();
    let token = MK_TOKEN!(kind, value, scanner.pos, &scanner.file);

    trace!(%token, "emit");
    scanner.push(token);
    scanner.advance_n(len);
}

pub fn skip_handler(scanner: &mut Scanner, _kind: TokenKind, len: usize) {
    scanner.advance_n(len);
}

/// Tokenize with the default C lexer in clean mode.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let lexer = DEFAULT_LEXER.as_ref().map_err(Clone::clone)?;
    lexer.tokenize(source)
}
