use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_RULE, MK_SKIP_RULE,
};

use super::{
    lexer::{LanguageProfile, Scanner, ScanMode},
    tokens::TokenKind,
};

pub type RuleHandler = fn(&mut Scanner, TokenKind, usize);

/// Where a rule needs a word boundary around its match. Keywords need one on
/// both sides, directive heads only after the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordBoundary {
    None,
    End,
    Both,
}

#[derive(Clone)]
pub struct RulePattern {
    kind: TokenKind,
    regex: Regex,
    boundary: WordBoundary,
    handler: RuleHandler,
}

impl std::fmt::Debug for RulePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulePattern")
            .field("kind", &self.kind)
            .field("regex", &self.regex.as_str())
            .field("boundary", &self.boundary)
            .finish()
    }
}

impl RulePattern {
    pub fn new(
        kind: TokenKind,
        pattern: &str,
        boundary: WordBoundary,
        handler: RuleHandler,
    ) -> Result<RulePattern, Error> {
        let regex = Regex::new(&format!("^(?:{})", pattern)).map_err(|err| {
            Error::new(
                ErrorImpl::InvalidPattern {
                    kind: kind.to_string(),
                    message: err.to_string(),
                },
                Position(0, "<rules>".into()),
            )
        })?;

        Ok(RulePattern {
            kind,
            regex,
            boundary,
            handler,
        })
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn handler(&self) -> RuleHandler {
        self.handler
    }

    /// Length of the non-empty match starting exactly at `pos`, if any.
    pub fn match_at(&self, source: &str, pos: usize) -> Option<usize> {
        let len = self.regex.find(source.get(pos..)?)?.end();
        if len == 0 {
            return None;
        }

        let bytes = source.as_bytes();
        let before = pos.checked_sub(1).map(|i| bytes[i]);
        let after = bytes.get(pos + len).copied();

        let bounded = match self.boundary {
            WordBoundary::None => true,
            WordBoundary::End => !after.is_some_and(is_word_byte),
            WordBoundary::Both => {
                !before.is_some_and(is_word_byte) && !after.is_some_and(is_word_byte)
            }
        };

        bounded.then_some(len)
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

pub const C_KEYWORDS: &[(TokenKind, &str)] = &[
    (TokenKind::Auto, "auto"),
    (TokenKind::Break, "break"),
    (TokenKind::Case, "case"),
    (TokenKind::Char, "char"),
    (TokenKind::Const, "const"),
    (TokenKind::Continue, "continue"),
    (TokenKind::Default, "default"),
    (TokenKind::Do, "do"),
    (TokenKind::Double, "double"),
    (TokenKind::Else, "else"),
    (TokenKind::Enum, "enum"),
    (TokenKind::Extern, "extern"),
    (TokenKind::Float, "float"),
    (TokenKind::For, "for"),
    (TokenKind::Goto, "goto"),
    (TokenKind::If, "if"),
    (TokenKind::Inline, "inline"),
    (TokenKind::Int, "int"),
    (TokenKind::Long, "long"),
    (TokenKind::Register, "register"),
    (TokenKind::Restrict, "restrict"),
    (TokenKind::Return, "return"),
    (TokenKind::Short, "short"),
    (TokenKind::Signed, "signed"),
    (TokenKind::Sizeof, "sizeof"),
    (TokenKind::Static, "static"),
    (TokenKind::Struct, "struct"),
    (TokenKind::Switch, "switch"),
    (TokenKind::Typedef, "typedef"),
    (TokenKind::Union, "union"),
    (TokenKind::Unsigned, "unsigned"),
    (TokenKind::Void, "void"),
    (TokenKind::Volatile, "volatile"),
    (TokenKind::While, "while"),
    (TokenKind::Bool, "_Bool"),
    (TokenKind::Complex, "_Complex"),
    (TokenKind::Imaginary, "_Imaginary"),
];

pub const EXPRESSION_KEYWORDS: &[(TokenKind, &str)] = &[
    (TokenKind::Int, "int"),
    (TokenKind::Float, "float"),
    (TokenKind::Char, "char"),
    (TokenKind::If, "if"),
    (TokenKind::Else, "else"),
    (TokenKind::While, "while"),
    (TokenKind::For, "for"),
];

// Longer operators first so that `<<=` never splits into `<<` and `=`.
const C_OPERATORS: &[(TokenKind, &str)] = &[
    (TokenKind::LeftShiftAssign, "<<="),
    (TokenKind::RightShiftAssign, ">>="),
    (TokenKind::AndAssign, "&="),
    (TokenKind::OrAssign, r"\|="),
    (TokenKind::XorAssign, r"\^="),
    (TokenKind::PlusAssign, r"\+="),
    (TokenKind::MinusAssign, "-="),
    (TokenKind::MultAssign, r"\*="),
    (TokenKind::DivAssign, "/="),
    (TokenKind::ModAssign, "%="),
    (TokenKind::Increment, r"\+\+"),
    (TokenKind::Decrement, "--"),
    (TokenKind::LeftShift, "<<"),
    (TokenKind::RightShift, ">>"),
    (TokenKind::LessEqual, "<="),
    (TokenKind::GreaterEqual, ">="),
    (TokenKind::Equal, "=="),
    (TokenKind::NotEqual, "!="),
    (TokenKind::LogicalAnd, "&&"),
    (TokenKind::LogicalOr, r"\|\|"),
    (TokenKind::Arrow, "->"),
    (TokenKind::Ellipsis, r"\.\.\."),
    (TokenKind::Assign, "="),
    (TokenKind::Plus, r"\+"),
    (TokenKind::Minus, "-"),
    (TokenKind::Multiply, r"\*"),
    (TokenKind::Divide, "/"),
    (TokenKind::Modulo, "%"),
    (TokenKind::LessThan, "<"),
    (TokenKind::GreaterThan, ">"),
    (TokenKind::BitwiseAnd, "&"),
    (TokenKind::BitwiseOr, r"\|"),
    (TokenKind::BitwiseXor, r"\^"),
    (TokenKind::BitwiseNot, "~"),
    (TokenKind::LogicalNot, "!"),
    (TokenKind::Dot, r"\."),
    (TokenKind::Question, r"\?"),
    (TokenKind::Colon, ":"),
];

const C_DELIMITERS: &[(TokenKind, &str)] = &[
    (TokenKind::LParen, r"\("),
    (TokenKind::RParen, r"\)"),
    (TokenKind::LBrace, r"\{"),
    (TokenKind::RBrace, r"\}"),
    (TokenKind::LBracket, r"\["),
    (TokenKind::RBracket, r"\]"),
    (TokenKind::Semicolon, ";"),
    (TokenKind::Comma, ","),
];

const DIRECTIVES: &[(TokenKind, &str)] = &[
    (TokenKind::Include, "#include"),
    (TokenKind::Define, "#define"),
    (TokenKind::Undef, "#undef"),
    (TokenKind::Ifdef, "#ifdef"),
    (TokenKind::Ifndef, "#ifndef"),
    (TokenKind::PpIf, "#if"),
    (TokenKind::Elif, "#elif"),
    (TokenKind::PpElse, "#else"),
    (TokenKind::Endif, "#endif"),
    (TokenKind::PpError, "#error"),
    (TokenKind::Warning, "#warning"),
    (TokenKind::Pragma, "#pragma"),
    (TokenKind::Line, "#line"),
];

// Any character except a line terminator, including U+2028 and U+2029.
const NOT_LINE_END: &str = r"[^\n\r\x{2028}\x{2029}]";

const IDENTIFIER: &str = "[a-zA-Z_][a-zA-Z0-9_]*";

// `\s` plus the byte-order mark, which JavaScript source treats as whitespace.
const WHITESPACE: &str = r"[\s\x{FEFF}]+";

/// Build the ordered rule table for a profile. Order decides every tie.
pub fn build_rules(profile: LanguageProfile, mode: ScanMode) -> Result<Vec<RulePattern>, Error> {
    match profile {
        LanguageProfile::C => c_rules(mode),
        LanguageProfile::Expression => expression_rules(),
    }
}

fn c_rules(mode: ScanMode) -> Result<Vec<RulePattern>, Error> {
    let escaped = format!(r"(?:\\{})", NOT_LINE_END);
    let mut rules = vec![
        MK_RULE!(TokenKind::HexNum, "0[xX][0-9a-fA-F]+[lLuU]*")?,
        MK_RULE!(TokenKind::OctalNum, "0[0-7]+[lLuU]*")?,
        MK_RULE!(TokenKind::FloatNum, r"[0-9]+\.[0-9]+[fFlL]?")?,
        MK_RULE!(TokenKind::FloatExp, r"[0-9]+(?:\.[0-9]+)?[eE][+-]?[0-9]+[fFlL]?")?,
        MK_RULE!(TokenKind::Integer, "[0-9]+[lLuU]*")?,
        MK_RULE!(TokenKind::String, &format!(r#""(?:[^"\\]|{})*""#, escaped))?,
        MK_RULE!(TokenKind::CharLiteral, &format!(r"'(?:[^'\\]|{})*'", escaped))?,
    ];

    rules.extend(keyword_rules(C_KEYWORDS)?);

    if mode == ScanMode::Direct {
        rules.extend(comment_rules()?);
    }

    for (kind, pattern) in C_OPERATORS.iter().chain(C_DELIMITERS) {
        rules.push(MK_RULE!(*kind, pattern)?);
    }

    if mode == ScanMode::Direct {
        for (kind, head) in DIRECTIVES {
            rules.push(MK_RULE!(*kind, head, WordBoundary::End)?);
        }
        rules.push(MK_RULE!(TokenKind::Preprocessor, &format!("#{}", IDENTIFIER))?);
    }

    rules.push(MK_RULE!(TokenKind::Identifier, IDENTIFIER)?);
    rules.push(MK_SKIP_RULE!(TokenKind::Whitespace, WHITESPACE)?);

    Ok(rules)
}

fn comment_rules() -> Result<Vec<RulePattern>, Error> {
    Ok(vec![
        MK_RULE!(TokenKind::SingleComment, &format!("//{}*", NOT_LINE_END))?,
        MK_RULE!(TokenKind::MultiComment, r"/\*(?s:.)*?\*/")?,
    ])
}

fn expression_rules() -> Result<Vec<RulePattern>, Error> {
    let mut rules = vec![MK_RULE!(TokenKind::Number, r"[0-9]+(?:\.[0-9]*)?")?];

    rules.extend(keyword_rules(EXPRESSION_KEYWORDS)?);

    rules.push(MK_RULE!(TokenKind::Identifier, IDENTIFIER)?);
    rules.push(MK_RULE!(TokenKind::Assign, "=")?);
    rules.push(MK_RULE!(TokenKind::Plus, r"\+")?);
    rules.push(MK_RULE!(TokenKind::Minus, "-")?);
    rules.push(MK_RULE!(TokenKind::Multiply, r"\*")?);
    rules.push(MK_RULE!(TokenKind::Divide, "/")?);
    rules.push(MK_RULE!(TokenKind::LParen, r"\(")?);
    rules.push(MK_RULE!(TokenKind::RParen, r"\)")?);
    rules.push(MK_RULE!(TokenKind::Semicolon, ";")?);
    rules.push(MK_SKIP_RULE!(TokenKind::Whitespace, WHITESPACE)?);

    Ok(rules)
}

fn keyword_rules(keywords: &[(TokenKind, &str)]) -> Result<Vec<RulePattern>, Error> {
    keywords
        .iter()
        .map(|(kind, word)| MK_RULE!(*kind, word, WordBoundary::Both))
        .collect()
}
