use lazy_static::lazy_static;
use serde::{Serialize, Serializer};
use std::{collections::HashMap, fmt::Display};

use crate::Span;

/// Declares the closed set of token kinds together with their canonical
/// names and the category each one belongs to.
macro_rules! token_kinds {
    ($($category:ident { $($kind:ident => $name:literal),* $(,)? })*) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
        pub enum TokenKind {
            $($($kind,)*)*
            // Matched to advance the cursor, never emitted.
            Whitespace,
        }

        impl TokenKind {
            pub const ALL: &'static [TokenKind] = &[$($(TokenKind::$kind,)*)* TokenKind::Whitespace];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($(TokenKind::$kind => $name,)*)*
                    TokenKind::Whitespace => "WHITESPACE",
                }
            }
        }

        const CATEGORY_TABLE: &[(TokenKind, Category)] = &[
            $($((TokenKind::$kind, Category::$category),)*)*
        ];
    };
}

token_kinds! {
    Literal {
        HexNum => "HEX_NUM",
        OctalNum => "OCTAL_NUM",
        FloatNum => "FLOAT_NUM",
        FloatExp => "FLOAT_EXP",
        Integer => "INTEGER",
        String => "STRING",
        CharLiteral => "CHAR_LITERAL",
        Number => "NUMBER",
    }
    Keyword {
        Auto => "AUTO",
        Break => "BREAK",
        Case => "CASE",
        Char => "CHAR",
        Const => "CONST",
        Continue => "CONTINUE",
        Default => "DEFAULT",
        Do => "DO",
        Double => "DOUBLE",
        Else => "ELSE",
        Enum => "ENUM",
        Extern => "EXTERN",
        Float => "FLOAT",
        For => "FOR",
        Goto => "GOTO",
        If => "IF",
        Inline => "INLINE",
        Int => "INT",
        Long => "LONG",
        Register => "REGISTER",
        Restrict => "RESTRICT",
        Return => "RETURN",
        Short => "SHORT",
        Signed => "SIGNED",
        Sizeof => "SIZEOF",
        Static => "STATIC",
        Struct => "STRUCT",
        Switch => "SWITCH",
        Typedef => "TYPEDEF",
        Union => "UNION",
        Unsigned => "UNSIGNED",
        Void => "VOID",
        Volatile => "VOLATILE",
        While => "WHILE",
        Bool => "_BOOL",
        Complex => "_COMPLEX",
        Imaginary => "_IMAGINARY",
    }
    Operator {
        LeftShiftAssign => "LEFT_SHIFT_ASSIGN",
        RightShiftAssign => "RIGHT_SHIFT_ASSIGN",
        AndAssign => "AND_ASSIGN",
        OrAssign => "OR_ASSIGN",
        XorAssign => "XOR_ASSIGN",
        PlusAssign => "PLUS_ASSIGN",
        MinusAssign => "MINUS_ASSIGN",
        MultAssign => "MULT_ASSIGN",
        DivAssign => "DIV_ASSIGN",
        ModAssign => "MOD_ASSIGN",
        Increment => "INCREMENT",
        Decrement => "DECREMENT",
        LeftShift => "LEFT_SHIFT",
        RightShift => "RIGHT_SHIFT",
        LessEqual => "LESS_EQUAL",
        GreaterEqual => "GREATER_EQUAL",
        Equal => "EQUAL",
        NotEqual => "NOT_EQUAL",
        LogicalAnd => "LOGICAL_AND",
        LogicalOr => "LOGICAL_OR",
        Arrow => "ARROW",
        Ellipsis => "ELLIPSIS",
        Assign => "ASSIGN",
        Plus => "PLUS",
        Minus => "MINUS",
        Multiply => "MULTIPLY",
        Divide => "DIVIDE",
        Modulo => "MODULO",
        LessThan => "LESS_THAN",
        GreaterThan => "GREATER_THAN",
        BitwiseAnd => "BITWISE_AND",
        BitwiseOr => "BITWISE_OR",
        BitwiseXor => "BITWISE_XOR",
        BitwiseNot => "BITWISE_NOT",
        LogicalNot => "LOGICAL_NOT",
        Dot => "DOT",
        Question => "QUESTION",
        Colon => "COLON",
    }
    Delimiter {
        LParen => "LPAREN",
        RParen => "RPAREN",
        LBrace => "LBRACE",
        RBrace => "RBRACE",
        LBracket => "LBRACKET",
        RBracket => "RBRACKET",
        Semicolon => "SEMICOLON",
        Comma => "COMMA",
    }
    Preprocessor {
        Include => "INCLUDE",
        Define => "DEFINE",
        Undef => "UNDEF",
        Ifdef => "IFDEF",
        Ifndef => "IFNDEF",
        PpIf => "IF_PP",
        Elif => "ELIF",
        PpElse => "ELSE_PP",
        Endif => "ENDIF",
        PpError => "ERROR",
        Warning => "WARNING",
        Pragma => "PRAGMA",
        Line => "LINE",
        Preprocessor => "PREPROCESSOR",
    }
    Comment {
        SingleComment => "SINGLE_COMMENT",
        MultiComment => "MULTI_COMMENT",
    }
    Identifier {
        Identifier => "IDENTIFIER",
    }
}

lazy_static! {
    pub static ref CATEGORY_LOOKUP: HashMap<TokenKind, Category> =
        CATEGORY_TABLE.iter().copied().collect();
    pub static ref NAME_LOOKUP: HashMap<&'static str, TokenKind> =
        TokenKind::ALL.iter().map(|kind| (kind.as_str(), *kind)).collect();
}

impl TokenKind {
    pub fn from_name(name: &str) -> Option<TokenKind> {
        NAME_LOOKUP.get(name).copied()
    }

    pub fn category(&self) -> Category {
        category_of(*self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Coarse display grouping of token kinds.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum Category {
    Literal,
    Keyword,
    Operator,
    Identifier,
    Delimiter,
    Preprocessor,
    Comment,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Literal => "Literal",
            Category::Keyword => "Keyword",
            Category::Operator => "Operator",
            Category::Identifier => "Identifier",
            Category::Delimiter => "Delimiter",
            Category::Preprocessor => "Preprocessor",
            Category::Comment => "Comment",
            Category::Unknown => "Unknown",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kinds missing from the table (only `Whitespace`) fall back to `Unknown`.
pub fn category_of(kind: TokenKind) -> Category {
    CATEGORY_LOOKUP
        .get(&kind)
        .copied()
        .unwrap_or(Category::Unknown)
}

/// Name-keyed form for callers holding token types as strings.
pub fn category_of_name(name: &str) -> Category {
    TokenKind::from_name(name).map_or(Category::Unknown, category_of)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?}) @ {}", self.kind, self.value, self.span.start.0)
    }
}

impl Token {
    /// Byte offset of the first character of the lexeme.
    pub fn position(&self) -> usize {
        self.span.start.0
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn category(&self) -> Category {
        self.kind.category()
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
