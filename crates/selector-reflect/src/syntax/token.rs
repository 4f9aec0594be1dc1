#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Long(i64),  // integer with an `L` suffix
    Float(f64),
    Bool(bool),
    Char(char),
    StringLit(String),
    Null,
    Ident(String),

    // Keywords
    Fn,
    As,

    // Operators
    Eq,         // =
    Arrow,      // ->
    FatArrow,   // =>

    // Punctuation
    Colon,      // :
    Comma,      // ,
    Dot,        // .
    LParen,     // (
    RParen,     // )

    Eof,
}

impl TokenKind {
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Self::Int(_) | Self::Long(_) | Self::Float(_) | Self::Bool(_)
            | Self::Char(_) | Self::StringLit(_) | Self::Null
        )
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Self::Fn | Self::As | Self::Null)
    }
}

/// Maps an identifier string to its keyword token, or returns `Ident`.
pub fn keyword_or_ident(s: String) -> TokenKind {
    match s.as_str() {
        "fn"    => TokenKind::Fn,
        "as"    => TokenKind::As,
        "null"  => TokenKind::Null,
        "true"  => TokenKind::Bool(true),
        "false" => TokenKind::Bool(false),
        _       => TokenKind::Ident(s),
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}
