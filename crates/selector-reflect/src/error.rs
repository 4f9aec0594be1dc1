//! Errors reported while quoting a selector fragment.
//!
//! Matching errors live in [`crate::reflect::ReflectError`]; these cover the
//! front end only: lexing, parsing and binding against the catalog.

use thiserror::Error;

/// Error codes prefixed by phase: L = lexer, P = parser, B = binder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Lexer
    L001, // unexpected character
    L002, // unterminated string or char literal
    L003, // invalid escape sequence
    L004, // number literal out of range

    // Parser
    P001, // unexpected token
    P002, // missing expected token

    // Binder
    B001, // unknown identifier or type
    B002, // member not found on type
    B003, // no applicable overload
    B004, // ambiguous overload
    B005, // type mismatch
    B006, // member not assignable
    B007, // method group used as a value
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::L001 => "L001",
            Self::L002 => "L002",
            Self::L003 => "L003",
            Self::L004 => "L004",
            Self::P001 => "P001",
            Self::P002 => "P002",
            Self::B001 => "B001",
            Self::B002 => "B002",
            Self::B003 => "B003",
            Self::B004 => "B004",
            Self::B005 => "B005",
            Self::B006 => "B006",
            Self::B007 => "B007",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{code}] {line}:{column} {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Error {
    pub fn new(code: ErrorCode, line: usize, column: usize, message: impl Into<String>) -> Self {
        Self { code, line, column, message: message.into() }
    }
}
