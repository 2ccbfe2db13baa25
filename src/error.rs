//! Error types for the mamushi lexer and runtime

use thiserror::Error;

/// Ill-formed source text. The lexer does not recover; construction fails
/// as a whole.
#[derive(Debug, Error)]
pub enum LexerError {
    #[error("string literal is missing a closing quote")]
    UnterminatedString,

    #[error("unknown escape sequence '\\{0}'")]
    UnknownEscape(char),

    #[error("line break inside string literal")]
    LineBreakInString,

    #[error("string literal is not valid UTF-8")]
    InvalidUtf8,

    #[error("number literal out of range: {0}")]
    NumberOutOfRange(String),

    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Ill-typed or ill-arity runtime operation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("call of undefined method '{method}'")]
    UndefinedMethod { method: String },

    #[error("cannot compare objects for {operation}")]
    NotComparable { operation: &'static str },

    #[error("comparison method '{method}' must return Bool")]
    NonBoolComparison { method: &'static str },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type LexResult<T> = std::result::Result<T, LexerError>;
pub type RuntimeResult<T> = std::result::Result<T, RuntimeError>;
