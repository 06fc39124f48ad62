//! Decode and parse errors for intvm programs.

use thiserror::Error;

/// Errors that occur while decoding an instruction word.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low two digits of the word are not a known opcode.
    #[error("invalid opcode: {0}")]
    InvalidOpcode(i64),

    /// A parameter mode digit outside {0, 1, 2}.
    #[error("invalid parameter mode: {0}")]
    InvalidMode(i64),

    /// A parameter index at or above `MAX_PARAMS`.
    #[error("no parameter {0}: instructions take at most 3")]
    NoSuchParameter(usize),
}

/// Errors that occur while parsing comma-separated program source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source contained no words at all.
    #[error("empty program source")]
    Empty,

    /// A token between commas is not a decimal integer.
    #[error("invalid word {token:?} at index {index}")]
    InvalidWord { index: usize, token: String },
}
