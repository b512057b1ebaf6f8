//! Error types for log decoding.

use cm_core::Quantity;
use thiserror::Error;

/// Result type for log decoding.
pub type ParseResult<T> = Result<T, ParseError>;

/// A line matched a trigger but its value could not be decoded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Token at the expected position is not a floating-point number.
    #[error("Invalid number for {quantity} at token {position}: {token:?} (line: {line:?})")]
    InvalidNumber {
        quantity: Quantity,
        position: usize,
        token: String,
        line: String,
    },

    /// Line has fewer tokens than the expected value position.
    #[error("Missing token {position} for {quantity} (line: {line:?})")]
    MissingToken {
        quantity: Quantity,
        position: usize,
        line: String,
    },
}

impl ParseError {
    pub fn quantity(&self) -> Quantity {
        match self {
            ParseError::InvalidNumber { quantity, .. } | ParseError::MissingToken { quantity, .. } => {
                *quantity
            }
        }
    }

    /// Raw log line that failed to decode.
    pub fn line(&self) -> &str {
        match self {
            ParseError::InvalidNumber { line, .. } | ParseError::MissingToken { line, .. } => line,
        }
    }
}
