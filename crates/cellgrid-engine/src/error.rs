//! Error types for the formula engine.

use thiserror::Error;

/// A formula body could not be parsed.
///
/// `position` is the byte offset into the formula body (the text after `=`).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error at {position}: {message}")]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

pub type ParseResult<T> = std::result::Result<T, ParseError>;
