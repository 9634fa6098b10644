//! Error types for the cellgrid command line

use thiserror::Error;

/// Errors from parsing command-line arguments
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    #[error("{0} requires a value")]
    MissingValue(String),

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),

    #[error("Expected ADDR=EXPR, got: {0}")]
    InvalidAssignment(String),

    #[error("Invalid row number: {0}")]
    InvalidRow(String),
}
