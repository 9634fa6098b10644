//! Error types for Cellgrid core.

use thiserror::Error;

/// Errors that can surface from document operations.
///
/// Formula problems never show up here; they are stored in the cell as an
/// error value. Only persistence and caller-supplied addresses can fail.
#[derive(Error, Debug)]
pub enum CellgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Decode error at line {line}: {message}")]
    Decode { line: usize, message: String },

    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    #[error("Invalid column name: {0}")]
    InvalidColumn(String),

    #[error("No file path set")]
    NoFilePath,
}

impl From<serde_json::Error> for CellgridError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            return CellgridError::Io(err.into());
        }
        CellgridError::Decode {
            line: err.line(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CellgridError>;
