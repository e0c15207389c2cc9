//! Infrastructure error type

use thiserror::Error;

/// Errors that can occur in the file-backed source and sink
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying file system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON
    #[error("Snapshot parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Snapshot content does not match the expected shape
    #[error("Invalid snapshot: {0}")]
    InvalidData(String),
}
