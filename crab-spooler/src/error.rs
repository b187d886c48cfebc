//! Error types for the spooler library

use std::path::PathBuf;
use thiserror::Error;

/// Spooler error types
#[derive(Debug, Error)]
pub enum SpoolError {
    /// An OS spooler call failed
    #[error("{operation} failed: {message}")]
    Spooler {
        operation: &'static str,
        message: String,
    },

    /// The file handed to a print job does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Caller supplied an unusable argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No spooler binding exists for this platform
    #[error("Printing is not supported on this platform")]
    Unsupported,

    /// IO error while preparing a job
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpoolError {
    /// Build a [`SpoolError::Spooler`] from any displayable OS error
    pub fn spooler(operation: &'static str, message: impl ToString) -> Self {
        Self::Spooler {
            operation,
            message: message.to_string(),
        }
    }
}

/// Result type for spooler operations
pub type SpoolResult<T> = Result<T, SpoolError>;
