//! Error types for directory management operations.

use promptsync_common::{ErrorSeverity, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using DirectoryError.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors that can occur during directory operations.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Cannot determine home directory.
    #[error("cannot determine home directory")]
    NoHomeDirectory,

    /// Failed to create directory.
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DirectoryError {
    /// Create a DirectoryCreation error.
    pub fn directory_creation(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryCreation {
            path: path.into(),
            source,
        }
    }

    /// Create a FileWrite error.
    pub fn file_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileWrite {
            path: path.into(),
            source,
        }
    }
}

impl Severity for DirectoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            DirectoryError::NoHomeDirectory => ErrorSeverity::Critical,
            DirectoryError::DirectoryCreation { .. } => ErrorSeverity::Critical,
            DirectoryError::FileWrite { .. } => ErrorSeverity::Error,
        }
    }
}
