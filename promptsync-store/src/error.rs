//! Error types for prompt store operations

use promptsync_common::{Category, ErrorSeverity, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for prompt store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during prompt store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Prompt not found: {category}/{id}")]
    NotFound { category: Category, id: String },

    /// A persisted record failed schema checks
    #[error("Invalid prompt file {}: {message}", path.display())]
    Validation { path: PathBuf, message: String },

    #[error("Invalid prompt id '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidId(String),

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn validation(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        StoreError::Validation {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Severity for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::Validation { .. } => ErrorSeverity::Warning,
            StoreError::NotFound { .. }
            | StoreError::InvalidId(_)
            | StoreError::Io { .. }
            | StoreError::Serialization(_) => ErrorSeverity::Error,
        }
    }
}
