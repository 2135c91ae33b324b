//! Error types for the sync core

use promptsync_common::{Category, ErrorSeverity, Severity};
use promptsync_config::ConfigError;
use promptsync_directory::{DirectoryError, Ide};
use promptsync_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;

/// Errors raised by the sync engine and its context
#[derive(Error, Debug)]
pub enum SyncError {
    /// The category has no file-based rules target for this IDE
    #[error("{ide} has no {category} rules file; set it in {location}")]
    NoRulesPath {
        category: Category,
        ide: Ide,
        location: &'static str,
    },

    #[error("Failed to read rules file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write rules file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rules file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Record belongs to category '{actual}' but was pushed to '{expected}'")]
    CategoryMismatch { expected: Category, actual: Category },

    #[error("Prompt store error")]
    Store(#[from] StoreError),

    #[error("File watcher error: {message}")]
    Watch { message: String },

    #[error("Configuration error")]
    Config(#[from] ConfigError),

    #[error("Directory error")]
    Directory(#[from] DirectoryError),
}

impl SyncError {
    /// Short message for the user. Diagnostic detail stays in the error
    /// chain and the logs.
    pub fn user_message(&self) -> String {
        match self {
            SyncError::NoRulesPath { .. }
            | SyncError::NotFound { .. }
            | SyncError::CategoryMismatch { .. }
            | SyncError::Watch { .. } => self.to_string(),
            SyncError::Read { path, source } => {
                format!("Could not read {}: {}", path.display(), source.kind())
            }
            SyncError::Write { path, source } => {
                format!("Could not write {}: {}", path.display(), source.kind())
            }
            SyncError::Store(e) => e.to_string(),
            SyncError::Config(e) => e.to_string(),
            SyncError::Directory(e) => e.to_string(),
        }
    }

    /// Whether the caller should fall back to copying content to the
    /// clipboard and pointing at the IDE's settings UI.
    pub fn is_no_rules_path(&self) -> bool {
        matches!(self, SyncError::NoRulesPath { .. })
    }
}

impl Severity for SyncError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SyncError::NoRulesPath { .. } => ErrorSeverity::Warning,
            SyncError::Read { .. }
            | SyncError::Write { .. }
            | SyncError::NotFound { .. }
            | SyncError::CategoryMismatch { .. }
            | SyncError::Watch { .. } => ErrorSeverity::Error,
            SyncError::Store(e) => e.severity(),
            SyncError::Config(e) => e.severity(),
            SyncError::Directory(e) => e.severity(),
        }
    }
}
