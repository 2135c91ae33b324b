//! Error handling for the promptsync CLI
//!
//! Commands work with `anyhow` internally. At the edge, errors become a
//! [`CliError`] carrying the short message shown to the user and the exit
//! code; the full chain is only logged.

use std::error::Error;
use std::fmt;

use crate::exit_codes::{EXIT_ERROR, EXIT_WARNING};
use promptsync_common::{ErrorSeverity, Severity};
use promptsync_config::ConfigError;
use promptsync_store::StoreError;
use promptsync_sync::SyncError;

/// CLI-specific result type that preserves error information
pub type CliResult<T> = Result<T, CliError>;

/// CLI error type that includes both error information and suggested exit code
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Get the full error chain as a formatted string
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

fn exit_code_for(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Warning => EXIT_WARNING,
        ErrorSeverity::Error | ErrorSeverity::Critical => EXIT_ERROR,
    }
}

impl From<SyncError> for CliError {
    fn from(error: SyncError) -> Self {
        Self {
            message: error.user_message(),
            exit_code: exit_code_for(error.severity()),
            source: Some(Box::new(error)),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        if let Some(sync) = error.downcast_ref::<SyncError>() {
            return Self {
                message: sync.user_message(),
                exit_code: exit_code_for(sync.severity()),
                source: Some(error.into()),
            };
        }
        let (message, exit_code) = if let Some(store) = error.downcast_ref::<StoreError>() {
            (store.to_string(), exit_code_for(store.severity()))
        } else if let Some(config) = error.downcast_ref::<ConfigError>() {
            (config.to_string(), exit_code_for(config.severity()))
        } else {
            (error.to_string(), EXIT_ERROR)
        };
        Self {
            message,
            exit_code,
            source: Some(error.into()),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

/// Convert a CliResult to an exit code, printing the short message on failure
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::debug!("Error: {}", e.full_chain());
            eprintln!("Error: {}", e.message);
            e.exit_code
        }
    }
}
