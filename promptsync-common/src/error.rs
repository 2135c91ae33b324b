//! Error classification shared by promptsync crates
//!
//! Each crate defines its own `thiserror` error enum. This module provides the
//! cross-cutting pieces: a [`Severity`] trait so callers can pick a log level
//! and exit code without matching on foreign variants, and [`ErrorChain`] for
//! logging an error together with all of its sources.

use std::fmt;

/// Severity levels for error classification
///
/// - **Warning**: Potential issue but operation can proceed.
/// - **Error**: Operation failed but the process can continue.
/// - **Critical**: The process cannot continue without intervention.
///
/// # Examples
///
/// ```rust
/// use promptsync_common::ErrorSeverity;
///
/// // A malformed prompt file is skipped during listing
/// let malformed = ErrorSeverity::Warning;
///
/// // A rules file write failed; the user can retry
/// let write_failed = ErrorSeverity::Error;
///
/// // The prompt directory cannot be created at all
/// let no_directory = ErrorSeverity::Critical;
/// # let _ = (malformed, write_failed, no_directory);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Potential issue but operation can proceed
    Warning,

    /// Operation failed but the process can continue
    Error,

    /// Process cannot continue, requires immediate attention
    Critical,
}

/// Trait for error types that have severity levels
///
/// # Example
///
/// ```rust
/// use promptsync_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     DirectoryUnavailable,
///     FileNotFound,
///     EmptyFile,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::DirectoryUnavailable => ErrorSeverity::Critical,
///             MyError::FileNotFound => ErrorSeverity::Error,
///             MyError::EmptyFile => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::FileNotFound.severity(), ErrorSeverity::Error);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;
}

/// Error chain formatter for detailed error reporting
pub struct ErrorChain<'a>(&'a dyn std::error::Error);

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;

        let mut current = self.0.source();
        let mut level = 1;

        while let Some(err) = current {
            write!(f, "\n{:indent$}Caused by: {}", "", err, indent = level * 2)?;
            current = err.source();
            level += 1;
        }

        Ok(())
    }
}

/// Extension trait for error types to format the full error chain
pub trait ErrorChainExt {
    /// Format the full error chain
    fn error_chain(&self) -> ErrorChain<'_>;
}

impl<E: std::error::Error> ErrorChainExt for E {
    fn error_chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }
}
