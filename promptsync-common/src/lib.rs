//! # promptsync common
//!
//! Foundational types shared by every promptsync crate.
//!
//! ## Modules
//!
//! - [`category`] - The [`Category`] sum type partitioning prompts into global and project
//! - [`constants`] - Directory names, file extensions and default timeouts
//! - [`error`] - Error severity classification and error chain formatting
//! - [`logging`] - The [`Pretty`] wrapper for structured log output
//! - [`ulid_generator`] - Monotonic ULID generation for record ids

pub mod category;
pub mod constants;
pub mod error;
pub mod logging;
pub mod ulid_generator;

pub use category::{Category, ParseCategoryError};
pub use error::{ErrorChain, ErrorChainExt, ErrorSeverity, Severity};
pub use logging::Pretty;
pub use ulid_generator::{generate_monotonic_ulid, generate_monotonic_ulid_string};
