//! Directory management and rules file path resolution for promptsync.
//!
//! # Overview
//!
//! - [`DirectoryConfig`] / [`ManagedDirectory`] - the `.promptsync` directory
//!   holding prompt records, created on demand in the user's home
//! - [`Ide`] - which IDE the rules are written for
//! - [`RulesPathResolver`] - maps a [`RulesScope`] to the single external
//!   rules file for that category in the current IDE, or to the IDE's
//!   settings UI when no file exists for it
//!
//! # Example
//!
//! ```rust
//! use promptsync_directory::{Ide, RulesPathResolver, RulesScope, RulesTarget};
//! use std::path::PathBuf;
//!
//! let resolver = RulesPathResolver::new(Ide::Cursor, PathBuf::from("/home/dev"));
//!
//! let project = RulesScope::project("/work/app");
//! assert_eq!(
//!     resolver.resolve(&project),
//!     RulesTarget::File(PathBuf::from("/work/app/.cursorrules"))
//! );
//!
//! // Cursor keeps global rules in its settings UI
//! assert!(resolver.resolve(&RulesScope::Global).file().is_none());
//! ```

mod config;
mod directory;
mod error;
mod ide;
mod rules_path;

pub use config::{DirectoryConfig, PromptsyncConfig};
pub use directory::{find_project_root_from, ManagedDirectory};
pub use error::{DirectoryError, Result};
pub use ide::{Ide, ParseIdeError};
pub use rules_path::{RulesPathOverrides, RulesPathResolver, RulesScope, RulesTarget};
