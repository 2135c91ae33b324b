//! # promptsync sync core
//!
//! Keeps prompt records and IDE rules files consistent without feedback
//! loops.
//!
//! - [`SyncEngine::push_to_rules`] writes a record's content to the rules
//!   file of its category and emits one [`RulesChanged`] event.
//! - [`SyncEngine::detect_external_edit`] classifies a reported change as
//!   [`EditDecision::Suppressed`], [`EditDecision::AlreadyKnown`] or
//!   [`EditDecision::Novel`].
//! - [`SyncEngine::handle_external_change`] adds the user decision on top
//!   and imports novel content when asked to.
//! - [`SyncEngine::import_from_rules`] stores a rules file's content as a
//!   new record without touching the file.
//!
//! Writes by the engine are suppressed for detection per path while in
//! flight ([`SuppressionSet`]), with a timeout after which a stuck entry
//! expires.
//!
//! ```no_run
//! use promptsync_directory::{Ide, RulesPathResolver, RulesScope};
//! use promptsync_store::{PromptStorage, TomlPromptStorage};
//! use promptsync_common::Category;
//! use promptsync_sync::SyncEngine;
//! use std::sync::Arc;
//!
//! # async fn example() -> promptsync_sync::Result<()> {
//! let store = Arc::new(TomlPromptStorage::new("/home/me/.promptsync/prompts"));
//! let resolver = RulesPathResolver::new(Ide::Cursor, "/home/me");
//! let engine = SyncEngine::new(store, resolver);
//!
//! let record = engine.store().create(Category::Project).await?;
//! engine
//!     .push_to_rules(&RulesScope::project("/home/me/src/app"), &record)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod decision;
pub mod engine;
pub mod error;
pub mod notifier;
pub mod rules_files;
pub mod suppression;
pub mod watcher;

pub use context::SyncContext;
pub use decision::{ChangeOutcome, EditDecision, FixedChoice, ImportChoice, ImportPrompter};
pub use engine::SyncEngine;
pub use error::{Result, SyncError};
pub use notifier::{ChangeNotifier, RulesChanged};
pub use rules_files::{FsRulesFiles, RulesFiles};
pub use suppression::{normalize_path, SuppressionGuard, SuppressionSet};
pub use watcher::{RulesWatcher, WatchTarget};
