//! promptsync prompt store
//!
//! CRUD over prompt records persisted one TOML file per record under a root
//! directory partitioned by category:
//!
//! ```text
//! <root>/global/<id>.toml
//! <root>/project/<id>.toml
//! ```
//!
//! Records are addressed by `(Category, PromptId)`. Listing never fails on a
//! single malformed file; the failure is reported next to the records that
//! did load.

pub mod error;
pub mod format;
pub mod memory;
pub mod storage;
pub mod types;

pub use error::{Result, StoreError};
pub use memory::MemoryPromptStorage;
pub use storage::{LoadFailure, PromptListing, PromptStorage, TomlPromptStorage};
pub use types::{PromptId, PromptMeta, PromptRecord};
