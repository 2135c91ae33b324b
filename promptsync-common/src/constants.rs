//! # Shared Constants
//!
//! Names and defaults shared across promptsync crates. Keep magic values here
//! so the store, the resolver and the CLI agree on them.

/// Name of the managed directory in the user's home and in project roots.
pub const DIR_NAME: &str = ".promptsync";

/// Subdirectory of the managed directory holding prompt records.
pub const PROMPTS_SUBDIR: &str = "prompts";

/// File extension (without the dot) of persisted prompt records.
pub const PROMPT_FILE_EXTENSION: &str = "toml";

/// Prefix for environment variables read by the configuration layer.
pub const ENV_PREFIX: &str = "PROMPTSYNC_";

/// Safety-net expiry for rules-file suppression, in milliseconds.
///
/// Long enough to cover a typical rules file write, short enough that a hung
/// write does not mask external edits for long.
pub const DEFAULT_SUPPRESSION_TIMEOUT_MS: u64 = 1_000;

/// Capacity of the change notification broadcast channel.
pub const CHANGE_CHANNEL_CAPACITY: usize = 64;
