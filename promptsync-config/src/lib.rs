//! promptsync configuration management using Figment
//!
//! Settings are merged from several sources, later sources overriding
//! earlier ones:
//!
//! 1. Built-in defaults ([`SyncSettings::default`])
//! 2. Global file: `~/.promptsync/config.{toml,yaml,yml,json}`
//! 3. Project file: `<project>/.promptsync/config.{toml,yaml,yml,json}`
//! 4. Environment variables prefixed with `PROMPTSYNC_`
//!
//! Command line flags are applied on top by the CLI.
//!
//! # Example
//!
//! ```toml
//! ide = "windsurf"
//! suppression_timeout_ms = 1500
//! project_rules_path = "docs/AI_RULES.md"
//! author = "Jordan"
//! ```
//!
//! ```no_run
//! use promptsync_config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Some(Path::new("/work/app")))?;
//! println!("suppression timeout: {:?}", settings.suppression_timeout());
//! # Ok::<(), promptsync_config::ConfigError>(())
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod settings;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::ConfigProvider;
pub use settings::SyncSettings;

use std::path::Path;

/// Load settings from the standard locations for the given project root.
pub fn load_settings(project_root: Option<&Path>) -> ConfigResult<SyncSettings> {
    ConfigProvider::new(FileDiscovery::standard(project_root)).load_settings()
}
