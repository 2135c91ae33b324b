//! Typed promptsync settings.

use crate::error::{ConfigError, ConfigResult};
use promptsync_common::constants::DEFAULT_SUPPRESSION_TIMEOUT_MS;
use promptsync_directory::{Ide, RulesPathOverrides};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings consumed when building a sync context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// IDE identifier (`vscode`, `cursor`, `windsurf`, `trae`); VS Code when unset
    pub ide: Option<String>,
    /// Directory holding prompt records; `~/.promptsync/prompts` when unset
    pub prompts_dir: Option<PathBuf>,
    /// Expiry for rules file suppression
    pub suppression_timeout_ms: u64,
    pub global_rules_path: Option<PathBuf>,
    pub project_rules_path: Option<PathBuf>,
    /// Author written into newly created records
    pub author: String,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            ide: None,
            prompts_dir: None,
            suppression_timeout_ms: DEFAULT_SUPPRESSION_TIMEOUT_MS,
            global_rules_path: None,
            project_rules_path: None,
            author: String::new(),
        }
    }
}

impl SyncSettings {
    /// Check values serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.suppression_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "suppression_timeout_ms",
                "must be greater than zero",
            ));
        }
        self.ide()?;
        Ok(())
    }

    pub fn ide(&self) -> ConfigResult<Ide> {
        match &self.ide {
            Some(name) => name
                .parse()
                .map_err(|e: promptsync_directory::ParseIdeError| {
                    ConfigError::invalid_value("ide", e.to_string())
                }),
            None => Ok(Ide::default()),
        }
    }

    pub fn suppression_timeout(&self) -> Duration {
        Duration::from_millis(self.suppression_timeout_ms)
    }

    pub fn rules_overrides(&self) -> RulesPathOverrides {
        RulesPathOverrides {
            global: self.global_rules_path.clone(),
            project: self.project_rules_path.clone(),
        }
    }
}
