//! Test fixtures for promptsync crates
//!
//! [`IsolatedTestEnvironment`] points `HOME` at a temporary directory that
//! holds an empty `.promptsync/prompts` tree and a project directory marked
//! by `.git`. Any `PROMPTSYNC_*` variables inherited from the developer's
//! shell are cleared so configuration tests see only what they set.
//!
//! The guard mutates process-wide environment variables; tests using it
//! should be marked `#[serial]`.
//!
//! ```no_run
//! use promptsync_test_utils::IsolatedTestEnvironment;
//!
//! let env = IsolatedTestEnvironment::new().unwrap();
//! std::fs::write(env.project_path().join(".cursorrules"), "Use tabs.").unwrap();
//! // HOME and PROMPTSYNC_* are restored when `env` is dropped
//! ```

use promptsync_common::constants::{DIR_NAME, ENV_PREFIX, PROMPTS_SUBDIR};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// RAII guard for an isolated HOME plus a project directory.
pub struct IsolatedTestEnvironment {
    temp_dir: TempDir,
    original_env_vars: HashMap<String, Option<String>>,
}

impl IsolatedTestEnvironment {
    pub fn new() -> std::io::Result<Self> {
        let temp_dir = TempDir::new()?;
        let home = temp_dir.path().join("home");
        let project = temp_dir.path().join("project");
        std::fs::create_dir_all(home.join(DIR_NAME).join(PROMPTS_SUBDIR))?;
        std::fs::create_dir_all(project.join(".git"))?;

        let mut env = Self {
            temp_dir,
            original_env_vars: HashMap::new(),
        };

        let inherited: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        for key in inherited {
            env.remove_env_var(&key);
        }
        env.set_env_var("HOME", home.as_os_str());
        Ok(env)
    }

    /// The isolated home directory
    pub fn home_path(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    /// `~/.promptsync` inside the isolated home
    pub fn promptsync_dir(&self) -> PathBuf {
        self.home_path().join(DIR_NAME)
    }

    /// Default prompt record root inside the isolated home
    pub fn prompts_dir(&self) -> PathBuf {
        self.promptsync_dir().join(PROMPTS_SUBDIR)
    }

    /// A project root containing `.git`
    pub fn project_path(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// Root of everything this guard created
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Set an environment variable, remembering its original value.
    pub fn set_env_var(&mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) {
        self.remember(key);
        std::env::set_var(key, value);
    }

    /// Remove an environment variable, remembering its original value.
    pub fn remove_env_var(&mut self, key: &str) {
        self.remember(key);
        std::env::remove_var(key);
    }

    fn remember(&mut self, key: &str) {
        self.original_env_vars
            .entry(key.to_string())
            .or_insert_with(|| std::env::var(key).ok());
    }
}

impl Drop for IsolatedTestEnvironment {
    fn drop(&mut self) {
        for (key, original_value) in &self.original_env_vars {
            match original_value {
                Some(value) => std::env::set_var(key, value),
                None => std::env::remove_var(key),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_layout_and_home() {
        let env = IsolatedTestEnvironment::new().unwrap();

        assert!(env.prompts_dir().is_dir());
        assert!(env.project_path().join(".git").is_dir());
        assert_eq!(std::env::var_os("HOME"), Some(env.home_path().into_os_string()));
    }

    #[test]
    #[serial]
    fn test_env_restored_on_drop() {
        let original_home = std::env::var_os("HOME");
        std::env::set_var("PROMPTSYNC_IDE", "cursor");
        {
            let mut env = IsolatedTestEnvironment::new().unwrap();
            assert!(std::env::var("PROMPTSYNC_IDE").is_err());
            env.set_env_var("PROMPTSYNC_AUTHOR", "tester");
        }
        assert_eq!(std::env::var("PROMPTSYNC_IDE").unwrap(), "cursor");
        assert!(std::env::var("PROMPTSYNC_AUTHOR").is_err());
        assert_eq!(std::env::var_os("HOME"), original_home);
        std::env::remove_var("PROMPTSYNC_IDE");
    }
}
