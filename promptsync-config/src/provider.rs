//! Configuration provider using Figment

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::ConfigResult;
use crate::settings::SyncSettings;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use promptsync_common::constants::ENV_PREFIX;
use promptsync_common::Pretty;
use tracing::{debug, trace};

/// Configuration provider using figment
///
/// No caching is performed: settings are read fresh on every load so edits to
/// the configuration files apply to the next command.
pub struct ConfigProvider {
    discovery: FileDiscovery,
}

impl ConfigProvider {
    pub fn new(discovery: FileDiscovery) -> Self {
        Self { discovery }
    }

    /// Load and validate settings from all sources.
    pub fn load_settings(&self) -> ConfigResult<SyncSettings> {
        let settings: SyncSettings = self.build_figment().extract()?;
        settings.validate()?;
        debug!("Loaded settings: {}", Pretty(&settings));
        Ok(settings)
    }

    /// Build the figment with all sources in precedence order
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. Discovered configuration files (global, then project)
    /// 3. Environment variables with the `PROMPTSYNC_` prefix
    fn build_figment(&self) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(SyncSettings::default()));

        for config_file in self.discovery.discover_all() {
            trace!(
                "Loading config file: {} ({:?})",
                config_file.path.display(),
                config_file.format
            );
            figment = figment.merge(Self::file_provider(&config_file));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().into()))
    }

    fn file_provider(config_file: &ConfigFile) -> Figment {
        let path = &config_file.path;
        match config_file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use serial_test::serial;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn provider(global: &TempDir, project: &TempDir) -> ConfigProvider {
        ConfigProvider::new(FileDiscovery::new(
            Some(global.path().to_path_buf()),
            Some(project.path().to_path_buf()),
        ))
    }

    #[test]
    #[serial]
    fn test_defaults_without_files() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();

        let settings = provider(&global, &project).load_settings().unwrap();
        assert_eq!(settings, SyncSettings::default());
    }

    #[test]
    #[serial]
    fn test_project_file_overrides_global_file() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            global.path().join("config.toml"),
            "ide = \"cursor\"\nauthor = \"global author\"\n",
        )
        .unwrap();
        fs::write(project.path().join("config.yaml"), "ide: windsurf\n").unwrap();

        let settings = provider(&global, &project).load_settings().unwrap();
        assert_eq!(settings.ide.as_deref(), Some("windsurf"));
        assert_eq!(settings.author, "global author");
    }

    #[test]
    #[serial]
    fn test_environment_overrides_files() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            project.path().join("config.json"),
            r#"{ "suppression_timeout_ms": 250, "project_rules_path": "docs/AI.md" }"#,
        )
        .unwrap();

        std::env::set_var("PROMPTSYNC_SUPPRESSION_TIMEOUT_MS", "750");
        let result = provider(&global, &project).load_settings();
        std::env::remove_var("PROMPTSYNC_SUPPRESSION_TIMEOUT_MS");

        let settings = result.unwrap();
        assert_eq!(settings.suppression_timeout_ms, 750);
        assert_eq!(
            settings.project_rules_path,
            Some(PathBuf::from("docs/AI.md"))
        );
    }

    #[test]
    #[serial]
    fn test_invalid_values_are_reported() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "suppression_timeout_ms = 0\n").unwrap();

        let err = provider(&global, &project).load_settings().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_a_parse_error() {
        let global = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "suppression_timeout_ms = \"soon\"\n")
            .unwrap();

        let err = provider(&global, &project).load_settings().unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }
}
