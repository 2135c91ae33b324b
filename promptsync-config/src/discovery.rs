//! Configuration file discovery
//!
//! Finds promptsync configuration files in the global (`~/.promptsync/`) and
//! project (`<project>/.promptsync/`) directories.

use promptsync_common::constants::DIR_NAME;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Base names tried in each directory, in merge order.
const FILE_NAMES: [&str; 4] = ["config.toml", "config.yaml", "config.yml", "config.json"];

/// Represents a discovered configuration file with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Full path to the configuration file
    pub path: PathBuf,
    /// Detected format of the file (TOML, YAML, JSON)
    pub format: ConfigFormat,
    /// Scope indicating where the file was found (global vs project)
    pub scope: ConfigScope,
}

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Configuration scope indicating where the file was discovered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    /// Global configuration from ~/.promptsync/
    Global,
    /// Project configuration from <project>/.promptsync/
    Project,
}

/// File discovery service for finding configuration files
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    global_dir: Option<PathBuf>,
    project_dir: Option<PathBuf>,
}

impl FileDiscovery {
    /// Discovery over explicit directories (each is the `.promptsync` directory itself).
    pub fn new(global_dir: Option<PathBuf>, project_dir: Option<PathBuf>) -> Self {
        Self {
            global_dir,
            project_dir,
        }
    }

    /// Discovery over `~/.promptsync` and `<project_root>/.promptsync`.
    pub fn standard(project_root: Option<&Path>) -> Self {
        let global_dir = dirs::home_dir().map(|home| home.join(DIR_NAME));
        if global_dir.is_none() {
            debug!("Home directory unavailable, skipping global configuration");
        }
        Self::new(global_dir, project_root.map(|root| root.join(DIR_NAME)))
    }

    /// Discover all configuration files in merge order
    ///
    /// Global files come first so project files override them when merged.
    pub fn discover_all(&self) -> Vec<ConfigFile> {
        let mut files = Vec::new();

        if let Some(ref dir) = self.global_dir {
            files.extend(Self::search_directory(dir, ConfigScope::Global));
        }
        if let Some(ref dir) = self.project_dir {
            files.extend(Self::search_directory(dir, ConfigScope::Project));
        }

        debug!("Discovered {} configuration files", files.len());
        for file in &files {
            trace!("Found config: {} ({:?})", file.path.display(), file.format);
        }

        files
    }

    fn search_directory(dir: &Path, scope: ConfigScope) -> Vec<ConfigFile> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        if !dir.is_dir() {
            warn!("Path exists but is not a directory: {}", dir.display());
            return Vec::new();
        }

        FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .filter(|candidate| candidate.is_file())
            .filter_map(|path| {
                let format = ConfigFormat::from_extension(path.extension()?.to_str()?)?;
                Some(ConfigFile {
                    path,
                    format,
                    scope,
                })
            })
            .collect()
    }
}
