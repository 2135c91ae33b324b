//! Rules file path resolution.
//!
//! Every IDE keeps its AI rules in its own place. For each category the
//! resolver returns exactly one target: a file path, or the IDE's settings UI
//! when that IDE has no file for the category.

use crate::ide::Ide;
use promptsync_common::Category;
use std::path::{Path, PathBuf};

/// Where a sync applies.
///
/// The project variant carries its root, so a project sync without a root
/// cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RulesScope {
    Global,
    Project { root: PathBuf },
}

impl RulesScope {
    pub fn project(root: impl Into<PathBuf>) -> Self {
        RulesScope::Project { root: root.into() }
    }

    pub fn category(&self) -> Category {
        match self {
            RulesScope::Global => Category::Global,
            RulesScope::Project { .. } => Category::Project,
        }
    }
}

/// The resolved destination for a category's rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesTarget {
    /// A plain text file holding the rules
    File(PathBuf),
    /// No file exists; rules are entered through the IDE's settings.
    /// `location` tells the user where to paste them.
    SettingsUi { ide: Ide, location: &'static str },
}

impl RulesTarget {
    /// The file path, if this target is file based.
    pub fn file(&self) -> Option<&Path> {
        match self {
            RulesTarget::File(path) => Some(path),
            RulesTarget::SettingsUi { .. } => None,
        }
    }
}

/// User supplied replacements for the default rules file locations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RulesPathOverrides {
    /// Absolute path, `~/` is expanded against the resolver's home
    pub global: Option<PathBuf>,
    /// Joined to the project root unless absolute
    pub project: Option<PathBuf>,
}

/// Resolves rules file targets for one IDE.
#[derive(Debug, Clone)]
pub struct RulesPathResolver {
    ide: Ide,
    home: PathBuf,
    overrides: RulesPathOverrides,
}

impl RulesPathResolver {
    pub fn new(ide: Ide, home: impl Into<PathBuf>) -> Self {
        Self {
            ide,
            home: home.into(),
            overrides: RulesPathOverrides::default(),
        }
    }

    /// Resolver rooted at the current user's home directory.
    pub fn from_user_home(ide: Ide) -> crate::Result<Self> {
        let home = dirs::home_dir().ok_or(crate::DirectoryError::NoHomeDirectory)?;
        Ok(Self::new(ide, home))
    }

    pub fn with_overrides(mut self, overrides: RulesPathOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn ide(&self) -> Ide {
        self.ide
    }

    pub fn resolve(&self, scope: &RulesScope) -> RulesTarget {
        match scope {
            RulesScope::Global => self.resolve_global(),
            RulesScope::Project { root } => self.resolve_project(root),
        }
    }

    fn resolve_global(&self) -> RulesTarget {
        if let Some(path) = &self.overrides.global {
            return RulesTarget::File(self.expand_home(path));
        }

        match self.ide {
            Ide::Windsurf => RulesTarget::File(
                self.home
                    .join(".codeium")
                    .join("windsurf")
                    .join("memories")
                    .join("global_rules.md"),
            ),
            Ide::VsCode => RulesTarget::SettingsUi {
                ide: self.ide,
                location: "Settings > GitHub Copilot > Chat: Code Generation Instructions",
            },
            Ide::Cursor => RulesTarget::SettingsUi {
                ide: self.ide,
                location: "Cursor Settings > Rules > User Rules",
            },
            Ide::Trae => RulesTarget::SettingsUi {
                ide: self.ide,
                location: "Trae Settings > Rules > User Rules",
            },
        }
    }

    fn resolve_project(&self, root: &Path) -> RulesTarget {
        if let Some(path) = &self.overrides.project {
            let path = self.expand_home(path);
            return RulesTarget::File(if path.is_absolute() {
                path
            } else {
                root.join(path)
            });
        }

        let relative: &[&str] = match self.ide {
            Ide::VsCode => &[".github", "copilot-instructions.md"],
            Ide::Cursor => &[".cursorrules"],
            Ide::Windsurf => &[".windsurfrules"],
            Ide::Trae => &[".trae", "rules", "project_rules.md"],
        };
        RulesTarget::File(relative.iter().fold(root.to_path_buf(), |p, c| p.join(c)))
    }

    fn expand_home(&self, path: &Path) -> PathBuf {
        match path.strip_prefix("~") {
            Ok(rest) => self.home.join(rest),
            Err(_) => path.to_path_buf(),
        }
    }
}
