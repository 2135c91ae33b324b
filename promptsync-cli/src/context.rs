//! Per-invocation context shared by all commands

use crate::cli::{Cli, OutputFormat};
use crate::display::{render_rows, TableRow};
use crate::error::{CliError, CliResult};
use anyhow::{anyhow, Result};
use is_terminal::IsTerminal;
use promptsync_common::Category;
use promptsync_config::load_settings;
use promptsync_directory::{find_project_root_from, RulesScope, RulesTarget};
use promptsync_sync::{SyncContext, SyncEngine, SyncError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct CliContext {
    pub sync: SyncContext,
    pub format: OutputFormat,
    pub quiet: bool,
    /// Both stdin and stdout are terminals, so prompts can be shown
    pub interactive: bool,
}

impl CliContext {
    /// Load layered settings for the project, apply command line overrides,
    /// and build the sync context.
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let project_root = resolve_project_root(cli.project.clone())?;
        let mut settings = load_settings(Some(&project_root))
            .map_err(|e| CliError::from(SyncError::from(e)))?;
        if let Some(ide) = &cli.ide {
            settings.ide = Some(ide.clone());
        }

        let sync = SyncContext::from_settings(&settings, Some(project_root))?;
        Ok(Self {
            sync,
            format: cli.format,
            quiet: cli.quiet,
            interactive: std::io::stdin().is_terminal() && std::io::stdout().is_terminal(),
        })
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        self.sync.engine()
    }

    pub fn scope(&self, category: Category) -> Result<RulesScope> {
        self.sync
            .scope(category)
            .ok_or_else(|| anyhow!("No project root; pass --project"))
    }

    /// The rules file for `category`, or `NoRulesPath` when the IDE keeps
    /// these rules in its settings UI.
    pub fn rules_file(&self, category: Category) -> Result<PathBuf> {
        match self.engine().rules_target(&self.scope(category)?) {
            RulesTarget::File(path) => Ok(path),
            RulesTarget::SettingsUi { ide, location } => Err(SyncError::NoRulesPath {
                category,
                ide,
                location,
            }
            .into()),
        }
    }

    pub fn display<T: TableRow + Serialize>(&self, rows: &[T]) -> Result<()> {
        println!("{}", render_rows(self.format, rows)?);
        Ok(())
    }

    /// Print a status line unless `--quiet` or a structured format is used.
    pub fn say(&self, message: impl AsRef<str>) {
        if !self.quiet && self.format == OutputFormat::Table {
            println!("{}", message.as_ref());
        }
    }

    pub fn dispose(&self) {
        self.sync.dispose();
    }
}

/// `--project`, else the nearest ancestor of the working directory that
/// contains `.git`, else the working directory.
pub fn resolve_project_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        return Ok(root);
    }
    let cwd = std::env::current_dir()?;
    Ok(project_root_from(&cwd))
}

fn project_root_from(cwd: &Path) -> PathBuf {
    find_project_root_from(cwd).unwrap_or_else(|| cwd.to_path_buf())
}
