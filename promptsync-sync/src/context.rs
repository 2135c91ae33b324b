//! Explicitly constructed sync context with teardown

use crate::decision::ImportPrompter;
use crate::engine::SyncEngine;
use crate::error::{Result, SyncError};
use crate::watcher::{RulesWatcher, WatchTarget};
use promptsync_common::constants::PROMPTS_SUBDIR;
use promptsync_common::{Category, Pretty};
use promptsync_config::SyncSettings;
use promptsync_directory::{
    ManagedDirectory, PromptsyncConfig, RulesPathResolver, RulesScope, RulesTarget,
};
use promptsync_store::TomlPromptStorage;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Everything a session needs: the engine (with its store, resolver and
/// notifier), the project root, and the watcher once started.
///
/// Call [`SyncContext::dispose`] to stop the watcher; dropping the context
/// does the same.
pub struct SyncContext {
    engine: Arc<SyncEngine>,
    project_root: Option<PathBuf>,
    watcher: Mutex<Option<RulesWatcher>>,
    disposed: AtomicBool,
}

impl SyncContext {
    pub fn new(engine: SyncEngine, project_root: Option<PathBuf>) -> Self {
        Self {
            engine: Arc::new(engine),
            project_root,
            watcher: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    /// Build the store, resolver and engine described by `settings`.
    pub fn from_settings(settings: &SyncSettings, project_root: Option<PathBuf>) -> Result<Self> {
        settings.validate()?;
        debug!("Building sync context from settings:\n{}", Pretty(settings));

        let prompts_dir = match &settings.prompts_dir {
            Some(dir) => dir.clone(),
            None => ManagedDirectory::<PromptsyncConfig>::from_user_home()?
                .ensure_subdir(PROMPTS_SUBDIR)?,
        };
        let resolver = RulesPathResolver::from_user_home(settings.ide()?)?
            .with_overrides(settings.rules_overrides());
        let store = TomlPromptStorage::new(prompts_dir).with_default_author(&settings.author);

        let engine = SyncEngine::new(Arc::new(store), resolver)
            .with_suppression_timeout(settings.suppression_timeout())
            .with_author(&settings.author);
        Ok(Self::new(engine, project_root))
    }

    pub fn engine(&self) -> &Arc<SyncEngine> {
        &self.engine
    }

    pub fn project_root(&self) -> Option<&Path> {
        self.project_root.as_deref()
    }

    /// The scope for `category`; project scope needs a project root.
    pub fn scope(&self, category: Category) -> Option<RulesScope> {
        match category {
            Category::Global => Some(RulesScope::Global),
            Category::Project => self.project_root.clone().map(RulesScope::project),
        }
    }

    /// Rules files that exist as files for the configured IDE.
    pub fn watch_targets(&self) -> Vec<WatchTarget> {
        Category::ALL
            .iter()
            .filter_map(|&category| {
                let scope = self.scope(category)?;
                match self.engine.rules_target(&scope) {
                    RulesTarget::File(path) => Some(WatchTarget { category, path }),
                    RulesTarget::SettingsUi { .. } => None,
                }
            })
            .collect()
    }

    /// Start watching every file target, replacing a previous watcher.
    /// Returns the number of targets handed to the watcher.
    pub fn start_watching(&self, prompter: Arc<dyn ImportPrompter>) -> Result<usize> {
        if self.is_disposed() {
            return Err(SyncError::Watch {
                message: "sync context has been disposed".to_string(),
            });
        }
        let targets = self.watch_targets();
        let count = targets.len();
        let watcher = RulesWatcher::start(Arc::clone(&self.engine), targets, prompter)?;
        *self.watcher.lock().unwrap_or_else(|e| e.into_inner()) = Some(watcher);
        Ok(count)
    }

    pub fn is_watching(&self) -> bool {
        self.watcher
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .is_some_and(RulesWatcher::is_running)
    }

    /// Stop the watcher. Safe to call more than once.
    pub fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(mut watcher) = self
            .watcher
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
        {
            watcher.stop();
        }
        debug!("Sync context disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }
}

impl Drop for SyncContext {
    fn drop(&mut self) {
        self.dispose();
    }
}
