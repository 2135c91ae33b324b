//! Watches resolved rules files and feeds changes to the engine

use crate::decision::ImportPrompter;
use crate::engine::SyncEngine;
use crate::error::{Result, SyncError};
use crate::suppression::normalize_path;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use promptsync_common::Category;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, trace, warn};

/// A rules file to watch and the category its content belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub category: Category,
    pub path: PathBuf,
}

/// Background watcher over a set of rules files.
///
/// Each file's parent directory is watched non-recursively; create and modify
/// events on a watched file are passed to
/// [`SyncEngine::handle_external_change`] on their own task so a change
/// awaiting the user does not hold up the others.
pub struct RulesWatcher {
    watcher_handle: Option<JoinHandle<()>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl RulesWatcher {
    /// Start watching. Must be called from within a tokio runtime.
    ///
    /// Missing parent directories are created so a rules file that does not
    /// exist yet is still seen when it first appears. Targets whose parent
    /// cannot be created are skipped with a warning.
    pub fn start(
        engine: Arc<SyncEngine>,
        targets: Vec<WatchTarget>,
        prompter: Arc<dyn ImportPrompter>,
    ) -> Result<Self> {
        let mut watched: HashMap<PathBuf, Category> = HashMap::new();
        let mut dirs: HashSet<PathBuf> = HashSet::new();
        for target in targets {
            let Some(parent) = target.path.parent() else {
                warn!("Not watching {}: no parent directory", target.path.display());
                continue;
            };
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Not watching {}: {}", target.path.display(), e);
                continue;
            }
            let path = normalize_path(&target.path);
            if let Some(parent) = path.parent() {
                dirs.insert(parent.to_path_buf());
                watched.insert(path, target.category);
            }
        }

        if watched.is_empty() {
            warn!("No rules files to watch");
            return Ok(Self {
                watcher_handle: None,
                shutdown_tx: None,
            });
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let (tx, mut rx) = mpsc::channel(100);
        let mut watcher = RecommendedWatcher::new(
            move |result: std::result::Result<Event, notify::Error>| match result {
                Ok(event) => {
                    if let Err(e) = tx.blocking_send(event) {
                        error!("Failed to send file watch event: {}", e);
                    }
                }
                Err(e) => error!("File watch error: {}", e),
            },
            notify::Config::default(),
        )
        .map_err(|e| SyncError::Watch {
            message: format!("Failed to create file watcher: {}", e),
        })?;

        for dir in &dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(|e| SyncError::Watch {
                    message: format!("Failed to watch {}: {}", dir.display(), e),
                })?;
            debug!("Watching directory {}", dir.display());
        }
        info!("Watching {} rules file(s)", watched.len());

        let handle = tokio::spawn(async move {
            // Dropping the notify watcher stops event delivery
            let _watcher = watcher;
            let mut tasks = JoinSet::new();

            loop {
                tokio::select! {
                    event = rx.recv() => {
                        let Some(event) = event else {
                            debug!("File watch channel closed");
                            break;
                        };
                        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                            trace!("Ignoring event kind {:?}", event.kind);
                            continue;
                        }
                        for path in event.paths {
                            let Some(&category) = watched.get(&normalize_path(&path)) else {
                                continue;
                            };
                            debug!("Rules file changed: {}", path.display());
                            let engine = Arc::clone(&engine);
                            let prompter = Arc::clone(&prompter);
                            tasks.spawn(async move {
                                match engine
                                    .handle_external_change(category, &path, prompter.as_ref())
                                    .await
                                {
                                    Ok(outcome) => debug!("{}: {:?}", path.display(), outcome),
                                    Err(e) => error!(
                                        "Handling change to {} failed: {}",
                                        path.display(),
                                        e.user_message()
                                    ),
                                }
                            });
                        }
                    }
                    Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                        if let Err(e) = joined {
                            error!("Change handler task failed: {}", e);
                        }
                    }
                    _ = &mut shutdown_rx => {
                        debug!("Received shutdown signal, stopping rules watcher");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            watcher_handle: Some(handle),
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn is_running(&self) -> bool {
        self.watcher_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop watching. Outstanding change handlers are aborted.
    pub fn stop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
        if let Some(handle) = self.watcher_handle.take() {
            handle.abort();
            debug!("Rules watcher stopped");
        }
    }
}

impl Drop for RulesWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
