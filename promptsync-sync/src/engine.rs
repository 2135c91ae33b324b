//! The sync engine
//!
//! Pushes record content into rules files, classifies rules file changes
//! reported by the environment, and imports novel rules content as records.
//! Its own writes are suppressed for detection while they are in flight.

use crate::decision::{ChangeOutcome, EditDecision, ImportChoice, ImportPrompter};
use crate::error::{Result, SyncError};
use crate::notifier::{ChangeNotifier, RulesChanged};
use crate::rules_files::{FsRulesFiles, RulesFiles};
use crate::suppression::{normalize_path, SuppressionGuard, SuppressionSet};
use chrono::Local;
use promptsync_common::{Category, ErrorChainExt};
use promptsync_directory::{RulesPathResolver, RulesScope, RulesTarget};
use promptsync_store::{PromptRecord, PromptStorage};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Mediates between the prompt store and the rules files of one IDE.
pub struct SyncEngine {
    store: Arc<dyn PromptStorage>,
    resolver: RulesPathResolver,
    files: Arc<dyn RulesFiles>,
    suppression: SuppressionSet,
    notifier: ChangeNotifier,
    pending: Arc<Mutex<HashSet<PathBuf>>>,
    last_pushed: Mutex<HashMap<PathBuf, String>>,
    author: String,
}

impl SyncEngine {
    pub fn new(store: Arc<dyn PromptStorage>, resolver: RulesPathResolver) -> Self {
        Self {
            store,
            resolver,
            files: Arc::new(FsRulesFiles),
            suppression: SuppressionSet::default(),
            notifier: ChangeNotifier::default(),
            pending: Arc::new(Mutex::new(HashSet::new())),
            last_pushed: Mutex::new(HashMap::new()),
            author: String::new(),
        }
    }

    pub fn with_rules_files(mut self, files: Arc<dyn RulesFiles>) -> Self {
        self.files = files;
        self
    }

    pub fn with_suppression_timeout(mut self, timeout: Duration) -> Self {
        self.suppression = SuppressionSet::new(timeout);
        self
    }

    pub fn with_notifier(mut self, notifier: ChangeNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    /// Author written into imported records
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn store(&self) -> &Arc<dyn PromptStorage> {
        &self.store
    }

    pub fn resolver(&self) -> &RulesPathResolver {
        &self.resolver
    }

    pub fn rules_target(&self, scope: &RulesScope) -> RulesTarget {
        self.resolver.resolve(scope)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RulesChanged> {
        self.notifier.subscribe()
    }

    pub fn suppress(&self, path: &Path) -> SuppressionGuard {
        self.suppression.suppress(path)
    }

    pub fn is_suppressed(&self, path: &Path) -> bool {
        self.suppression.is_suppressed(path)
    }

    /// Write `record.content` verbatim to the rules file for `scope`.
    ///
    /// Detection on the target path is suppressed for the duration of the
    /// write. On success exactly one [`RulesChanged`] is emitted, after the
    /// write returned, and the content is remembered so a late change report
    /// for this write is not taken for an external edit.
    pub async fn push_to_rules(&self, scope: &RulesScope, record: &PromptRecord) -> Result<()> {
        let category = scope.category();
        if record.category() != category {
            return Err(SyncError::CategoryMismatch {
                expected: category,
                actual: record.category(),
            });
        }

        let path = match self.resolver.resolve(scope) {
            RulesTarget::File(path) => path,
            RulesTarget::SettingsUi { ide, location } => {
                debug!("No {} rules file for {}", category, ide);
                return Err(SyncError::NoRulesPath {
                    category,
                    ide,
                    location,
                });
            }
        };

        {
            let _guard = self.suppression.suppress(&path);
            if let Err(source) = self.files.write(&path, &record.content).await {
                let error = SyncError::Write { path, source };
                error!("Push of {} failed: {}", record.id(), error.error_chain());
                return Err(error);
            }
            self.last_pushed
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .insert(normalize_path(&path), record.content.clone());
        }

        info!(
            "Synced {} prompt {} to {}",
            category,
            record.id(),
            path.display()
        );
        self.notifier.emit(RulesChanged {
            category,
            path,
            content: record.content.clone(),
        });
        Ok(())
    }

    /// Classify a reported change of the rules file at `path`.
    ///
    /// Content is compared byte for byte against every stored record of the
    /// category. A missing file is created empty first.
    pub async fn detect_external_edit(&self, category: Category, path: &Path) -> Result<EditDecision> {
        if self.suppression.is_suppressed(path) {
            debug!("Ignoring change to {}: suppressed", path.display());
            return Ok(EditDecision::Suppressed);
        }

        let content = match self.files.read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let _guard = self.suppression.suppress(path);
                self.files
                    .ensure_exists(path)
                    .await
                    .map_err(|source| self.log_error(SyncError::Write {
                        path: path.to_path_buf(),
                        source,
                    }))?;
                String::new()
            }
            Err(source) => {
                return Err(self.log_error(SyncError::Read {
                    path: path.to_path_buf(),
                    source,
                }))
            }
        };

        // A push may have started while the read was in flight
        if self.suppression.is_suppressed(path) {
            debug!("Ignoring change to {}: push started during read", path.display());
            return Ok(EditDecision::Suppressed);
        }

        let listing = self.store.list(category).await?;
        if let Some(known) = listing.records.iter().find(|r| r.content == content) {
            debug!(
                "{} matches stored {} prompt {}",
                path.display(),
                category,
                known.id()
            );
            return Ok(EditDecision::AlreadyKnown {
                id: known.id().clone(),
            });
        }

        if self.is_last_pushed(path, &content) {
            debug!("{} still holds the last pushed content", path.display());
            return Ok(EditDecision::Suppressed);
        }

        debug!("{} holds novel {} rules content", path.display(), category);
        Ok(EditDecision::Novel { content })
    }

    /// Detect, and for novel content ask `prompter` whether to import it.
    ///
    /// Only one decision per path is outstanding at a time; further changes
    /// to that path while the user is deciding report
    /// [`ChangeOutcome::AlreadyPending`].
    pub async fn handle_external_change(
        &self,
        category: Category,
        path: &Path,
        prompter: &dyn ImportPrompter,
    ) -> Result<ChangeOutcome> {
        let Some(_pending) = PendingDecision::begin(&self.pending, path) else {
            debug!("Decision already pending for {}", path.display());
            return Ok(ChangeOutcome::AlreadyPending);
        };

        let content = match self.detect_external_edit(category, path).await? {
            EditDecision::Suppressed => return Ok(ChangeOutcome::Suppressed),
            EditDecision::AlreadyKnown { id } => return Ok(ChangeOutcome::AlreadyKnown(id)),
            EditDecision::Novel { content } => content,
        };

        match prompter.ask(category, path, &content).await {
            Some(ImportChoice::Import) => {
                let record = self.import_from_rules(category, path).await?;
                Ok(ChangeOutcome::Imported(record))
            }
            Some(ImportChoice::Ignore) | None => {
                debug!("Import of {} declined", path.display());
                Ok(ChangeOutcome::Ignored)
            }
        }
    }

    /// Store the current content of the rules file at `path` as a new
    /// record. The rules file is only read.
    pub async fn import_from_rules(&self, category: Category, path: &Path) -> Result<PromptRecord> {
        let content = match self.files.read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(self.log_error(SyncError::NotFound {
                    path: path.to_path_buf(),
                }))
            }
            Err(source) => {
                return Err(self.log_error(SyncError::Read {
                    path: path.to_path_buf(),
                    source,
                }))
            }
        };

        let mut record = PromptRecord::draft(category, self.author.clone());
        record.meta.name = format!(
            "{} {} rules {}",
            self.resolver.ide(),
            category,
            Local::now().format("%Y-%m-%d %H:%M:%S")
        );
        record.meta.description = format!("Imported from {}", path.display());
        record.content = content;

        self.store
            .save(&record)
            .await
            .map_err(|e| self.log_error(e.into()))?;
        info!("Imported {} as {} prompt {}", path.display(), category, record.id());
        Ok(record)
    }

    fn is_last_pushed(&self, path: &Path, content: &str) -> bool {
        self.last_pushed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&normalize_path(path))
            .is_some_and(|pushed| pushed == content)
    }

    fn log_error(&self, error: SyncError) -> SyncError {
        error!("{}", error.error_chain());
        error
    }
}

/// Marks a path as waiting on a user decision until dropped.
struct PendingDecision {
    set: Arc<Mutex<HashSet<PathBuf>>>,
    path: PathBuf,
}

impl PendingDecision {
    fn begin(set: &Arc<Mutex<HashSet<PathBuf>>>, path: &Path) -> Option<Self> {
        let key = normalize_path(path);
        let inserted = set
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.clone());
        inserted.then(|| Self {
            set: Arc::clone(set),
            path: key,
        })
    }
}

impl Drop for PendingDecision {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::FixedChoice;
    use promptsync_directory::{Ide, RulesPathOverrides};
    use promptsync_store::MemoryPromptStorage;
    use tempfile::tempdir;

    fn engine(home: &Path) -> SyncEngine {
        let resolver = RulesPathResolver::new(Ide::Cursor, home);
        SyncEngine::new(Arc::new(MemoryPromptStorage::new()), resolver)
    }

    #[tokio::test]
    async fn test_push_rejects_category_mismatch() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let record = PromptRecord::draft(Category::Global, "");

        let err = engine
            .push_to_rules(&RulesScope::project(temp_dir.path()), &record)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::CategoryMismatch { .. }));
        assert!(!temp_dir.path().join(".cursorrules").exists());
    }

    #[tokio::test]
    async fn test_push_writes_content_verbatim() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let mut record = PromptRecord::draft(Category::Project, "");
        record.content = "Use tabs.\n\n".to_string();

        engine
            .push_to_rules(&RulesScope::project(temp_dir.path()), &record)
            .await
            .unwrap();
        let written = std::fs::read_to_string(temp_dir.path().join(".cursorrules")).unwrap();
        assert_eq!(written, "Use tabs.\n\n");
        assert!(!engine.is_suppressed(&temp_dir.path().join(".cursorrules")));
    }

    #[tokio::test]
    async fn test_late_report_of_unsaved_push_is_own_write() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let mut record = PromptRecord::draft(Category::Project, "");
        record.content = "Use tabs.".to_string();
        let path = temp_dir.path().join(".cursorrules");

        engine
            .push_to_rules(&RulesScope::project(temp_dir.path()), &record)
            .await
            .unwrap();
        assert_eq!(
            engine
                .detect_external_edit(Category::Project, &path)
                .await
                .unwrap(),
            EditDecision::Suppressed
        );

        std::fs::write(&path, "Use spaces.").unwrap();
        assert!(engine
            .detect_external_edit(Category::Project, &path)
            .await
            .unwrap()
            .is_novel());
    }

    #[tokio::test]
    async fn test_detect_creates_missing_file_empty() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let path = temp_dir.path().join(".cursorrules");

        let decision = engine
            .detect_external_edit(Category::Project, &path)
            .await
            .unwrap();
        assert_eq!(
            decision,
            EditDecision::Novel {
                content: String::new()
            }
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_trailing_whitespace_is_novel() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let mut record = PromptRecord::draft(Category::Project, "");
        record.content = "Use tabs.".to_string();
        engine.store().save(&record).await.unwrap();

        let path = temp_dir.path().join(".cursorrules");
        std::fs::write(&path, "Use tabs. ").unwrap();

        let decision = engine
            .detect_external_edit(Category::Project, &path)
            .await
            .unwrap();
        assert!(decision.is_novel());
    }

    #[tokio::test]
    async fn test_detect_while_suppressed() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let path = temp_dir.path().join(".cursorrules");
        std::fs::write(&path, "anything").unwrap();

        let _guard = engine.suppress(&path);
        let decision = engine
            .detect_external_edit(Category::Project, &path)
            .await
            .unwrap();
        assert_eq!(decision, EditDecision::Suppressed);
    }

    #[tokio::test]
    async fn test_ignore_and_dismiss_have_no_side_effect() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let path = temp_dir.path().join(".cursorrules");
        std::fs::write(&path, "novel").unwrap();

        for prompter in [FixedChoice(Some(ImportChoice::Ignore)), FixedChoice(None)] {
            let outcome = engine
                .handle_external_change(Category::Project, &path, &prompter)
                .await
                .unwrap();
            assert_eq!(outcome, ChangeOutcome::Ignored);
        }
        assert!(engine
            .store()
            .list(Category::Project)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_import_names_record_after_ide_and_category() {
        let temp_dir = tempdir().unwrap();
        let resolver = RulesPathResolver::new(Ide::Windsurf, temp_dir.path());
        let engine = SyncEngine::new(Arc::new(MemoryPromptStorage::new()), resolver)
            .with_author("dev");
        let path = temp_dir.path().join(".windsurfrules");
        std::fs::write(&path, "Be concise.").unwrap();

        let record = engine
            .import_from_rules(Category::Project, &path)
            .await
            .unwrap();
        assert!(record.meta.name.starts_with("Windsurf project rules "));
        assert_eq!(record.meta.author, "dev");
        assert_eq!(record.category(), Category::Project);
    }

    #[tokio::test]
    async fn test_import_missing_file_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let engine = engine(temp_dir.path());
        let err = engine
            .import_from_rules(Category::Project, &temp_dir.path().join("missing.md"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_rules_target_honors_overrides() {
        let temp_dir = tempdir().unwrap();
        let override_path = temp_dir.path().join("rules.md");
        let resolver = RulesPathResolver::new(Ide::Cursor, temp_dir.path()).with_overrides(
            RulesPathOverrides {
                global: Some(override_path.clone()),
                project: None,
            },
        );
        let engine = SyncEngine::new(Arc::new(MemoryPromptStorage::new()), resolver);
        assert_eq!(
            engine.rules_target(&RulesScope::Global),
            RulesTarget::File(override_path)
        );
    }
}
