//! Storage implementations for prompt records

use crate::error::{Result, StoreError};
use crate::format;
use crate::types::{PromptId, PromptRecord};
use async_trait::async_trait;
use promptsync_common::constants::PROMPT_FILE_EXTENSION;
use promptsync_common::Category;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// A file that could not be loaded during a listing.
#[derive(Debug)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: StoreError,
}

/// Result of listing one category: the records that loaded, sorted by id,
/// and the files that did not.
#[derive(Debug, Default)]
pub struct PromptListing {
    pub records: Vec<PromptRecord>,
    pub failures: Vec<LoadFailure>,
}

impl PromptListing {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Storage abstraction for prompt records
#[async_trait]
pub trait PromptStorage: Send + Sync {
    /// List all records of a category. Malformed records are reported in
    /// [`PromptListing::failures`] rather than failing the call.
    async fn list(&self, category: Category) -> Result<PromptListing>;

    /// Get a record by address
    async fn get(&self, category: Category, id: &PromptId) -> Result<Option<PromptRecord>>;

    /// Upsert by `(category, id)`, replacing any existing record fully
    async fn save(&self, record: &PromptRecord) -> Result<()>;

    /// Delete a record permanently
    async fn delete(&self, category: Category, id: &PromptId) -> Result<()>;

    /// Create and persist a record with a fresh id and placeholder content
    async fn create(&self, category: Category) -> Result<PromptRecord>;
}

/// TOML-file storage, one file per record under `<root>/<category>/<id>.toml`
pub struct TomlPromptStorage {
    root: PathBuf,
    default_author: String,
    write_lock: Mutex<()>,
}

impl TomlPromptStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            default_author: String::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Author written into records created by [`PromptStorage::create`]
    pub fn with_default_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = author.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn category_dir(&self, category: Category) -> PathBuf {
        self.root.join(category.as_str())
    }

    fn record_path(&self, category: Category, id: &PromptId) -> PathBuf {
        self.category_dir(category)
            .join(format!("{}.{}", id, PROMPT_FILE_EXTENSION))
    }

    async fn load_record(&self, path: &Path, category: Category, id: &str) -> Result<PromptRecord> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::io(path, e))?;
        format::decode(&text, path, category, id)
    }

    async fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::io(parent, e))?;
        }
        let tmp = path.with_extension(format!("{}.tmp", PROMPT_FILE_EXTENSION));
        fs::write(&tmp, contents)
            .await
            .map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::io(path, e));
        }
        Ok(())
    }
}

#[async_trait]
impl PromptStorage for TomlPromptStorage {
    async fn list(&self, category: Category) -> Result<PromptListing> {
        let dir = self.category_dir(category);
        let mut listing = PromptListing::default();

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(listing),
            Err(e) => return Err(StoreError::io(&dir, e)),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&dir, e))?
        {
            let path = entry.path();
            if !path.is_file()
                || path.extension().is_none_or(|ext| ext != PROMPT_FILE_EXTENSION)
            {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            match self.load_record(&path, category, stem).await {
                Ok(record) => listing.records.push(record),
                Err(error) => {
                    warn!("Failed to load prompt from {}: {}", path.display(), error);
                    listing.failures.push(LoadFailure { path, error });
                }
            }
        }

        listing.records.sort_by(|a, b| a.meta.id.cmp(&b.meta.id));
        listing.failures.sort_by(|a, b| a.path.cmp(&b.path));
        debug!(
            category = %category,
            records = listing.records.len(),
            failures = listing.failures.len(),
            "Listed prompts"
        );
        Ok(listing)
    }

    async fn get(&self, category: Category, id: &PromptId) -> Result<Option<PromptRecord>> {
        let path = self.record_path(category, id);
        match self.load_record(&path, category, id.as_str()).await {
            Ok(record) => Ok(Some(record)),
            Err(StoreError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, record: &PromptRecord) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        let path = self.record_path(record.category(), record.id());
        let text = format::encode(record)?;
        self.write_atomic(&path, &text).await?;
        debug!("Saved prompt {}", path.display());
        Ok(())
    }

    async fn delete(&self, category: Category, id: &PromptId) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        let path = self.record_path(category, id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound {
                category,
                id: id.to_string(),
            }),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    async fn create(&self, category: Category) -> Result<PromptRecord> {
        let record = PromptRecord::draft(category, self.default_author.clone());
        self.save(&record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_then_get() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path()).with_default_author("dev");

        let created = storage.create(Category::Global).await.unwrap();
        assert_eq!(created.meta.author, "dev");
        assert!(temp_dir
            .path()
            .join("global")
            .join(format!("{}.toml", created.id()))
            .is_file());

        let loaded = storage
            .get(Category::Global, created.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());
        let id = PromptId::new("missing").unwrap();
        assert!(storage.get(Category::Project, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_empty_category() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());
        let listing = storage.list(Category::Project).await.unwrap();
        assert!(listing.is_empty());
        assert!(listing.failures.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_list_round_trips() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());

        let mut record = PromptRecord::draft(Category::Project, "dev");
        record.content = "Use tabs.\r\nNo trailing newline   ".to_string();
        record.meta.description = "tabs only".to_string();
        storage.save(&record).await.unwrap();

        let listing = storage.list(Category::Project).await.unwrap();
        assert_eq!(listing.records, vec![record]);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_id_and_partitioned() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());

        for id in ["charlie", "alpha", "bravo"] {
            let mut record = PromptRecord::draft(Category::Project, "dev");
            record.meta.id = PromptId::new(id).unwrap();
            storage.save(&record).await.unwrap();
        }
        storage.create(Category::Global).await.unwrap();

        let listing = storage.list(Category::Project).await.unwrap();
        let ids: Vec<_> = listing.records.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["alpha", "bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_malformed_record_does_not_abort_listing() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());
        let good = storage.create(Category::Global).await.unwrap();

        let global_dir = temp_dir.path().join("global");
        std::fs::write(global_dir.join("broken.toml"), "[meta\nnot toml").unwrap();
        std::fs::write(global_dir.join("notes.txt"), "ignored").unwrap();

        let listing = storage.list(Category::Global).await.unwrap();
        assert_eq!(listing.records, vec![good]);
        assert_eq!(listing.failures.len(), 1);
        assert!(listing.failures[0].path.ends_with("broken.toml"));
        assert!(matches!(
            listing.failures[0].error,
            StoreError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_record_in_wrong_partition_is_a_failure() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());
        let record = storage.create(Category::Global).await.unwrap();

        let project_dir = temp_dir.path().join("project");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::copy(
            temp_dir
                .path()
                .join("global")
                .join(format!("{}.toml", record.id())),
            project_dir.join(format!("{}.toml", record.id())),
        )
        .unwrap();

        let listing = storage.list(Category::Project).await.unwrap();
        assert!(listing.records.is_empty());
        assert_eq!(listing.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_fully() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());
        let mut record = storage.create(Category::Global).await.unwrap();

        record.content = "replaced".to_string();
        record.meta.version = "2.0.0".to_string();
        storage.save(&record).await.unwrap();

        let loaded = storage
            .get(Category::Global, record.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded, record);

        let leftovers: Vec<_> = std::fs::read_dir(temp_dir.path().join("global"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = tempdir().unwrap();
        let storage = TomlPromptStorage::new(temp_dir.path());
        let record = storage.create(Category::Project).await.unwrap();

        storage
            .delete(Category::Project, record.id())
            .await
            .unwrap();
        assert!(storage
            .get(Category::Project, record.id())
            .await
            .unwrap()
            .is_none());

        let err = storage
            .delete(Category::Project, record.id())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }
}
