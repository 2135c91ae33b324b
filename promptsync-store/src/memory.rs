//! In-memory prompt storage

use crate::error::{Result, StoreError};
use crate::storage::{PromptListing, PromptStorage};
use crate::types::{PromptId, PromptRecord};
use async_trait::async_trait;
use promptsync_common::Category;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

type RecordMap = BTreeMap<(Category, PromptId), PromptRecord>;

/// In-memory storage. Listing never reports failures since records are
/// validated on construction.
#[derive(Debug, Default, Clone)]
pub struct MemoryPromptStorage {
    records: Arc<RwLock<RecordMap>>,
}

impl MemoryPromptStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, RecordMap> {
        self.records.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, RecordMap> {
        self.records.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl PromptStorage for MemoryPromptStorage {
    async fn list(&self, category: Category) -> Result<PromptListing> {
        let records = self
            .read()
            .iter()
            .filter(|((c, _), _)| *c == category)
            .map(|(_, record)| record.clone())
            .collect();
        Ok(PromptListing {
            records,
            failures: Vec::new(),
        })
    }

    async fn get(&self, category: Category, id: &PromptId) -> Result<Option<PromptRecord>> {
        Ok(self.read().get(&(category, id.clone())).cloned())
    }

    async fn save(&self, record: &PromptRecord) -> Result<()> {
        self.write()
            .insert((record.category(), record.id().clone()), record.clone());
        Ok(())
    }

    async fn delete(&self, category: Category, id: &PromptId) -> Result<()> {
        self.write()
            .remove(&(category, id.clone()))
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                category,
                id: id.to_string(),
            })
    }

    async fn create(&self, category: Category) -> Result<PromptRecord> {
        let record = PromptRecord::draft(category, "");
        self.save(&record).await?;
        Ok(record)
    }
}
