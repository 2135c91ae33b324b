//! Prompt record types

use crate::error::{Result, StoreError};
use chrono::{SecondsFormat, Utc};
use promptsync_common::{generate_monotonic_ulid_string, Category};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder content for newly created records.
pub const PLACEHOLDER_CONTENT: &str = "# New prompt\n";

/// Stable identifier of a prompt record within its category.
///
/// Ids double as file stems, so they are restricted to `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PromptId(String);

impl PromptId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(id))
        } else {
            Err(StoreError::InvalidId(id))
        }
    }

    /// A fresh, unique id.
    pub fn generate() -> Self {
        Self(generate_monotonic_ulid_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PromptId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<PromptId> for String {
    fn from(id: PromptId) -> Self {
        id.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Record metadata. Every field except `category` and `id` is free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromptMeta {
    pub category: Category,
    pub id: PromptId,
    pub name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    /// RFC 3339 timestamp of creation or last modification
    pub date: String,
    pub license: String,
}

/// A named prompt variant. `content` is pushed verbatim into rules files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub meta: PromptMeta,
    pub content: String,
}

impl PromptRecord {
    /// A new record with a fresh id, default metadata and placeholder content.
    pub fn draft(category: Category, author: impl Into<String>) -> Self {
        Self {
            meta: PromptMeta {
                category,
                id: PromptId::generate(),
                name: "New Prompt".to_string(),
                description: String::new(),
                author: author.into(),
                version: "1.0.0".to_string(),
                date: now_rfc3339(),
                license: "MIT".to_string(),
            },
            content: PLACEHOLDER_CONTENT.to_string(),
        }
    }

    pub fn category(&self) -> Category {
        self.meta.category
    }

    pub fn id(&self) -> &PromptId {
        &self.meta.id
    }
}

/// Current time formatted the way record dates are stored.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
