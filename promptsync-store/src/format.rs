//! On-disk record format
//!
//! ```toml
//! [meta]
//! category = "project"
//! id = "01J..."
//! name = "Team rules"
//! description = ""
//! author = "dev"
//! version = "1.0.0"
//! date = "2024-05-01T10:00:00Z"
//! license = "MIT"
//!
//! [prompt]
//! content = """
//! Use tabs.
//! """
//! ```

use crate::error::{Result, StoreError};
use crate::types::{PromptMeta, PromptRecord};
use promptsync_common::Category;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PromptDocument {
    meta: PromptMeta,
    prompt: PromptBody,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PromptBody {
    content: String,
}

/// Serialize a record to its TOML file form.
pub fn encode(record: &PromptRecord) -> Result<String> {
    let document = PromptDocument {
        meta: record.meta.clone(),
        prompt: PromptBody {
            content: record.content.clone(),
        },
    };
    toml::to_string(&document).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Parse a record file and check it against the partition and file stem it
/// was loaded from. `path` is only used for error reporting.
pub fn decode(
    text: &str,
    path: &Path,
    expected_category: Category,
    expected_id: &str,
) -> Result<PromptRecord> {
    let document: PromptDocument =
        toml::from_str(text).map_err(|e| StoreError::validation(path, e.to_string()))?;

    let meta = document.meta;
    if meta.category != expected_category {
        return Err(StoreError::validation(
            path,
            format!(
                "category '{}' does not match partition '{}'",
                meta.category, expected_category
            ),
        ));
    }
    if meta.id.as_str() != expected_id {
        return Err(StoreError::validation(
            path,
            format!("id '{}' does not match file name '{}'", meta.id, expected_id),
        ));
    }

    Ok(PromptRecord {
        meta,
        content: document.prompt.content,
    })
}
