//! Output rows and formatting for table, JSON, and YAML output

use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use promptsync_common::Category;
use promptsync_directory::RulesTarget;
use promptsync_store::{LoadFailure, PromptRecord};
use serde::Serialize;

/// A row type that can be rendered as a table.
pub trait TableRow {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

/// One stored prompt in list output
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PromptRow {
    pub id: String,
    pub name: String,
    pub version: String,
    pub date: String,
    pub description: String,
}

impl From<&PromptRecord> for PromptRow {
    fn from(record: &PromptRecord) -> Self {
        Self {
            id: record.id().to_string(),
            name: record.meta.name.clone(),
            version: record.meta.version.clone(),
            date: record.meta.date.clone(),
            description: record.meta.description.clone(),
        }
    }
}

impl TableRow for PromptRow {
    fn headers() -> &'static [&'static str] {
        &["ID", "Name", "Version", "Date", "Description"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.version.clone(),
            self.date.clone(),
            truncate_str(&self.description, 40),
        ]
    }
}

/// A record file that failed to load
#[derive(Serialize, Debug, Clone)]
pub struct FailureRow {
    pub path: String,
    pub error: String,
}

impl From<&LoadFailure> for FailureRow {
    fn from(failure: &LoadFailure) -> Self {
        Self {
            path: failure.path.display().to_string(),
            error: failure.error.to_string(),
        }
    }
}

/// Where a category's rules live
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TargetRow {
    pub category: Category,
    pub kind: &'static str,
    pub location: String,
}

impl TargetRow {
    pub fn new(category: Category, target: &RulesTarget) -> Self {
        match target {
            RulesTarget::File(path) => Self {
                category,
                kind: "file",
                location: path.display().to_string(),
            },
            RulesTarget::SettingsUi { location, .. } => Self {
                category,
                kind: "settings",
                location: location.to_string(),
            },
        }
    }
}

impl TableRow for TargetRow {
    fn headers() -> &'static [&'static str] {
        &["Category", "Kind", "Location"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.category.to_string(),
            self.kind.to_string(),
            self.location.clone(),
        ]
    }
}

/// A comfy table with the project's preset.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Truncate to `max` characters, appending "..." if truncated.
pub fn truncate_str(s: &str, max: usize) -> String {
    let first_line = s.lines().next().unwrap_or_default();
    if first_line.chars().count() <= max && first_line.len() == s.len() {
        s.to_string()
    } else {
        let truncated: String = first_line.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

pub fn render_rows<T: TableRow + Serialize>(format: OutputFormat, rows: &[T]) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut table = new_table();
            table.set_header(T::headers().to_vec());
            for row in rows {
                table.add_row(row.cells());
            }
            Ok(table.to_string())
        }
        OutputFormat::Json | OutputFormat::Yaml => render_value(format, &rows),
    }
}

/// Serialize for the structured formats. Table format falls back to YAML.
pub fn render_value<T: Serialize + ?Sized>(format: OutputFormat, value: &T) -> Result<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).context("Failed to serialize to JSON")
        }
        OutputFormat::Yaml | OutputFormat::Table => {
            serde_yaml_ng::to_string(value).context("Failed to serialize to YAML")
        }
    }
}

/// Full record: metadata as a key/value table followed by the raw content.
pub fn render_record(format: OutputFormat, record: &PromptRecord) -> Result<String> {
    if format != OutputFormat::Table {
        return render_value(format, record);
    }

    let meta = &record.meta;
    let mut table = new_table();
    for (key, value) in [
        ("ID", meta.id.as_str()),
        ("Category", meta.category.as_str()),
        ("Name", meta.name.as_str()),
        ("Description", meta.description.as_str()),
        ("Author", meta.author.as_str()),
        ("Version", meta.version.as_str()),
        ("Date", meta.date.as_str()),
        ("License", meta.license.as_str()),
    ] {
        table.add_row(vec![key, value]);
    }
    Ok(format!("{}\n\n{}", table, record.content))
}
