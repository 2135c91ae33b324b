//! Prompt categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether a prompt applies IDE-wide or to a single project.
///
/// Serialized as the lowercase strings `"global"` and `"project"`, which are
/// also the names of the storage partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Applies to every workspace opened in the IDE
    Global,
    /// Applies to one project root
    Project,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 2] = [Category::Global, Category::Project];

    /// The lowercase name, also used as the storage partition directory.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Global => "global",
            Category::Project => "project",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown prompt category '{0}' (expected 'global' or 'project')")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(Category::Global),
            "project" => Ok(Category::Project),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Global".parse::<Category>().unwrap(), Category::Global);
        assert_eq!(" project ".parse::<Category>().unwrap(), Category::Project);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "workspace".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("workspace"));
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Project).unwrap();
        assert_eq!(json, "\"project\"");
        let back: Category = serde_json::from_str("\"global\"").unwrap();
        assert_eq!(back, Category::Global);
    }

    #[test]
    fn test_display_matches_partition_name() {
        for category in Category::ALL {
            assert_eq!(category.to_string(), category.as_str());
        }
    }
}
