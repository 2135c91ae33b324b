//! Classification of rules file changes and the user's import decision

use async_trait::async_trait;
use promptsync_common::Category;
use promptsync_store::{PromptId, PromptRecord};
use std::path::Path;

/// How a reported rules file change was classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditDecision {
    /// The path is being written by this engine, or still holds exactly
    /// what the engine last pushed to it
    Suppressed,
    /// The content exactly equals a stored record of the category
    AlreadyKnown { id: PromptId },
    /// No stored record has this content
    Novel { content: String },
}

impl EditDecision {
    pub fn is_novel(&self) -> bool {
        matches!(self, EditDecision::Novel { .. })
    }
}

/// The user's answer to "import this rules file as a new prompt?"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportChoice {
    Import,
    Ignore,
}

/// Asks the user whether novel rules file content should become a record.
#[async_trait]
pub trait ImportPrompter: Send + Sync {
    /// `None` means the prompt was dismissed, which is handled as
    /// [`ImportChoice::Ignore`].
    async fn ask(&self, category: Category, path: &Path, content: &str) -> Option<ImportChoice>;
}

/// A prompter that always gives the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedChoice(pub Option<ImportChoice>);

#[async_trait]
impl ImportPrompter for FixedChoice {
    async fn ask(&self, _category: Category, _path: &Path, _content: &str) -> Option<ImportChoice> {
        self.0
    }
}

/// Result of [`crate::SyncEngine::handle_external_change`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    Suppressed,
    AlreadyKnown(PromptId),
    /// A decision for this path is already waiting on the user
    AlreadyPending,
    /// The user ignored or dismissed the import offer
    Ignored,
    Imported(PromptRecord),
}
