//! Terminal answers to "import this rules file content?"

use async_trait::async_trait;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use promptsync_common::Category;
use promptsync_sync::{FixedChoice, ImportChoice, ImportPrompter};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

const PREVIEW_LINES: usize = 5;

/// Asks on the terminal when interactive; otherwise reports the novel
/// content on stderr and dismisses.
///
/// One question is on screen at a time. Clones share the terminal lock.
#[derive(Debug, Clone)]
pub struct TerminalPrompter {
    interactive: bool,
    terminal: Arc<Mutex<()>>,
}

impl TerminalPrompter {
    pub fn new(interactive: bool) -> Self {
        Self {
            interactive,
            terminal: Arc::new(Mutex::new(())),
        }
    }
}

#[async_trait]
impl ImportPrompter for TerminalPrompter {
    async fn ask(&self, category: Category, path: &Path, content: &str) -> Option<ImportChoice> {
        let _terminal = self.terminal.lock().await;
        if !self.interactive {
            eprintln!(
                "{} {} holds {} rules that no stored prompt has; run `promptsync import {}` to keep them",
                "note:".yellow(),
                path.display(),
                category,
                category
            );
            return None;
        }

        println!("{}", preview(content).dimmed());
        let question = format!(
            "{} was edited outside promptsync. Import it as a new {} prompt?",
            path.display(),
            category
        );
        let answer = tokio::task::spawn_blocking(move || {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .default(false)
                .interact_opt()
        })
        .await;

        match answer {
            Ok(Ok(Some(true))) => Some(ImportChoice::Import),
            Ok(Ok(Some(false))) => Some(ImportChoice::Ignore),
            Ok(Ok(None)) => None,
            Ok(Err(e)) => {
                warn!("Import prompt failed: {}", e);
                None
            }
            Err(e) => {
                warn!("Import prompt task failed: {}", e);
                None
            }
        }
    }
}

/// `--import` answers yes; otherwise ask the terminal.
pub fn prompter_for(import: bool, interactive: bool) -> Arc<dyn ImportPrompter> {
    if import {
        Arc::new(FixedChoice(Some(ImportChoice::Import)))
    } else {
        Arc::new(TerminalPrompter::new(interactive))
    }
}

fn preview(content: &str) -> String {
    let mut lines: Vec<&str> = content.lines().take(PREVIEW_LINES).collect();
    if content.lines().count() > PREVIEW_LINES {
        lines.push("...");
    }
    if lines.is_empty() {
        "(empty)".to_string()
    } else {
        lines.join("\n")
    }
}
