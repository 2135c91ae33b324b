use super::check::report_outcome;
use crate::context::CliContext;
use crate::editor::open_in_editor;
use crate::exit_codes::EXIT_SUCCESS;
use crate::prompter::prompter_for;
use anyhow::{Context, Result};
use promptsync_common::Category;
use promptsync_sync::{FsRulesFiles, RulesFiles};

/// Edit the rules file directly, then offer to import the result.
pub async fn execute_edit_command(ctx: &CliContext, category: Category) -> Result<i32> {
    let path = ctx.rules_file(category)?;
    FsRulesFiles
        .ensure_exists(&path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let editor_path = path.clone();
    tokio::task::spawn_blocking(move || open_in_editor(&editor_path)).await??;

    let prompter = prompter_for(false, ctx.interactive);
    let outcome = ctx
        .engine()
        .handle_external_change(category, &path, prompter.as_ref())
        .await?;
    report_outcome(ctx, category, &path, &outcome);
    Ok(EXIT_SUCCESS)
}
