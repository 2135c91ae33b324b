use crate::context::CliContext;
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use crate::prompter::prompter_for;
use anyhow::Result;
use promptsync_common::Category;
use promptsync_sync::ChangeOutcome;
use std::path::Path;

/// Run external-edit handling once for the category's rules file. Content
/// left untracked exits with a warning.
pub async fn execute_check_command(ctx: &CliContext, category: Category, import: bool) -> Result<i32> {
    let path = ctx.rules_file(category)?;
    let prompter = prompter_for(import, ctx.interactive);
    let outcome = ctx
        .engine()
        .handle_external_change(category, &path, prompter.as_ref())
        .await?;
    Ok(report_outcome(ctx, category, &path, &outcome))
}

pub(crate) fn report_outcome(
    ctx: &CliContext,
    category: Category,
    path: &Path,
    outcome: &ChangeOutcome,
) -> i32 {
    match outcome {
        ChangeOutcome::Suppressed | ChangeOutcome::AlreadyPending => {
            ctx.say(format!("{} is being updated; try again", path.display()));
            EXIT_SUCCESS
        }
        ChangeOutcome::AlreadyKnown(id) => {
            ctx.say(format!(
                "{} matches {} prompt {}",
                path.display(),
                category,
                id
            ));
            EXIT_SUCCESS
        }
        ChangeOutcome::Ignored => {
            ctx.say(format!(
                "{} holds content no {} prompt has",
                path.display(),
                category
            ));
            EXIT_WARNING
        }
        ChangeOutcome::Imported(record) => {
            ctx.say(format!(
                "Imported {} as {} prompt {}",
                path.display(),
                category,
                record.id()
            ));
            EXIT_SUCCESS
        }
    }
}
