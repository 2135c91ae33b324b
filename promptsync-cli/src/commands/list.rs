use crate::cli::OutputFormat;
use crate::context::CliContext;
use crate::display::{FailureRow, PromptRow};
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use anyhow::Result;
use colored::Colorize;
use promptsync_common::Category;

/// List records of a category. Files that failed to load are reported on
/// stderr and turn the exit code into a warning.
pub async fn execute_list_command(ctx: &CliContext, category: Category) -> Result<i32> {
    let listing = ctx.engine().store().list(category).await?;
    let rows: Vec<PromptRow> = listing.records.iter().map(PromptRow::from).collect();

    if rows.is_empty() && ctx.format == OutputFormat::Table {
        ctx.say(format!("No {} prompts", category));
    } else {
        ctx.display(&rows)?;
    }

    for failure in listing.failures.iter().map(FailureRow::from) {
        eprintln!("{} {}: {}", "warning:".yellow(), failure.path, failure.error);
    }

    Ok(if listing.failures.is_empty() {
        EXIT_SUCCESS
    } else {
        EXIT_WARNING
    })
}
