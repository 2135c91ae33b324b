use super::show::load_record;
use crate::clipboard::copy_to_clipboard;
use crate::context::CliContext;
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use anyhow::Result;
use colored::Colorize;
use promptsync_common::Category;
use promptsync_sync::SyncError;
use tracing::warn;

/// Push a record into its rules file. When the IDE keeps these rules in its
/// settings UI, copy the content to the clipboard (or print it) and say
/// where it goes.
pub async fn execute_use_command(
    ctx: &CliContext,
    category: Category,
    id: &str,
    print: bool,
) -> Result<i32> {
    let record = load_record(ctx, category, id).await?;
    let scope = ctx.scope(category)?;

    let (ide, location) = match ctx.engine().push_to_rules(&scope, &record).await {
        Ok(()) => {
            if let Some(path) = ctx.engine().rules_target(&scope).file() {
                ctx.say(format!(
                    "{} {} to {}",
                    "Synced".green(),
                    record.meta.name,
                    path.display()
                ));
            }
            return Ok(EXIT_SUCCESS);
        }
        Err(SyncError::NoRulesPath { ide, location, .. }) => (ide, location),
        Err(e) => return Err(e.into()),
    };

    if !print {
        match copy_to_clipboard(&record.content) {
            Ok(()) => {
                println!(
                    "Copied {} to the clipboard. {} keeps {} rules in {}; paste them there.",
                    record.meta.name, ide, category, location
                );
                return Ok(EXIT_SUCCESS);
            }
            Err(e) => warn!("{:#}", e),
        }
    }

    println!(
        "{} keeps {} rules in {}. Paste the following there:\n",
        ide, category, location
    );
    print!("{}", record.content);
    if !record.content.ends_with('\n') {
        println!();
    }
    Ok(if print { EXIT_SUCCESS } else { EXIT_WARNING })
}
