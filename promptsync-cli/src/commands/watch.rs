use crate::context::CliContext;
use crate::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use crate::prompter::TerminalPrompter;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Watch the rules files of both categories until Ctrl-C.
pub async fn execute_watch_command(ctx: &CliContext) -> Result<i32> {
    let targets = ctx.sync.watch_targets();
    if targets.is_empty() {
        eprintln!(
            "{} has no rules files to watch",
            ctx.engine().resolver().ide()
        );
        return Ok(EXIT_WARNING);
    }

    ctx.sync
        .start_watching(Arc::new(TerminalPrompter::new(ctx.interactive)))?;
    for target in &targets {
        ctx.say(format!(
            "Watching {} rules: {}",
            target.category,
            target.path.display()
        ));
    }
    ctx.say("Press Ctrl-C to stop");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl-C")?;
    ctx.dispose();
    Ok(EXIT_SUCCESS)
}
