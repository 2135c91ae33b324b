//! Command handlers
//!
//! Each handler returns the exit code for a completed run; failures are
//! converted to [`CliError`] at this boundary.

pub mod check;
pub mod delete;
pub mod edit;
pub mod import;
pub mod list;
pub mod new;
pub mod path;
pub mod show;
pub mod use_prompt;
pub mod watch;

use crate::cli::Commands;
use crate::context::CliContext;
use crate::error::{CliError, CliResult};

pub async fn run(ctx: &CliContext, command: &Commands) -> CliResult<i32> {
    let result = match command {
        Commands::List { category } => list::execute_list_command(ctx, (*category).into()).await,
        Commands::Show { category, id } => {
            show::execute_show_command(ctx, (*category).into(), id).await
        }
        Commands::New { category, name } => {
            new::execute_new_command(ctx, (*category).into(), name.as_deref()).await
        }
        Commands::Delete { category, id } => {
            delete::execute_delete_command(ctx, (*category).into(), id).await
        }
        Commands::Use {
            category,
            id,
            print,
        } => use_prompt::execute_use_command(ctx, (*category).into(), id, *print).await,
        Commands::Import { category } => {
            import::execute_import_command(ctx, (*category).into()).await
        }
        Commands::Check { category, import } => {
            check::execute_check_command(ctx, (*category).into(), *import).await
        }
        Commands::Watch => watch::execute_watch_command(ctx).await,
        Commands::Path { category } => path::execute_path_command(ctx, (*category).into()).await,
        Commands::Edit { category } => edit::execute_edit_command(ctx, (*category).into()).await,
    };
    result.map_err(CliError::from)
}
