use crate::context::CliContext;
use crate::display::render_record;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use promptsync_common::Category;
use promptsync_store::{PromptId, PromptRecord, StoreError};

pub async fn execute_show_command(ctx: &CliContext, category: Category, id: &str) -> Result<i32> {
    let record = load_record(ctx, category, id).await?;
    println!("{}", render_record(ctx.format, &record)?);
    Ok(EXIT_SUCCESS)
}

/// Fetch a record, treating absence as an error.
pub(crate) async fn load_record(
    ctx: &CliContext,
    category: Category,
    id: &str,
) -> Result<PromptRecord> {
    let id = PromptId::new(id)?;
    let record = ctx
        .engine()
        .store()
        .get(category, &id)
        .await?
        .ok_or_else(|| StoreError::NotFound {
            category,
            id: id.to_string(),
        })?;
    Ok(record)
}
