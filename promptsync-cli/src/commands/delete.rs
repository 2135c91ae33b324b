use crate::context::CliContext;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use promptsync_common::Category;
use promptsync_store::PromptId;

pub async fn execute_delete_command(ctx: &CliContext, category: Category, id: &str) -> Result<i32> {
    let id = PromptId::new(id)?;
    ctx.engine().store().delete(category, &id).await?;
    ctx.say(format!("Deleted {} prompt {}", category, id));
    Ok(EXIT_SUCCESS)
}
