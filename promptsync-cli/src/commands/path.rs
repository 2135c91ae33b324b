use crate::context::CliContext;
use crate::display::TargetRow;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use promptsync_common::Category;

pub async fn execute_path_command(ctx: &CliContext, category: Category) -> Result<i32> {
    let target = ctx.engine().rules_target(&ctx.scope(category)?);
    ctx.display(&[TargetRow::new(category, &target)])?;
    Ok(EXIT_SUCCESS)
}
