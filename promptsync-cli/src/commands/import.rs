use crate::cli::OutputFormat;
use crate::context::CliContext;
use crate::display::PromptRow;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use promptsync_common::Category;

pub async fn execute_import_command(ctx: &CliContext, category: Category) -> Result<i32> {
    let path = ctx.rules_file(category)?;
    let record = ctx.engine().import_from_rules(category, &path).await?;

    if ctx.format == OutputFormat::Table {
        ctx.say(format!(
            "Imported {} as {} prompt {} ({})",
            path.display(),
            category,
            record.id(),
            record.meta.name
        ));
    } else {
        ctx.display(&[PromptRow::from(&record)])?;
    }
    Ok(EXIT_SUCCESS)
}
