use crate::cli::OutputFormat;
use crate::context::CliContext;
use crate::display::PromptRow;
use crate::exit_codes::EXIT_SUCCESS;
use anyhow::Result;
use promptsync_common::Category;

pub async fn execute_new_command(
    ctx: &CliContext,
    category: Category,
    name: Option<&str>,
) -> Result<i32> {
    let store = ctx.engine().store();
    let mut record = store.create(category).await?;
    if let Some(name) = name {
        record.meta.name = name.to_string();
        store.save(&record).await?;
    }

    if ctx.format == OutputFormat::Table {
        ctx.say(format!(
            "Created {} prompt {} ({})",
            category,
            record.id(),
            record.meta.name
        ));
    } else {
        ctx.display(&[PromptRow::from(&record)])?;
    }
    Ok(EXIT_SUCCESS)
}
