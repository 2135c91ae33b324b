//! Clipboard fallback for categories without a rules file

use anyhow::{Context, Result};

pub fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = arboard::Clipboard::new().context("Clipboard is not available")?;
    clipboard
        .set_text(text.to_owned())
        .context("Failed to copy to the clipboard")?;
    Ok(())
}
