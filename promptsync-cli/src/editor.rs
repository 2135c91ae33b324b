//! Opening rules files in the user's editor

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Split the configured editor into program and arguments. `$VISUAL` wins
/// over `$EDITOR`; values like `"code -w"` carry their own arguments.
pub fn resolve_editor(visual: Option<String>, editor: Option<String>) -> Result<Vec<String>> {
    let Some(command) = visual.filter(|v| !v.trim().is_empty()).or(editor) else {
        bail!(
            "No editor configured. Set $EDITOR or $VISUAL, e.g. export EDITOR=vim or export EDITOR=\"code -w\""
        );
    };
    let parts: Vec<String> = command.split_whitespace().map(str::to_string).collect();
    if parts.is_empty() {
        bail!("$EDITOR is set but empty");
    }
    Ok(parts)
}

/// Open `path` and wait for the editor to exit.
pub fn open_in_editor(path: &Path) -> Result<()> {
    let parts = resolve_editor(std::env::var("VISUAL").ok(), std::env::var("EDITOR").ok())?;
    let (program, args) = parts.split_at(1);
    let program = &program[0];

    let status = Command::new(program)
        .args(args)
        .arg(path)
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", program))?;

    if !status.success() {
        bail!(
            "Editor '{}' exited with status {}",
            program,
            status.code().unwrap_or(-1)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visual_wins_over_editor() {
        let parts = resolve_editor(Some("code -w".into()), Some("vim".into())).unwrap();
        assert_eq!(parts, vec!["code", "-w"]);
    }

    #[test]
    fn test_blank_visual_falls_back_to_editor() {
        let parts = resolve_editor(Some("  ".into()), Some("nano".into())).unwrap();
        assert_eq!(parts, vec!["nano"]);
    }

    #[test]
    fn test_no_editor_configured() {
        let err = resolve_editor(None, None).unwrap_err();
        assert!(err.to_string().contains("No editor configured"));
        assert!(resolve_editor(None, Some(" ".into())).is_err());
    }
}
