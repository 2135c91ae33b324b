use clap::{Parser, Subcommand, ValueEnum};
use promptsync_common::Category;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

// Wrapper for argument parsing since Category does not derive ValueEnum
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoryArg {
    Global,
    Project,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Global => Category::Global,
            CategoryArg::Project => Category::Project,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "promptsync")]
#[command(version)]
#[command(about = "Keep named AI prompt variants in sync with IDE rules files")]
#[command(long_about = "
promptsync stores named prompt variants per category and writes the one you
pick into your IDE's rules file. Edits made to a rules file outside promptsync
are detected and can be imported as new prompts.

Categories:
  global   - rules that apply to every project (IDE-wide)
  project  - rules for the current project

Example:
  promptsync new project --name \"Team rules\"
  promptsync use project <id>
  promptsync watch
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t, global = true)]
    pub format: OutputFormat,

    /// IDE whose rules files to use (vscode, cursor, windsurf, trae)
    #[arg(long, global = true)]
    pub ide: Option<String>,

    /// Project root; defaults to the nearest directory containing .git
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List stored prompts of a category
    List { category: CategoryArg },

    /// Show one prompt
    Show { category: CategoryArg, id: String },

    /// Create a prompt with placeholder content
    New {
        category: CategoryArg,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },

    /// Delete a prompt
    Delete { category: CategoryArg, id: String },

    /// Write a prompt into the category's rules file
    #[command(long_about = "
Write a stored prompt into the rules file for its category.

When the IDE keeps this category's rules in its settings UI instead of a file,
the content is copied to the clipboard and the settings location is printed.
")]
    Use {
        category: CategoryArg,
        id: String,
        /// Print the content instead of copying it when there is no rules file
        #[arg(long)]
        print: bool,
    },

    /// Store the current rules file content as a new prompt
    Import { category: CategoryArg },

    /// Check whether the rules file holds content no prompt has
    Check {
        category: CategoryArg,
        /// Import novel content without asking
        #[arg(long)]
        import: bool,
    },

    /// Watch rules files and offer to import external edits
    Watch,

    /// Print where the category's rules live
    Path { category: CategoryArg },

    /// Open the rules file in $VISUAL or $EDITOR
    Edit { category: CategoryArg },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_use_with_global_flags() {
        let cli = Cli::try_parse_from([
            "promptsync",
            "use",
            "project",
            "01HZX",
            "--ide",
            "cursor",
            "--format",
            "json",
            "-q",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.ide.as_deref(), Some("cursor"));
        match cli.command {
            Commands::Use {
                category,
                id,
                print,
            } => {
                assert_eq!(Category::from(category), Category::Project);
                assert_eq!(id, "01HZX");
                assert!(!print);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["promptsync", "list", "workspace"]).is_err());
    }

    #[test]
    fn test_check_import_flag() {
        let cli = Cli::try_parse_from(["promptsync", "check", "global", "--import"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Check {
                category: CategoryArg::Global,
                import: true
            }
        ));
    }
}
