//! Configuration trait and implementations for managed directories.

use promptsync_common::constants::{DIR_NAME, PROMPTS_SUBDIR};

/// Configuration trait for different directory types.
///
/// Implement this trait to define a managed directory type: its name, the
/// `.gitignore` written into it, and the subdirectories created on
/// initialization.
///
/// # Example
///
/// ```rust
/// use promptsync_directory::DirectoryConfig;
///
/// pub struct ScratchConfig;
///
/// impl DirectoryConfig for ScratchConfig {
///     const DIR_NAME: &'static str = ".scratch";
///     const GITIGNORE_CONTENT: &'static str = "*.tmp\n";
///
///     fn init_subdirs() -> &'static [&'static str] {
///         &["cache"]
///     }
/// }
/// ```
pub trait DirectoryConfig: Send + Sync {
    /// The directory name (e.g., ".promptsync").
    const DIR_NAME: &'static str;

    /// Content for the .gitignore file created in the directory.
    const GITIGNORE_CONTENT: &'static str;

    /// Subdirectories to create on initialization.
    ///
    /// Default: No subdirectories.
    fn init_subdirs() -> &'static [&'static str] {
        &[]
    }
}

/// Configuration for `.promptsync` directories.
///
/// The user-home instance stores prompt records under `prompts/<category>/`;
/// a project instance only holds the project configuration file.
#[derive(Debug, Clone, Copy)]
pub struct PromptsyncConfig;

impl DirectoryConfig for PromptsyncConfig {
    const DIR_NAME: &'static str = DIR_NAME;
    const GITIGNORE_CONTENT: &'static str = r#"# promptsync temporary files
# This file is automatically created by promptsync

# Interrupted atomic writes
*.tmp

# Logs
*.log
"#;

    fn init_subdirs() -> &'static [&'static str] {
        &[PROMPTS_SUBDIR]
    }
}
