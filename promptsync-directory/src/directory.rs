//! Managed directory structure for `.promptsync` directories.
//!
//! `ManagedDirectory<C>` owns a directory such as `~/.promptsync`, creating
//! it, its `.gitignore` and its initial subdirectories on construction.

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// A managed directory with automatic creation and gitignore handling.
///
/// # Examples
///
/// ```no_run
/// use promptsync_directory::{ManagedDirectory, PromptsyncConfig};
///
/// let dir = ManagedDirectory::<PromptsyncConfig>::from_user_home()?;
///
/// // Get a subdirectory, creating it if needed
/// let global_prompts = dir.ensure_subdir("prompts/global")?;
/// # let _ = global_prompts;
/// # Ok::<(), promptsync_directory::DirectoryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ManagedDirectory<C: DirectoryConfig> {
    root: PathBuf,
    _phantom: PhantomData<C>,
}

impl<C: DirectoryConfig> ManagedDirectory<C> {
    fn new(root: PathBuf) -> Result<Self> {
        if !root.exists() {
            fs::create_dir_all(&root).map_err(|e| DirectoryError::directory_creation(&root, e))?;
        }

        let instance = Self {
            root,
            _phantom: PhantomData,
        };

        instance.write_gitignore_if_needed()?;

        for subdir in C::init_subdirs() {
            instance.ensure_subdir(subdir)?;
        }

        Ok(instance)
    }

    /// Write .gitignore file if it doesn't exist.
    fn write_gitignore_if_needed(&self) -> Result<()> {
        let gitignore_path = self.root.join(".gitignore");

        // Only write if doesn't exist (let user manage if it exists)
        if !gitignore_path.exists() {
            fs::write(&gitignore_path, C::GITIGNORE_CONTENT)
                .map_err(|e| DirectoryError::file_write(&gitignore_path, e))?;
            tracing::debug!(
                "Created .gitignore in {} directory: {}",
                C::DIR_NAME,
                gitignore_path.display()
            );
        }

        Ok(())
    }

    /// Create from user's home directory.
    ///
    /// # Errors
    ///
    /// Returns `NoHomeDirectory` if the home directory cannot be determined.
    pub fn from_user_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(DirectoryError::NoHomeDirectory)?;
        let root = home.join(C::DIR_NAME);
        Self::new(root)
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get a subdirectory path, creating it if it doesn't exist.
    pub fn ensure_subdir(&self, name: &str) -> Result<PathBuf> {
        let path = self.root.join(name);
        fs::create_dir_all(&path).map_err(|e| DirectoryError::directory_creation(&path, e))?;
        Ok(path)
    }

}

/// Find the project root by walking up from `start` to the first directory
/// containing `.git`.
///
/// Returns `None` when no ancestor is a repository root.
pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        if path.join(".git").exists() {
            return Some(path.to_path_buf());
        }

        match path.parent() {
            Some(parent) => path = parent,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PromptsyncConfig;
    use tempfile::TempDir;

    fn managed(temp: &TempDir) -> ManagedDirectory<PromptsyncConfig> {
        ManagedDirectory::new(temp.path().join(".promptsync")).unwrap()
    }

    #[test]
    fn test_creation_writes_gitignore_and_prompts_dir() {
        let temp = TempDir::new().unwrap();
        let dir = managed(&temp);

        assert_eq!(dir.root(), temp.path().join(".promptsync"));
        assert!(dir.root().join("prompts").is_dir());
        assert!(dir.root().join(".gitignore").is_file());
    }

    #[test]
    fn test_ensure_subdir_creates_nested() {
        let temp = TempDir::new().unwrap();
        let created = managed(&temp).ensure_subdir("prompts/global").unwrap();
        assert!(created.is_dir());
    }

    #[test]
    fn test_existing_gitignore_is_preserved() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".promptsync");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(".gitignore"), "custom\n").unwrap();

        managed(&temp);

        let content = fs::read_to_string(root.join(".gitignore")).unwrap();
        assert_eq!(content, "custom\n");
    }

    #[test]
    fn test_find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("src/deep");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(
            find_project_root_from(&nested),
            Some(temp.path().to_path_buf())
        );
    }
}
