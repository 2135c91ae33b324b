//! Read/write access to external rules files

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs;

/// I/O over rules files. The engine goes through this trait so tests can
/// observe or fail writes.
#[async_trait]
pub trait RulesFiles: Send + Sync {
    async fn read(&self, path: &Path) -> io::Result<String>;

    /// Replace the file content, creating parent directories as needed.
    async fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Create the file empty if it does not exist. Existing content is kept.
    async fn ensure_exists(&self, path: &Path) -> io::Result<()>;
}

/// Rules file access through `tokio::fs`
#[derive(Debug, Default, Clone, Copy)]
pub struct FsRulesFiles;

#[async_trait]
impl RulesFiles for FsRulesFiles {
    async fn read(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content).await
    }

    async fn ensure_exists(&self, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map(|_| ())
    }
}
