//! Filesystem accessor
//!
//! The merge view reads the live left root through this trait so listings can
//! be served by the local disk or by an in-memory fixture.

use crate::error::FsError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::SystemTime;
use tracing::warn;

pub mod memory;

pub use memory::MemoryFileSystem;

/// Kind of a filesystem entry as far as the view is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    File,
    Directory,
}

/// Result of a stat call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStat {
    pub file_type: FileType,
    pub size: u64,
    pub mtime: Option<SystemTime>,
}

/// Read-only filesystem operations used by the merge view
#[async_trait]
pub trait FileSystem: Send + Sync {
    async fn stat(&self, path: &Path) -> Result<FileStat, FsError>;

    /// Names and types of the immediate children of `path`
    async fn read_directory(&self, path: &Path) -> Result<Vec<(String, FileType)>, FsError>;

    async fn exists(&self, path: &Path) -> bool;

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError>;
}

/// Local disk accessor backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> Result<FileStat, FsError> {
        // Follows symlinks, so a link to a directory lists as a directory
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;
        let file_type = if metadata.is_dir() {
            FileType::Directory
        } else {
            FileType::File
        };
        Ok(FileStat {
            file_type,
            size: metadata.len(),
            mtime: metadata.modified().ok(),
        })
    }

    async fn read_directory(&self, path: &Path) -> Result<Vec<(String, FileType)>, FsError> {
        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|e| FsError::from_io(path, e))?;

        let mut result = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| FsError::from_io(path, e))?
        {
            let name = entry.file_name().to_string_lossy().to_string();
            match self.stat(&entry.path()).await {
                Ok(stat) => result.push((name, stat.file_type)),
                // A dangling link or a vanished entry only drops itself
                Err(e) => warn!(entry = %name, error = %e, "Skipping unreadable entry"),
            }
        }
        Ok(result)
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        tokio::fs::read(path)
            .await
            .map_err(|e| FsError::from_io(path, e))
    }
}
