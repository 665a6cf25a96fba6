//! In-memory filesystem for embedding and tests

use super::{FileStat, FileSystem, FileType};
use crate::error::FsError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Directory,
}

/// Filesystem held entirely in memory
///
/// Paths registered with [`MemoryFileSystem::deny`] fail with
/// `PermissionDenied`, which lets callers exercise scoped failure handling.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: RwLock<BTreeMap<PathBuf, Node>>,
    denied: RwLock<HashSet<PathBuf>>,
    calls: AtomicUsize,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and all its ancestors
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut nodes = self.nodes.write();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(Node::Directory);
        }
    }

    /// Add a file, creating parent directories
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .write()
            .insert(path.to_path_buf(), Node::File(content.into()));
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.nodes.write().retain(|p, _| !p.starts_with(path));
    }

    /// Make every operation on `path` fail with `PermissionDenied`
    pub fn deny(&self, path: impl AsRef<Path>) {
        self.denied.write().insert(path.as_ref().to_path_buf());
    }

    /// Number of accessor calls served so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, path: &Path) -> Result<Node, FsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.denied.read().contains(path) {
            return Err(FsError::PermissionDenied(path.to_path_buf()));
        }
        self.nodes
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn stat(&self, path: &Path) -> Result<FileStat, FsError> {
        Ok(match self.check(path)? {
            Node::File(content) => FileStat {
                file_type: FileType::File,
                size: content.len() as u64,
                mtime: None,
            },
            Node::Directory => FileStat {
                file_type: FileType::Directory,
                size: 0,
                mtime: None,
            },
        })
    }

    async fn read_directory(&self, path: &Path) -> Result<Vec<(String, FileType)>, FsError> {
        if let Node::File(_) = self.check(path)? {
            return Err(FsError::InvalidPath(format!("{} is not a directory", path.display())));
        }
        let nodes = self.nodes.read();
        let children = nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(path))
            .filter_map(|(p, node)| {
                let name = p.file_name()?.to_string_lossy().to_string();
                let file_type = match node {
                    Node::File(_) => FileType::File,
                    Node::Directory => FileType::Directory,
                };
                Some((name, file_type))
            })
            .collect();
        Ok(children)
    }

    async fn exists(&self, path: &Path) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.nodes.read().contains_key(path)
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        match self.check(path)? {
            Node::File(content) => Ok(content),
            Node::Directory => Err(FsError::InvalidPath(format!(
                "{} is a directory",
                path.display()
            ))),
        }
    }
}
