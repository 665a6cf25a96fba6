//! Filesystem walker for traversing one diff root

use crate::error::DiffError;
use crate::tree::path;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filesystem entry relative to the walked root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file with its posix key, absolute path, and size
    File { key: String, path: PathBuf, size: u64 },
    /// A directory with its posix key and absolute path
    Directory { key: String, path: PathBuf },
}

impl Entry {
    pub fn key(&self) -> &str {
        match self {
            Entry::File { key, .. } | Entry::Directory { key, .. } => key,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path, .. } | Entry::Directory { path, .. } => path,
        }
    }
}

/// Filesystem walker configuration
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    pub follow_symlinks: bool,
    /// Segment names to skip entirely (e.g. ".git", "node_modules")
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
            ],
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the root and collect all entries below it
    ///
    /// Returns entries sorted by key for determinism.
    pub fn walk(&self) -> Result<Vec<Entry>, DiffError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.should_ignore(entry));

        for entry in walker {
            let entry = entry.map_err(|e| DiffError::Walk {
                root: self.root.clone(),
                message: e.to_string(),
            })?;

            // The root itself is not an entry
            if entry.depth() == 0 {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| DiffError::Walk {
                    root: self.root.clone(),
                    message: format!("{:?} escapes root: {}", entry.path(), e),
                })?;
            let key = path::path_to_key(relative);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                entries.push(Entry::Directory {
                    key,
                    path: entry.path().to_path_buf(),
                });
            } else if file_type.is_file() {
                let metadata = entry.metadata().map_err(|e| DiffError::Walk {
                    root: self.root.clone(),
                    message: format!("Failed to read metadata for {:?}: {}", entry.path(), e),
                })?;
                entries.push(Entry::File {
                    key,
                    path: entry.path().to_path_buf(),
                    size: metadata.len(),
                });
            }
            // Symlinks are skipped unless followed
        }

        entries.sort_by(|a, b| a.key().cmp(b.key()));

        Ok(entries)
    }

    /// Check if an entry's name matches an ignore pattern
    fn should_ignore(&self, entry: &DirEntry) -> bool {
        let name = entry.file_name().to_string_lossy();
        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| name == pattern.as_str())
    }
}
