//! Diff engine: classifies every differing relative path between two roots
//!
//! The [`DiffEngine`] trait is the contract the merge view consumes. The
//! comparison strategy behind it is replaceable; [`HashDiffEngine`] compares
//! file sizes and BLAKE3 content hashes and pairs renames by content identity.

use crate::diff::types::DiffRecord;
use crate::error::DiffError;
use crate::tree::hasher::{self, Hash};
use crate::tree::path;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use crate::tree::PathTrie;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, trace};

/// Produces a populated [`PathTrie`] for a pair of roots
///
/// Postcondition: one record-bearing node per Added, Deleted, or Modified
/// path; Renamed records sit on both the old and the new key; every ancestor
/// directory of a changed key carries an `Unchanged` marker.
pub trait DiffEngine: Send + Sync {
    fn diff(&self, left_root: &Path, right_root: &Path) -> Result<PathTrie, DiffError>;
}

/// Rename and traversal settings for [`HashDiffEngine`]
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub walker: WalkerConfig,
    /// Pair left-only and right-only files with identical content
    pub detect_renames: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            walker: WalkerConfig::default(),
            detect_renames: true,
        }
    }
}

/// Counts reported after a diff run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub renamed: usize,
}

/// Size-then-hash comparison with identity-based rename detection
#[derive(Debug, Clone, Default)]
pub struct HashDiffEngine {
    config: EngineConfig,
}

impl HashDiffEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    fn walk_files(&self, root: &Path) -> Result<BTreeMap<String, (PathBuf, u64)>, DiffError> {
        let walker = Walker::with_config(root.to_path_buf(), self.config.walker.clone());
        let files = walker
            .walk()?
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::File { key, path, size } => Some((key, (path, size))),
                Entry::Directory { .. } => None,
            })
            .collect();
        Ok(files)
    }

    fn same_content(
        left: &Path,
        left_size: u64,
        right: &Path,
        right_size: u64,
    ) -> Result<bool, DiffError> {
        if left_size != right_size {
            return Ok(false);
        }
        Ok(hasher::hash_file(left)? == hasher::hash_file(right)?)
    }
}

impl DiffEngine for HashDiffEngine {
    #[instrument(skip(self), fields(left = %left_root.display(), right = %right_root.display()))]
    fn diff(&self, left_root: &Path, right_root: &Path) -> Result<PathTrie, DiffError> {
        let start = Instant::now();
        for root in [left_root, right_root] {
            if !root.is_dir() {
                return Err(DiffError::InvalidRoot(root.to_path_buf()));
            }
        }
        info!("Starting diff");

        let left_files = self.walk_files(left_root)?;
        let right_files = self.walk_files(right_root)?;
        debug!(
            left_files = left_files.len(),
            right_files = right_files.len(),
            "Walked both roots"
        );

        let left_prefix = path::path_to_posix(left_root);
        let right_prefix = path::path_to_posix(right_root);
        let left_abs = |key: &str| path::join(&left_prefix, key);
        let right_abs = |key: &str| path::join(&right_prefix, key);

        let mut changes: Vec<(String, DiffRecord)> = Vec::new();
        let mut summary = DiffSummary::default();
        let mut deleted: Vec<&String> = Vec::new();

        for (key, (left_path, left_size)) in &left_files {
            match right_files.get(key) {
                Some((right_path, right_size)) => {
                    if !Self::same_content(left_path, *left_size, right_path, *right_size)? {
                        trace!(key = %key, "Content differs");
                        changes.push((
                            key.clone(),
                            DiffRecord::modified(left_abs(key), right_abs(key)),
                        ));
                        summary.modified += 1;
                    }
                }
                None => deleted.push(key),
            }
        }
        let mut added: Vec<&String> = right_files
            .keys()
            .filter(|key| !left_files.contains_key(*key))
            .collect();

        if self.config.detect_renames && !deleted.is_empty() && !added.is_empty() {
            // Left-only candidates by content, consumed in key order
            let mut by_hash: HashMap<Hash, VecDeque<&String>> = HashMap::new();
            for key in &deleted {
                let (path, size) = &left_files[*key];
                if *size == 0 {
                    continue;
                }
                by_hash.entry(hasher::hash_file(path)?).or_default().push_back(*key);
            }

            let mut paired_left: Vec<&String> = Vec::new();
            let mut unpaired_right: Vec<&String> = Vec::new();
            for key in added {
                let (path, size) = &right_files[key];
                let source = if *size == 0 {
                    None
                } else {
                    let hash = hasher::hash_file(path)?;
                    by_hash.get_mut(&hash).and_then(VecDeque::pop_front).map(|old| (old, hash))
                };
                match source {
                    Some((old, hash)) => {
                        trace!(from = %old, to = %key, hash = %hex::encode(hash), "Detected rename");
                        let record = DiffRecord::renamed(left_abs(old), right_abs(key));
                        changes.push((old.clone(), record.clone()));
                        changes.push((key.clone(), record));
                        paired_left.push(old);
                        summary.renamed += 1;
                    }
                    None => unpaired_right.push(key),
                }
            }
            deleted.retain(|key| !paired_left.contains(key));
            added = unpaired_right;
        }

        for key in deleted {
            changes.push((key.clone(), DiffRecord::deleted(left_abs(key))));
            summary.deleted += 1;
        }
        for key in added {
            changes.push((key.clone(), DiffRecord::added(right_abs(key))));
            summary.added += 1;
        }

        let mut trie = PathTrie::new();
        for (key, record) in &changes {
            trie.insert(key, record.clone());
        }
        for (key, _) in &changes {
            let mut ancestor = path::parent(key);
            while !ancestor.is_empty() {
                trie.insert_marker(ancestor);
                ancestor = path::parent(ancestor);
            }
        }

        info!(
            added = summary.added,
            deleted = summary.deleted,
            modified = summary.modified,
            renamed = summary.renamed,
            duration_ms = start.elapsed().as_millis(),
            "Diff completed"
        );

        Ok(trie)
    }
}

/// Count the change records in a trie produced by any engine
pub fn summarize(trie: &PathTrie) -> DiffSummary {
    use crate::diff::types::DiffStatus;
    use std::collections::HashSet;

    let mut summary = DiffSummary::default();
    // Each rename sits on two keys; count distinct pairs
    let mut renames = HashSet::new();
    for (_, record) in trie.records() {
        match record.status() {
            DiffStatus::Added => summary.added += 1,
            DiffStatus::Deleted => summary.deleted += 1,
            DiffStatus::Modified => summary.modified += 1,
            DiffStatus::Renamed => {
                renames.insert((record.left_path(), record.right_path()));
            }
            DiffStatus::Unchanged => {}
        }
    }
    summary.renamed = renames.len();
    summary
}
