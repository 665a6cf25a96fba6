//! Directory merge of the live left root with the diff trie
//!
//! A listing starts from what is on disk under the left root and is then
//! corrected by the trie's records for the same directory: additions and
//! renames appear, deletions and modifications are marked in place, and
//! directories that only exist on the right are synthesized from markers.

use crate::diff::types::DiffStatus;
use crate::fs::{FileSystem, FileType};
use crate::tree::path;
use crate::tree::PathTrie;
use crate::view::entry::TreeEntry;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, instrument, warn};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Knobs for a merge pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    /// Include live entries that have no record in the trie
    pub show_unchanged: bool,
}

/// Immediate children of `relative_dir`, merged and sorted
///
/// Filesystem failures are scoped to the directory being listed: they are
/// logged and the listing degrades to whatever the trie contributes.
#[instrument(skip(fs, cache, options), fields(dir = %relative_dir))]
pub async fn list_children(
    fs: &dyn FileSystem,
    left_root: &Path,
    right_root: &Path,
    cache: &PathTrie,
    relative_dir: &str,
    options: &MergeOptions,
) -> Vec<TreeEntry> {
    let relative_dir = path::normalize_key(relative_dir);
    let left_prefix = path::path_to_posix(left_root);
    let right_prefix = path::path_to_posix(right_root);

    let mut working: HashMap<String, TreeEntry> = HashMap::new();

    for (name, file_type) in live_listing(fs, left_root, &relative_dir).await {
        let key = path::join(&relative_dir, &name);
        if !options.show_unchanged && !cache.exists(&key) {
            continue;
        }
        let entry = TreeEntry {
            left_uri: Some(path::resolve(left_root, &key)),
            right_uri: Some(path::resolve(right_root, &key)),
            subpath: key.clone(),
            file_type,
            status: DiffStatus::Unchanged,
        };
        working.insert(key, entry);
    }

    let left_key = |abs: Option<&str>| {
        let abs = abs?;
        path::strip_prefix(abs, &left_prefix).or_else(|| path::strip_prefix(abs, &right_prefix))
    };
    let right_key = |abs: Option<&str>| path::strip_prefix(abs?, &right_prefix);

    for (segment, record) in cache.get_children(&relative_dir) {
        let status = record.map(|r| r.status()).unwrap_or(DiffStatus::Unchanged);
        match (status, record) {
            (DiffStatus::Added, Some(record)) => {
                let key = right_key(record.right_path())
                    .unwrap_or_else(|| path::join(&relative_dir, segment));
                let file_type = record_type(cache, &key);
                // A left directory replaced by a right file keeps its left side
                let left_uri = match file_type {
                    FileType::Directory => working.get(&key).and_then(|e| e.left_uri.clone()),
                    FileType::File => None,
                };
                let entry = TreeEntry {
                    subpath: key.clone(),
                    file_type,
                    status: DiffStatus::Added,
                    left_uri,
                    right_uri: record.right_path().map(Into::into),
                };
                working.insert(key, entry);
            }
            (DiffStatus::Deleted, Some(record)) => {
                let Some(key) = left_key(record.left_path()) else {
                    debug!(segment, "Deleted record outside both roots");
                    continue;
                };
                match working.get_mut(&key) {
                    Some(entry) => {
                        entry.status = DiffStatus::Deleted;
                        entry.right_uri = None;
                        entry.file_type = record_type(cache, &key);
                    }
                    None => debug!(key = %key, "Deleted entry missing from live listing"),
                }
            }
            (DiffStatus::Modified, Some(record)) => {
                let Some(key) = left_key(record.left_path()) else {
                    debug!(segment, "Modified record outside both roots");
                    continue;
                };
                match working.get_mut(&key) {
                    Some(entry) => {
                        entry.status = DiffStatus::Modified;
                        entry.right_uri = record.right_path().map(Into::into);
                        entry.file_type = record_type(cache, &key);
                    }
                    None => debug!(key = %key, "Modified entry missing from live listing"),
                }
            }
            (DiffStatus::Renamed, Some(record)) => {
                if let Some(old_key) = left_key(record.left_path()) {
                    working.remove(&old_key);
                }
                match right_key(record.right_path()) {
                    Some(new_key) if path::parent(&new_key) == relative_dir => {
                        let entry = TreeEntry {
                            file_type: record_type(cache, &new_key),
                            subpath: new_key.clone(),
                            status: DiffStatus::Renamed,
                            left_uri: record.left_path().map(Into::into),
                            right_uri: record.right_path().map(Into::into),
                        };
                        working.insert(new_key, entry);
                    }
                    Some(_) => {}
                    None => debug!(segment, "Renamed record outside the right root"),
                }
            }
            _ => {
                let key = path::join(&relative_dir, segment);
                working.entry(key.clone()).or_insert_with(|| TreeEntry {
                    left_uri: None,
                    right_uri: Some(path::resolve(right_root, &key)),
                    subpath: key,
                    file_type: FileType::Directory,
                    status: DiffStatus::Unchanged,
                });
            }
        }
    }

    let mut entries: Vec<TreeEntry> = working.into_values().collect();
    entries.sort_by(compare_entries);
    debug!(count = entries.len(), "Merged directory");
    entries
}

/// Type of a record-bearing entry
///
/// A file record whose node also has children is a path that changed type
/// between the roots; it lists as a directory so the changes below it stay
/// reachable.
fn record_type(cache: &PathTrie, key: &str) -> FileType {
    if cache.get_children(key).is_empty() {
        FileType::File
    } else {
        FileType::Directory
    }
}

/// Live children of `left/relative_dir`, empty when it cannot be read
async fn live_listing(
    fs: &dyn FileSystem,
    left_root: &Path,
    relative_dir: &str,
) -> Vec<(String, FileType)> {
    let dir = path::resolve(left_root, relative_dir);
    if !fs.exists(&dir).await {
        // Pure-addition subtree
        return Vec::new();
    }
    match fs.stat(&dir).await {
        Ok(stat) if stat.file_type == FileType::Directory => {}
        Ok(_) => {
            // A left file replaced by a right directory
            debug!(dir = %dir.display(), "Left side is a file");
            return Vec::new();
        }
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to stat directory");
            return Vec::new();
        }
    }
    match fs.read_directory(&dir).await {
        Ok(listing) => listing,
        Err(e) => {
            warn!(dir = %dir.display(), error = %e, "Failed to list directory");
            Vec::new()
        }
    }
}

/// Directories first, then locale order of the relative path
pub fn compare_entries(a: &TreeEntry, b: &TreeEntry) -> Ordering {
    match (a.has_children(), b.has_children()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => locale_compare(&a.subpath, &b.subpath),
    }
}

/// Human ordering of two strings
///
/// Accents and case are ignored first, then accents break ties, then case
/// (lowercase before uppercase), then raw code points.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| accent_key(a).cmp(&accent_key(b)))
        .then_with(|| case_key(a).cmp(&case_key(b)))
        .then_with(|| a.cmp(b))
}

fn base_key(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accent_key(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
