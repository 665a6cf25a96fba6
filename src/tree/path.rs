//! Path canonicalization, normalization, and relative-key codec
//!
//! Every key stored in the diff trie or used by the merge is a posix-style
//! relative path. The functions here are the only place separators and root
//! prefixes are handled, so the trie and the live listing always agree.

use crate::error::FsError;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

/// Posix separator used in every relative key
pub const SEPARATOR: char = '/';

/// True for `/` and for the platform separator
///
/// `\` only separates on Windows; elsewhere it is a legal name character.
pub fn is_separator(c: char) -> bool {
    c == SEPARATOR || c == MAIN_SEPARATOR
}

/// Canonicalize a root path
///
/// Resolves symlinks, `..` and `.`, then removes trailing separators (except
/// root). Segment bytes are kept as the filesystem reports them so keys built
/// from walks and from live listings agree.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, FsError> {
    // dunce avoids UNC prefixes on Windows, which would break prefix stripping
    let canonical = dunce::canonicalize(path).map_err(|e| FsError::from_io(path, e))?;
    let path_str = canonical.to_string_lossy();
    Ok(PathBuf::from(trim_trailing_separators(&path_str)))
}

/// Remove trailing separators without filesystem access (root is preserved)
pub fn trim_trailing_separators(path: &str) -> String {
    let mut result = path.to_string();
    while result.len() > 1 && result.ends_with(is_separator) {
        result.pop();
    }
    result
}

/// Normalize platform separators to `/`
pub fn to_posix(path: &str) -> String {
    if MAIN_SEPARATOR == SEPARATOR {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

/// Posix form of an OS path
pub fn path_to_posix(path: &Path) -> String {
    to_posix(&path.to_string_lossy())
}

/// Strip a root prefix from `path`
///
/// The prefix must match as a whole leading path: either `path == prefix`
/// (yielding the empty key) or `path` continues with exactly one separator
/// after the prefix. Anything else, including a prefix that only matches
/// part of a segment, yields `None`.
pub fn strip_prefix(path: &str, prefix: &str) -> Option<String> {
    let path = to_posix(path);
    let mut prefix = to_posix(prefix);
    while prefix.len() > 1 && prefix.ends_with(SEPARATOR) {
        prefix.pop();
    }
    if prefix.is_empty() {
        return None;
    }
    if path == prefix {
        return Some(String::new());
    }
    let rest = path.strip_prefix(prefix.as_str())?;
    if prefix.ends_with(SEPARATOR) {
        // Filesystem root: the separator belongs to the prefix itself
        return Some(rest.to_string());
    }
    rest.strip_prefix(SEPARATOR).map(str::to_string)
}

/// Join a relative directory key and a child name
pub fn join(dir: &str, name: &str) -> String {
    let name = name.trim_start_matches(SEPARATOR);
    if dir.is_empty() {
        name.to_string()
    } else if name.is_empty() {
        dir.to_string()
    } else if dir.ends_with(SEPARATOR) {
        format!("{}{}", dir, name)
    } else {
        format!("{}{}{}", dir, SEPARATOR, name)
    }
}

/// Parent key of a relative key (`""` for top-level entries)
pub fn parent(key: &str) -> &str {
    match key.rsplit_once(SEPARATOR) {
        Some((parent, _)) => parent,
        None => "",
    }
}

/// Last segment of a relative key
pub fn file_name(key: &str) -> &str {
    match key.rsplit_once(SEPARATOR) {
        Some((_, name)) => name,
        None => key,
    }
}

/// Non-empty segments of a key, tolerating platform and repeated separators
pub fn segments(key: &str) -> Vec<String> {
    key.split(is_separator)
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
        .collect()
}

/// Canonical relative key for a possibly messy relative path string
pub fn normalize_key(key: &str) -> String {
    segments(key).join("/")
}

/// Relative OS path to a posix key
pub fn path_to_key(path: &Path) -> String {
    let parts: Vec<String> = path
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    parts.join("/")
}

/// Absolute location of a relative key under `root`
pub fn resolve(root: &Path, key: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for segment in segments(key) {
        path.push(segment);
    }
    path
}
