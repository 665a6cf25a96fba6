//! Diff classification records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification attached to a relative path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffStatus {
    /// No change at this path; on a directory node it marks changes below
    Unchanged,
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl DiffStatus {
    /// Single-letter code, git `--name-status` style
    pub fn code(&self) -> char {
        match self {
            DiffStatus::Unchanged => ' ',
            DiffStatus::Added => 'A',
            DiffStatus::Deleted => 'D',
            DiffStatus::Modified => 'M',
            DiffStatus::Renamed => 'R',
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, DiffStatus::Unchanged)
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DiffStatus::Unchanged => "unchanged",
            DiffStatus::Added => "added",
            DiffStatus::Deleted => "deleted",
            DiffStatus::Modified => "modified",
            DiffStatus::Renamed => "renamed",
        };
        f.write_str(label)
    }
}

/// Diff record stored on a trie node
///
/// Paths are posix-form paths under their respective root. Which sides are
/// present is fixed by the status, so records are only built through the
/// constructors below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRecord {
    left_path: Option<String>,
    right_path: Option<String>,
    status: DiffStatus,
}

impl DiffRecord {
    /// Path exists only under the right root
    pub fn added(right_path: impl Into<String>) -> Self {
        Self {
            left_path: None,
            right_path: Some(right_path.into()),
            status: DiffStatus::Added,
        }
    }

    /// Path exists only under the left root
    pub fn deleted(left_path: impl Into<String>) -> Self {
        Self {
            left_path: Some(left_path.into()),
            right_path: None,
            status: DiffStatus::Deleted,
        }
    }

    pub fn modified(left_path: impl Into<String>, right_path: impl Into<String>) -> Self {
        Self {
            left_path: Some(left_path.into()),
            right_path: Some(right_path.into()),
            status: DiffStatus::Modified,
        }
    }

    /// Content moved from `left_path` to `right_path`
    pub fn renamed(left_path: impl Into<String>, right_path: impl Into<String>) -> Self {
        Self {
            left_path: Some(left_path.into()),
            right_path: Some(right_path.into()),
            status: DiffStatus::Renamed,
        }
    }

    /// Ancestor marker for a directory containing changes
    pub fn unchanged() -> Self {
        Self {
            left_path: None,
            right_path: None,
            status: DiffStatus::Unchanged,
        }
    }

    pub fn left_path(&self) -> Option<&str> {
        self.left_path.as_deref()
    }

    pub fn right_path(&self) -> Option<&str> {
        self.right_path.as_deref()
    }

    pub fn status(&self) -> DiffStatus {
        self.status
    }

    pub fn is_marker(&self) -> bool {
        self.status == DiffStatus::Unchanged
    }
}
