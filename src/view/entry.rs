//! Renderable entries and the actions a renderer can take on them

use crate::diff::types::DiffStatus;
use crate::fs::FileType;
use crate::tree::path;
use crate::tree::PathTrie;
use serde::Serialize;
use std::path::PathBuf;

/// One child produced by a directory merge
///
/// `left_uri`/`right_uri` are `None` when that side does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub subpath: String,
    pub file_type: FileType,
    pub status: DiffStatus,
    pub left_uri: Option<PathBuf>,
    pub right_uri: Option<PathBuf>,
}

/// What activating an entry should do
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryAction {
    /// Show one side's content
    Open { path: PathBuf },
    /// Show both sides side by side
    OpenDiff {
        left: PathBuf,
        right: PathBuf,
        title: String,
    },
}

/// Expand/collapse affordance for an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collapsible {
    /// Leaf
    None,
    /// Directory with nothing changed below it
    Collapsed,
    /// Directory with at least one change below it
    Expanded,
}

impl TreeEntry {
    /// Leaf name of the entry
    pub fn name(&self) -> &str {
        path::file_name(&self.subpath)
    }

    pub fn has_children(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Action for activating this entry; directories have none
    pub fn action(&self) -> Option<EntryAction> {
        if self.has_children() {
            return None;
        }
        let open = |uri: &Option<PathBuf>| uri.clone().map(|path| EntryAction::Open { path });
        match self.status {
            DiffStatus::Added | DiffStatus::Renamed => open(&self.right_uri),
            DiffStatus::Deleted | DiffStatus::Unchanged => open(&self.left_uri),
            DiffStatus::Modified => match (&self.left_uri, &self.right_uri) {
                (Some(left), Some(right)) => Some(EntryAction::OpenDiff {
                    left: left.clone(),
                    right: right.clone(),
                    title: format!("{} (Modified)", self.subpath),
                }),
                _ => open(&self.left_uri).or_else(|| open(&self.right_uri)),
            },
        }
    }

    /// Directories containing changes start expanded
    pub fn collapsible(&self, trie: &PathTrie) -> Collapsible {
        if !self.has_children() {
            Collapsible::None
        } else if trie.exists(&self.subpath) {
            Collapsible::Expanded
        } else {
            Collapsible::Collapsed
        }
    }
}

/// Presentation-ready view of an entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeItem {
    pub label: String,
    pub subpath: String,
    pub file_type: FileType,
    pub status: DiffStatus,
    pub action: Option<EntryAction>,
    pub collapsible: Collapsible,
}

impl TreeItem {
    pub fn from_entry(entry: &TreeEntry, trie: &PathTrie) -> Self {
        Self {
            label: entry.name().to_string(),
            subpath: entry.subpath.clone(),
            file_type: entry.file_type,
            status: entry.status,
            action: entry.action(),
            collapsible: entry.collapsible(trie),
        }
    }
}
