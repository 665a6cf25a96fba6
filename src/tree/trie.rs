//! Prefix tree over relative path segments
//!
//! Each node is keyed by one segment relative to its parent and may carry a
//! [`DiffRecord`]. Children keep insertion order; a per-node index gives
//! constant-time segment lookup so per-directory queries never scan the whole
//! diff.

use crate::diff::types::DiffRecord;
use crate::tree::path;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct TrieNode {
    record: Option<DiffRecord>,
    children: Vec<(String, TrieNode)>,
    index: HashMap<String, usize>,
}

impl TrieNode {
    fn child(&self, segment: &str) -> Option<&TrieNode> {
        self.index.get(segment).map(|&i| &self.children[i].1)
    }

    fn child_or_insert(&mut self, segment: &str) -> &mut TrieNode {
        let i = match self.index.get(segment) {
            Some(&i) => i,
            None => {
                self.children.push((segment.to_string(), TrieNode::default()));
                let i = self.children.len() - 1;
                self.index.insert(segment.to_string(), i);
                i
            }
        };
        &mut self.children[i].1
    }
}

/// Diff results indexed by relative path segments
#[derive(Debug, Clone, Default)]
pub struct PathTrie {
    root: TrieNode,
    records: usize,
}

impl PathTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `record` at `relative_path`, creating intermediate nodes
    ///
    /// Repeated insertion at the same path replaces the previous record.
    pub fn insert(&mut self, relative_path: &str, record: DiffRecord) {
        let node = self.node_or_insert(relative_path);
        let replaced = node.record.replace(record);
        if replaced.is_none() {
            self.records += 1;
        }
    }

    /// Mark `relative_path` as a directory with changes below
    ///
    /// Never overwrites an existing record.
    pub fn insert_marker(&mut self, relative_path: &str) {
        let node = self.node_or_insert(relative_path);
        if node.record.is_none() {
            node.record = Some(DiffRecord::unchanged());
            self.records += 1;
        }
    }

    /// True iff a node exists at exactly this path, with or without a record
    pub fn exists(&self, relative_path: &str) -> bool {
        self.node(relative_path).is_some()
    }

    /// Record stored at exactly this path
    pub fn get(&self, relative_path: &str) -> Option<&DiffRecord> {
        self.node(relative_path).and_then(|node| node.record.as_ref())
    }

    /// Immediate children of `relative_path`, in insertion order
    pub fn get_children(&self, relative_path: &str) -> Vec<(&str, Option<&DiffRecord>)> {
        match self.node(relative_path) {
            Some(node) => node
                .children
                .iter()
                .map(|(segment, child)| (segment.as_str(), child.record.as_ref()))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Every record with its full key, depth-first in insertion order
    pub fn records(&self) -> Vec<(String, &DiffRecord)> {
        let mut out = Vec::with_capacity(self.records);
        let mut stack: Vec<(String, &TrieNode)> = vec![(String::new(), &self.root)];
        while let Some((key, node)) = stack.pop() {
            if let Some(record) = node.record.as_ref() {
                out.push((key.clone(), record));
            }
            for (segment, child) in node.children.iter().rev() {
                stack.push((path::join(&key, segment), child));
            }
        }
        out
    }

    /// Number of record-bearing nodes, markers included
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    /// Number of records that describe an actual change
    pub fn change_count(&self) -> usize {
        self.records()
            .iter()
            .filter(|(_, record)| !record.is_marker())
            .count()
    }

    pub fn clear(&mut self) {
        self.root = TrieNode::default();
        self.records = 0;
    }

    fn node(&self, relative_path: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for segment in path::segments(relative_path) {
            node = node.child(&segment)?;
        }
        Some(node)
    }

    fn node_or_insert(&mut self, relative_path: &str) -> &mut TrieNode {
        let mut node = &mut self.root;
        for segment in path::segments(relative_path) {
            node = node.child_or_insert(&segment);
        }
        node
    }
}
