//! Path-keyed tree structures
//!
//! The diff trie, the relative-key codec that feeds it, and the walker and
//! hasher the diff engine uses to populate it.

pub mod hasher;
pub mod path;
pub mod trie;
pub mod walker;

pub use trie::PathTrie;
