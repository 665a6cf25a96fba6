//! foldcmp: classified, navigable directory-tree comparison
//!
//! Compares a left and a right root, records every differing relative path in
//! a [`tree::PathTrie`], and serves a merged per-directory view that overlays
//! those records on the live left tree.

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod fs;
pub mod logging;
pub mod tooling;
pub mod tree;
pub mod view;
