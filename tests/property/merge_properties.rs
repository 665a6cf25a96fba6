//! Property-based tests for the merged directory view
//!
//! Random left/right trees are written to disk, diffed by the real engine,
//! and every directory listing is checked against the diff records.

use foldcmp::diff::{DiffStatus, EngineConfig, HashDiffEngine};
use foldcmp::fs::{FileType, LocalFileSystem};
use foldcmp::tree::path;
use foldcmp::view::merge::locale_compare;
use foldcmp::view::{ComparisonSession, MergeOptions, TreeEntry};
use proptest::prelude::*;
use proptest::test_runner::{Config, TestRunner};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// File keys a generated tree may use; no key is also a directory
const UNIVERSE: &[&str] = &[
    "a.txt",
    "B.txt",
    "é.txt",
    "docs/readme.md",
    "docs/guide.md",
    "docs/deep/notes.txt",
    "src/lib.rs",
    "src/Main.rs",
    "zeta/x.bin",
];

/// Per key: left content and right content, either side may be absent
fn tree_pair() -> impl Strategy<Value = Vec<(Option<String>, Option<String>)>> {
    let side = || prop::option::of("[ab]{1,2}");
    prop::collection::vec((side(), side()), UNIVERSE.len())
}

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (key, content) in files {
        let target = path::resolve(root, key);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(target, content).unwrap();
    }
}

fn parents(key: &str) -> Vec<String> {
    let mut dirs = vec![String::new()];
    let mut current = path::parent(key);
    while !current.is_empty() {
        dirs.push(current.to_string());
        current = path::parent(current);
    }
    dirs
}

fn check_sorted(entries: &[TreeEntry]) -> Result<(), TestCaseError> {
    for pair in entries.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        prop_assert!(
            !(a.file_type == FileType::File && b.file_type == FileType::Directory),
            "file {} listed before directory {}",
            a.subpath,
            b.subpath
        );
        if a.file_type == b.file_type {
            prop_assert_ne!(locale_compare(&a.subpath, &b.subpath), Ordering::Greater);
        }
    }
    Ok(())
}

#[test]
fn test_listings_agree_with_diff_records() {
    let mut runner = TestRunner::new(Config {
        cases: 48,
        ..Config::default()
    });
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runner
        .run(&tree_pair(), |sides| {
            let temp_dir = TempDir::new().unwrap();
            let left = dunce::canonicalize(temp_dir.path()).unwrap().join("left");
            let right = dunce::canonicalize(temp_dir.path()).unwrap().join("right");
            std::fs::create_dir_all(&left).unwrap();
            std::fs::create_dir_all(&right).unwrap();

            let mut left_files = Vec::new();
            let mut right_files = Vec::new();
            for (key, (l, r)) in UNIVERSE.iter().zip(&sides) {
                if let Some(content) = l {
                    left_files.push((*key, content.as_str()));
                }
                if let Some(content) = r {
                    right_files.push((*key, content.as_str()));
                }
            }
            write_tree(&left, &left_files);
            write_tree(&right, &right_files);

            let session = ComparisonSession::new(
                Arc::new(HashDiffEngine::new(EngineConfig::default())),
                Arc::new(LocalFileSystem::new()),
                MergeOptions::default(),
            );
            session.update(Some(left.clone()), Some(right.clone()));
            let trie = session.trie();
            let right_prefix = path::path_to_posix(&right);

            let dirs: BTreeSet<String> = UNIVERSE.iter().flat_map(|key| parents(key)).collect();
            for dir in &dirs {
                let entries = runtime.block_on(session.list_children(dir));
                let again = runtime.block_on(session.list_children(dir));
                prop_assert_eq!(&entries, &again);
                check_sorted(&entries)?;

                let mut seen = HashSet::new();
                for entry in &entries {
                    prop_assert!(seen.insert(entry.subpath.as_str()), "duplicate {}", entry.subpath);
                    prop_assert_eq!(path::parent(&entry.subpath), dir.as_str());
                }

                for (key, record) in trie.records() {
                    if record.is_marker() || path::parent(&key) != dir.as_str() {
                        continue;
                    }
                    let listed: Vec<&TreeEntry> =
                        entries.iter().filter(|e| e.subpath == key).collect();
                    match record.status() {
                        DiffStatus::Renamed => {
                            let is_new_key = record
                                .right_path()
                                .and_then(|p| path::strip_prefix(p, &right_prefix))
                                .is_some_and(|new_key| new_key == key);
                            if is_new_key {
                                prop_assert_eq!(listed.len(), 1);
                                prop_assert_eq!(listed[0].status, DiffStatus::Renamed);
                            } else {
                                prop_assert!(listed.is_empty(), "old name {} still listed", key);
                            }
                        }
                        status => {
                            prop_assert_eq!(listed.len(), 1, "missing {}", key);
                            prop_assert_eq!(listed[0].status, status);
                        }
                    }
                }
            }

            // Unchanged files stay hidden by default
            for (key, (l, r)) in UNIVERSE.iter().zip(&sides) {
                if l.is_some() && l == r {
                    let entries = runtime.block_on(session.list_children(path::parent(key)));
                    prop_assert!(entries.iter().all(|e| e.subpath != *key));
                }
            }
            Ok(())
        })
        .unwrap();
}
