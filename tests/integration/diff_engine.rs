//! Diff engine contract tests against real directory trees

use super::test_utils::Fixture;
use foldcmp::diff::{summarize, DiffEngine, DiffStatus, EngineConfig, HashDiffEngine};
use foldcmp::tree::path;

fn engine() -> HashDiffEngine {
    HashDiffEngine::new(EngineConfig::default())
}

#[test]
fn test_identical_trees_produce_empty_trie() {
    let fixture = Fixture::new();
    fixture.write_both("a.txt", "same").write_both("dir/b.txt", "same");

    let trie = engine().diff(&fixture.left, &fixture.right).unwrap();
    assert!(trie.is_empty());
}

#[test]
fn test_classifies_added_deleted_modified() {
    let fixture = Fixture::new();
    fixture
        .write_left("a.txt", "one")
        .write_left("b.txt", "b")
        .write_right("a.txt", "two")
        .write_right("c.txt", "c");

    let trie = engine().diff(&fixture.left, &fixture.right).unwrap();
    assert_eq!(trie.get("a.txt").unwrap().status(), DiffStatus::Modified);
    assert_eq!(trie.get("b.txt").unwrap().status(), DiffStatus::Deleted);
    assert_eq!(trie.get("c.txt").unwrap().status(), DiffStatus::Added);

    let added = trie.get("c.txt").unwrap();
    assert!(added.left_path().is_none());
    let right_key = path::strip_prefix(
        added.right_path().unwrap(),
        &path::path_to_posix(&fixture.right),
    );
    assert_eq!(right_key.as_deref(), Some("c.txt"));
}

#[test]
fn test_ancestors_are_marked() {
    let fixture = Fixture::new();
    fixture.write_left("dir/sub/x.txt", "x");

    let trie = engine().diff(&fixture.left, &fixture.right).unwrap();
    assert_eq!(trie.get("dir/sub/x.txt").unwrap().status(), DiffStatus::Deleted);
    assert!(trie.get("dir").unwrap().is_marker());
    assert!(trie.get("dir/sub").unwrap().is_marker());
    assert_eq!(trie.change_count(), 1);
}

#[test]
fn test_rename_detected_by_content() {
    let fixture = Fixture::new();
    fixture
        .write_left("old/name.txt", "identical content")
        .write_right("new/name.txt", "identical content");

    let trie = engine().diff(&fixture.left, &fixture.right).unwrap();
    let at_old = trie.get("old/name.txt").unwrap();
    let at_new = trie.get("new/name.txt").unwrap();
    assert_eq!(at_old.status(), DiffStatus::Renamed);
    assert_eq!(at_old, at_new);
    assert_eq!(summarize(&trie).renamed, 1);
}

#[test]
fn test_rename_detection_can_be_disabled() {
    let fixture = Fixture::new();
    fixture
        .write_left("a.txt", "identical content")
        .write_right("b.txt", "identical content");

    let config = EngineConfig {
        detect_renames: false,
        ..EngineConfig::default()
    };
    let trie = HashDiffEngine::new(config)
        .diff(&fixture.left, &fixture.right)
        .unwrap();
    assert_eq!(trie.get("a.txt").unwrap().status(), DiffStatus::Deleted);
    assert_eq!(trie.get("b.txt").unwrap().status(), DiffStatus::Added);
}

#[test]
fn test_ignored_directories_are_skipped() {
    let fixture = Fixture::new();
    fixture.write_left(".git/HEAD", "ref").write_right("target/out", "bin");

    let trie = engine().diff(&fixture.left, &fixture.right).unwrap();
    assert!(trie.is_empty());
}

#[test]
fn test_missing_root_is_an_error() {
    let fixture = Fixture::new();
    let missing = fixture.left.join("nope");
    assert!(engine().diff(&missing, &fixture.right).is_err());
}
