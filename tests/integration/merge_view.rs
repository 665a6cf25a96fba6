//! Merged directory view over real roots

use super::test_utils::{statuses, Fixture};
use foldcmp::diff::DiffStatus;
use foldcmp::fs::FileType;
use foldcmp::view::{Collapsible, EntryAction};

#[tokio::test]
async fn test_modified_deleted_added_at_root() {
    let fixture = Fixture::new();
    fixture
        .write_left("a.txt", "one")
        .write_left("b.txt", "b")
        .write_right("a.txt", "two")
        .write_right("c.txt", "c");

    let session = fixture.session(false);
    let entries = session.list_children("").await;
    assert_eq!(
        statuses(&entries),
        vec![
            ("a.txt".to_string(), DiffStatus::Modified),
            ("b.txt".to_string(), DiffStatus::Deleted),
            ("c.txt".to_string(), DiffStatus::Added),
        ]
    );
    assert!(entries.iter().all(|e| e.file_type == FileType::File));
}

#[tokio::test]
async fn test_deleted_subtree_parent_is_listed() {
    let fixture = Fixture::new();
    fixture.write_left("dir/x.txt", "x");

    let session = fixture.session(false);
    let root = session.list_children("").await;
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].subpath, "dir");
    assert_eq!(root[0].file_type, FileType::Directory);

    let items = session.list_items("").await;
    assert_eq!(items[0].collapsible, Collapsible::Expanded);

    let inner = session.list_children("dir").await;
    assert_eq!(statuses(&inner), vec![("dir/x.txt".to_string(), DiffStatus::Deleted)]);
    assert_eq!(inner[0].right_uri, None);
}

#[tokio::test]
async fn test_added_subtree_is_reachable() {
    let fixture = Fixture::new();
    fixture.write_both("keep.txt", "k").write_right("new/deep/n.txt", "n");

    let session = fixture.session(false);
    let root = session.list_children("").await;
    assert_eq!(root.len(), 1);
    assert_eq!(root[0].subpath, "new");
    assert_eq!(root[0].file_type, FileType::Directory);
    assert!(root[0].left_uri.is_none());

    let deep = session.list_children("new").await;
    assert_eq!(deep[0].subpath, "new/deep");
    let leaf = session.list_children("new/deep").await;
    assert_eq!(statuses(&leaf), vec![("new/deep/n.txt".to_string(), DiffStatus::Added)]);
    assert_eq!(
        leaf[0].action(),
        Some(EntryAction::Open {
            path: fixture.right.join("new").join("deep").join("n.txt"),
        })
    );
}

#[tokio::test]
async fn test_unchanged_entries_follow_toggle() {
    let fixture = Fixture::new();
    fixture
        .write_both("same.txt", "s")
        .write_both("quiet/inner.txt", "q")
        .write_left("gone.txt", "g");

    let session = fixture.session(false);
    assert_eq!(
        statuses(&session.list_children("").await),
        vec![("gone.txt".to_string(), DiffStatus::Deleted)]
    );

    session.set_show_unchanged(true);
    let entries = session.list_children("").await;
    assert_eq!(
        statuses(&entries),
        vec![
            ("quiet".to_string(), DiffStatus::Unchanged),
            ("gone.txt".to_string(), DiffStatus::Deleted),
            ("same.txt".to_string(), DiffStatus::Unchanged),
        ]
    );
    assert_eq!(session.list_items("").await[0].collapsible, Collapsible::Collapsed);
    assert_eq!(entries[2].left_uri, Some(fixture.left.join("same.txt")));
}

#[tokio::test]
async fn test_rename_shows_new_name_once() {
    let fixture = Fixture::new();
    fixture
        .write_left("old.txt", "renamed content")
        .write_right("new.txt", "renamed content")
        .write_both("other.txt", "o");

    let session = fixture.session(true);
    let entries = session.list_children("").await;
    assert_eq!(
        statuses(&entries),
        vec![
            ("new.txt".to_string(), DiffStatus::Renamed),
            ("other.txt".to_string(), DiffStatus::Unchanged),
        ]
    );
    assert_eq!(entries[0].left_uri, Some(fixture.left.join("old.txt")));
}

#[tokio::test]
async fn test_modified_entry_opens_diff() {
    let fixture = Fixture::new();
    fixture.write_left("src/m.rs", "fn a() {}").write_right("src/m.rs", "fn b() {}");

    let session = fixture.session(false);
    let items = session.list_items("src").await;
    let item = &items[0];
    assert_eq!(
        item.action,
        Some(EntryAction::OpenDiff {
            left: fixture.left.join("src").join("m.rs"),
            right: fixture.right.join("src").join("m.rs"),
            title: "src/m.rs (Modified)".to_string(),
        })
    );
}

#[tokio::test]
async fn test_directories_sort_before_files() {
    let fixture = Fixture::new();
    fixture
        .write_left("b.txt", "1")
        .write_left("A.txt", "1")
        .write_left("zdir/f", "1")
        .mkdir_left("empty");

    let session = fixture.session(true);
    let first = session.list_children("").await;
    let names: Vec<&str> = first.iter().map(|e| e.subpath.as_str()).collect();
    assert_eq!(names, vec!["empty", "zdir", "A.txt", "b.txt"]);

    let second = session.list_children("").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_path_that_changes_type_keeps_changes_below_it() {
    let fixture = Fixture::new();
    fixture
        .write_left("d/inner.txt", "inner")
        .write_right("d", "now a file")
        .write_left("f", "was a file")
        .write_right("f/new.txt", "nested");

    let session = fixture.session(false);
    let root = session.list_children("").await;
    assert_eq!(
        statuses(&root),
        vec![
            ("d".to_string(), DiffStatus::Added),
            ("f".to_string(), DiffStatus::Deleted),
        ]
    );
    assert!(root.iter().all(|e| e.file_type == FileType::Directory));
    let items = session.list_items("").await;
    assert!(items.iter().all(|i| i.collapsible == Collapsible::Expanded));

    assert_eq!(
        statuses(&session.list_children("d").await),
        vec![("d/inner.txt".to_string(), DiffStatus::Deleted)]
    );
    assert_eq!(
        statuses(&session.list_children("f").await),
        vec![("f/new.txt".to_string(), DiffStatus::Added)]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_backslash_in_name_is_one_entry() {
    let fixture = Fixture::new();
    fixture.write_left("a\\b.txt", "one").write_right("a\\b.txt", "two");

    let session = fixture.session(false);
    let entries = session.list_children("").await;
    assert_eq!(
        statuses(&entries),
        vec![("a\\b.txt".to_string(), DiffStatus::Modified)]
    );
    assert_eq!(entries[0].file_type, FileType::File);
}
