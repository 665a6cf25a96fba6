//! Comparison session lifecycle: selection, refresh, observers, snapshots

use super::test_utils::Fixture;
use foldcmp::diff::{DiffStatus, EngineConfig, HashDiffEngine};
use foldcmp::fs::MemoryFileSystem;
use foldcmp::view::{ComparisonSession, DiffRoots, MergeOptions};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_no_roots_means_no_filesystem_access() {
    let fs = Arc::new(MemoryFileSystem::new());
    fs.add_file("/left/a.txt", "a");
    let session = ComparisonSession::new(
        Arc::new(HashDiffEngine::new(EngineConfig::default())),
        fs.clone(),
        MergeOptions::default(),
    );

    assert!(session.list_children("").await.is_empty());
    assert!(session.list_children("a/b").await.is_empty());
    assert_eq!(fs.call_count(), 0);

    session.select_left("/left");
    assert!(!session.is_valid());
    assert!(session.list_children("").await.is_empty());
    assert_eq!(fs.call_count(), 0);
}

#[test]
fn test_update_fires_observers_once_with_new_roots() {
    let fixture = Fixture::new();
    fixture.write_left("a.txt", "a");

    let session = ComparisonSession::new(
        Arc::new(HashDiffEngine::new(EngineConfig::default())),
        Arc::new(foldcmp::fs::LocalFileSystem::new()),
        MergeOptions::default(),
    );
    let seen: Arc<Mutex<Vec<DiffRoots>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    session.on_refresh(move |roots, _| sink.lock().unwrap().push(roots.clone()));

    session.update(Some(fixture.left.clone()), Some(fixture.right.clone()));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], DiffRoots::new(&fixture.left, &fixture.right));
    assert_eq!(session.trie().change_count(), 1);
}

#[test]
fn test_invalid_root_yields_empty_trie() {
    let fixture = Fixture::new();
    fixture.write_left("a.txt", "a");

    let session = fixture.session(false);
    assert_eq!(session.trie().change_count(), 1);

    session.select_right(fixture.right.join("does-not-exist"));
    assert!(session.is_valid());
    assert!(session.trie().is_empty());
}

#[tokio::test]
async fn test_refresh_picks_up_changes_and_keeps_old_snapshot() {
    let fixture = Fixture::new();
    fixture.write_both("a.txt", "same");

    let session = fixture.session(false);
    let before = session.trie();
    assert!(before.is_empty());

    fixture.write_right("a.txt", "changed");
    session.refresh();

    assert!(before.is_empty());
    let entries = session.list_children("").await;
    assert_eq!(entries[0].status, DiffStatus::Modified);
}

#[test]
fn test_clear_resets_and_notifies() {
    let fixture = Fixture::new();
    fixture.write_left("a.txt", "a");
    let session = fixture.session(false);

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    let id = session.on_refresh(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    session.clear();
    assert!(!session.is_valid());
    assert!(session.trie().is_empty());
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    assert!(session.unsubscribe(id));
    session.refresh();
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_queries_during_rebuild() {
    let fixture = Fixture::new();
    for i in 0..20 {
        fixture.write_left(&format!("dir/f{}.txt", i), "left");
        fixture.write_right(&format!("dir/f{}.txt", i), "right");
    }
    let session = Arc::new(fixture.session(true));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let session = session.clone();
            tokio::spawn(async move {
                for _ in 0..10 {
                    let entries = session.list_children("dir").await;
                    assert!(entries.len() == 20 || entries.is_empty());
                }
            })
        })
        .collect();

    let writer = {
        let session = session.clone();
        tokio::task::spawn_blocking(move || {
            for _ in 0..5 {
                session.refresh();
            }
        })
    };

    for reader in readers {
        reader.await.unwrap();
    }
    writer.await.unwrap();
    assert_eq!(session.trie().change_count(), 20);
}
