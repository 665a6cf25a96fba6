//! Comparison session: the selected roots, the current diff, and its observers
//!
//! The session owns one immutable snapshot of roots plus trie behind a lock.
//! A refresh computes a new trie off to the side and swaps the snapshot, so a
//! merge already in flight keeps reading the snapshot it started with.

use crate::diff::DiffEngine;
use crate::fs::FileSystem;
use crate::tree::path;
use crate::tree::PathTrie;
use crate::view::entry::{TreeEntry, TreeItem};
use crate::view::merge::{self, MergeOptions};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Handle returned by [`ComparisonSession::on_refresh`]
pub type SubscriptionId = u64;

type Observer = Arc<dyn Fn(&DiffRoots, &Arc<PathTrie>) + Send + Sync>;

/// The two roots being compared
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffRoots {
    pub left: Option<PathBuf>,
    pub right: Option<PathBuf>,
}

impl DiffRoots {
    pub fn new(left: impl Into<PathBuf>, right: impl Into<PathBuf>) -> Self {
        Self {
            left: Some(left.into()),
            right: Some(right.into()),
        }
    }

    /// Both roots, when both are selected and non-empty
    pub fn pair(&self) -> Option<(&Path, &Path)> {
        let left = self.left.as_deref().filter(|p| !p.as_os_str().is_empty())?;
        let right = self.right.as_deref().filter(|p| !p.as_os_str().is_empty())?;
        Some((left, right))
    }

    pub fn is_valid(&self) -> bool {
        self.pair().is_some()
    }
}

#[derive(Debug, Default)]
struct Snapshot {
    roots: DiffRoots,
    trie: Arc<PathTrie>,
}

/// Holds the current comparison and serves directory listings for it
pub struct ComparisonSession {
    engine: Arc<dyn DiffEngine>,
    fs: Arc<dyn FileSystem>,
    options: RwLock<MergeOptions>,
    snapshot: RwLock<Arc<Snapshot>>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
}

impl ComparisonSession {
    pub fn new(engine: Arc<dyn DiffEngine>, fs: Arc<dyn FileSystem>, options: MergeOptions) -> Self {
        Self {
            engine,
            fs,
            options: RwLock::new(options),
            snapshot: RwLock::new(Arc::new(Snapshot::default())),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Select both roots and recompute the diff
    pub fn update(&self, left: Option<PathBuf>, right: Option<PathBuf>) {
        let roots = DiffRoots {
            left: left.map(|p| canonical_root(&p)),
            right: right.map(|p| canonical_root(&p)),
        };
        self.rebuild(roots);
    }

    /// Replace the left root, keeping the right one
    pub fn select_left(&self, left: impl Into<PathBuf>) {
        let right = self.roots().right;
        self.update(Some(left.into()), right);
    }

    /// Replace the right root, keeping the left one
    pub fn select_right(&self, right: impl Into<PathBuf>) {
        let left = self.roots().left;
        self.update(left, Some(right.into()));
    }

    /// Forget both roots
    pub fn clear(&self) {
        self.rebuild(DiffRoots::default());
    }

    /// Recompute the diff for the current roots
    pub fn refresh(&self) {
        let roots = self.roots();
        self.rebuild(roots);
    }

    pub fn is_valid(&self) -> bool {
        self.snapshot.read().roots.is_valid()
    }

    pub fn roots(&self) -> DiffRoots {
        self.snapshot.read().roots.clone()
    }

    /// Current diff trie; stays valid after later refreshes
    pub fn trie(&self) -> Arc<PathTrie> {
        Arc::clone(&self.snapshot.read().trie)
    }

    pub fn options(&self) -> MergeOptions {
        *self.options.read()
    }

    /// Toggle unchanged entries; observers re-render without a new diff
    pub fn set_show_unchanged(&self, show_unchanged: bool) {
        self.options.write().show_unchanged = show_unchanged;
        let snapshot = self.current();
        self.notify(&snapshot);
    }

    /// Merged children of `relative_dir` against the current snapshot
    pub async fn list_children(&self, relative_dir: &str) -> Vec<TreeEntry> {
        let snapshot = self.current();
        self.merge(&snapshot, relative_dir).await
    }

    /// Presentation data for the children of `relative_dir`
    ///
    /// Expand state comes from the same snapshot the entries were merged from.
    pub async fn list_items(&self, relative_dir: &str) -> Vec<TreeItem> {
        let snapshot = self.current();
        self.merge(&snapshot, relative_dir)
            .await
            .iter()
            .map(|entry| TreeItem::from_entry(entry, &snapshot.trie))
            .collect()
    }

    /// Read a file through the session's filesystem
    pub async fn read_file(&self, path: &Path) -> Result<Vec<u8>, crate::error::FsError> {
        self.fs.read_file(path).await
    }

    /// Register a callback fired after every refresh
    pub fn on_refresh<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&DiffRoots, &Arc<PathTrie>) + Send + Sync + 'static,
    {
        let id = self.next_subscription.fetch_add(1, Ordering::SeqCst);
        self.observers.lock().push((id, Arc::new(observer)));
        id
    }

    /// Drop a callback; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    fn rebuild(&self, roots: DiffRoots) {
        let trie = match roots.pair() {
            Some((left, right)) => match self.engine.diff(left, right) {
                Ok(trie) => {
                    info!(changes = trie.change_count(), "Diff rebuilt");
                    trie
                }
                Err(e) => {
                    error!(error = %e, "Diff failed, showing an empty comparison");
                    PathTrie::new()
                }
            },
            None => {
                debug!("Roots incomplete, clearing diff");
                PathTrie::new()
            }
        };
        let snapshot = Arc::new(Snapshot {
            roots,
            trie: Arc::new(trie),
        });
        *self.snapshot.write() = Arc::clone(&snapshot);
        self.notify(&snapshot);
    }

    fn current(&self) -> Arc<Snapshot> {
        Arc::clone(&*self.snapshot.read())
    }

    async fn merge(&self, snapshot: &Snapshot, relative_dir: &str) -> Vec<TreeEntry> {
        let Some((left, right)) = snapshot.roots.pair() else {
            return Vec::new();
        };
        let options = self.options();
        merge::list_children(
            self.fs.as_ref(),
            left,
            right,
            &snapshot.trie,
            relative_dir,
            &options,
        )
        .await
    }

    fn notify(&self, snapshot: &Snapshot) {
        // Observers may call back into the session
        let observers: Vec<Observer> = self
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(&snapshot.roots, &snapshot.trie);
        }
    }
}

fn canonical_root(root: &Path) -> PathBuf {
    if root.as_os_str().is_empty() {
        return root.to_path_buf();
    }
    match path::canonicalize_path(root) {
        Ok(canonical) => canonical,
        Err(e) => {
            warn!(root = %root.display(), error = %e, "Using root as given");
            root.to_path_buf()
        }
    }
}
