//! Watch Mode Daemon
//!
//! Monitors both comparison roots for filesystem changes, recomputes the diff
//! after each quiet period, and notifies a renderer over a tokio channel.

use crate::error::ApiError;
use crate::view::ComparisonSession;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info, warn};

/// Watch mode configuration
#[derive(Debug, Clone)]
pub struct WatchConfig {
    pub left_root: PathBuf,
    pub right_root: PathBuf,
    /// Quiet period in milliseconds before a refresh
    pub debounce_ms: u64,
    /// Entry names whose events never trigger a refresh
    pub ignore_patterns: Vec<String>,
}

impl WatchConfig {
    pub fn new(left_root: PathBuf, right_root: PathBuf) -> Self {
        Self {
            left_root,
            right_root,
            debounce_ms: 200,
            ignore_patterns: vec![
                ".git".to_string(),
                "node_modules".to_string(),
                "target".to_string(),
            ],
        }
    }
}

/// Filesystem change event
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeEvent {
    Created(PathBuf),
    Modified(PathBuf),
    Removed(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
}

impl ChangeEvent {
    fn path(&self) -> &Path {
        match self {
            ChangeEvent::Created(p) | ChangeEvent::Modified(p) | ChangeEvent::Removed(p) => p,
            ChangeEvent::Renamed { to, .. } => to,
        }
    }
}

/// Sent to the renderer after every recomputed diff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshNotice {
    /// Filesystem events folded into this refresh (0 for the initial diff)
    pub events: usize,
    /// Change records in the new diff
    pub changes: usize,
}

/// Groups events until the roots have been quiet for the debounce window
struct EventBatcher {
    debounce: Duration,
    ignore_patterns: Vec<String>,
    pending_events: HashMap<PathBuf, ChangeEvent>,
    last_event_time: Option<Instant>,
}

impl EventBatcher {
    fn new(config: &WatchConfig) -> Self {
        Self {
            debounce: Duration::from_millis(config.debounce_ms),
            ignore_patterns: config.ignore_patterns.clone(),
            pending_events: HashMap::new(),
            last_event_time: None,
        }
    }

    /// Add an event; returns false when it is ignored
    fn add_event(&mut self, event: ChangeEvent, now: Instant) -> bool {
        if self.should_ignore(event.path()) {
            return false;
        }
        // Latest event per path wins
        self.pending_events.insert(event.path().to_path_buf(), event);
        self.last_event_time = Some(now);
        true
    }

    fn is_ready(&self, now: Instant) -> bool {
        match self.last_event_time {
            Some(last) => {
                !self.pending_events.is_empty() && now.duration_since(last) >= self.debounce
            }
            None => false,
        }
    }

    /// Get and clear pending events
    fn take_batch(&mut self) -> Vec<ChangeEvent> {
        self.last_event_time = None;
        self.pending_events.drain().map(|(_, event)| event).collect()
    }

    /// Ignored when any path component equals a pattern
    fn should_ignore(&self, path: &Path) -> bool {
        path.components().any(|component| {
            let name = component.as_os_str().to_string_lossy();
            self.ignore_patterns.iter().any(|pattern| *pattern == name)
        })
    }
}

/// Watch mode daemon
pub struct WatchDaemon {
    session: Arc<ComparisonSession>,
    config: WatchConfig,
    running: Arc<RwLock<bool>>,
}

impl WatchDaemon {
    pub fn new(session: Arc<ComparisonSession>, config: WatchConfig) -> Self {
        Self {
            session,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Run the daemon until stopped or until the renderer goes away
    ///
    /// Blocking; callers on a runtime run it on a blocking thread.
    /// 1. Watch both roots
    /// 2. Compute the initial diff
    /// 3. Refresh after each quiet period
    pub fn start(&self, notices: UnboundedSender<RefreshNotice>) -> Result<(), ApiError> {
        *self.running.write() = true;

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            if let Err(e) = tx.send(res) {
                error!("Error sending watch event: {}", e);
            }
        })
        .map_err(|e| ApiError::Watch(format!("Failed to create watcher: {}", e)))?;

        for root in [&self.config.left_root, &self.config.right_root] {
            watcher
                .watch(root, RecursiveMode::Recursive)
                .map_err(|e| {
                    ApiError::Watch(format!("Failed to watch {}: {}", root.display(), e))
                })?;
        }
        info!(
            left = %self.config.left_root.display(),
            right = %self.config.right_root.display(),
            "Watching roots"
        );

        self.session.update(
            Some(self.config.left_root.clone()),
            Some(self.config.right_root.clone()),
        );
        if !self.notify_renderer(&notices, 0) {
            *self.running.write() = false;
            return Ok(());
        }

        let mut batcher = EventBatcher::new(&self.config);
        let tick = Duration::from_millis(self.config.debounce_ms.clamp(10, 100));

        while *self.running.read() && !notices.is_closed() {
            match rx.recv_timeout(tick) {
                Ok(Ok(event)) => {
                    for change in convert_event(event) {
                        batcher.add_event(change, Instant::now());
                    }
                }
                Ok(Err(e)) => warn!("Watch error: {}", e),
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    error!("Watcher channel disconnected");
                    break;
                }
            }

            if batcher.is_ready(Instant::now()) {
                let events = batcher.take_batch();
                debug!(event_count = events.len(), "Refreshing after changes");
                self.session.refresh();
                if !self.notify_renderer(&notices, events.len()) {
                    break;
                }
            }
        }

        *self.running.write() = false;
        info!("Watch daemon stopped");
        Ok(())
    }

    /// Ask a running daemon to exit after its current tick
    pub fn stop(&self) {
        *self.running.write() = false;
    }

    pub fn is_running(&self) -> bool {
        *self.running.read()
    }

    fn notify_renderer(&self, notices: &UnboundedSender<RefreshNotice>, events: usize) -> bool {
        let notice = RefreshNotice {
            events,
            changes: self.session.trie().change_count(),
        };
        notices.send(notice).is_ok()
    }
}

/// Convert a notify event into change events
fn convert_event(event: Event) -> Vec<ChangeEvent> {
    match event.kind {
        EventKind::Create(_) => event.paths.into_iter().map(ChangeEvent::Created).collect(),
        EventKind::Modify(notify::event::ModifyKind::Name(_)) if event.paths.len() >= 2 => {
            let mut paths = event.paths.into_iter();
            match (paths.next(), paths.next()) {
                (Some(from), Some(to)) => vec![ChangeEvent::Renamed { from, to }],
                _ => Vec::new(),
            }
        }
        EventKind::Modify(_) => event.paths.into_iter().map(ChangeEvent::Modified).collect(),
        EventKind::Remove(_) => event.paths.into_iter().map(ChangeEvent::Removed).collect(),
        _ => Vec::new(),
    }
}
