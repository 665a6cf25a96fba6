//! CLI route: single route table and run context. Dispatches to the comparison
//! session and presentation.

use crate::cli::help::command_name;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_diff_json, format_diff_text, format_listing_json, format_listing_text,
    format_show_output, format_tree_json, format_tree_text, use_color, TreeNode,
};
use crate::config::{ConfigLoader, FoldcmpConfig};
use crate::diff::{DiffEngine, HashDiffEngine};
use crate::error::{ApiError, DiffError};
use crate::fs::{FileType, LocalFileSystem};
use crate::tooling::{WatchConfig, WatchDaemon};
use crate::tree::path;
use crate::view::{Collapsible, ComparisonSession, EntryAction};
use futures::future::{BoxFuture, FutureExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, info_span};

/// Runtime context for CLI execution: effective config and the async runtime.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: FoldcmpConfig,
    runtime: tokio::runtime::Runtime,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        show_unchanged: bool,
    ) -> Result<Self, ApiError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        if show_unchanged {
            config.view.show_unchanged = true;
        }
        let config = config.validated()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Runtime(format!("Failed to start runtime: {}", e)))?;

        Ok(Self { config, runtime })
    }

    pub fn config(&self) -> &FoldcmpConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let span = info_span!("command", command = command_name(command));
        let _entered = span.enter();

        let result = self.execute_inner(command);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(output) => info!(duration_ms, output_chars = output.len(), "Command completed"),
            Err(e) => error!(duration_ms, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Diff {
                left,
                right,
                format,
            } => self.handle_diff(left, right, format),
            Commands::Ls {
                left,
                right,
                dir,
                format,
            } => self.handle_ls(left, right, dir, format),
            Commands::Tree {
                left,
                right,
                depth,
                all,
                format,
            } => self.handle_tree(left, right, *depth, *all, format),
            Commands::Show {
                left,
                right,
                subpath,
            } => self.handle_show(left, right, subpath),
            Commands::Watch {
                left,
                right,
                debounce_ms,
            } => self.handle_watch(left, right, *debounce_ms),
            Commands::Config => self.config.to_toml(),
        }
    }

    fn session(&self) -> Arc<ComparisonSession> {
        let engine = HashDiffEngine::new(self.config.diff.engine_config());
        Arc::new(ComparisonSession::new(
            Arc::new(engine),
            Arc::new(LocalFileSystem::new()),
            self.config.merge_options(),
        ))
    }

    /// Session comparing two roots that must both be directories
    fn open_session(&self, left: &Path, right: &Path) -> Result<Arc<ComparisonSession>, ApiError> {
        let (left, right) = open_roots(left, right)?;
        let session = self.session();
        session.update(Some(left), Some(right));
        Ok(session)
    }

    fn handle_diff(&self, left: &Path, right: &Path, format: &str) -> Result<String, ApiError> {
        let json = is_json(format)?;
        let (left, right) = open_roots(left, right)?;
        let engine = HashDiffEngine::new(self.config.diff.engine_config());
        let trie = engine.diff(&left, &right)?;
        if json {
            format_diff_json(&trie, &left, &right)
        } else {
            Ok(format_diff_text(&trie, &left, &right, use_color()))
        }
    }

    fn handle_ls(
        &self,
        left: &Path,
        right: &Path,
        dir: &str,
        format: &str,
    ) -> Result<String, ApiError> {
        let json = is_json(format)?;
        let session = self.open_session(left, right)?;
        let dir = path::normalize_key(dir);
        let items = self.runtime.block_on(session.list_items(&dir));
        if json {
            format_listing_json(&dir, &items)
        } else {
            Ok(format_listing_text(&items, use_color()))
        }
    }

    fn handle_tree(
        &self,
        left: &Path,
        right: &Path,
        depth: Option<usize>,
        all: bool,
        format: &str,
    ) -> Result<String, ApiError> {
        let json = is_json(format)?;
        let session = self.open_session(left, right)?;
        let nodes = self
            .runtime
            .block_on(expand_tree(&session, String::new(), depth, all, 1));
        if json {
            format_tree_json(&nodes)
        } else {
            Ok(format_tree_text(&nodes, use_color()))
        }
    }

    fn handle_show(&self, left: &Path, right: &Path, subpath: &str) -> Result<String, ApiError> {
        let session = self.open_session(left, right)?;
        // Unchanged files can be shown too
        session.set_show_unchanged(true);

        let key = path::normalize_key(subpath);
        self.runtime.block_on(show_entry(&session, key))
    }

    fn handle_watch(
        &self,
        left: &Path,
        right: &Path,
        debounce_ms: Option<u64>,
    ) -> Result<String, ApiError> {
        let (left, right) = open_roots(left, right)?;
        let session = self.session();

        let mut watch_config = WatchConfig::new(left, right);
        watch_config.debounce_ms = debounce_ms.unwrap_or(self.config.watch.debounce_ms);
        watch_config.ignore_patterns = self.config.diff.ignore_patterns.clone();

        let daemon = Arc::new(WatchDaemon::new(Arc::clone(&session), watch_config));
        info!("Starting watch mode daemon");

        self.runtime.block_on(render_watch(session, daemon))?;

        Ok("Watch daemon stopped".to_string())
    }
}

/// Print the content the entry at `key` opens
async fn show_entry(session: &ComparisonSession, key: String) -> Result<String, ApiError> {
    let entries = session.list_children(path::parent(&key)).await;
    let entry = entries
        .into_iter()
        .find(|entry| entry.subpath == key)
        .ok_or_else(|| ApiError::EntryNotFound(key.clone()))?;

    match entry.action() {
        Some(EntryAction::Open { path }) => {
            let content = session.read_file(&path).await?;
            Ok(format_show_output(None, &[(path, content)]))
        }
        Some(EntryAction::OpenDiff { left, right, title }) => {
            let left_content = session.read_file(&left).await?;
            let right_content = session.read_file(&right).await?;
            Ok(format_show_output(
                Some(&title),
                &[(left, left_content), (right, right_content)],
            ))
        }
        None => Err(ApiError::Output(format!(
            "{} is a directory; use `foldcmp ls` to list it",
            key
        ))),
    }
}

/// Run the daemon on a blocking thread and re-render on every notice
async fn render_watch(
    session: Arc<ComparisonSession>,
    daemon: Arc<WatchDaemon>,
) -> Result<(), ApiError> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let runner = Arc::clone(&daemon);
    let handle = tokio::task::spawn_blocking(move || runner.start(tx));

    let color = use_color();
    while let Some(notice) = rx.recv().await {
        let nodes = expand_tree(&session, String::new(), None, false, 1).await;
        println!("{}", format_tree_text(&nodes, color));
        println!("({} changes)\n", notice.changes);
    }

    handle
        .await
        .map_err(|e| ApiError::Runtime(format!("Watch task failed: {}", e)))?
}

/// Canonical roots, both required to be directories
fn open_roots(left: &Path, right: &Path) -> Result<(PathBuf, PathBuf), ApiError> {
    let mut roots = Vec::with_capacity(2);
    for root in [left, right] {
        let canonical = path::canonicalize_path(root)?;
        if !canonical.is_dir() {
            return Err(DiffError::InvalidRoot(canonical).into());
        }
        roots.push(canonical);
    }
    let right = roots.pop();
    let left = roots.pop();
    match (left, right) {
        (Some(left), Some(right)) => Ok((left, right)),
        _ => Err(ApiError::Output("Two roots are required".to_string())),
    }
}

fn is_json(format: &str) -> Result<bool, ApiError> {
    match format {
        "json" => Ok(true),
        "text" => Ok(false),
        other => Err(ApiError::Output(format!(
            "Unknown format '{}' (expected text or json)",
            other
        ))),
    }
}

/// Expand directories that contain changes (all directories with `all`)
fn expand_tree<'a>(
    session: &'a ComparisonSession,
    dir: String,
    max_depth: Option<usize>,
    all: bool,
    depth: usize,
) -> BoxFuture<'a, Vec<TreeNode>> {
    async move {
        let items = session.list_items(&dir).await;
        let mut nodes = Vec::with_capacity(items.len());
        for item in items {
            let within_depth = max_depth.map_or(true, |max| depth < max);
            let expand = item.file_type == FileType::Directory
                && within_depth
                && (all || item.collapsible == Collapsible::Expanded);
            let children = if expand {
                expand_tree(session, item.subpath.clone(), max_depth, all, depth + 1).await
            } else {
                Vec::new()
            };
            nodes.push(TreeNode { item, children });
        }
        nodes
    }
    .boxed()
}
