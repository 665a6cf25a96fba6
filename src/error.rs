//! Error types for the folder comparison system.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem accessor errors
#[derive(Debug, Error)]
pub enum FsError {
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Classify an I/O error raised while touching `path`
    pub fn from_io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path),
            _ => FsError::Io { path, source: err },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }
}

/// Diff engine errors
#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Invalid diff root: {0}")]
    InvalidRoot(PathBuf),

    #[error("Failed to walk {root}: {message}")]
    Walk { root: PathBuf, message: String },

    #[error("Filesystem error: {0}")]
    Fs(#[from] FsError),
}

/// Errors surfaced at the application boundary (config, CLI, watch)
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Diff failed: {0}")]
    Diff(#[from] DiffError),

    #[error("Filesystem error: {0}")]
    Fs(#[from] FsError),

    #[error("Watch failed: {0}")]
    Watch(String),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("No entry at {0}. Run `foldcmp ls` on its parent directory to see what is listed.")]
    EntryNotFound(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Output(err.to_string())
    }
}
