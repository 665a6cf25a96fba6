//! Configuration System
//!
//! Layered configuration for the comparator: built-in defaults, a global
//! user file, a workspace file, then `FOLDCMP_` environment overrides.

use crate::diff::EngineConfig;
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::tree::walker::WalkerConfig;
use crate::view::MergeOptions;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoldcmpConfig {
    #[serde(default)]
    pub view: ViewConfig,

    #[serde(default)]
    pub diff: DiffConfig,

    #[serde(default)]
    pub watch: WatchSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Merge view settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// List entries that did not change
    #[serde(default)]
    pub show_unchanged: bool,
}

/// Diff engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Pair deleted and added files with identical content
    #[serde(default = "default_true")]
    pub detect_renames: bool,

    #[serde(default)]
    pub follow_symlinks: bool,

    /// Entry names skipped at any depth
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
}

/// Watch tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSettings {
    /// Quiet period before a burst of events triggers a refresh
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_ignore_patterns() -> Vec<String> {
    WalkerConfig::default().ignore_patterns
}

fn default_debounce_ms() -> u64 {
    200
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            detect_renames: default_true(),
            follow_symlinks: false,
            ignore_patterns: default_ignore_patterns(),
        }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Diff(String),
    Watch(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Diff(msg) => write!(f, "Diff: {}", msg),
            ValidationError::Watch(msg) => write!(f, "Watch: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl DiffConfig {
    pub fn validate(&self) -> Result<(), String> {
        for pattern in &self.ignore_patterns {
            if pattern.trim().is_empty() {
                return Err("Ignore patterns cannot be empty".to_string());
            }
            if pattern.chars().all(|c| c == '/' || c == '\\') {
                return Err(format!("Ignore pattern '{}' matches nothing", pattern));
            }
        }
        Ok(())
    }

    /// Engine settings for this configuration
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            walker: WalkerConfig {
                follow_symlinks: self.follow_symlinks,
                ignore_patterns: self.ignore_patterns.clone(),
                max_depth: None,
            },
            detect_renames: self.detect_renames,
        }
    }
}

impl FoldcmpConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.diff.validate() {
            errors.push(ValidationError::Diff(e));
        }
        if self.watch.debounce_ms == 0 {
            errors.push(ValidationError::Watch(
                "Debounce must be at least 1 ms".to_string(),
            ));
        }
        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding every failure into one error
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            show_unchanged: self.view.show_unchanged,
        }
    }

    /// Effective configuration rendered as TOML
    pub fn to_toml(&self) -> Result<String, ApiError> {
        toml::to_string_pretty(self).map_err(|e| ApiError::Output(e.to_string()))
    }
}
