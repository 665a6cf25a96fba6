//! Config loading entry point: layers every source and deserializes once.

use super::merge::builder_with_defaults;
use super::sources::{environment, global_file, workspace_file};
use super::FoldcmpConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads [`FoldcmpConfig`] from defaults, files, and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace
    ///
    /// Precedence (highest last): defaults, global file, workspace files,
    /// environment.
    pub fn load(workspace_root: &Path) -> Result<FoldcmpConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = environment::add_to_builder(builder);
        let config: FoldcmpConfig = builder.build()?.try_deserialize()?;
        debug!(workspace = %workspace_root.display(), "Configuration loaded");
        Ok(config)
    }

    /// Load from one explicit file, skipping file discovery
    ///
    /// Environment overrides still apply on top.
    pub fn load_from_file(path: &Path) -> Result<FoldcmpConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let builder = builder_with_defaults()?.add_source(File::from(path.to_path_buf()));
        let builder = environment::add_to_builder(builder);
        builder.build()?.try_deserialize()
    }

    /// Where the global config file is looked up
    pub fn global_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
