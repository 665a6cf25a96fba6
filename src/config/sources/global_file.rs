//! Global config file source: `<config_dir>/foldcmp/config.toml`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

/// Path to the global config file, when the platform has a config directory
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "foldcmp").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if let Some(global_path) = global_config_path() {
        if global_path.exists() {
            let canonical_path = dunce::canonicalize(&global_path).unwrap_or(global_path);
            builder = builder.add_source(File::from(canonical_path).required(false));
        } else {
            debug!(
                config_path = %global_path.display(),
                "No global configuration file"
            );
        }
    }
    Ok(builder)
}
