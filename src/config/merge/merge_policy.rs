//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("view.show_unchanged", false)?
        .set_default("diff.detect_renames", true)?
        .set_default("diff.follow_symlinks", false)?
        .set_default(
            "diff.ignore_patterns",
            vec![".git", "node_modules", "target"],
        )?
        .set_default("watch.debounce_ms", 200)
}
