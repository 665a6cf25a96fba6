//! Integration tests for Configuration System

use super::test_utils::env_lock;
use foldcmp::config::{ConfigLoader, FoldcmpConfig};
use foldcmp::diff::HashDiffEngine;
use foldcmp::fs::MemoryFileSystem;
use foldcmp::view::ComparisonSession;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_file_config_drives_session_options() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("foldcmp.toml");
    std::fs::write(
        &config_file,
        r#"
[view]
show_unchanged = true

[diff]
detect_renames = false
ignore_patterns = [".hg"]
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    assert!(config.validate().is_ok());

    let engine_config = config.diff.engine_config();
    assert!(!engine_config.detect_renames);
    assert_eq!(engine_config.walker.ignore_patterns, vec![".hg"]);

    let session = ComparisonSession::new(
        Arc::new(HashDiffEngine::new(engine_config)),
        Arc::new(MemoryFileSystem::new()),
        config.merge_options(),
    );
    assert!(session.options().show_unchanged);
}

#[test]
fn test_environment_overrides_workspace_file() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("foldcmp.toml"),
        "[watch]\ndebounce_ms = 500\n",
    )
    .unwrap();

    std::env::set_var("FOLDCMP_WATCH__DEBOUNCE_MS", "25");
    let result = ConfigLoader::load(temp_dir.path());
    std::env::remove_var("FOLDCMP_WATCH__DEBOUNCE_MS");

    assert_eq!(result.unwrap().watch.debounce_ms, 25);
}

#[test]
fn test_invalid_values_fail_validation() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(
        &config_file,
        r#"
[diff]
ignore_patterns = [""]

[logging]
output = "syslog"
"#,
    )
    .unwrap();

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_effective_config_round_trips_through_toml() {
    let _guard = env_lock();
    let temp_dir = TempDir::new().unwrap();
    let config = ConfigLoader::load(temp_dir.path()).unwrap();
    let rendered = config.to_toml().unwrap();
    let parsed: FoldcmpConfig = toml::from_str(&rendered).unwrap();
    assert_eq!(parsed, config);
}
