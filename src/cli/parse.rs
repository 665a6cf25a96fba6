//! CLI parse: clap types for foldcmp. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// foldcmp CLI - Classified, navigable comparison of two directory trees
#[derive(Parser)]
#[command(name = "foldcmp")]
#[command(about = "Compare two directory trees and browse the differences")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes a file)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// List entries that did not change
    #[arg(long, default_value = "false")]
    pub show_unchanged: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every change between two roots
    Diff {
        left: PathBuf,
        right: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List one directory of the merged view
    Ls {
        left: PathBuf,
        right: PathBuf,
        /// Directory relative to the roots
        #[arg(default_value = "")]
        dir: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the merged view as a tree
    Tree {
        left: PathBuf,
        right: PathBuf,
        /// Maximum depth to expand
        #[arg(long)]
        depth: Option<usize>,
        /// Expand directories without changes too
        #[arg(long)]
        all: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the content an entry opens (both sides for a modification)
    Show {
        left: PathBuf,
        right: PathBuf,
        /// Entry path relative to the roots
        subpath: String,
    },
    /// Re-render the tree whenever either root changes
    Watch {
        left: PathBuf,
        right: PathBuf,
        /// Quiet period before refreshing (defaults to watch.debounce_ms)
        #[arg(long)]
        debounce_ms: Option<u64>,
    },
    /// Print the effective configuration as TOML
    Config,
}
