//! Tooling layer
//!
//! Long-running helpers built on top of a comparison session.

pub mod watch;

pub use watch::{RefreshNotice, WatchConfig, WatchDaemon};
