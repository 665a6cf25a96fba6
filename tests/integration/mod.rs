//! Integration tests for the foldcmp directory comparator


mod config_integration;
mod diff_engine;
mod hasher_verification;
mod merge_view;
mod session_lifecycle;
