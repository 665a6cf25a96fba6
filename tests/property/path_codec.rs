//! Property-based tests for the relative-key codec

use foldcmp::tree::path;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_.-]{1,8}".prop_filter("not a dot segment", |s| s != "." && s != "..")
}

fn key() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segments| segments.join("/"))
}

fn root() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..4).prop_map(|segments| format!("/{}", segments.join("/")))
}

/// Stripping a root from a path built under it gives back the key
#[test]
fn test_strip_prefix_inverts_join() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(root(), key()), |(root, key)| {
            let absolute = path::to_posix(&path::join(&root, &key));
            prop_assert_eq!(path::strip_prefix(&absolute, &root), Some(key.clone()));

            // Platform separators decode to the same key
            let native = absolute.replace('/', &std::path::MAIN_SEPARATOR.to_string());
            prop_assert_eq!(path::strip_prefix(&native, &root), Some(key));
            Ok(())
        })
        .unwrap();
}

/// A root that only matches part of a segment never strips
#[test]
fn test_strip_prefix_rejects_partial_segments() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(root(), segment(), key()), |(root, suffix, key)| {
            let sibling = format!("{}{}", root, suffix);
            let absolute = path::join(&sibling, &key);
            prop_assert_eq!(path::strip_prefix(&absolute, &root), None);
            Ok(())
        })
        .unwrap();
}

/// Parent and file name split a key back into what built it
#[test]
fn test_parent_and_file_name_split_join() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(prop::option::of(key()), segment()), |(dir, name)| {
            let dir = dir.unwrap_or_default();
            let joined = path::join(&dir, &name);
            prop_assert_eq!(path::parent(&joined), dir.as_str());
            prop_assert_eq!(path::file_name(&joined), name.as_str());
            prop_assert_eq!(path::normalize_key(&joined), joined.clone());
            Ok(())
        })
        .unwrap();
}
