//! Hasher Implementation Verification Tests
//!
//! The engine compares file content through these hashes, so they must match
//! BLAKE3 exactly and agree between in-memory and streamed input.

use foldcmp::tree::hasher;
use std::fs;
use tempfile::TempDir;

/// Test that content hash matches BLAKE3 directly
#[test]
fn test_content_hash_matches_blake3() {
    let content = b"test content";
    let our_hash = hasher::compute_content_hash(content);
    let blake3_hash = *blake3::hash(content).as_bytes();
    assert_eq!(our_hash, blake3_hash);
}

/// Streaming a file gives the same hash as hashing its bytes
#[test]
fn test_file_hash_matches_content_hash() {
    let temp_dir = TempDir::new().unwrap();
    let test_file = temp_dir.path().join("test.txt");
    let content = "x".repeat(200_000);
    fs::write(&test_file, &content).unwrap();

    let streamed = hasher::hash_file(&test_file).unwrap();
    assert_eq!(streamed, hasher::compute_content_hash(content.as_bytes()));
}

#[test]
fn test_hash_file_missing() {
    let temp_dir = TempDir::new().unwrap();
    let err = hasher::hash_file(&temp_dir.path().join("missing")).unwrap_err();
    assert!(err.is_not_found());
}
