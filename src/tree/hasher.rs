//! Content hashing for file comparison using BLAKE3

use crate::error::FsError;
use blake3::Hasher;
use std::fs::File;
use std::path::Path;

/// 32-byte BLAKE3 digest
pub type Hash = [u8; 32];

/// Compute content hash for file bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}

/// Hash a file's content without loading it into memory at once
pub fn hash_file(path: &Path) -> Result<Hash, FsError> {
    let mut file = File::open(path).map_err(|e| FsError::from_io(path, e))?;
    let mut hasher = Hasher::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| FsError::from_io(path, e))?;
    Ok(*hasher.finalize().as_bytes())
}
