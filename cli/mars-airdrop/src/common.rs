use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use sha2::{Digest as _, Sha256};

use crate::error::{AirdropError, Result};

/// A 32-byte SHA-256 digest: leaves, internal nodes and the root.
pub type Digest = [u8; 32];

/// Computes the SHA-256 hash of `data`.
pub fn sha256(data: &[u8]) -> Digest {
    Sha256::digest(data).into()
}

/// Hashes two sibling digests after ordering them ascending by raw bytes.
///
/// Both tree construction and proof verification go through this function,
/// so a proof never needs to record whether a sibling sat on the left or
/// the right.
///
/// # Arguments
/// * `a` - First 32-byte sibling
/// * `b` - Second 32-byte sibling
///
/// # Returns
/// `SHA256(min(a, b) || max(a, b))`
pub fn hash_sorted_pair(a: &Digest, b: &Digest) -> Digest {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    Sha256::new()
        .chain_update(first)
        .chain_update(second)
        .finalize()
        .into()
}

/// Encodes a digest as lowercase hex without a `0x` prefix.
pub fn hex_encode<T: AsRef<[u8]>>(bytes: T) -> String {
    hex::encode(bytes)
}

/// Parses a 32-byte digest from a hex string.
///
/// # Arguments
/// * `digest_str` - The digest, with or without "0x" prefix, either case
///
/// # Errors
/// Returns `InvalidDigest` if the string is not exactly 64 hex characters
pub fn parse_digest(digest_str: &str) -> Result<Digest> {
    let trimmed = digest_str.trim();
    let cleaned = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if cleaned.len() != 64 {
        return Err(AirdropError::InvalidDigest(format!(
            "expected 64 hex chars, got {}",
            cleaned.len()
        )));
    }
    let mut digest = [0u8; 32];
    hex::decode_to_slice(cleaned, &mut digest)
        .map_err(|e| AirdropError::InvalidDigest(format!("invalid hex encoding: {}", e)))?;
    Ok(digest)
}

/// Writes `contents` to `path` through a sibling temp file and a rename, so a
/// failed write never leaves a truncated output behind.
pub fn write_file_atomic(path: &Path, contents: &str) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let mut file = File::create(&temp_path)?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;
    Ok(())
}
