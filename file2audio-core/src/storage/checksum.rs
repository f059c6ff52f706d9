use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::models::error::CodecError;

/// Lower-case hex SHA-256 of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    hex_encode(&Sha256::digest(data))
}

/// Compute SHA-256 hex digest of a file.
pub fn sha256_file(path: &Path) -> Result<String, CodecError> {
    let data = fs::read(path)
        .map_err(|e| CodecError::Storage(format!("failed to read {} for checksum: {}", path.display(), e)))?;
    Ok(sha256_hex(&data))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
