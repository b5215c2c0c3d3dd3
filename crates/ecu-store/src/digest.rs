//! SHA-256 digests for migration checksums and fixture provenance

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of a string
pub fn sha256_hex(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
