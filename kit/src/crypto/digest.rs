//! Hex digest helpers for fingerprinting strings and byte payloads.

use md5::Md5;
use sha2::{Digest, Sha256};

fn to_hex(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Returns the lowercase hex MD5 digest of the provided bytes.
pub fn md5_hex_bytes(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    to_hex(&hasher.finalize())
}

/// Returns the lowercase hex SHA-256 digest of the provided bytes.
pub fn sha256_hex_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    to_hex(&hasher.finalize())
}

/// MD5 of a UTF-8 string, 32 hex characters.
pub fn md5_hex(input: &str) -> String {
    md5_hex_bytes(input.as_bytes())
}

/// SHA-256 of a UTF-8 string, 64 hex characters.
pub fn sha256_hex(input: &str) -> String {
    sha256_hex_bytes(input.as_bytes())
}
