//! Cryptographic utilities for admin key verification.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares two secrets by comparing their SHA-256 digests.
///
/// Hashing both sides first keeps the comparison length-independent, so the
/// admin key check does not leak the configured key length through timing.
pub fn digests_match(provided: &str, expected: &str) -> bool {
    sha256_hex(provided) == sha256_hex(expected)
}
