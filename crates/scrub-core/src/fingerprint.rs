//! Content fingerprinting for before/after identity comparison.

use blake3::Hasher;

/// Compute the BLAKE3 digest of a byte buffer as a lowercase hex string.
///
/// Pure function with no shared state — safe to call concurrently.
pub fn digest_hex(data: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize().to_hex().to_string()
}
