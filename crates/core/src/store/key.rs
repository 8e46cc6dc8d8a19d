//! Request-identity key generation.

use sha2::{Digest, Sha256};

/// Compute the store key identifying a request.
///
/// The key is derived from the request exactly as received; no URL
/// canonicalization is applied, so two spellings of the same resource are
/// distinct entries.
pub fn request_key(method: &str, url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(method.as_bytes());
    hasher.update(b"\n");
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
