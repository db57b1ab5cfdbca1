//! Cryptographic utilities for token storage
//!
//! Refresh tokens are random-looking signed blobs, so a plain SHA-256
//! digest is enough for at-rest storage; the comparison against the
//! stored digest still runs in constant time.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash a token for storage.
///
/// One-way: the original token cannot be recovered from the hash.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compare a presented token against a stored token hash in constant time.
pub fn token_matches_hash(token: &str, stored_hash: &str) -> bool {
    let computed = hash_token(token);
    computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let token = "refresh-token-value";
        assert_eq!(hash_token(token), hash_token(token));
        // SHA-256 = 32 bytes = 64 hex chars
        assert_eq!(hash_token(token).len(), 64);
    }

    #[test]
    fn different_tokens_hash_differently() {
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn matches_own_hash() {
        let token = "some-signed-token";
        let stored = hash_token(token);
        assert!(token_matches_hash(token, &stored));
        assert!(!token_matches_hash("some-other-token", &stored));
    }

    #[test]
    fn mismatched_length_rejected() {
        assert!(!token_matches_hash("token", "deadbeef"));
    }
}
