//! Password hashing and verification
//!
//! Argon2id via the RustCrypto password-hash API. The salt is embedded
//! in the PHC string, so verification needs only the stored hash.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::AuthError;

/// Hash a password with a fresh random salt
pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| AuthError::Internal(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// An unparseable stored hash verifies as false rather than erroring:
/// the caller treats it the same as a wrong password.
pub fn verify_password(plain: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("pw1234").unwrap();
        assert!(verify_password("pw1234", &hash));
        assert!(!verify_password("pw12345", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        // Fresh salt per hash
        let h1 = hash_password("pw1234").unwrap();
        let h2 = hash_password("pw1234").unwrap();
        assert_ne!(h1, h2);
        assert!(verify_password("pw1234", &h1));
        assert!(verify_password("pw1234", &h2));
    }

    #[test]
    fn garbage_stored_hash_verifies_false() {
        assert!(!verify_password("pw1234", "not-a-phc-string"));
    }
}
