//! Password hashing.
//!
//! Thin wrapper over bcrypt so the cost factor and error mapping live in one
//! place. Hashes are stored in the repository and verified at login and on
//! password change.

use crate::db::repository::{RepositoryError, RepositoryResult};

/// Minimum accepted password length, enforced at registration and change.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> RepositoryResult<String> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| RepositoryError::internal(format!("password hashing failed: {}", e)))
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash verifies as `false` rather than erroring: login
/// must not reveal whether the account exists in a broken state.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("cliente123").unwrap();
        assert_ne!(hash, "cliente123");
        assert!(verify_password("cliente123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
