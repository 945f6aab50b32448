//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=19456,t=2,p=1$...`),
//! which embed the salt and parameters, so verification needs nothing but the
//! stored string. Both operations are CPU bound and run on the blocking pool.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::OnceLock;
use tracing::warn;

use crate::error::{Result, ServiceError};

/// Hash a password using Argon2id with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// Check a password against a PHC hash string.
///
/// A stored hash that cannot be parsed never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Stored password hash is malformed: {}", e);
            false
        }
    }
}

/// Hash checked when a login names an unknown user, built on first use.
pub(crate) fn dummy_hash() -> Option<&'static str> {
    static DUMMY: OnceLock<Option<String>> = OnceLock::new();
    DUMMY
        .get_or_init(|| hash_password("notekeeper-unknown-user").ok())
        .as_deref()
}

pub(crate) async fn hash_password_blocking(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ServiceError::PasswordHash(e.to_string()))?
}

pub(crate) async fn verify_password_blocking(password: String, hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::PasswordHash(e.to_string()))
}

/// Spend one verification on the dummy hash. The outcome is discarded.
pub(crate) async fn verify_dummy_blocking(password: String) -> Result<()> {
    tokio::task::spawn_blocking(move || {
        if let Some(hash) = dummy_hash() {
            verify_password(&password, hash);
        }
    })
    .await
    .map_err(|e| ServiceError::PasswordHash(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_not_the_plaintext_and_verifies() {
        let hash = hash_password("pw1").unwrap();
        assert_ne!(hash, "pw1");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("pw1", &hash));
        assert!(!verify_password("pw2", &hash));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same", &a));
        assert!(verify_password("same", &b));
    }

    #[test]
    fn dummy_hash_is_a_stable_argon2id_hash() {
        let hash = dummy_hash().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(dummy_hash(), Some(hash));
        assert!(!verify_password("pw1", hash));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("", ""));
    }
}
