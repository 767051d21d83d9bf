//! Argon2id password hashing (PHC strings).

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::warn;

use crate::error::AppError;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("no-such-account-placeholder").ok());

/// Salted Argon2id hash; hashing the same input twice yields different strings.
pub fn hash_password(plain: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// True iff `plain` matches `hash`.
///
/// A stored hash that does not parse is treated as a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(error = %e, "stored password hash is malformed");
            return false;
        }
    };

    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Full Argon2 verification against a throwaway hash; always `false`.
///
/// Login calls this for unknown accounts so they cost as much as a wrong password.
pub fn verify_without_account(plain: &str) -> bool {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(plain, hash);
    }
    false
}
