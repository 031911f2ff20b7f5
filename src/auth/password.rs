//! Password hashing and comparison.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking thread pool
//! to keep the request executor responsive.

use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Task(String),
}

/// Hash a plaintext password with the configured cost factor
pub async fn hash(password: String) -> Result<String, PasswordError> {
    let cost = config::config().security.bcrypt_cost;
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
        .map_err(PasswordError::from)
}

/// Compare a plaintext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; errors only on malformed hashes or
/// executor failure.
pub async fn verify(password: String, hashed: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
        .map_err(PasswordError::from)
}
