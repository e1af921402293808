//! Password hashing
//!
//! bcrypt with a fixed cost. Both operations run on the blocking pool.

use thiserror::Error;

/// bcrypt cost factor for new hashes
pub const HASH_COST: u32 = 10;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub async fn hash_password(password: &str) -> Result<String, PasswordError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, HASH_COST)).await??;
    Ok(hashed)
}

/// Compare `password` against a stored hash. A malformed hash is an error,
/// not a mismatch.
pub async fn verify_password(password: &str, hashed: &str) -> Result<bool, PasswordError> {
    let password = password.to_owned();
    let hashed = hashed.to_owned();
    let matches =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hashed)).await??;
    Ok(matches)
}
