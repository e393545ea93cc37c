//! # Password Hashing
//!
//! Argon2 hashing for the admin account. The server only ever verifies; hashes
//! are produced offline by the `hash-password` utility.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PwdError {
    #[error("Password must be at least 8 characters long")]
    TooShort,

    #[error("Failed to hash password: {0}")]
    Hash(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),
}

/// Hash a password into an Argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, PwdError> {
    if password.len() < 8 {
        return Err(PwdError::TooShort);
    }

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PwdError::Hash(e.to_string()))
}

/// Verify a plaintext password against an Argon2 PHC string.
///
/// A wrong password is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PwdError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PwdError::MalformedHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
