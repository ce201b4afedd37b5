//! Argon2id password hashing.
//!
//! Used for both account passwords and link-share passwords, so a
//! captured database dump never yields plaintext secrets.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Argon2, PasswordVerifier};

use drive_core::error::ErrorKind;
use drive_core::{AppError, AppResult};

/// Hashes and verifies passwords with Argon2id and per-hash random salts.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext password into a PHC-format string.
    pub fn hash(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2::PasswordHasher::hash_password(&Argon2::default(), password.as_bytes(), &salt)
            .map_err(|e| {
                AppError::new(ErrorKind::Internal, format!("failed to hash password: {e}"))
            })?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored PHC hash.
    /// Returns `Ok(false)` on mismatch; errors only on malformed hashes.
    pub fn verify(&self, password: &str, stored_hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| {
            AppError::new(ErrorKind::Internal, format!("malformed password hash: {e}"))
        })?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::new(
                ErrorKind::Internal,
                format!("password verification error: {e}"),
            )),
        }
    }
}
