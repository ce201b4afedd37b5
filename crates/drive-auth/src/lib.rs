//! # drive-auth
//!
//! Stateless authentication for Nimbus Drive: JWT access/refresh token
//! issuance and validation, and Argon2id password hashing. There is no
//! server-side session or revocation state; a token is valid until it
//! expires.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, TokenDecoder, TokenEncoder, TokenPair, TokenType};
pub use password::PasswordHasher;
