//! # drive-core
//!
//! Core crate for Nimbus Drive. Contains configuration schemas, the
//! unified error system, and the traits implemented by the storage layer.
//!
//! This crate has **no** internal dependencies on other Drive crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
