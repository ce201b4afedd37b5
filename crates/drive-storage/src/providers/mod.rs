//! Object store provider implementations.

pub mod mock;
pub mod s3;
