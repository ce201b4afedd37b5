//! # drive-storage
//!
//! Object storage backends for Nimbus Drive. The server never streams
//! file bytes itself; it mints time-limited signed URLs and clients talk
//! to the backend directly. The [`drive_core::traits::ObjectStore`] trait
//! is implemented here for an S3-compatible backend and an in-memory mock
//! used in tests and local development.

pub mod manager;
pub mod providers;

pub use manager::build_object_store;
pub use providers::mock::MockObjectStore;
pub use providers::s3::S3ObjectStore;
