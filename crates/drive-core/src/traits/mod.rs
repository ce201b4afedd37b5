//! Traits implemented by infrastructure crates.

pub mod object_store;

pub use object_store::{ObjectMeta, ObjectStore, SignedUrl};
