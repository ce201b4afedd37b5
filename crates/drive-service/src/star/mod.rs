//! Starred resources.

pub mod service;

pub use service::StarService;
