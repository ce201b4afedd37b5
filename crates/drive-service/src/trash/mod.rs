//! Soft-delete trash and permanent purging.

pub mod service;

pub use service::TrashService;
