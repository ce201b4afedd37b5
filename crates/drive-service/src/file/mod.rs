//! File metadata CRUD and the signed-URL upload/download flows.

pub mod service;

pub use service::FileService;
