//! Folder CRUD and tree navigation.

pub mod service;

pub use service::FolderService;
