//! Name search across files and folders.

pub mod service;

pub use service::SearchService;
