//! Account management and authentication.

pub mod service;

pub use service::UserService;
