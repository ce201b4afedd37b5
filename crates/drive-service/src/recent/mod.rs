//! Recently opened resources.

pub mod service;

pub use service::RecentService;
