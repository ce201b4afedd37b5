//! Sharing: explicit grants, public links, and access resolution.

pub mod access;
pub mod link;
pub mod service;

pub use access::AccessResolver;
pub use link::LinkShareService;
pub use service::ShareService;
