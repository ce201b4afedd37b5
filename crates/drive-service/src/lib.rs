//! # drive-service
//!
//! Business logic for Nimbus Drive. Services sit between the HTTP
//! handlers and the repositories: they enforce ownership and share
//! access, manage the storage quota, and orchestrate the signed-URL
//! upload/download flows. Handlers hand every call a [`context::RequestContext`]
//! naming the authenticated user.

pub mod context;
pub mod file;
pub mod folder;
pub mod recent;
pub mod search;
pub mod share;
pub mod star;
pub mod trash;
pub mod user;

pub use context::RequestContext;
