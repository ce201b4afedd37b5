//! HTTP request handlers, one module per API domain.

pub mod auth;
pub mod file;
pub mod folder;
pub mod health;
pub mod link_share;
pub mod recent;
pub mod search;
pub mod share;
pub mod star;
pub mod trash;
pub mod user;
