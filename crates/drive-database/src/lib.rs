//! # drive-database
//!
//! PostgreSQL access layer for Nimbus Drive: connection pool management,
//! embedded migrations, and one repository per aggregate. Repositories
//! own all SQL; services never see sqlx types.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
