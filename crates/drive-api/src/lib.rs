//! # drive-api
//!
//! HTTP layer for Nimbus Drive: Axum router, handlers, DTOs, the auth
//! extractor, and rate limiting. Handlers are thin; all business rules
//! live in `drive-service`.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use router::build_router;
pub use state::AppState;
