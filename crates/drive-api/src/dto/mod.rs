//! Wire-format request and response types.

pub mod request;
pub mod response;

pub use response::ApiResponse;
