//! JWT token issuance and validation.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{Claims, TokenType};
pub use decoder::TokenDecoder;
pub use encoder::{TokenEncoder, TokenPair};
