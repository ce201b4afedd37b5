//! Share domain entities.

pub mod link;
pub mod model;

pub use link::{CreateLinkShare, LinkShare};
pub use model::{CreateShare, Share};
