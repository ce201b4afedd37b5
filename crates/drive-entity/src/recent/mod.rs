//! Recent-activity domain entities.

pub mod model;

pub use model::RecentItem;
