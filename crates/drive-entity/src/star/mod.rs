//! Star (bookmark) domain entities.

pub mod model;

pub use model::Star;
