//! Star entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::ResourceType;

/// A user's bookmark on a file or folder. One row per unique
/// (user, resource_type, resource_id) tuple.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Star {
    /// Unique star identifier.
    pub id: Uuid,
    /// The bookmarking user.
    pub user_id: Uuid,
    /// Kind of bookmarked resource.
    pub resource_type: ResourceType,
    /// ID of the bookmarked resource.
    pub resource_id: Uuid,
    /// When the star was created.
    pub created_at: DateTime<Utc>,
}
