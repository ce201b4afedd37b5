//! Recent item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::ResourceType;

/// Last-opened tracking row, upserted on every open or download.
/// One row per unique (user, resource_type, resource_id) tuple;
/// last write wins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecentItem {
    /// Unique row identifier.
    pub id: Uuid,
    /// The acting user.
    pub user_id: Uuid,
    /// Kind of opened resource.
    pub resource_type: ResourceType,
    /// ID of the opened resource.
    pub resource_id: Uuid,
    /// When the resource was last opened by this user.
    pub last_opened_at: DateTime<Utc>,
}
