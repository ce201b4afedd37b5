//! Explicit per-user share grants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::{ResourceType, ShareRole};

/// An explicit grant giving one user a role on one resource.
///
/// Grants are not copied to descendants; folder inheritance is computed at
/// read time by walking the ancestor chain.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// Kind of resource being shared.
    pub resource_type: ResourceType,
    /// ID of the shared resource.
    pub resource_id: Uuid,
    /// User the resource is shared with.
    pub grantee_user_id: Uuid,
    /// Role granted to the grantee.
    pub role: ShareRole,
    /// User who created the grant; only they may revoke it.
    pub created_by: Uuid,
    /// When the grant was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new share grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// Kind of resource being shared.
    pub resource_type: ResourceType,
    /// ID of the shared resource.
    pub resource_id: Uuid,
    /// User the resource is shared with.
    pub grantee_user_id: Uuid,
    /// Role granted.
    pub role: ShareRole,
    /// The grantor.
    pub created_by: Uuid,
}
