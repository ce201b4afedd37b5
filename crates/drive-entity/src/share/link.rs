//! Public link shares.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::ResourceType;

/// A public bearer-token share. Anyone holding the token (and password,
/// when set) can read the resource without an account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LinkShare {
    /// Unique link share identifier.
    pub id: Uuid,
    /// Public bearer token carried in the share URL.
    pub token: String,
    /// Kind of resource being shared.
    pub resource_type: ResourceType,
    /// ID of the shared resource.
    pub resource_id: Uuid,
    /// Argon2id hash of the optional access password.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Optional expiry; resolution after this instant returns 410.
    pub expires_at: Option<DateTime<Utc>>,
    /// User who created the link; only they may delete it.
    pub created_by: Uuid,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}

impl LinkShare {
    /// Check whether the link has expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp < now)
    }

    /// Check whether the link requires a password.
    pub fn requires_password(&self) -> bool {
        self.password_hash.is_some()
    }
}

/// Data required to create a new link share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLinkShare {
    /// Public bearer token.
    pub token: String,
    /// Kind of resource being shared.
    pub resource_type: ResourceType,
    /// ID of the shared resource.
    pub resource_id: Uuid,
    /// Pre-hashed access password, when one was set.
    pub password_hash: Option<String>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// The creator.
    pub created_by: Uuid,
}
