//! Request context carrying the authenticated user.

use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Extracted from the access token by the API layer and passed into
/// service methods so every operation knows who is acting.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// Email address from the token claims.
    pub email: String,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}
