//! Object store trait for signed-URL delegation to external storage.
//!
//! The API never streams file bytes. Uploads and downloads happen directly
//! between the client and the storage provider via time-limited signed
//! URLs; the server only mints URLs, inspects object metadata, and deletes
//! objects during purges. The trait is defined here in `drive-core` and
//! implemented in `drive-storage`.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// A time-limited signed URL pointing at an object in external storage.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SignedUrl {
    /// The signed URL.
    pub url: String,
    /// When the URL stops working (UTC).
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Metadata about a stored object, as reported by the provider.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ObjectMeta {
    /// Key within the bucket.
    pub key: String,
    /// Size in bytes.
    pub size_bytes: i64,
    /// MIME type, if the provider reports one.
    pub mime_type: Option<String>,
}

/// Trait for signed-URL object storage backends.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "s3", "mock").
    fn provider_type(&self) -> &str;

    /// Mint a signed PUT URL for a direct client upload.
    async fn signed_upload_url(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> AppResult<SignedUrl>;

    /// Mint a signed GET URL for a direct client download.
    ///
    /// `filename` drives the attachment content-disposition the provider
    /// attaches to the response.
    async fn signed_download_url(
        &self,
        key: &str,
        filename: &str,
        expires_in: Duration,
    ) -> AppResult<SignedUrl>;

    /// Fetch object metadata, or `None` when no object exists at `key`.
    async fn head(&self, key: &str) -> AppResult<Option<ObjectMeta>>;

    /// Delete the object at `key`. Deleting a missing object is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;
}
