//! Object storage and quota configuration.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage provider to use: "s3" or "mock".
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum accepted upload size in bytes (default 300 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: i64,
    /// Per-user storage quota in bytes for new accounts (default 1 GB).
    #[serde(default = "default_storage_limit")]
    pub default_storage_limit_bytes: i64,
    /// Signed upload URL TTL in seconds.
    #[serde(default = "default_upload_url_ttl")]
    pub upload_url_ttl_seconds: u64,
    /// Signed download URL TTL in seconds (default 1 hour).
    #[serde(default = "default_download_url_ttl")]
    pub download_url_ttl_seconds: u64,
    /// S3-compatible backend configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_upload_size_bytes: default_max_upload(),
            default_storage_limit_bytes: default_storage_limit(),
            upload_url_ttl_seconds: default_upload_url_ttl(),
            download_url_ttl_seconds: default_download_url_ttl(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// Endpoint URL (for non-AWS services like MinIO or R2).
    #[serde(default)]
    pub endpoint: String,
    /// Region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket name.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
    /// Whether to use path-style addressing (required by MinIO).
    #[serde(default = "default_true")]
    pub force_path_style: bool,
}

fn default_provider() -> String {
    "s3".to_string()
}

fn default_max_upload() -> i64 {
    314_572_800 // 300 MB
}

fn default_storage_limit() -> i64 {
    1_073_741_824 // 1 GB
}

fn default_upload_url_ttl() -> u64 {
    900 // 15 minutes
}

fn default_download_url_ttl() -> u64 {
    3600 // 1 hour
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "drive".to_string()
}

fn default_true() -> bool {
    true
}
