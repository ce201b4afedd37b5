//! S3-compatible object store using presigned requests.
//!
//! Works against AWS S3 as well as MinIO and R2 style endpoints via the
//! `endpoint` and `force_path_style` settings.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;

use drive_core::config::S3StorageConfig;
use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_core::traits::{ObjectMeta, ObjectStore, SignedUrl};

/// S3-compatible object store.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new S3 object store from configuration.
    pub fn new(config: &S3StorageConfig) -> AppResult<Self> {
        if config.access_key.is_empty() || config.secret_key.is_empty() {
            return Err(AppError::configuration(
                "S3 credentials are not configured",
            ));
        }

        tracing::info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 object store"
        );

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "drive-config",
        );
        let mut builder = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(config.force_path_style);
        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        })
    }

    fn presign_config(expires_in: Duration) -> AppResult<PresigningConfig> {
        PresigningConfig::expires_in(expires_in).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid signed URL expiry", e)
        })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn signed_upload_url(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> AppResult<SignedUrl> {
        let expires_at = chrono::Utc::now()
            + chrono::Duration::from_std(expires_in)
                .map_err(|e| AppError::with_source(ErrorKind::Storage, "Expiry out of range", e))?;

        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .presigned(Self::presign_config(expires_in)?)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to presign upload URL", e)
            })?;

        Ok(SignedUrl {
            url: request.uri().to_string(),
            expires_at,
        })
    }

    async fn signed_download_url(
        &self,
        key: &str,
        filename: &str,
        expires_in: Duration,
    ) -> AppResult<SignedUrl> {
        let expires_at = chrono::Utc::now()
            + chrono::Duration::from_std(expires_in)
                .map_err(|e| AppError::with_source(ErrorKind::Storage, "Expiry out of range", e))?;

        let disposition = format!("attachment; filename=\"{}\"", sanitize_filename(filename));
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .response_content_disposition(disposition)
            .presigned(Self::presign_config(expires_in)?)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to presign download URL", e)
            })?;

        Ok(SignedUrl {
            url: request.uri().to_string(),
            expires_at,
        })
    }

    async fn head(&self, key: &str) -> AppResult<Option<ObjectMeta>> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => Ok(Some(ObjectMeta {
                key: key.to_owned(),
                size_bytes: output.content_length().unwrap_or(0),
                mime_type: output.content_type().map(str::to_owned),
            })),
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    return Ok(None);
                }
                Err(AppError::with_source(
                    ErrorKind::Storage,
                    "Failed to inspect object",
                    e,
                ))
            }
        }
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to delete object", e)
            })?;
        Ok(())
    }
}

/// Strip characters that would break the content-disposition header.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '"' | '\\' | '\r' | '\n'))
        .collect()
}
