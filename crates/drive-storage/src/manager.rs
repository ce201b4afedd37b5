//! Object store construction from configuration.

use std::sync::Arc;

use drive_core::config::StorageConfig;
use drive_core::result::AppResult;
use drive_core::traits::ObjectStore;
use drive_core::AppError;

use crate::providers::mock::MockObjectStore;
use crate::providers::s3::S3ObjectStore;

/// Build the configured object store.
pub fn build_object_store(config: &StorageConfig) -> AppResult<Arc<dyn ObjectStore>> {
    match config.provider.as_str() {
        "s3" => Ok(Arc::new(S3ObjectStore::new(&config.s3)?)),
        "mock" => Ok(Arc::new(MockObjectStore::new())),
        other => Err(AppError::configuration(format!(
            "Unknown storage provider '{other}' (expected \"s3\" or \"mock\")"
        ))),
    }
}
