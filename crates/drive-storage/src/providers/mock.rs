//! In-memory mock object store for tests and local development.
//!
//! Mints deterministic fake URLs and tracks registered objects in a map,
//! so upload-completion and purge flows can be exercised without a real
//! backend.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use drive_core::result::AppResult;
use drive_core::traits::{ObjectMeta, ObjectStore, SignedUrl};

const MOCK_BASE_URL: &str = "https://storage.mock.invalid";

/// Mock object store backed by an in-memory key map.
#[derive(Debug)]
pub struct MockObjectStore {
    objects: Mutex<HashMap<String, ObjectMeta>>,
    /// Size reported for keys that were never registered. `None` makes
    /// `head` report such keys as missing.
    fallback_size: Option<i64>,
}

impl MockObjectStore {
    /// A permissive store: every key exists with a nominal size. Suitable
    /// for local development where no client actually uploads bytes.
    pub fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fallback_size: Some(1024),
        }
    }

    /// A strict store: only registered keys exist. Suitable for tests that
    /// exercise missing-object behavior.
    pub fn strict() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            fallback_size: None,
        }
    }

    /// Register an object as uploaded, simulating a client PUT.
    pub fn put_object(&self, key: &str, size_bytes: i64, mime_type: Option<&str>) {
        self.objects.lock().unwrap().insert(
            key.to_owned(),
            ObjectMeta {
                key: key.to_owned(),
                size_bytes,
                mime_type: mime_type.map(str::to_owned),
            },
        );
    }

    /// Whether a key is currently registered.
    pub fn contains(&self, key: &str) -> bool {
        self.objects.lock().unwrap().contains_key(key)
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    fn provider_type(&self) -> &str {
        "mock"
    }

    async fn signed_upload_url(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> AppResult<SignedUrl> {
        let expires_at = chrono::Utc::now() + chrono::Duration::from_std(expires_in).unwrap();
        Ok(SignedUrl {
            url: format!("{MOCK_BASE_URL}/{key}?method=put&content-type={content_type}"),
            expires_at,
        })
    }

    async fn signed_download_url(
        &self,
        key: &str,
        filename: &str,
        expires_in: Duration,
    ) -> AppResult<SignedUrl> {
        let expires_at = chrono::Utc::now() + chrono::Duration::from_std(expires_in).unwrap();
        Ok(SignedUrl {
            url: format!("{MOCK_BASE_URL}/{key}?method=get&filename={filename}"),
            expires_at,
        })
    }

    async fn head(&self, key: &str) -> AppResult<Option<ObjectMeta>> {
        if let Some(meta) = self.objects.lock().unwrap().get(key) {
            return Ok(Some(meta.clone()));
        }
        Ok(self.fallback_size.map(|size_bytes| ObjectMeta {
            key: key.to_owned(),
            size_bytes,
            mime_type: None,
        }))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_url_embeds_key() {
        let store = MockObjectStore::new();
        let signed = store
            .signed_upload_url("users/a/files/b-doc.txt", "text/plain", Duration::from_secs(300))
            .await
            .unwrap();
        assert!(signed.url.contains("users/a/files/b-doc.txt"));
        assert!(signed.expires_at > chrono::Utc::now());
    }

    #[tokio::test]
    async fn strict_store_reports_missing_objects() {
        let store = MockObjectStore::strict();
        assert!(store.head("nope").await.unwrap().is_none());

        store.put_object("nope", 42, Some("text/plain"));
        let meta = store.head("nope").await.unwrap().unwrap();
        assert_eq!(meta.size_bytes, 42);
    }

    #[tokio::test]
    async fn permissive_store_reports_everything() {
        let store = MockObjectStore::new();
        assert!(store.head("anything/at/all").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_removes_registered_object() {
        let store = MockObjectStore::strict();
        store.put_object("key", 1, None);
        store.delete("key").await.unwrap();
        assert!(store.head("key").await.unwrap().is_none());
    }
}
