//! Image upload gateway
//!
//! Orchestrates validation, key generation, and storage for car photo
//! uploads. Validation runs before any storage call, so oversized or
//! non-image payloads never reach the backend.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use autolot_core::validation::{validate_content_type, validate_file_size, ValidationError};

use crate::keys;
use crate::traits::{Storage, StorageError};

/// Context used for images uploaded while a draft is still being composed.
pub const DRAFT_CONTEXT: &str = "temp";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// A successfully stored image.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub url: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Gateway over a configured storage backend for car photo uploads.
#[derive(Clone)]
pub struct ImageGateway {
    storage: Arc<dyn Storage>,
    bucket: String,
    max_size_bytes: usize,
    allowed_content_types: Vec<String>,
}

impl ImageGateway {
    pub fn new(
        storage: Arc<dyn Storage>,
        bucket: String,
        max_size_bytes: usize,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            storage,
            bucket,
            max_size_bytes,
            allowed_content_types,
        }
    }

    /// Validate and store an image, returning its public address.
    ///
    /// `context` scopes the object key: the owning car id, or [`DRAFT_CONTEXT`]
    /// when the listing does not exist yet.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len(), content_type = %content_type))]
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        content_type: &str,
        context: Option<&str>,
    ) -> Result<UploadedImage, GatewayError> {
        validate_content_type(content_type, &self.allowed_content_types)?;
        validate_file_size(data.len(), self.max_size_bytes)?;

        let key = keys::generate_object_key(context.unwrap_or(DRAFT_CONTEXT));
        let url = self.storage.upload(&key, data, content_type).await?;

        tracing::info!(key = %key, url = %url, "Image upload complete");

        Ok(UploadedImage {
            url,
            uploaded_at: Utc::now(),
        })
    }

    /// Delete a stored image by its public address.
    ///
    /// The object key is derived from the URL; a URL that does not belong to
    /// the configured bucket fails fast without any remote call.
    #[tracing::instrument(skip(self))]
    pub async fn delete_image(&self, url: &str) -> Result<(), GatewayError> {
        let key = keys::key_from_url(url, &self.bucket)?;
        self.storage.delete(&key).await?;

        tracing::info!(key = %key, "Image delete complete");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorageBackend;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts backend calls so tests can assert validation short-circuits.
    #[derive(Default)]
    struct CountingStorage {
        uploads: AtomicUsize,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl Storage for CountingStorage {
        async fn upload(
            &self,
            storage_key: &str,
            _data: Vec<u8>,
            _content_type: &str,
        ) -> crate::StorageResult<String> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            Ok(format!("http://localhost:9000/car-images/{}", storage_key))
        }

        async fn delete(&self, _storage_key: &str) -> crate::StorageResult<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn exists(&self, _storage_key: &str) -> crate::StorageResult<bool> {
            Ok(true)
        }

        fn backend_type(&self) -> StorageBackend {
            StorageBackend::Local
        }
    }

    fn gateway(storage: Arc<CountingStorage>) -> ImageGateway {
        ImageGateway::new(
            storage,
            "car-images".to_string(),
            5 * 1024 * 1024,
            vec!["image/jpeg".to_string(), "image/webp".to_string()],
        )
    }

    #[tokio::test]
    async fn test_upload_stores_under_draft_context_by_default() {
        let storage = Arc::new(CountingStorage::default());
        let gw = gateway(storage.clone());

        let uploaded = gw
            .upload_image(vec![0u8; 1024], "image/jpeg", None)
            .await
            .unwrap();

        assert!(uploaded.url.contains("/car-images/temp/"));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_oversized_upload_never_reaches_storage() {
        let storage = Arc::new(CountingStorage::default());
        let gw = gateway(storage.clone());

        let result = gw
            .upload_image(vec![0u8; 5 * 1024 * 1024 + 1], "image/jpeg", None)
            .await;

        assert!(matches!(
            result,
            Err(GatewayError::Validation(ValidationError::FileTooLarge { .. }))
        ));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_non_image_upload_never_reaches_storage() {
        let storage = Arc::new(CountingStorage::default());
        let gw = gateway(storage.clone());

        let result = gw
            .upload_image(vec![0u8; 1024], "application/pdf", None)
            .await;

        assert!(matches!(
            result,
            Err(GatewayError::Validation(
                ValidationError::InvalidContentType { .. }
            ))
        ));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_foreign_url_never_reaches_storage() {
        let storage = Arc::new(CountingStorage::default());
        let gw = gateway(storage.clone());

        let result = gw.delete_image("https://example.com/elsewhere.png").await;

        assert!(matches!(
            result,
            Err(GatewayError::Storage(StorageError::InvalidKey(_)))
        ));
        assert_eq!(storage.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_derives_key_from_url() {
        let storage = Arc::new(CountingStorage::default());
        let gw = gateway(storage.clone());

        gw.delete_image("http://localhost:9000/car-images/temp/1700000000-ab12cd3.webp")
            .await
            .unwrap();

        assert_eq!(storage.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upload_with_car_context() {
        let storage = Arc::new(CountingStorage::default());
        let gw = gateway(storage.clone());

        let uploaded = gw
            .upload_image(vec![0u8; 64], "image/webp", Some("3f2c9d"))
            .await
            .unwrap();

        assert!(uploaded.url.contains("/car-images/3f2c9d/"));
    }
}
