//! Shared key generation for storage backends.
//!
//! Key format: `{context}/{millis}-{suffix}.webp`, where `context` is the
//! owning car id or `temp` for draft uploads.

use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::traits::{StorageError, StorageResult};

const KEY_SUFFIX_LEN: usize = 7;

/// Generate a storage key for a new image upload.
///
/// Keys are unique per upload: the current Unix timestamp in milliseconds
/// plus a short random alphanumeric suffix. All backends must use this
/// format for consistency.
pub fn generate_object_key(context: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_SUFFIX_LEN)
        .map(char::from)
        .collect();
    format!("{}/{}-{}.webp", context, millis, suffix)
}

/// Derive the storage key from a public image URL.
///
/// The key is whatever follows the `{bucket}/` marker in the URL. For
/// virtual-hosted S3 URLs the bucket sits in the hostname instead, so the
/// key is the URL path. A URL matching neither form is malformed and fails
/// without any remote call.
pub fn key_from_url(url: &str, bucket: &str) -> StorageResult<String> {
    let marker = format!("{}/", bucket);
    if let Some((_, key)) = url.split_once(&marker) {
        if !key.is_empty() {
            return Ok(key.to_string());
        }
    }

    // Virtual-hosted style: https://{bucket}.s3.{region}.amazonaws.com/{key}
    let host_marker = format!("://{}.", bucket);
    if let Some((_, rest)) = url.split_once(&host_marker) {
        if let Some((_, key)) = rest.split_once('/') {
            if !key.is_empty() {
                return Ok(key.to_string());
            }
        }
    }

    Err(StorageError::InvalidKey(format!(
        "Invalid image URL: {}",
        url
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_object_key_format() {
        let key = generate_object_key("temp");
        let rest = key.strip_prefix("temp/").unwrap();
        let stem = rest.strip_suffix(".webp").unwrap();
        let (millis, suffix) = stem.split_once('-').unwrap();
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(suffix.len(), KEY_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_object_key_uses_context() {
        let key = generate_object_key("8f9f3a1e-car");
        assert!(key.starts_with("8f9f3a1e-car/"));
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let a = generate_object_key("temp");
        let b = generate_object_key("temp");
        assert_ne!(a, b);
    }

    #[test]
    fn test_key_from_url_splits_on_bucket_marker() {
        let url = "http://localhost:9000/car-images/temp/1700000000-ab12cd3.webp";
        let key = key_from_url(url, "car-images").unwrap();
        assert_eq!(key, "temp/1700000000-ab12cd3.webp");
    }

    #[test]
    fn test_key_from_url_handles_virtual_hosted_style() {
        let url = "https://car-images.s3.eu-west-1.amazonaws.com/temp/1700000000-ab12cd3.webp";
        let key = key_from_url(url, "car-images").unwrap();
        assert_eq!(key, "temp/1700000000-ab12cd3.webp");
    }

    #[test]
    fn test_key_from_url_rejects_foreign_url() {
        let result = key_from_url("https://example.com/not-ours.png", "car-images");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[test]
    fn test_key_from_url_rejects_empty_key() {
        let result = key_from_url("http://localhost:9000/car-images/", "car-images");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
