//! AutoLot Storage Library
//!
//! This crate provides object-storage abstraction and implementations for
//! AutoLot, plus the image upload gateway used by the API. It includes the
//! Storage trait and implementations for S3 and local filesystem.
//!
//! # Storage key format
//!
//! All backends use the same key layout: `{context}/{millis}-{suffix}.webp`,
//! where `context` is the owning car id or `temp` for images uploaded while
//! a draft is still being composed.
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module so all backends stay consistent.

pub mod factory;
pub mod gateway;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use autolot_core::StorageBackend;
pub use factory::create_storage;
pub use gateway::{GatewayError, ImageGateway, UploadedImage};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
