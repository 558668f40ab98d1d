//! AutoLot Core Library
//!
//! This crate provides the domain models, draft state machines, error types,
//! configuration, and upload validation shared across all AutoLot components.

pub mod config;
pub mod draft;
pub mod error;
pub mod models;
pub mod storage_types;
pub mod validation;

// Re-export commonly used types
pub use config::Config;
pub use draft::{assemble, DraftError, Gallery, SlotAssignments};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Car, CarFields, CarImage, CarInsert, PhotoRole};
pub use storage_types::StorageBackend;
pub use validation::{validate_content_type, validate_file_size, ValidationError};
