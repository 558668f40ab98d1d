//! Data models for the application
//!
//! This module contains the car listing domain structures, organized by
//! feature area.

mod car;
mod photo_role;

// Re-export all models for convenient imports
pub use car::*;
pub use photo_role::*;
