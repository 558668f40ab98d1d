//! AutoLot Database Library
//!
//! Repository implementations for the data access layer. Each repository is
//! responsible for a specific domain entity and provides CRUD operations.

pub mod db;

pub use db::CarRepository;
