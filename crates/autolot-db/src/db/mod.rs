//! Database repositories for data access layer

pub mod car;

pub use car::CarRepository;
