//! Application setup and initialization
//!
//! This module contains all application initialization logic extracted from
//! main.rs for better organization and testability.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::{AppState, DbState, MediaState};
use anyhow::{Context, Result};
use autolot_core::Config;
use autolot_db::CarRepository;
use autolot_storage::ImageGateway;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_logging(config.is_production());

    tracing::info!("Configuration loaded and validated successfully");

    // Setup database
    let pool = database::setup_database(&config).await?;

    // Setup storage and the upload gateway
    let storage = storage::setup_storage(&config).await?;
    let gateway = ImageGateway::new(
        storage.clone(),
        config.bucket.clone(),
        config.max_image_size_bytes,
        config.allowed_content_types.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        db: DbState {
            pool: pool.clone(),
            car_repository: CarRepository::new(pool),
        },
        media: MediaState { storage, gateway },
    });

    // Setup routes
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
