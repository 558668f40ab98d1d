//! Application state shared by all handlers.

use std::sync::Arc;

use autolot_core::Config;
use autolot_db::CarRepository;
use autolot_storage::{ImageGateway, Storage};
use sqlx::PgPool;

/// Database pool and repositories.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub car_repository: CarRepository,
}

/// Storage backend and the upload gateway built over it.
#[derive(Clone)]
pub struct MediaState {
    pub storage: Arc<dyn Storage>,
    pub gateway: ImageGateway,
}

pub struct AppState {
    pub config: Config,
    pub db: DbState,
    pub media: MediaState,
}
