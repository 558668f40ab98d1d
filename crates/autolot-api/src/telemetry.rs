//! Logging initialization
//!
//! Structured logging via tracing-subscriber. Output is JSON in production
//! and human-readable otherwise; the filter comes from `RUST_LOG` with a
//! sensible default.

use tracing_subscriber::{fmt, EnvFilter};

pub fn init_logging(is_production: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,tower_http=info"));

    if is_production {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}
