use sqlx::PgPool;

use crate::config::Config;

/// Shared application state injected into the dashboard handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}
