use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::integrations::ensure_schema;

/// Creates the PostgreSQL pool and makes sure the verdict table exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .context("Connecting to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    ensure_schema(&pool).await?;
    Ok(pool)
}
