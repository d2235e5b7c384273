//! Catalog database pool

use anyhow::{Context, Result};
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use std::str::FromStr;
use std::time::Duration;

use crate::config::Settings;

/// Build the catalog pool without connecting.
///
/// Inline calculations never touch the database, so the service starts even
/// when the catalog is unreachable; only product lookups fail.
pub fn create_pool(settings: &Settings) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&settings.database_url)
        .context("Invalid DATABASE_URL")?
        .application_name(env!("CARGO_PKG_NAME"));

    let pool = PgPoolOptions::new()
        .max_connections(settings.database_max_connections)
        .acquire_timeout(Duration::from_secs(settings.database_acquire_timeout_seconds))
        .idle_timeout(Duration::from_secs(300))
        .connect_lazy_with(connect_options);

    tracing::info!(
        max_connections = settings.database_max_connections,
        "Catalog pool configured"
    );

    Ok(pool)
}

pub async fn health_check(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").fetch_one(pool).await.is_ok()
}
