//! PostgreSQL pool, migrations and health check
//!
//! Pool sizing and timeouts come straight from the `database` section of
//! [`AppConfig`](crate::config::AppConfig).

use crate::config::DatabaseConfig;
use anyhow::{ensure, Result};
use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Pool options for the configured sizes and timeouts
pub fn pool_options(config: &DatabaseConfig) -> Result<PgPoolOptions> {
    ensure!(config.max_connections > 0, "database.max_connections must be positive");
    ensure!(
        config.min_connections <= config.max_connections,
        "database.min_connections ({}) exceeds database.max_connections ({})",
        config.min_connections,
        config.max_connections
    );

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true))
}

/// Connect a pool to the configured database
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let options = pool_options(config)?;
    let connect_options =
        PgConnectOptions::from_str(config.url.expose_secret())?.application_name("bloglist");

    let pool = options.connect_with(connect_options).await?;

    info!(
        max = config.max_connections,
        min = config.min_connections,
        "Database pool created"
    );
    Ok(pool)
}

/// Apply embedded migrations
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
