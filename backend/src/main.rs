//! Bloglist Backend
//!
//! A small service for sharing links to blog posts.
//!
//! ## Architecture
//!
//! - Routes: HTTP request handling and routing
//! - Services: validation, ownership rules and statistics
//! - Repositories: PostgreSQL via SQLx, or an in-memory store

use anyhow::Result;
use bloglist_backend::{
    config::{AppConfig, StorageBackend},
    db,
    repositories::{MemoryStore, PgStore, Store},
    routes,
    state::AppState,
};
use sqlx::PgPool;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        backend = ?config.database.backend,
        "Starting Bloglist Backend"
    );

    if AppConfig::is_production() {
        if let Err(e) = config.validate_for_production() {
            error!("Configuration error: {}", e);
            return Err(e);
        }
    }

    let (store, pool) = open_store(&config).await?;
    let state = AppState::new(store, config.clone());
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        pool.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Build the configured store, returning the pool so it can be closed on shutdown
async fn open_store(config: &AppConfig) -> Result<(Arc<dyn Store>, Option<PgPool>)> {
    match config.database.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = db::create_pool(&config.database).await?;

            // Production runs migrations as a separate job
            if !AppConfig::is_production() {
                db::run_migrations(&pool).await?;
            }

            Ok((Arc::new(PgStore::new(pool.clone())), Some(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory store; data is lost on shutdown");
            Ok((Arc::new(MemoryStore::new()), None))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "bloglist_backend=info,tower_http=info".into()
        } else {
            "bloglist_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
