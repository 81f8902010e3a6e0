//! HTTP server initialization and runtime setup.
//!
//! Selects the link store, applies migrations, and runs the Axum server until
//! Ctrl+C is received.

use crate::config::Config;
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::device::WootheeClassifier;
use crate::infrastructure::persistence::{MemoryLinkRepository, PgLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::id_generator::IdGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or the in-memory store when
///   no database is configured
/// - Token generator seeded from `CONTEXT_SEED`, advanced past the links
///   already in the store
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let link_repository = connect_store(&config).await?;

    let id_generator = IdGenerator::new(config.seed);
    let issued = link_repository.count().await?;
    if issued > 0 {
        id_generator.skip(issued as u64);
        tracing::info!(issued, "Token sequence resumed");
    }

    let state = AppState::new(
        link_repository,
        id_generator,
        config.link_base(),
        Arc::new(WootheeClassifier::new()),
        config.behind_proxy,
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr()
        .parse()
        .with_context(|| format!("Invalid listen address: {}", config.listen_addr()))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Opens the configured link store.
///
/// With a database URL this connects a pool and applies pending migrations;
/// otherwise an empty in-memory store is returned.
pub async fn connect_store(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    match config.database_url {
        Some(ref database_url) => {
            let pool = connect_pool(config, database_url).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;
            tracing::info!("Migrations applied");

            Ok(Arc::new(PgLinkRepository::new(Arc::new(pool))))
        }
        None => {
            tracing::warn!("No database configured, links are kept in memory");
            Ok(Arc::new(MemoryLinkRepository::new()))
        }
    }
}

async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!(
        max_connections = config.db_max_connections,
        "Connected to database"
    );

    Ok(pool)
}

/// Resolves on Ctrl+C. If the signal handler cannot be installed the server
/// keeps running until the process is killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
