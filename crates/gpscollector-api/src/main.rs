use std::sync::Arc;

use anyhow::Context;
use gpscollector_core::error::CollectorError;
use gpscollector_store::memory::MemoryPointStore;
use gpscollector_store::ports::PointStore;
use gpscollector_store::postgres::{PostgresConfig, PostgresStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gpscollector_api::{create_router, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gpscollector_api=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env().context("Invalid server configuration")?;

    tracing::info!(port = config.port, host = %config.host, "Starting GPS collector");

    let store: Arc<dyn PointStore> = if config.uses_postgres() {
        tracing::info!("DATABASE_URL found, connecting to PostgreSQL...");
        Arc::new(init_postgres_storage().await.inspect_err(|e| {
            tracing::error!(
                error = %e,
                "Failed to connect to PostgreSQL. Check that it is running, that DATABASE_URL \
                 is correct and that the PostGIS extension is available"
            );
        })?)
    } else {
        tracing::info!("Using in-memory storage (set DATABASE_URL for PostgreSQL)");
        Arc::new(MemoryPointStore::new())
    };

    let app = create_router(AppState::new(store));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL and the pool overrides
async fn init_postgres_storage() -> anyhow::Result<PostgresStore> {
    let config = PostgresConfig::from_env().map_err(CollectorError::from)?;
    let store = PostgresStore::with_migrations(config).await?;
    Ok(store)
}
