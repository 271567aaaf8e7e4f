//! PostgreSQL/PostGIS storage adapter

pub mod config;
pub mod migrations;
pub mod points;

pub use config::{ConfigError, MigrationConfig, PoolConfig, PostgresConfig};
pub use migrations::{MigrationError, MigrationManager, MigrationStatus};

use gpscollector_core::error::{CollectorError, Result};
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

/// PostgreSQL storage adapter
pub struct PostgresStore {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresStore {
    /// Connect with the given configuration and test the connection
    pub async fn new(config: PostgresConfig) -> Result<Self> {
        config.validate()?;

        let pool = PgPoolOptions::new()
            .min_connections(config.pool.min_connections)
            .max_connections(config.pool.max_connections)
            .acquire_timeout(config.pool.acquire_timeout)
            .idle_timeout(config.pool.idle_timeout)
            .max_lifetime(config.pool.max_lifetime)
            .connect(&config.database_url)
            .await
            .map_err(|e| CollectorError::store(format!("Failed to connect to database: {}", e)))?;

        let store = Self { pool, config };
        store.health_check().await?;

        info!(max_connections = store.config.pool.max_connections, "Connected to PostgreSQL");
        Ok(store)
    }

    /// Connect and apply migrations when `migrations.auto_run` is set
    pub async fn with_migrations(config: PostgresConfig) -> Result<Self> {
        let auto_run = config.migrations.auto_run;
        let store = Self::new(config).await?;
        if auto_run {
            store.run_migrations().await?;
        }
        Ok(store)
    }

    /// Run all pending migrations
    pub async fn run_migrations(&self) -> Result<()> {
        let manager = MigrationManager::new(self.pool.clone());
        manager
            .run_migrations()
            .await
            .map_err(|e| CollectorError::store(format!("Migration failed: {}", e)))?;

        let version = manager
            .current_version()
            .await
            .map_err(|e| CollectorError::store(format!("Failed to get current version: {}", e)))?;
        info!(?version, "Database schema is up to date");
        Ok(())
    }

    pub async fn migration_status(&self) -> Result<Vec<MigrationStatus>> {
        MigrationManager::new(self.pool.clone())
            .check_status()
            .await
            .map_err(|e| CollectorError::store(format!("Failed to check migration status: {}", e)))
    }

    pub async fn has_pending_migrations(&self) -> Result<bool> {
        MigrationManager::new(self.pool.clone())
            .has_pending_migrations()
            .await
            .map_err(|e| CollectorError::store(format!("Failed to check pending migrations: {}", e)))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Perform a health check on the database connection
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| CollectorError::store(format!("Health check failed: {}", e)))?;
        Ok(())
    }
}
