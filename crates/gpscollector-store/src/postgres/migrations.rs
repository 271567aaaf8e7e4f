use std::collections::HashSet;

use sqlx::migrate::Migrator;
use sqlx::PgPool;
use thiserror::Error;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Migration error types
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Migration failed: {0}")]
    Failed(#[from] sqlx::migrate::MigrateError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    pub version: i64,
    pub description: String,
    pub applied: bool,
}

/// Applies and inspects the embedded schema migrations
pub struct MigrationManager {
    pool: PgPool,
}

impl MigrationManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Run all pending migrations in version order
    pub async fn run_migrations(&self) -> Result<(), MigrationError> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }

    /// Status of every embedded migration
    pub async fn check_status(&self) -> Result<Vec<MigrationStatus>, MigrationError> {
        let applied = self.applied_versions().await?;
        Ok(statuses(&MIGRATOR, &applied))
    }

    pub async fn has_pending_migrations(&self) -> Result<bool, MigrationError> {
        let status = self.check_status().await?;
        Ok(status.iter().any(|s| !s.applied))
    }

    /// Highest applied migration version
    pub async fn current_version(&self) -> Result<Option<i64>, MigrationError> {
        let version: Option<(i64,)> =
            sqlx::query_as("SELECT version FROM _sqlx_migrations ORDER BY version DESC LIMIT 1")
                .fetch_optional(&self.pool)
                .await?;

        Ok(version.map(|(v,)| v))
    }

    async fn applied_versions(&self) -> Result<HashSet<i64>, MigrationError> {
        let table: Option<String> =
            sqlx::query_scalar("SELECT to_regclass('_sqlx_migrations')::text")
                .fetch_one(&self.pool)
                .await?;

        // Fresh database: nothing applied yet
        if table.is_none() {
            return Ok(HashSet::new());
        }

        let versions: Vec<(i64,)> =
            sqlx::query_as("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
                .fetch_all(&self.pool)
                .await?;

        Ok(versions.into_iter().map(|(v,)| v).collect())
    }
}

fn statuses(migrator: &Migrator, applied: &HashSet<i64>) -> Vec<MigrationStatus> {
    migrator
        .iter()
        .map(|migration| MigrationStatus {
            version: migration.version,
            description: migration.description.to_string(),
            applied: applied.contains(&migration.version),
        })
        .collect()
}
