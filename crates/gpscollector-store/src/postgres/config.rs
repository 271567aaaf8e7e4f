//! PostgreSQL configuration

use gpscollector_core::error::CollectorError;
use std::time::Duration;
use thiserror::Error;

const DATABASE_URL_VAR: &str = "DATABASE_URL";
const MAX_CONNECTIONS_VAR: &str = "GPS_COLLECTOR_DB_MAX_CONNECTIONS";
const ACQUIRE_TIMEOUT_VAR: &str = "GPS_COLLECTOR_DB_ACQUIRE_TIMEOUT_SECS";
const AUTO_MIGRATE_VAR: &str = "GPS_COLLECTOR_DB_AUTO_MIGRATE";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {0}")]
    Missing(String),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl ConfigError {
    fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::Invalid { key: key.to_string(), reason: reason.into() }
    }
}

impl From<ConfigError> for CollectorError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Missing(key) => CollectorError::ConfigMissing { key },
            ConfigError::Invalid { key, reason } => CollectorError::ConfigInvalid { key, reason },
        }
    }
}

/// PostgreSQL connection and behavior configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Connection pool configuration
    pub pool: PoolConfig,
    /// Migration configuration
    pub migrations: MigrationConfig,
}

impl PostgresConfig {
    /// Load configuration from environment variables
    ///
    /// Requires DATABASE_URL. Pool size, acquire timeout and auto-migration
    /// can be overridden with the `GPS_COLLECTOR_DB_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var(DATABASE_URL_VAR)
            .map_err(|_| ConfigError::Missing(DATABASE_URL_VAR.to_string()))?;

        let config = Self::new(database_url)?;
        config.with_env_overrides(|key| std::env::var(key).ok())
    }

    /// Create a new configuration with the given database URL
    pub fn new(database_url: String) -> Result<Self, ConfigError> {
        if database_url.trim().is_empty() {
            return Err(ConfigError::invalid("database_url", "cannot be empty"));
        }

        Ok(Self {
            database_url,
            pool: PoolConfig::default(),
            migrations: MigrationConfig::default(),
        })
    }

    /// Apply overrides from a variable lookup, then validate.
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(MAX_CONNECTIONS_VAR) {
            self.pool.max_connections = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(MAX_CONNECTIONS_VAR, "must be a positive integer"))?;
        }

        if let Some(value) = lookup(ACQUIRE_TIMEOUT_VAR) {
            let secs: u64 = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ACQUIRE_TIMEOUT_VAR, "must be a number of seconds"))?;
            self.pool.acquire_timeout = Duration::from_secs(secs);
        }

        if let Some(value) = lookup(AUTO_MIGRATE_VAR) {
            self.migrations.auto_run = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => return Err(ConfigError::invalid(AUTO_MIGRATE_VAR, "must be true or false")),
            };
        }

        // A small max_connections must not trip the min/max check
        self.pool.min_connections = self.pool.min_connections.min(self.pool.max_connections);

        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::invalid("database_url", "cannot be empty"));
        }

        self.pool.validate()?;

        Ok(())
    }
}

/// Connection pool configuration
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Maximum number of connections allowed
    pub max_connections: u32,
    /// Timeout for acquiring a connection from the pool
    pub acquire_timeout: Duration,
    /// Timeout for idle connections before they are closed
    pub idle_timeout: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_connections: 1,
            max_connections: 10,
            acquire_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl PoolConfig {
    /// Validate pool configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::invalid("pool.max_connections", "must be greater than 0"));
        }

        if self.min_connections > self.max_connections {
            return Err(ConfigError::invalid(
                "pool.min_connections",
                format!(
                    "min_connections ({}) cannot be greater than max_connections ({})",
                    self.min_connections, self.max_connections
                ),
            ));
        }

        Ok(())
    }
}

/// Migration configuration
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Whether to apply pending migrations when the store connects
    pub auto_run: bool,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self { auto_run: true }
    }
}
