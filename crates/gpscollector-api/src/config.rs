use gpscollector_core::error::{CollectorError, Result};

const PORT_VAR: &str = "GPS_COLLECTOR_PORT";
const BIND_VAR: &str = "GPS_COLLECTOR_BIND";
const DATABASE_URL_VAR: &str = "DATABASE_URL";

pub const DEFAULT_PORT: u16 = 9292;
pub const DEFAULT_BIND: &str = "0.0.0.0";

/// API server configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { host: DEFAULT_BIND.to_string(), port: DEFAULT_PORT, database_url: None }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_VAR) {
            Some(value) => value.trim().parse().map_err(|_| CollectorError::ConfigInvalid {
                key: PORT_VAR.to_string(),
                reason: format!("'{}' is not a valid port", value),
            })?,
            None => DEFAULT_PORT,
        };

        let host = lookup(BIND_VAR)
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        // An empty DATABASE_URL means "not configured"
        let database_url = lookup(DATABASE_URL_VAR).filter(|url| !url.trim().is_empty());

        Ok(Self { host, port, database_url })
    }

    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if PostgreSQL storage is configured
    pub fn uses_postgres(&self) -> bool {
        self.database_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ApiConfig> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        ApiConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:9292");
        assert!(!config.uses_postgres());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            (PORT_VAR, "8080"),
            (BIND_VAR, "127.0.0.1"),
            (DATABASE_URL_VAR, "postgres://localhost/gps"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(config.uses_postgres());
    }

    #[test]
    fn test_empty_database_url_is_unset() {
        let config = config(&[(DATABASE_URL_VAR, "")]).unwrap();
        assert!(!config.uses_postgres());
    }

    #[test]
    fn test_invalid_port() {
        let err = config(&[(PORT_VAR, "ninety")]).unwrap_err();
        assert!(matches!(err, CollectorError::ConfigInvalid { key, .. } if key == PORT_VAR));
    }
}
