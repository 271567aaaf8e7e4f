//! Error types for the GPS collector

use thiserror::Error;

/// Failure to turn a GeoJSON value into a [`crate::models::Geometry`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The value does not have the shape of a GeoJSON geometry
    #[error("{0}")]
    Malformed(String),

    /// Well-formed GeoJSON describing a degenerate geometry
    #[error("{0}")]
    InvalidGeometry(String),
}

#[derive(Debug, Error)]
pub enum CollectorError {
    // Request errors
    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidGeometry(String),

    #[error("Unknown method and path combination: {method} {path}")]
    UnknownOperation { method: String, path: String },

    #[error("Content-type must be 'application/json', '{received}' received")]
    BadContentType { received: String },

    // Store errors
    #[error("Store error: {0}")]
    Store(String),

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },
}

impl CollectorError {
    pub fn validation(message: impl Into<String>) -> Self {
        CollectorError::Validation(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        CollectorError::Store(message.into())
    }

    /// Whether the error was caused by the caller's input rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CollectorError::MalformedBody(_)
                | CollectorError::Validation(_)
                | CollectorError::InvalidGeometry(_)
                | CollectorError::UnknownOperation { .. }
                | CollectorError::BadContentType { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;
