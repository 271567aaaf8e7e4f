use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gpscollector_core::error::CollectorError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, message: message.into(), details: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: message.into(), details: None }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.message, details: self.details };
        (self.status, Json(body)).into_response()
    }
}

impl From<CollectorError> for ApiError {
    fn from(err: CollectorError) -> Self {
        if err.is_client_error() {
            tracing::debug!(error = %err, "Rejected request");
            return Self::bad_request(err.to_string());
        }

        tracing::error!(error = %err, "Request failed");
        match err {
            CollectorError::Store(details) => Self::internal("Internal error").with_details(details),
            other => Self::internal("Internal error").with_details(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_bad_requests() {
        let cases = [
            CollectorError::MalformedBody("Error in data, JSON expected".to_string()),
            CollectorError::validation("Radius parameter is required"),
            CollectorError::InvalidGeometry("geometry contains non-closed rings".to_string()),
            CollectorError::UnknownOperation { method: "POST".to_string(), path: "x".to_string() },
            CollectorError::BadContentType { received: "text/html".to_string() },
        ];

        for err in cases {
            let message = err.to_string();
            let api = ApiError::from(err);
            assert_eq!(api.status, StatusCode::BAD_REQUEST);
            assert_eq!(api.message, message);
            assert!(api.details.is_none());
        }
    }

    #[test]
    fn test_store_error_is_internal() {
        let api = ApiError::from(CollectorError::store("connection refused"));
        assert_eq!(api.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.message, "Internal error");
        assert_eq!(api.details.as_deref(), Some("connection refused"));
    }
}
