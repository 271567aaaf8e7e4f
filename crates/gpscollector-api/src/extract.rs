//! Request body extraction.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header,
};
use gpscollector_core::error::CollectorError;
use gpscollector_core::validation;
use serde_json::Value;

use crate::error::ApiError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// JSON request body.
///
/// Unlike `axum::Json`, a missing Content-Type is accepted, and a present one
/// must be exactly `application/json`. It is checked before the body is read.
#[derive(Debug, Clone)]
pub struct JsonBody(pub Value);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = req.headers().get(header::CONTENT_TYPE) {
            if content_type.as_bytes() != JSON_CONTENT_TYPE.as_bytes() {
                let received = String::from_utf8_lossy(content_type.as_bytes()).into_owned();
                return Err(CollectorError::BadContentType { received }.into());
            }
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| CollectorError::MalformedBody(e.body_text()))?;

        Ok(Self(validation::parse_body(Some(&bytes[..]))?))
    }
}
