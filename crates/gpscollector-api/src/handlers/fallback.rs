use axum::http::{Method, Uri};
use gpscollector_core::error::CollectorError;

use crate::error::ApiError;
use crate::extract::JsonBody;

/// Any method and path outside the three operations.
///
/// The body is still extracted, so a bad Content-Type or a body that is not
/// JSON is reported ahead of the unknown operation.
pub async fn unknown_operation(method: Method, uri: Uri, _body: JsonBody) -> ApiError {
    let path = uri.path();
    CollectorError::UnknownOperation {
        method: method.to_string(),
        path: path.strip_prefix('/').unwrap_or(path).to_string(),
    }
    .into()
}
