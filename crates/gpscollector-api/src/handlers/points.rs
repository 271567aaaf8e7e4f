use axum::{extract::State, Json};
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::JsonBody;
use crate::services::PointService;
use crate::state::AppState;

/// POST /add_points
pub async fn add_points(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(PointService::add_points(&state, &body).await?))
}

/// GET /points_within_radius
pub async fn points_within_radius(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(PointService::points_within_radius(&state, &body).await?))
}

/// GET /points_within_polygon
pub async fn points_within_polygon(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(PointService::points_within_polygon(&state, &body).await?))
}
