use axum::{
    routing::{get, post},
    Router,
};
use gpscollector_core::models::Operation;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the API router with all routes
///
/// A known path with the wrong method, and any unknown path, both answer
/// with the unknown-operation error.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            Operation::AddPoints.path(),
            post(handlers::add_points).fallback(handlers::unknown_operation),
        )
        .route(
            Operation::PointsWithinRadius.path(),
            get(handlers::points_within_radius).fallback(handlers::unknown_operation),
        )
        .route(
            Operation::PointsWithinPolygon.path(),
            get(handlers::points_within_polygon).fallback(handlers::unknown_operation),
        )
        .fallback(handlers::unknown_operation)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
