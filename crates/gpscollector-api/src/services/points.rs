use gpscollector_core::codec;
use gpscollector_core::error::Result;
use gpscollector_core::validation;
use serde_json::Value;
use tracing::info;

use crate::state::AppState;

/// Runs one operation: validate the body, call the store, encode the reply
pub struct PointService;

impl PointService {
    /// Store the submitted points; replies with an empty array
    pub async fn add_points(state: &AppState, body: &Value) -> Result<Value> {
        let params = validation::add_points(body)?;
        let inserted = state.store.insert_points(&params.points).await?;

        info!(count = inserted, "Stored points");
        Ok(Value::Array(Vec::new()))
    }

    pub async fn points_within_radius(state: &AppState, body: &Value) -> Result<Value> {
        let params = validation::points_within_radius(body)?;
        let points = state.store.points_within_radius(&params).await?;

        info!(
            radius_meters = params.radius_meters,
            use_spheroid = params.use_spheroid,
            count = points.len(),
            "Queried points within radius"
        );
        Ok(codec::encode_points(&points))
    }

    pub async fn points_within_polygon(state: &AppState, body: &Value) -> Result<Value> {
        let params = validation::points_within_polygon(body)?;
        let points = state.store.points_within_polygon(&params).await?;

        info!(
            rings = params.polygon.rings().len(),
            use_spheroid = params.use_spheroid,
            count = points.len(),
            "Queried points within polygon"
        );
        Ok(codec::encode_points(&points))
    }
}
