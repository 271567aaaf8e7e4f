use async_trait::async_trait;
use gpscollector_core::error::Result;
use gpscollector_core::models::{Point, PolygonQueryParams, RadiusQueryParams};

/// Port for point storage and spatial queries
#[async_trait]
pub trait PointStore: Send + Sync {
    /// Store points, returning how many rows were written.
    /// Points are never deduplicated.
    async fn insert_points(&self, points: &[Point]) -> Result<u64>;

    /// Points whose distance from the center is at most the radius, in store order
    async fn points_within_radius(&self, query: &RadiusQueryParams) -> Result<Vec<Point>>;

    /// Points inside or on the boundary of the polygon, in store order
    async fn points_within_polygon(&self, query: &PolygonQueryParams) -> Result<Vec<Point>>;

    /// Number of stored points
    async fn count_points(&self) -> Result<u64>;

    /// Remove every stored point
    async fn clear(&self) -> Result<()>;
}
