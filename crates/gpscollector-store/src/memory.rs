//! In-memory point storage for development and testing.
//!
//! Spatial predicates are approximated with the `geo` crate: radius queries use
//! geodesic (spheroid) or haversine (sphere) distance, and polygon queries use
//! planar intersection. Production deployments use the PostgreSQL backend, where
//! PostGIS evaluates both.

use async_trait::async_trait;
use geo::{Distance, Geodesic, Haversine, Intersects};
use gpscollector_core::error::{CollectorError, Result};
use gpscollector_core::models::{Point, PolygonQueryParams, RadiusQueryParams};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::ports::PointStore;

/// In-memory implementation of PointStore. Points keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryPointStore {
    points: Arc<RwLock<Vec<Point>>>,
}

impl MemoryPointStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Point>>> {
        self.points.read().map_err(|_| CollectorError::store("Point store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Point>>> {
        self.points.write().map_err(|_| CollectorError::store("Point store lock poisoned"))
    }
}

fn distance_meters(from: Point, to: Point, use_spheroid: bool) -> f64 {
    let (from, to) = (geo::Point::from(from), geo::Point::from(to));
    if use_spheroid {
        Geodesic.distance(from, to)
    } else {
        Haversine.distance(from, to)
    }
}

#[async_trait]
impl PointStore for MemoryPointStore {
    async fn insert_points(&self, points: &[Point]) -> Result<u64> {
        let mut store = self.write()?;
        store.extend_from_slice(points);
        Ok(points.len() as u64)
    }

    async fn points_within_radius(&self, query: &RadiusQueryParams) -> Result<Vec<Point>> {
        let store = self.read()?;

        Ok(store
            .iter()
            .filter(|point| {
                distance_meters(query.center, **point, query.use_spheroid) <= query.radius_meters
            })
            .copied()
            .collect())
    }

    async fn points_within_polygon(&self, query: &PolygonQueryParams) -> Result<Vec<Point>> {
        let polygon = geo::Polygon::from(&query.polygon);
        let store = self.read()?;

        Ok(store
            .iter()
            .filter(|point| polygon.intersects(&geo::Point::from(**point)))
            .copied()
            .collect())
    }

    async fn count_points(&self) -> Result<u64> {
        Ok(self.read()?.len() as u64)
    }

    async fn clear(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpscollector_core::models::Geometry;

    fn equator_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        ]
    }

    async fn seeded_store() -> MemoryPointStore {
        let store = MemoryPointStore::new();
        store.insert_points(&equator_points()).await.unwrap();
        store
    }

    fn notched_polygon(use_spheroid: bool) -> PolygonQueryParams {
        let Geometry::Polygon(polygon) = Geometry::polygon(vec![vec![
            [0.0, -5.0],
            [25.0, -5.0],
            [15.0, 0.0],
            [25.0, 5.0],
            [0.0, 5.0],
            [0.0, -5.0],
        ]]) else {
            unreachable!()
        };
        PolygonQueryParams { polygon, use_spheroid }
    }

    #[tokio::test]
    async fn test_insert_does_not_deduplicate() {
        let store = MemoryPointStore::new();
        let points = vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)];

        assert_eq!(store.insert_points(&points).await.unwrap(), 2);
        assert_eq!(store.insert_points(&points).await.unwrap(), 2);
        assert_eq!(store.count_points().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_radius_query_on_spheroid() {
        let store = seeded_store().await;
        let query = RadiusQueryParams {
            center: Point::new(0.0, 0.0),
            radius_meters: 1113194.90793274,
            use_spheroid: true,
        };

        let found = store.points_within_radius(&query).await.unwrap();
        assert_eq!(found, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    }

    #[tokio::test]
    async fn test_radius_query_on_sphere() {
        let store = seeded_store().await;
        let query = RadiusQueryParams {
            center: Point::new(0.0, 0.0),
            radius_meters: 1_200_000.0,
            use_spheroid: false,
        };

        let found = store.points_within_radius(&query).await.unwrap();
        assert_eq!(found, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    }

    #[tokio::test]
    async fn test_zero_radius_matches_center_only() {
        let store = seeded_store().await;
        let query = RadiusQueryParams {
            center: Point::new(10.0, 0.0),
            radius_meters: 0.0,
            use_spheroid: true,
        };

        let found = store.points_within_radius(&query).await.unwrap();
        assert_eq!(found, vec![Point::new(10.0, 0.0)]);
    }

    #[tokio::test]
    async fn test_polygon_query_includes_boundary() {
        let store = seeded_store().await;

        let found = store.points_within_polygon(&notched_polygon(true)).await.unwrap();
        assert_eq!(found, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = seeded_store().await;
        store.clear().await.unwrap();

        assert_eq!(store.count_points().await.unwrap(), 0);
        let found = store.points_within_polygon(&notched_polygon(false)).await.unwrap();
        assert!(found.is_empty());
    }
}
