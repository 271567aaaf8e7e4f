//! Integration tests against a live PostGIS database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p gpscollector-store -- --ignored`.
//! The tests share the `points` table, so run them with `--test-threads=1`.

use gpscollector_core::models::{Geometry, Point, PolygonQueryParams, RadiusQueryParams};
use gpscollector_store::{PointStore, PostgresConfig, PostgresStore};

async fn connect() -> PostgresStore {
    let config = PostgresConfig::from_env().expect("DATABASE_URL must be set");
    let store = PostgresStore::new(config).await.expect("Failed to connect");
    store.run_migrations().await.expect("Failed to migrate");
    store.clear().await.expect("Failed to clear points");
    store
}

async fn seeded() -> PostgresStore {
    let store = connect().await;
    let points = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(30.0, 0.0),
    ];
    assert_eq!(store.insert_points(&points).await.unwrap(), 4);
    store
}

fn polygon(rings: Vec<Vec<[f64; 2]>>, use_spheroid: bool) -> PolygonQueryParams {
    match Geometry::polygon(rings) {
        Geometry::Polygon(polygon) => PolygonQueryParams { polygon, use_spheroid },
        other => panic!("Expected polygon, got {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires a PostGIS database in DATABASE_URL"]
async fn test_migrations_applied() {
    let store = connect().await;
    assert!(!store.has_pending_migrations().await.unwrap());
    assert!(store.migration_status().await.unwrap().iter().all(|s| s.applied));
}

#[tokio::test]
#[ignore = "requires a PostGIS database in DATABASE_URL"]
async fn test_insert_keeps_duplicates() {
    let store = connect().await;
    let points = [Point::new(1.5, 2.5), Point::new(1.5, 2.5)];

    assert_eq!(store.insert_points(&points).await.unwrap(), 2);
    assert_eq!(store.count_points().await.unwrap(), 2);
}

#[tokio::test]
#[ignore = "requires a PostGIS database in DATABASE_URL"]
async fn test_points_within_radius() {
    let store = seeded().await;
    let query = RadiusQueryParams {
        center: Point::new(0.0, 0.0),
        radius_meters: 1113194.90793274,
        use_spheroid: true,
    };

    let found = store.points_within_radius(&query).await.unwrap();
    assert_eq!(found, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
}

#[tokio::test]
#[ignore = "requires a PostGIS database in DATABASE_URL"]
async fn test_points_within_polygon() {
    let store = seeded().await;
    let query = polygon(
        vec![vec![[0.0, -5.0], [25.0, -5.0], [15.0, 0.0], [25.0, 5.0], [0.0, 5.0], [0.0, -5.0]]],
        true,
    );

    let found = store.points_within_polygon(&query).await.unwrap();
    assert_eq!(found, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
}

#[tokio::test]
#[ignore = "requires a PostGIS database in DATABASE_URL"]
async fn test_open_ring_is_closed_before_querying() {
    let store = seeded().await;
    let query = polygon(vec![vec![[-1.0, -1.0], [11.0, -1.0], [11.0, 1.0], [-1.0, 1.0]]], false);

    let found = store.points_within_polygon(&query).await.unwrap();
    assert_eq!(found, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
}
