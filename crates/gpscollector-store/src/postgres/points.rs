//! PointStore implementation on PostGIS.
//!
//! User geometries travel as WKT text in bound parameters; PostGIS parses them
//! with `ST_GeomFromText`/`ST_GeographyFromText`. No coordinate is ever
//! formatted into SQL text.

use async_trait::async_trait;
use gpscollector_core::codec;
use gpscollector_core::error::{CollectorError, Result};
use gpscollector_core::models::{Point, PolygonQueryParams, RadiusQueryParams};
use tracing::debug;

use super::PostgresStore;
use crate::ports::PointStore;

/// PostgreSQL limit on bind parameters per statement
pub const MAX_BIND_PARAMS: usize = 65535;

/// SQLSTATE PostGIS raises for geometries it cannot parse or evaluate
const POSTGIS_INTERNAL_ERROR: &str = "XX000";

pub const SELECT_WITHIN_RADIUS: &str = "SELECT ST_AsText(point) FROM points \
     WHERE ST_Distance(point, ST_GeographyFromText($1), $2) <= $3 ORDER BY id";

pub const SELECT_WITHIN_POLYGON: &str = "SELECT ST_AsText(point) FROM points \
     WHERE ST_DWithin(point, ST_GeographyFromText($1), 0, $2) ORDER BY id";

const COUNT_POINTS: &str = "SELECT COUNT(*) FROM points";

const TRUNCATE_POINTS: &str = "TRUNCATE TABLE points";

/// Build a multi-row insert with `count` placeholders, `$1` through `$count`
pub fn insert_points_sql(count: usize) -> String {
    let values: Vec<String> = (1..=count).map(|i| format!("(ST_GeomFromText(${}))", i)).collect();
    format!("INSERT INTO points (point) VALUES {}", values.join(", "))
}

/// Map a sqlx error, surfacing PostGIS geometry errors as client errors
pub(crate) fn map_query_error(context: &str, err: sqlx::Error) -> CollectorError {
    if let sqlx::Error::Database(db) = &err {
        if db.code().as_deref() == Some(POSTGIS_INTERNAL_ERROR) {
            return CollectorError::InvalidGeometry(db.message().to_string());
        }
    }
    CollectorError::store(format!("{}: {}", context, err))
}

fn rows_to_points(rows: Vec<String>) -> Result<Vec<Point>> {
    rows.iter()
        .map(|text| {
            codec::point_from_wkt(text)
                .map_err(|e| CollectorError::store(format!("Unexpected row in points table: {}", e)))
        })
        .collect()
}

#[async_trait]
impl PointStore for PostgresStore {
    async fn insert_points(&self, points: &[Point]) -> Result<u64> {
        if points.is_empty() {
            return Ok(0);
        }

        let mut tx = self
            .pool()
            .begin()
            .await
            .map_err(|e| map_query_error("Failed to begin transaction", e))?;

        let mut inserted = 0;
        for chunk in points.chunks(MAX_BIND_PARAMS) {
            let sql = insert_points_sql(chunk.len());
            let mut query = sqlx::query(&sql);
            for point in chunk {
                query = query.bind(codec::point_to_wkt(point));
            }

            let result = query
                .execute(&mut *tx)
                .await
                .map_err(|e| map_query_error("Failed to insert points", e))?;
            inserted += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| map_query_error("Failed to commit points", e))?;

        debug!(count = inserted, "Inserted points");
        Ok(inserted)
    }

    async fn points_within_radius(&self, query: &RadiusQueryParams) -> Result<Vec<Point>> {
        let rows: Vec<String> = sqlx::query_scalar(SELECT_WITHIN_RADIUS)
            .bind(codec::point_to_wkt(&query.center))
            .bind(query.use_spheroid)
            .bind(query.radius_meters)
            .fetch_all(self.pool())
            .await
            .map_err(|e| map_query_error("Failed to query points within radius", e))?;

        rows_to_points(rows)
    }

    async fn points_within_polygon(&self, query: &PolygonQueryParams) -> Result<Vec<Point>> {
        let rows: Vec<String> = sqlx::query_scalar(SELECT_WITHIN_POLYGON)
            .bind(codec::polygon_to_wkt(&query.polygon))
            .bind(query.use_spheroid)
            .fetch_all(self.pool())
            .await
            .map_err(|e| map_query_error("Failed to query points within polygon", e))?;

        rows_to_points(rows)
    }

    async fn count_points(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(COUNT_POINTS)
            .fetch_one(self.pool())
            .await
            .map_err(|e| map_query_error("Failed to count points", e))?;

        Ok(count.max(0) as u64)
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query(TRUNCATE_POINTS)
            .execute(self.pool())
            .await
            .map_err(|e| map_query_error("Failed to clear points", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sql_placeholders() {
        assert_eq!(
            insert_points_sql(1),
            "INSERT INTO points (point) VALUES (ST_GeomFromText($1))"
        );
        assert_eq!(
            insert_points_sql(3),
            "INSERT INTO points (point) VALUES (ST_GeomFromText($1)), \
             (ST_GeomFromText($2)), (ST_GeomFromText($3))"
        );
    }

    #[test]
    fn test_insert_sql_scales_to_bind_limit() {
        let sql = insert_points_sql(MAX_BIND_PARAMS);
        assert!(sql.ends_with(&format!("(ST_GeomFromText(${}))", MAX_BIND_PARAMS)));
        assert_eq!(sql.matches("ST_GeomFromText").count(), MAX_BIND_PARAMS);
    }

    #[test]
    fn test_select_statements_only_use_placeholders() {
        for sql in [SELECT_WITHIN_RADIUS, SELECT_WITHIN_POLYGON] {
            assert!(sql.contains("ST_GeographyFromText($1)"));
            assert!(sql.contains("$2"));
            assert!(sql.ends_with("ORDER BY id"));
            assert!(!sql.contains("POINT("));
            assert!(!sql.contains("POLYGON("));
        }
        assert!(SELECT_WITHIN_RADIUS.contains("<= $3"));
    }

    #[test]
    fn test_non_database_errors_are_store_errors() {
        let err = map_query_error("Failed to insert points", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, CollectorError::Store(msg) if msg.starts_with("Failed to insert points")));
    }

    #[test]
    fn test_rows_to_points() {
        let points = rows_to_points(vec!["POINT(0 0)".to_string(), "POINT(10 0)".to_string()]).unwrap();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);

        let err = rows_to_points(vec!["LINESTRING(0 0,1 1)".to_string()]).unwrap_err();
        assert!(matches!(err, CollectorError::Store(_)));
    }
}
