//! GeoJSON and WKT codec.
//!
//! Incoming JSON is parsed with the `geojson` crate and narrowed to
//! [`Geometry`]. WKT is the text form exchanged with PostGIS: geometries are
//! bound as `ST_GeomFromText`/`ST_GeographyFromText` arguments and read back
//! from `ST_AsText`.

use geojson::{PolygonType, Position};
use serde_json::{json, Value};
use wkt::{ToWkt, TryFromWkt};

use crate::error::DecodeError;
use crate::models::{Geometry, Point, Polygon};

/// Minimum number of positions in a closed linear ring
pub const MIN_RING_POINTS: usize = 4;

/// Decode a GeoJSON geometry object
pub fn decode(value: &Value) -> Result<Geometry, DecodeError> {
    let geometry = geojson::Geometry::from_json_value(value.clone())
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;
    from_geojson(geometry)
}

fn from_geojson(geometry: geojson::Geometry) -> Result<Geometry, DecodeError> {
    match geometry.value {
        geojson::Value::Point(position) => position_to_point(&position).map(Geometry::Point),
        geojson::Value::Polygon(rings) => polygon_from_rings(&rings).map(Geometry::Polygon),
        geojson::Value::GeometryCollection(members) => members
            .into_iter()
            .map(from_geojson)
            .collect::<Result<Vec<_>, _>>()
            .map(Geometry::GeometryCollection),
        _ => Ok(Geometry::Other(geometry)),
    }
}

fn position_to_point(position: &Position) -> Result<Point, DecodeError> {
    match position.as_slice() {
        [x, y] => Ok(Point::new(*x, *y)),
        other => Err(DecodeError::Malformed(format!(
            "Position must have exactly 2 coordinates, found {}",
            other.len()
        ))),
    }
}

fn polygon_from_rings(rings: &PolygonType) -> Result<Polygon, DecodeError> {
    if rings.is_empty() {
        return Err(DecodeError::InvalidGeometry(
            "Polygon must have an exterior ring".to_string(),
        ));
    }

    let mut converted = Vec::with_capacity(rings.len());
    for (i, ring) in rings.iter().enumerate() {
        let points = ring.iter().map(position_to_point).collect::<Result<Vec<_>, _>>()?;

        if points.len() < MIN_RING_POINTS {
            let location =
                if i == 0 { "exterior".to_string() } else { format!("interior[{}]", i - 1) };
            return Err(DecodeError::InvalidGeometry(format!(
                "Polygon {} must have at least {} points, found {}",
                location,
                MIN_RING_POINTS,
                points.len()
            )));
        }

        converted.push(points);
    }

    Ok(Polygon::new(converted))
}

/// Encode a geometry as canonical GeoJSON
pub fn encode(geometry: &Geometry) -> Value {
    match geometry {
        Geometry::Point(point) => encode_point(point),
        Geometry::Polygon(polygon) => {
            let rings: Vec<Vec<[f64; 2]>> = polygon
                .rings()
                .iter()
                .map(|ring| ring.iter().map(Point::coordinates).collect())
                .collect();
            json!({ "type": "Polygon", "coordinates": rings })
        }
        Geometry::GeometryCollection(members) => {
            let geometries: Vec<Value> = members.iter().map(encode).collect();
            json!({ "type": "GeometryCollection", "geometries": geometries })
        }
        Geometry::Other(geometry) => serde_json::to_value(geometry).unwrap_or(Value::Null),
    }
}

pub fn encode_point(point: &Point) -> Value {
    json!({ "type": "Point", "coordinates": [point.x, point.y] })
}

/// Encode points as a JSON array of GeoJSON Points, keeping their order
pub fn encode_points(points: &[Point]) -> Value {
    Value::Array(points.iter().map(encode_point).collect())
}

pub fn point_to_wkt(point: &Point) -> String {
    geo::Point::from(*point).wkt_string()
}

pub fn polygon_to_wkt(polygon: &Polygon) -> String {
    geo::Polygon::from(polygon).wkt_string()
}

/// Parse a WKT point as produced by `ST_AsText`
pub fn point_from_wkt(text: &str) -> Result<Point, DecodeError> {
    geo::Point::<f64>::try_from_wkt_str(text)
        .map(Point::from)
        .map_err(|e| DecodeError::Malformed(format!("Expected a WKT point, got '{}': {}", text, e)))
}
