//! Request body parsing and per-operation parameter validation.
//!
//! Every function here is pure: it looks at the decoded body and either returns
//! a typed parameter bundle or a [`CollectorError`] whose message is sent back
//! to the caller verbatim.

use serde_json::Value;

use crate::codec;
use crate::error::{CollectorError, DecodeError, Result};
use crate::models::{
    AddPointsParams, Geometry, Point, PolygonQueryParams, RadiusQueryParams, RadiusUnit,
};

pub const POINTS_KEY: &str = "Points";
pub const POINT_KEY: &str = "Point";
pub const POLYGON_KEY: &str = "Polygon";
pub const RADIUS_KEY: &str = "Radius";
pub const RADIUS_UNIT_KEY: &str = "Radius unit of measure";
pub const USE_SPHEROID_KEY: &str = "Use spheroid";

/// Parse a raw request body as JSON.
///
/// `None` means the request carried no body stream at all. A zero-length body
/// is present but not JSON.
pub fn parse_body(body: Option<&[u8]>) -> Result<Value> {
    let body = body.ok_or_else(|| {
        CollectorError::MalformedBody("Data must be sent in request's body".to_string())
    })?;

    serde_json::from_slice(body)
        .map_err(|_| CollectorError::MalformedBody("Error in data, JSON expected".to_string()))
}

/// Look up a body member; JSON `null` counts as absent
fn param<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| !value.is_null())
}

/// Validate the body of `POST /add_points`
pub fn add_points(body: &Value) -> Result<AddPointsParams> {
    let points_param = param(body, POINTS_KEY)
        .ok_or_else(|| CollectorError::validation("Points parameter is required"))?;

    let points = match points_param {
        Value::Array(elements) => points_from_array(elements)?,
        other => points_from_collection(other)?,
    };

    if points.is_empty() {
        return Err(CollectorError::validation("Should be at least one point in the array"));
    }

    Ok(AddPointsParams { points })
}

fn points_from_array(elements: &[Value]) -> Result<Vec<Point>> {
    elements
        .iter()
        .map(|element| match codec::decode(element) {
            Ok(Geometry::Point(point)) => Ok(point),
            _ => Err(CollectorError::validation("All elements in the array must be 'Point'")),
        })
        .collect()
}

fn points_from_collection(value: &Value) -> Result<Vec<Point>> {
    let members = match codec::decode(value) {
        Ok(Geometry::GeometryCollection(members)) => members,
        _ => {
            return Err(CollectorError::validation(
                "Points parameter must be an array of GeoJSON Point objects or Geometry collection",
            ))
        }
    };

    members
        .into_iter()
        .map(|member| match member {
            Geometry::Point(point) => Ok(point),
            _ => Err(CollectorError::validation(
                "All geometries in the collection must be 'Point'",
            )),
        })
        .collect()
}

/// Validate the body of `GET /points_within_radius`
pub fn points_within_radius(body: &Value) -> Result<RadiusQueryParams> {
    let radius = param(body, RADIUS_KEY)
        .ok_or_else(|| CollectorError::validation("Radius parameter is required"))?
        .as_f64()
        .ok_or_else(|| CollectorError::validation("Radius parameter must be numeric"))?;

    if radius < 0.0 {
        return Err(CollectorError::validation("Radius parameter must be non-negative"));
    }

    let unit = match param(body, RADIUS_UNIT_KEY) {
        None => RadiusUnit::default(),
        Some(value) => value.as_str().and_then(RadiusUnit::parse).ok_or_else(|| {
            CollectorError::validation(
                "\"Radius unit of measure\" parameter must be \"meters\" or \"feet\"",
            )
        })?,
    };

    let point_param = param(body, POINT_KEY)
        .ok_or_else(|| CollectorError::validation("Point parameter is required"))?;

    let center = match codec::decode(point_param) {
        Ok(Geometry::Point(point)) => point,
        Ok(_) => return Err(CollectorError::validation("Point parameter must have Point type")),
        Err(DecodeError::Malformed(_)) => {
            return Err(CollectorError::validation(
                "Point parameter is not valid in terms of GeoJSON",
            ))
        }
        Err(DecodeError::InvalidGeometry(reason)) => {
            return Err(CollectorError::InvalidGeometry(reason))
        }
    };

    Ok(RadiusQueryParams {
        center,
        radius_meters: unit.to_meters(radius),
        use_spheroid: use_spheroid(body)?,
    })
}

/// Validate the body of `GET /points_within_polygon`
pub fn points_within_polygon(body: &Value) -> Result<PolygonQueryParams> {
    let polygon_param = param(body, POLYGON_KEY)
        .ok_or_else(|| CollectorError::validation("Polygon parameter is required"))?;

    // Degenerate rings surface as geometry errors, not validation messages
    let polygon = match codec::decode(polygon_param) {
        Ok(Geometry::Polygon(polygon)) => polygon,
        Ok(_) => {
            return Err(CollectorError::validation("Polygon parameter must have Polygon type"))
        }
        Err(DecodeError::Malformed(_)) => {
            return Err(CollectorError::validation(
                "Polygon parameter is not valid in terms of GeoJSON",
            ))
        }
        Err(DecodeError::InvalidGeometry(reason)) => {
            return Err(CollectorError::InvalidGeometry(reason))
        }
    };

    Ok(PolygonQueryParams { polygon, use_spheroid: use_spheroid(body)? })
}

fn use_spheroid(body: &Value) -> Result<bool> {
    match param(body, USE_SPHEROID_KEY) {
        None => Ok(true),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(_) => {
            Err(CollectorError::validation("\"Use spheroid\" parameter must be true or false"))
        }
    }
}
