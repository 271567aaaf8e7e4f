//! Validated, per-request parameter bundles

use std::fmt;

use super::geometry::{Point, Polygon};

/// The operations exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    AddPoints,
    PointsWithinRadius,
    PointsWithinPolygon,
}

impl Operation {
    /// Route path serving the operation
    pub fn path(&self) -> &'static str {
        match self {
            Operation::AddPoints => "/add_points",
            Operation::PointsWithinRadius => "/points_within_radius",
            Operation::PointsWithinPolygon => "/points_within_polygon",
        }
    }

    pub fn name(&self) -> &'static str {
        &self.path()[1..]
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unit a radius may be given in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RadiusUnit {
    #[default]
    Meters,
    Feet,
}

impl RadiusUnit {
    pub const METERS_PER_FOOT: f64 = 0.3048;

    /// Parse the exact wire name of a unit
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "meters" => Some(RadiusUnit::Meters),
            "feet" => Some(RadiusUnit::Feet),
            _ => None,
        }
    }

    /// Convert a distance value to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            RadiusUnit::Meters => value,
            RadiusUnit::Feet => value * Self::METERS_PER_FOOT,
        }
    }
}

/// Points to insert, in request order. Never empty once validated.
#[derive(Debug, Clone, PartialEq)]
pub struct AddPointsParams {
    pub points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadiusQueryParams {
    pub center: Point,
    pub radius_meters: f64,
    pub use_spheroid: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonQueryParams {
    pub polygon: Polygon,
    pub use_spheroid: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_paths() {
        assert_eq!(Operation::AddPoints.path(), "/add_points");
        assert_eq!(Operation::PointsWithinRadius.name(), "points_within_radius");
        assert_eq!(Operation::PointsWithinPolygon.to_string(), "points_within_polygon");
    }

    #[test]
    fn test_radius_unit_parse_is_exact() {
        assert_eq!(RadiusUnit::parse("meters"), Some(RadiusUnit::Meters));
        assert_eq!(RadiusUnit::parse("feet"), Some(RadiusUnit::Feet));
        assert_eq!(RadiusUnit::parse("Feet"), None);
        assert_eq!(RadiusUnit::parse("inches"), None);
    }

    #[test]
    fn test_radius_unit_conversion() {
        assert_eq!(RadiusUnit::Meters.to_meters(10.0), 10.0);
        assert!((RadiusUnit::Feet.to_meters(10.0) - 3.048).abs() < 1e-12);
        assert_eq!(RadiusUnit::default(), RadiusUnit::Meters);
    }
}
