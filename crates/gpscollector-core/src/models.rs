pub mod geometry;
pub mod params;

pub use geometry::{Geometry, Point, Polygon};
pub use params::{
    AddPointsParams, Operation, PolygonQueryParams, RadiusQueryParams, RadiusUnit,
};
