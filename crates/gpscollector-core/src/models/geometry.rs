//! Geometry values handled by the collector.
//!
//! Only the shapes the service stores or queries with are modelled in detail.
//! Any other GeoJSON geometry is kept as-is in [`Geometry::Other`] so callers can
//! report what they received.

/// A WGS 84 position in longitude/latitude order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn coordinates(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for Point {
    fn from(coordinates: [f64; 2]) -> Self {
        Self::new(coordinates[0], coordinates[1])
    }
}

impl From<Point> for geo::Point<f64> {
    fn from(point: Point) -> Self {
        geo::Point::new(point.x, point.y)
    }
}

impl From<geo::Point<f64>> for Point {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.x(), point.y())
    }
}

/// Polygon as an ordered list of rings, exterior ring first.
///
/// Ring length is checked when decoding. Open rings are closed on conversion
/// to `geo` (and so to WKT); orientation is left to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    rings: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(rings: Vec<Vec<Point>>) -> Self {
        Self { rings }
    }

    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    pub fn exterior(&self) -> &[Point] {
        self.rings.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn interiors(&self) -> &[Vec<Point>] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

fn to_line_string(ring: &[Point]) -> geo::LineString<f64> {
    geo::LineString::new(ring.iter().map(|p| geo::Coord { x: p.x, y: p.y }).collect())
}

impl From<&Polygon> for geo::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        let interiors = polygon.interiors().iter().map(|ring| to_line_string(ring)).collect();
        geo::Polygon::new(to_line_string(polygon.exterior()), interiors)
    }
}

/// Decoded GeoJSON geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    Polygon(Polygon),
    GeometryCollection(Vec<Geometry>),
    /// A valid GeoJSON geometry of a kind the collector does not work with
    Other(geojson::Geometry),
}

impl Geometry {
    /// Create a Point geometry
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Point::new(x, y))
    }

    /// Create a Polygon geometry from coordinate rings
    pub fn polygon(rings: Vec<Vec<[f64; 2]>>) -> Self {
        Geometry::Polygon(Polygon::new(
            rings.into_iter().map(|ring| ring.into_iter().map(Point::from).collect()).collect(),
        ))
    }
}
