mod fallback;
mod points;

pub use fallback::unknown_operation;
pub use points::{add_points, points_within_polygon, points_within_radius};
