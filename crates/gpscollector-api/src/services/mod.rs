mod points;

pub use points::PointService;
