//! GPS Collector Store - Point storage port and adapters
//!
//! [`ports::PointStore`] is the seam between the HTTP layer and storage.
//! [`postgres::PostgresStore`] runs the spatial predicates in PostGIS;
//! [`memory::MemoryPointStore`] approximates them in process for development
//! and tests.

pub mod memory;
pub mod ports;
pub mod postgres;

pub use memory::MemoryPointStore;
pub use ports::PointStore;
pub use postgres::{PostgresConfig, PostgresStore};
