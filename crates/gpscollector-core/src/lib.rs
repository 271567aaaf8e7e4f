//! GPS Collector Core - Geometry models, GeoJSON codec, and request validation
//!
//! This crate holds the pure part of the service: turning loosely typed JSON
//! into typed parameters, and geometries into GeoJSON or WKT and back.

pub mod codec;
pub mod error;
pub mod models;
pub mod validation;

pub use error::{CollectorError, DecodeError, Result};
