//! GeoJSON input model and drawable shapes.

pub mod geojson;
pub mod shape;
