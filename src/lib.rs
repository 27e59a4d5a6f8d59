//! # geodraw
//!
//! Renders GeoJSON geometry onto raster canvases assembled from Web Mercator
//! slippy-map tiles.
//!
//! A canvas covers a geographic box with a grid of whole tiles at the finest
//! zoom level that stays under a tile budget. Geometry is projected into the
//! canvas' pixel space, rasterized, and the result can be cropped back to the
//! requested box.
//!
//! ```no_run
//! use geodraw::{render_geojson_str, LatLngBounds, RenderConfig};
//!
//! let text = std::fs::read_to_string("data.geojson")?;
//! let bounds = LatLngBounds::from_lng_lat(-122.4143, 37.7796, -122.4130, 37.7802);
//! let img = render_geojson_str(&text, &RenderConfig::default(), Some(bounds))?;
//! img.save("out_image.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod core;
pub mod data;
pub mod prelude;
pub mod rendering;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::GeoCanvasBuilder,
    config::{RenderConfig, RenderProfile},
    geo::{LatLng, LatLngBounds, Point, TileCoord, TileIndex},
    planner::{select_zoom, CanvasPlan, PixelRect},
    projection::{geo_to_tile, geo_to_tile_index, scale_meters_per_pixel, tile_to_geo},
    tile_box::TileBox,
};

pub use crate::data::{
    geojson::{bounding_box_of, GeoJson, GeoJsonFeature, GeoJsonGeometry, Position},
    shape::Shape,
};

pub use crate::rendering::{
    canvas::GeoCanvas,
    render::{draw_features, render_feature_collection, render_geojson_str},
    style::{CanvasStyle, Color},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(String),

    #[error("No coordinates to compute a bounding box from")]
    EmptyGeometry,

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid zoom level: {0}")]
    InvalidZoom(u8),

    #[error("No font configured for text")]
    MissingFont,
}
