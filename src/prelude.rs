//! Prelude module for common geodraw types
//!
//! This module re-exports the most commonly used types and functions
//! for easy importing with `use geodraw::prelude::*;`

pub use crate::core::{
    builder::GeoCanvasBuilder,
    config::{RenderConfig, RenderProfile},
    geo::{LatLng, LatLngBounds, Point, TileCoord, TileIndex},
    planner::CanvasPlan,
    tile_box::TileBox,
};

pub use crate::data::{
    geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry, Position},
    shape::Shape,
};

pub use crate::rendering::{
    canvas::GeoCanvas,
    render::render_feature_collection,
    style::{CanvasStyle, Color},
};

pub use crate::{Error, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
