//! Canvas builder for fluent API configuration
//!
//! This module provides a GeoCanvasBuilder that allows for fluent
//! configuration of the zoom request, tile budget, margin and drawing style
//! before the canvas is planned and allocated.

use crate::{
    core::{
        config::RenderConfig,
        constants::{DEFAULT_CANVAS_MAX_TILES, DEFAULT_CANVAS_ZOOM, TILE_SIZE},
        geo::LatLngBounds,
        planner::CanvasPlan,
    },
    rendering::{canvas::GeoCanvas, style::CanvasStyle},
    Result,
};
use ab_glyph::FontArc;

/// Builder for creating and configuring GeoCanvas instances
#[derive(Debug, Clone)]
pub struct GeoCanvasBuilder {
    /// Geographic area the canvas must cover
    bounds: LatLngBounds,
    /// Finest zoom level allowed
    zoom: u8,
    /// Exclusive upper bound on the number of tiles
    max_tiles: u32,
    tile_size: u32,
    /// Relative margin added around the bounds
    margin: Option<f64>,
    style: CanvasStyle,
}

impl GeoCanvasBuilder {
    /// Create a new builder with default settings
    pub fn new(bounds: LatLngBounds) -> Self {
        Self {
            bounds,
            zoom: DEFAULT_CANVAS_ZOOM,
            max_tiles: DEFAULT_CANVAS_MAX_TILES,
            tile_size: TILE_SIZE,
            margin: None,
            style: CanvasStyle::default(),
        }
    }

    /// Create a builder taking zoom, budget, margin and style from a config
    pub fn from_config(bounds: LatLngBounds, config: &RenderConfig) -> Self {
        Self {
            bounds,
            zoom: config.zoom,
            max_tiles: config.max_tiles,
            tile_size: config.tile_size,
            margin: config.margin,
            style: config.style(),
        }
    }

    /// Set the requested zoom level
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the tile budget
    pub fn with_max_tiles(mut self, max_tiles: u32) -> Self {
        self.max_tiles = max_tiles;
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Grow the bounds by a fraction of their span before planning
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_style(mut self, style: CanvasStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_font(mut self, font: FontArc) -> Self {
        self.style.font = Some(font);
        self
    }

    /// Bounds the canvas will be planned for, margin included
    pub fn planned_bounds(&self) -> LatLngBounds {
        match self.margin {
            Some(margin) => self.bounds.extend_by_margin(margin),
            None => self.bounds,
        }
    }

    /// Plan and allocate the canvas
    pub fn build(self) -> Result<GeoCanvas> {
        let bounds = self.planned_bounds();
        let plan = CanvasPlan::new(&bounds, self.zoom, self.max_tiles, self.tile_size)?;
        Ok(GeoCanvas::new(plan, self.style))
    }
}
