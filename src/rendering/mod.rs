//! Rasterization onto tile-grid canvases.

pub mod canvas;
pub mod raster;
pub mod render;
pub mod style;
