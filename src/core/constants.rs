//! Core constants derived from the slippy-map tiling scheme and the defaults
//! used when composing tile-grid canvases.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Highest zoom level a canvas may be requested at; deeper requests are
/// clamped by zoom selection.
pub const MAX_ZOOM: u8 = 19;

/// Ground resolution at zoom 0 on the equator (meters per pixel).
pub const METERS_PER_PIXEL_EQUATOR: f64 = 156_543.03;

/// Zoom requested by a hand-built canvas when none is given.
pub const DEFAULT_CANVAS_ZOOM: u8 = 18;

/// Tile budget of a hand-built canvas when none is given.
pub const DEFAULT_CANVAS_MAX_TILES: u32 = 16;

/// Zoom requested when rendering a whole feature collection.
pub const DEFAULT_RENDER_ZOOM: u8 = 19;

/// Tile budget when rendering a whole feature collection.
pub const DEFAULT_RENDER_MAX_TILES: u32 = 32;

/// Stroke width for lines and polygon outlines, in pixels.
pub const DEFAULT_LINE_WIDTH: u32 = 2;

/// Pixel height of text labels.
pub const DEFAULT_TEXT_SCALE: f32 = 12.0;

/// Minimum padding added on each side by a box margin, in degrees.
pub const MIN_MARGIN_DEGREES: f64 = 0.0005;

/// Latitude clamp applied after extending a box by a margin.
pub const MARGIN_LATITUDE_LIMIT: f64 = 80.0;
