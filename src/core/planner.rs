//! Canvas planning: zoom selection under a tile budget and the fixed
//! geo → pixel mapping of a multi-tile canvas.

use crate::core::constants::MAX_ZOOM;
use crate::core::geo::{LatLng, LatLngBounds, Point, TileIndex};
use crate::core::projection::geo_to_tile;
use crate::core::tile_box::TileBox;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Picks the finest zoom not above `requested` whose covering tile grid
/// holds fewer than `max_tiles` tiles.
///
/// The budget is exclusive: a grid of exactly `max_tiles` tiles forces the
/// next coarser level. Zoom 0 is accepted whatever its size. Requests
/// above [`MAX_ZOOM`] are treated as `MAX_ZOOM`.
pub fn select_zoom(bounds: &LatLngBounds, requested: u8, max_tiles: u32) -> u8 {
    let requested = requested.min(MAX_ZOOM);
    let mut zoom = requested;
    loop {
        let tiles = TileBox::from_geo_box(bounds, zoom).corrected(zoom);
        let count = tiles.tile_count();
        if count < u64::from(max_tiles) {
            break;
        }
        if zoom == 0 {
            log::debug!("tile budget {} unattainable, using zoom 0", max_tiles);
            break;
        }
        log::debug!("zoom {} covers {} tiles (budget {})", zoom, count, max_tiles);
        zoom -= 1;
    }
    // The loop never climbs, so this only guards the invariant
    zoom.min(requested)
}

/// Integer pixel rectangle inside a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Geometry of a multi-tile canvas, fixed once built.
///
/// Pixel `(0, 0)` is the top-left corner of the `anchor` tile at `zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasPlan {
    zoom: u8,
    requested_zoom: u8,
    anchor: TileIndex,
    tiles_wide: u32,
    tiles_high: u32,
    tile_size: u32,
}

impl CanvasPlan {
    /// Plans a canvas covering `bounds` at no more than `requested_zoom`.
    pub fn new(
        bounds: &LatLngBounds,
        requested_zoom: u8,
        max_tiles: u32,
        tile_size: u32,
    ) -> Result<Self> {
        if requested_zoom > MAX_ZOOM {
            return Err(Error::InvalidZoom(requested_zoom));
        }
        if tile_size == 0 {
            return Err(Error::MalformedInput("tile size must be positive".into()));
        }
        let zoom = select_zoom(bounds, requested_zoom, max_tiles);
        let tiles = TileBox::from_geo_box(bounds, zoom).corrected(zoom);
        let (tiles_wide, tiles_high) = tiles.size_in_tiles();
        let plan = Self {
            zoom,
            requested_zoom,
            anchor: tiles.min_index(),
            tiles_wide,
            tiles_high,
            tile_size,
        };
        log::debug!(
            "canvas plan: zoom {} (requested {}), anchor {:?}, {}x{} tiles",
            zoom,
            requested_zoom,
            plan.anchor,
            tiles_wide,
            tiles_high
        );
        Ok(plan)
    }

    /// Working zoom level
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Zoom level asked for by the caller
    pub fn requested_zoom(&self) -> u8 {
        self.requested_zoom
    }

    /// Top-left tile of the canvas
    pub fn anchor(&self) -> TileIndex {
        self.anchor
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Grid size in tiles
    pub fn size_in_tiles(&self) -> (u32, u32) {
        (self.tiles_wide, self.tiles_high)
    }

    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.tiles_wide * self.tile_size,
            self.tiles_high * self.tile_size,
        )
    }

    /// Tile box covered by the canvas
    pub fn tile_box(&self) -> TileBox {
        TileBox::new(
            self.anchor.x,
            self.anchor.y,
            self.anchor.x + i64::from(self.tiles_wide) - 1,
            self.anchor.y + i64::from(self.tiles_high) - 1,
        )
    }

    /// Maps a geographic coordinate to canvas pixels
    pub fn geo_to_pixel(&self, point: LatLng) -> Point {
        let coord = geo_to_tile(point, self.zoom);
        let ts = f64::from(self.tile_size);
        Point::new(
            (coord.x - self.anchor.x as f64) * ts,
            (coord.y - self.anchor.y as f64) * ts,
        )
    }

    /// Maps a run of geographic coordinates to canvas pixels
    pub fn geo_to_pixels(&self, points: &[LatLng]) -> Vec<Point> {
        points.iter().map(|p| self.geo_to_pixel(*p)).collect()
    }

    /// Pixel rectangle of a geographic box, grown by `padding` pixels and
    /// clamped to `[0, width - 1] x [0, height - 1]`.
    ///
    /// The right and bottom edges are exclusive, so a box reaching the last
    /// row or column stops one pixel short of it.
    pub fn crop_rect(&self, bounds: &LatLngBounds, padding: u32) -> PixelRect {
        let (width, height) = self.pixel_size();
        let pad = i64::from(padding);
        let (left, bottom) = self.geo_to_pixel(bounds.south_west()).truncate();
        let (right, top) = self.geo_to_pixel(bounds.north_east()).truncate();
        let left = (i64::from(left) - pad).max(0);
        let top = (i64::from(top) - pad).max(0);
        let right = (i64::from(right) + pad).min(i64::from(width) - 1);
        let bottom = (i64::from(bottom) + pad).min(i64::from(height) - 1);
        PixelRect {
            left: left as u32,
            top: top as u32,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::TILE_SIZE;

    fn small_box() -> LatLngBounds {
        LatLngBounds::from_lng_lat(-122.4143, 37.7796, -122.4130, 37.7802)
    }

    fn city_box() -> LatLngBounds {
        LatLngBounds::from_lng_lat(-122.52, 37.70, -122.35, 37.83)
    }

    #[test]
    fn test_small_box_keeps_requested_zoom() {
        // 3x2 tiles at zoom 19
        assert_eq!(select_zoom(&small_box(), 19, 32), 19);
    }

    #[test]
    fn test_budget_is_exclusive() {
        // Exactly 6 tiles at zoom 19 is not under a budget of 6
        assert!(select_zoom(&small_box(), 19, 6) < 19);
        assert_eq!(select_zoom(&small_box(), 19, 7), 19);
    }

    #[test]
    fn test_city_box_downscales() {
        let zoom = select_zoom(&city_box(), 19, 4);
        assert!(zoom < 19);
        let tiles = TileBox::from_geo_box(&city_box(), zoom).corrected(zoom);
        assert!(tiles.tile_count() < 4);
    }

    #[test]
    fn test_unattainable_budget_stops_at_zero() {
        assert_eq!(select_zoom(&city_box(), 12, 1), 0);
        assert_eq!(select_zoom(&city_box(), 12, 0), 0);
    }

    #[test]
    fn test_deep_request_is_clamped() {
        assert_eq!(select_zoom(&small_box(), 64, 32), MAX_ZOOM);
        assert_eq!(select_zoom(&small_box(), u8::MAX, u32::MAX), MAX_ZOOM);
    }

    #[test]
    fn test_zoom_monotonic_in_budget() {
        let mut last = 0;
        for max_tiles in 1..200 {
            let zoom = select_zoom(&city_box(), 19, max_tiles);
            assert!(zoom >= last);
            assert!(zoom <= 19);
            last = zoom;
        }
    }

    #[test]
    fn test_plan_dimensions() {
        let plan = CanvasPlan::new(&small_box(), 19, 32, TILE_SIZE).unwrap();
        assert_eq!(plan.zoom(), 19);
        assert_eq!(plan.anchor(), TileIndex::new(83865, 202638));
        assert_eq!(plan.size_in_tiles(), (3, 2));
        assert_eq!(plan.pixel_size(), (768, 512));
        assert_eq!(plan.tile_box(), TileBox::new(83865, 202638, 83867, 202639));
    }

    #[test]
    fn test_plan_rejects_bad_zoom() {
        assert!(matches!(
            CanvasPlan::new(&small_box(), 20, 32, TILE_SIZE),
            Err(Error::InvalidZoom(20))
        ));
    }

    #[test]
    fn test_geo_to_pixel_anchor_corner() {
        let plan = CanvasPlan::new(&small_box(), 19, 32, TILE_SIZE).unwrap();
        let corner = crate::core::projection::tile_to_geo(plan.anchor().into(), plan.zoom());
        let pixel = plan.geo_to_pixel(corner);
        assert!(pixel.x.abs() < 1e-6);
        assert!(pixel.y.abs() < 1e-6);
    }

    #[test]
    fn test_crop_rect_inside_canvas() {
        let plan = CanvasPlan::new(&small_box(), 19, 32, TILE_SIZE).unwrap();
        let rect = plan.crop_rect(&small_box(), 0);
        let (width, height) = plan.pixel_size();
        assert!(rect.width > 0 && rect.height > 0);
        assert!(rect.left + rect.width <= width);
        assert!(rect.top + rect.height <= height);
    }

    #[test]
    fn test_crop_rect_of_covering_box_never_grows() {
        let plan = CanvasPlan::new(&small_box(), 19, 32, TILE_SIZE).unwrap();
        let tiles = plan.tile_box();
        let nw = crate::core::projection::tile_to_geo(tiles.min_index().into(), plan.zoom());
        let se = crate::core::projection::tile_to_geo(
            TileIndex::new(tiles.x1 + 1, tiles.y1 + 1).into(),
            plan.zoom(),
        );
        let rect = plan.crop_rect(&LatLngBounds::new(nw, se), 0);
        let (width, height) = plan.pixel_size();
        assert!(rect.width <= width && rect.height <= height);
        assert_eq!((rect.left, rect.top), (0, 0));
    }
}
