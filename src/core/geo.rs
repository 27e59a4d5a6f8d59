use crate::core::constants::{MARGIN_LATITUDE_LIMIT, MIN_MARGIN_DEGREES};
use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from GeoJSON axis order (longitude first)
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a point in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Truncates toward zero into integer pixel coordinates.
    pub fn truncate(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A geographic bounding box given by two opposite corners.
///
/// The corners may arrive in either order; use [`LatLngBounds::normalized`]
/// (or the `south_west` / `north_east` accessors) before relying on min/max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub start: LatLng,
    pub end: LatLng,
}

impl LatLngBounds {
    pub fn new(start: LatLng, end: LatLng) -> Self {
        Self { start, end }
    }

    /// Creates bounds from `(lon_min, lat_min, lon_max, lat_max)`, the
    /// GeoJSON `bbox` order. Corner order is preserved as given.
    pub fn from_lng_lat(lng0: f64, lat0: f64, lng1: f64, lat1: f64) -> Self {
        Self::new(LatLng::new(lat0, lng0), LatLng::new(lat1, lng1))
    }

    /// Minimum corner
    pub fn south_west(&self) -> LatLng {
        LatLng::new(
            self.start.lat.min(self.end.lat),
            self.start.lng.min(self.end.lng),
        )
    }

    /// Maximum corner
    pub fn north_east(&self) -> LatLng {
        LatLng::new(
            self.start.lat.max(self.end.lat),
            self.start.lng.max(self.end.lng),
        )
    }

    /// Returns the same box with `start` as the minimum corner
    pub fn normalized(&self) -> Self {
        Self::new(self.south_west(), self.north_east())
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        let mut sw = self.south_west();
        let mut ne = self.north_east();
        sw.lat = sw.lat.min(point.lat);
        sw.lng = sw.lng.min(point.lng);
        ne.lat = ne.lat.max(point.lat);
        ne.lng = ne.lng.max(point.lng);
        self.start = sw;
        self.end = ne;
    }

    /// Grows the box on every side by a fraction of its span.
    ///
    /// Each side moves by at least `MIN_MARGIN_DEGREES`; latitude is kept
    /// within ±80° and longitude within ±180°.
    pub fn extend_by_margin(&self, margin: f64) -> Self {
        let sw = self.south_west();
        let ne = self.north_east();
        let dlat = ((ne.lat - sw.lat) * margin).max(MIN_MARGIN_DEGREES);
        let dlng = ((ne.lng - sw.lng) * margin)
            .max(MIN_MARGIN_DEGREES / sw.lat.to_radians().cos());
        Self::new(
            LatLng::new(
                (sw.lat - dlat).max(-MARGIN_LATITUDE_LIMIT),
                (sw.lng - dlng).max(-180.0),
            ),
            LatLng::new(
                (ne.lat + dlat).min(MARGIN_LATITUDE_LIMIT),
                (ne.lng + dlng).min(180.0),
            ),
        )
    }
}

/// Integer tile address at some zoom level.
///
/// `x` grows eastward and `y` southward from the top-left tile. Indices
/// derived from coordinates outside the projectable range may fall outside
/// `[0, 2^z - 1]` until clamped by [`TileBox::corrected`].
///
/// [`TileBox::corrected`]: crate::core::tile_box::TileBox::corrected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileIndex {
    pub x: i64,
    pub y: i64,
}

impl TileIndex {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Largest valid index along either axis, `2^z - 1`.
    ///
    /// Saturates at `i64::MAX` for zoom levels too deep to address.
    pub fn max_at(zoom: u8) -> i64 {
        1_i64
            .checked_shl(u32::from(zoom))
            .filter(|n| *n > 0)
            .map_or(i64::MAX, |n| n - 1)
    }

    /// Checks if the tile exists at the given zoom level
    pub fn is_valid(&self, zoom: u8) -> bool {
        let max = Self::max_at(zoom);
        (0..=max).contains(&self.x) && (0..=max).contains(&self.y)
    }
}

/// Fractional tile coordinate, used for sub-tile pixel precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: f64,
    pub y: f64,
}

impl TileCoord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Index of the tile containing this coordinate; a tile `i` spans `[i, i + 1)`.
    pub fn index(&self) -> TileIndex {
        TileIndex::new(self.x.floor() as i64, self.y.floor() as i64)
    }
}

impl From<TileIndex> for TileCoord {
    fn from(index: TileIndex) -> Self {
        Self::new(index.x as f64, index.y as f64)
    }
}
