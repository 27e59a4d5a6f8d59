//! Web Mercator slippy-tile projection.
//!
//! Forward and inverse conversion between geographic coordinates and tile
//! coordinates at a zoom level, after the OpenStreetMap slippy-map formulas.

use crate::core::constants::METERS_PER_PIXEL_EQUATOR;
use crate::core::geo::{LatLng, TileCoord, TileIndex};
use std::f64::consts::PI;

/// Number of tiles along one axis at `zoom`
pub fn tiles_per_axis(zoom: u8) -> f64 {
    2_f64.powi(zoom as i32)
}

/// Converts a geographic coordinate to a fractional tile coordinate.
pub fn geo_to_tile(point: LatLng, zoom: u8) -> TileCoord {
    let n = tiles_per_axis(zoom);
    let lat_rad = point.lat.to_radians();
    let x = (point.lng + 180.0) / 360.0 * n;
    let y = (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n;
    TileCoord::new(x, y)
}

/// Converts a geographic coordinate to the index of the tile containing it.
pub fn geo_to_tile_index(point: LatLng, zoom: u8) -> TileIndex {
    geo_to_tile(point, zoom).index()
}

/// Converts a tile coordinate back to a geographic coordinate.
///
/// Passing a whole [`TileIndex`] (via `into()`) yields the tile's north-west corner.
pub fn tile_to_geo(coord: TileCoord, zoom: u8) -> LatLng {
    let n = tiles_per_axis(zoom);
    let lng = coord.x / n * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * coord.y / n)).sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Ground resolution in meters per pixel at `lat` (degrees) for 256px tiles.
pub fn scale_meters_per_pixel(lat: f64, zoom: u8) -> f64 {
    METERS_PER_PIXEL_EQUATOR * lat.to_radians().cos() / tiles_per_axis(zoom)
}
