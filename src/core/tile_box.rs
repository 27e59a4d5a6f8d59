use crate::core::geo::{LatLngBounds, TileIndex};
use crate::core::projection::geo_to_tile_index;
use serde::{Deserialize, Serialize};

/// A rectangle of tile indices at one zoom level.
///
/// Freshly computed boxes keep the corner order of their source and may hold
/// indices outside the valid range; call [`TileBox::corrected`] before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileBox {
    pub x0: i64,
    pub y0: i64,
    pub x1: i64,
    pub y1: i64,
}

impl TileBox {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Covering tile box of a geographic box.
    ///
    /// Each corner is mapped to its tile independently, so the result
    /// mirrors the input corner order. Latitude grows north while tile `y`
    /// grows south, so even a normalized geo box yields `y0 > y1`.
    pub fn from_geo_box(bounds: &LatLngBounds, zoom: u8) -> Self {
        let a = geo_to_tile_index(bounds.start, zoom);
        let b = geo_to_tile_index(bounds.end, zoom);
        Self::new(a.x, a.y, b.x, b.y)
    }

    /// Orders the box min-first and clamps every index into `[0, 2^z - 1]`.
    ///
    /// A box lying wholly past one edge collapses onto the edge tiles.
    pub fn corrected(&self, zoom: u8) -> Self {
        let max = TileIndex::max_at(zoom);
        let min = self.min_index();
        let top = self.max_index();
        Self::new(
            min.x.clamp(0, max),
            min.y.clamp(0, max),
            top.x.clamp(0, max),
            top.y.clamp(0, max),
        )
    }

    /// Width and height in tiles; never less than one, saturating at `u32::MAX`.
    pub fn size_in_tiles(&self) -> (u32, u32) {
        let span = |a: i64, b: i64| {
            let tiles = a.abs_diff(b).saturating_add(1);
            u32::try_from(tiles).unwrap_or(u32::MAX)
        };
        (span(self.x0, self.x1), span(self.y0, self.y1))
    }

    /// Total number of tiles covered
    pub fn tile_count(&self) -> u64 {
        let (sx, sy) = self.size_in_tiles();
        sx as u64 * sy as u64
    }

    /// Minimum corner
    pub fn min_index(&self) -> TileIndex {
        TileIndex::new(self.x0.min(self.x1), self.y0.min(self.y1))
    }

    /// Maximum corner
    pub fn max_index(&self) -> TileIndex {
        TileIndex::new(self.x0.max(self.x1), self.y0.max(self.y1))
    }

    /// Checks that both corners are valid tiles at `zoom`
    pub fn is_within(&self, zoom: u8) -> bool {
        self.min_index().is_valid(zoom) && self.max_index().is_valid(zoom)
    }
}
