//! Covering-tile calculation for a transformed viewport.
//!
//! The world at scale `k` is a `k`-pixel square centred on the transform's
//! translation. The tile zoom is the integer level whose tiles are closest to
//! their native size; the group scale absorbs the fractional remainder so the
//! tiles can be placed at `(col * size, row * size)` in the group's own space.

use crate::core::geo::{Point, TileCoord};
use crate::core::transform::ZoomTransform;
use crate::core::viewport::Viewport;
use crate::tiles::layout::js_round;

/// Tiles covering the viewport plus the group transform that positions them.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    /// Covering tiles in row-major order.
    pub tiles: Vec<TileCoord>,
    /// On-screen size of one tile, in pixels.
    pub scale: f64,
    /// World origin in units of `scale`.
    pub translate: Point,
}

impl TileSet {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile zoom level shared by every tile of the set, if any.
    pub fn zoom(&self) -> Option<u8> {
        self.tiles.first().map(|t| t.z)
    }
}

/// Computes the tile index set for a viewport and a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCalculator {
    size: Point,
    tile_size: f64,
    zoom_delta: f64,
}

impl TileCalculator {
    pub fn new(viewport: &Viewport, tile_size: u32) -> Self {
        Self {
            size: viewport.size(),
            tile_size: tile_size as f64,
            zoom_delta: 0.0,
        }
    }

    /// Biases the chosen tile zoom, e.g. `1.0` for sharper high-DPI tiles.
    pub fn with_zoom_delta(mut self, zoom_delta: f64) -> Self {
        self.zoom_delta = zoom_delta;
        self
    }

    /// Tiles covering the viewport at `transform`.
    pub fn tiles(&self, transform: &ZoomTransform) -> TileSet {
        let k = transform.k;
        let size_log2 = self.tile_size.log2();
        let z = (k.log2() - size_log2).max(0.0);
        let z0 = js_round(z + self.zoom_delta).max(0.0);
        let tile_scale = 2_f64.powf(z - z0 + size_log2);
        let origin = Point::new(transform.x - k / 2.0, transform.y - k / 2.0);

        let span = 2_f64.powf(z0);
        let cols = Self::index_range(origin.x, self.size.x, tile_scale, span);
        let rows = Self::index_range(origin.y, self.size.y, tile_scale, span);

        let zoom = z0 as u8;
        let mut tiles = Vec::with_capacity(cols.len() * rows.len());
        for row in rows {
            for col in cols.clone() {
                tiles.push(TileCoord::new(col, row, zoom));
            }
        }

        TileSet {
            tiles,
            scale: tile_scale,
            translate: Point::new(origin.x / tile_scale, origin.y / tile_scale),
        }
    }

    /// Indices of the tiles between screen offsets `0` and `extent`, clipped to the world.
    fn index_range(origin: f64, extent: f64, tile_scale: f64, span: f64) -> std::ops::Range<u32> {
        let start = ((0.0 - origin) / tile_scale).floor().max(0.0);
        let end = ((extent - origin) / tile_scale).ceil().min(span);
        if end <= start {
            return 0..0;
        }
        start as u32..end as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::core::projection::Projection;

    fn calculator() -> TileCalculator {
        TileCalculator::new(&Viewport::new(960.0, 500.0), 256)
    }

    fn initial_transform() -> ZoomTransform {
        let center = Projection::base().project(&LatLng::new(37.414, -119.663));
        ZoomTransform::centered_on(&center, &Viewport::new(960.0, 500.0), 16_384.0)
    }

    #[test]
    fn test_power_of_two_scale_uses_native_tile_size() {
        let set = calculator().tiles(&initial_transform());
        assert_eq!(set.zoom(), Some(6));
        assert_eq!(set.scale, 256.0);
        assert!(!set.is_empty());
    }

    #[test]
    fn test_tiles_cover_viewport_exactly() {
        let t = initial_transform();
        let set = calculator().tiles(&t);

        let min_x = set.tiles.iter().map(|c| c.x).min().unwrap() as f64;
        let max_x = set.tiles.iter().map(|c| c.x).max().unwrap() as f64;
        let min_y = set.tiles.iter().map(|c| c.y).min().unwrap() as f64;
        let max_y = set.tiles.iter().map(|c| c.y).max().unwrap() as f64;

        // Screen position of a tile corner: (index + translate) * scale.
        let left = (min_x + set.translate.x) * set.scale;
        let right = (max_x + 1.0 + set.translate.x) * set.scale;
        let top = (min_y + set.translate.y) * set.scale;
        let bottom = (max_y + 1.0 + set.translate.y) * set.scale;

        assert!(left <= 0.0 && left > -set.scale);
        assert!(right >= 960.0 && right < 960.0 + set.scale);
        assert!(top <= 0.0 && top > -set.scale);
        assert!(bottom >= 500.0 && bottom < 500.0 + set.scale);

        let cols = (max_x - min_x + 1.0) as usize;
        let rows = (max_y - min_y + 1.0) as usize;
        assert_eq!(set.len(), cols * rows);
    }

    #[test]
    fn test_row_major_order() {
        let set = calculator().tiles(&initial_transform());
        let mut sorted = set.tiles.clone();
        sorted.sort_by_key(|t| (t.y, t.x));
        assert_eq!(set.tiles, sorted);
    }

    #[test]
    fn test_fractional_zoom_rounds_tile_level() {
        // log2(k) - 8 = 6.6 rounds to 7, tiles drawn at 2^(6.6 - 7 + 8) px
        let k = 2_f64.powf(14.6);
        let t = ZoomTransform::new(k, 480.0, 250.0);
        let set = calculator().tiles(&t);
        assert_eq!(set.zoom(), Some(7));
        assert!((set.scale - 2_f64.powf(7.6)).abs() < 1e-9);
    }

    #[test]
    fn test_tiles_are_clipped_to_world() {
        // Whole world (2048 px) centred on the viewport: 8x8 tiles at zoom 3
        let t = ZoomTransform::new(2048.0, 480.0, 250.0);
        let set = calculator().tiles(&t);
        assert!(set.tiles.iter().all(|c| c.is_valid()));
        assert!(set.tiles.iter().all(|c| c.z == 3));
    }

    #[test]
    fn test_column_and_row_ranges() {
        // World spans x in [-544, 1504) and y in [-774, 1274): columns 2..6, rows 3..5
        let t = ZoomTransform::new(2048.0, 480.0, 250.0);
        let set = calculator().tiles(&t);
        assert_eq!(set.len(), 8);
        assert_eq!(set.tiles.first(), Some(&TileCoord::new(2, 3, 3)));
        assert_eq!(set.tiles.last(), Some(&TileCoord::new(5, 4, 3)));
    }

    #[test]
    fn test_world_outside_viewport_yields_no_tiles() {
        let t = ZoomTransform::new(2048.0, -100_000.0, 250.0);
        assert!(calculator().tiles(&t).is_empty());
    }

    #[test]
    fn test_zoom_delta_raises_level() {
        let set = calculator().with_zoom_delta(1.0).tiles(&initial_transform());
        assert_eq!(set.zoom(), Some(7));
        assert_eq!(set.scale, 128.0);
    }
}
