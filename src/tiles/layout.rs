//! Placement of the tile group and of individual tiles.

use crate::core::geo::{Point, TileCoord};

/// Rounds half-way cases toward positive infinity (`-2.5` becomes `-2`).
pub fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Shortest round-trip formatting, with negative zero printed as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Affine transform string for the tile group.
///
/// `scale` is the on-screen tile size, `translate` the world origin in tile
/// units. An integral `scale` snaps the translation to whole pixels; a
/// fractional one keeps it exact so adjacent tiles do not show seams.
pub fn group_transform(scale: f64, translate: &Point, tile_size: u32) -> String {
    let k = scale / tile_size as f64;
    let round: fn(f64) -> f64 = if scale.fract() != 0.0 {
        |v| v
    } else {
        js_round
    };
    format!(
        "translate({},{}) scale({})",
        format_number(round(translate.x * scale)),
        format_number(round(translate.y * scale)),
        format_number(k)
    )
}

/// Position and size of one tile image inside the tile group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilePlacement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TilePlacement {
    pub fn for_tile(coord: TileCoord, tile_size: u32) -> Self {
        let origin = coord.origin(tile_size);
        Self {
            x: origin.x,
            y: origin.y,
            width: tile_size as f64,
            height: tile_size as f64,
        }
    }
}
