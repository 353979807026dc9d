use crate::core::constants::MAX_LATITUDE;
use serde::{Deserialize, Serialize};
use std::fmt;

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

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Clamps latitude to the range the Mercator projection can represent
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// GeoJSON and geo-types both order coordinates as (x = lng, y = lat).
impl From<geo_types::Coord<f64>> for LatLng {
    fn from(coord: geo_types::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<LatLng> for geo_types::Coord<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::coord! { x: lat_lng.lng, y: lat_lng.lat }
    }
}

impl From<LatLng> for geo_types::Point<f64> {
    fn from(lat_lng: LatLng) -> Self {
        geo_types::Point::new(lat_lng.lng, lat_lng.lat)
    }
}

/// Represents a point in screen or projected coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Extends the bounds to include a point
    pub fn extend(&mut self, point: &LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }
}

/// One raster tile in the slippy map tiling scheme: column, row and zoom level.
///
/// Tiles compare by value, which makes them usable directly as reconciliation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }

    /// Checks if the tile is valid for the given zoom level
    pub fn is_valid(&self) -> bool {
        let max_coord = 1u64 << self.z;
        (self.x as u64) < max_coord && (self.y as u64) < max_coord
    }

    /// Top-left corner of the tile in the tile group's local space.
    pub fn origin(&self, tile_size: u32) -> Point {
        Point::new(
            self.x as f64 * tile_size as f64,
            self.y as f64 * tile_size as f64,
        )
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lat_lng_creation() {
        let coord = LatLng::new(37.414, -119.663);
        assert_eq!(coord.lat, 37.414);
        assert_eq!(coord.lng, -119.663);
        assert!(coord.is_valid());
        assert!(!LatLng::new(91.0, 0.0).is_valid());
    }

    #[test]
    fn test_geo_types_round_trip_keeps_axis_order() {
        let coord = geo_types::coord! { x: -119.663, y: 37.414 };
        let lat_lng = LatLng::from(coord);
        assert_eq!(lat_lng.lng, -119.663);
        assert_eq!(lat_lng.lat, 37.414);

        let point: geo_types::Point<f64> = lat_lng.into();
        assert_eq!(point.x(), -119.663);
    }

    #[test]
    fn test_tile_coord_equality_and_display() {
        let a = TileCoord::new(2_800, 6_300, 14);
        let b = TileCoord::new(2_800, 6_300, 14);
        assert_eq!(a, b);
        assert_ne!(a, TileCoord::new(2_800, 6_301, 14));
        assert_eq!(a.to_string(), "2800,6300,14");
    }

    #[test]
    fn test_tile_origin() {
        let tile = TileCoord::new(3, 5, 4);
        assert_eq!(tile.origin(256), Point::new(768.0, 1280.0));
        assert!(tile.is_valid());
        assert!(!TileCoord::new(16, 0, 4).is_valid());
    }

    #[test]
    fn test_bounds_contains() {
        let mut bounds = LatLngBounds::new(LatLng::new(36.0, -121.0), LatLng::new(36.0, -121.0));
        bounds.extend(&LatLng::new(38.0, -118.0));

        assert!(bounds.contains(&LatLng::new(37.0, -119.5)));
        assert!(!bounds.contains(&LatLng::new(39.0, -119.5)));
        assert_eq!(bounds.center(), LatLng::new(37.0, -119.5));
    }
}
