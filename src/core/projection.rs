//! Spherical Mercator projection parameterised by a scale and a translation.
//!
//! With the base parameters (`scale = 1 / TAU`, translate `(0, 0)`) the whole
//! world fits in a unit square centred on the origin. The map controller
//! rewrites the parameters from the zoom transform on every change, which turns
//! the projection into a direct geographic-to-screen mapping.

use crate::core::constants::TAU;
use crate::core::geo::{LatLng, Point};
use crate::core::transform::ZoomTransform;
use std::f64::consts::FRAC_PI_4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    scale: f64,
    translate: Point,
}

impl Default for Projection {
    fn default() -> Self {
        Self::base()
    }
}

impl Projection {
    pub fn new(scale: f64, translate: Point) -> Self {
        Self { scale, translate }
    }

    /// Unit-world projection used to locate points before any zoom is applied.
    pub fn base() -> Self {
        Self::new(1.0 / TAU, Point::new(0.0, 0.0))
    }

    /// Projection equivalent to viewing the base world through `transform`.
    pub fn from_transform(transform: &ZoomTransform) -> Self {
        Self::new(transform.k / TAU, Point::new(transform.x, transform.y))
    }

    /// Rewrites the parameters in place from the current zoom transform.
    pub fn set_from_transform(&mut self, transform: &ZoomTransform) {
        self.scale = transform.k / TAU;
        self.translate = Point::new(transform.x, transform.y);
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Point {
        self.translate
    }

    /// Projects a geographic coordinate to pixels.
    pub fn project(&self, lat_lng: &LatLng) -> Point {
        let raw = Self::mercator_raw(lat_lng);
        Point::new(
            self.translate.x + self.scale * raw.x,
            self.translate.y - self.scale * raw.y,
        )
    }

    /// Maps pixels back to a geographic coordinate.
    pub fn invert(&self, point: &Point) -> LatLng {
        let x = (point.x - self.translate.x) / self.scale;
        let y = (self.translate.y - point.y) / self.scale;
        let lat = 2.0 * y.exp().atan() - 2.0 * FRAC_PI_4;
        LatLng::new(lat.to_degrees(), x.to_degrees())
    }

    /// Raw Mercator coordinates in radians, y pointing north.
    fn mercator_raw(lat_lng: &LatLng) -> Point {
        let lambda = lat_lng.lng.to_radians();
        let phi = LatLng::clamp_lat(lat_lng.lat).to_radians();
        Point::new(lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
    }
}
