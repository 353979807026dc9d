//! Pan/zoom view state.
//!
//! A [`ZoomTransform`] maps world pixels (at unit scale) to screen pixels:
//! `screen = world * k + (x, y)`. It is the single mutable piece of view state
//! in the engine and is only changed by the map controller.

use crate::core::geo::Point;
use crate::core::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Current pan/zoom transform: scale `k` and translation `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ZoomTransform {
    pub fn new(k: f64, x: f64, y: f64) -> Self {
        Self { k, x, y }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Appends a translation expressed in the transform's own (unscaled) space.
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.k, self.x + self.k * dx, self.y + self.k * dy)
    }

    /// Appends a scale factor; the origin stays put.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.k * factor, self.x, self.y)
    }

    /// Applies the transform to a world point.
    pub fn apply(&self, point: &Point) -> Point {
        Point::new(point.x * self.k + self.x, point.y * self.k + self.y)
    }

    /// Maps a screen point back into world space.
    pub fn invert(&self, point: &Point) -> Point {
        Point::new((point.x - self.x) / self.k, (point.y - self.y) / self.k)
    }

    /// Shifts the view by a screen-space pixel delta.
    pub fn translate_by(&self, delta: &Point) -> Self {
        Self::new(self.k, self.x + delta.x, self.y + delta.y)
    }

    /// Sets the scale to `k` while keeping the screen point `anchor` fixed.
    pub fn scale_to(&self, k: f64, anchor: &Point) -> Self {
        let world = self.invert(anchor);
        Self::new(k, anchor.x - world.x * k, anchor.y - world.y * k)
    }

    /// Multiplies the scale by `factor` around the screen point `anchor`.
    pub fn scale_around(&self, factor: f64, anchor: &Point) -> Self {
        self.scale_to(self.k * factor, anchor)
    }

    /// Clamps the scale into `extent` around `anchor`. Out of range requests are
    /// pulled back to the nearest bound rather than rejected.
    pub fn clamp_scale(&self, extent: &ScaleExtent, anchor: &Point) -> Self {
        let k = extent.clamp(self.k);
        if k == self.k {
            *self
        } else {
            self.scale_to(k, anchor)
        }
    }

    /// Transform that shows the world point `center` (at unit scale) in the middle
    /// of the viewport at scale `k`.
    ///
    /// Equivalent to `identity.translate(w/2, h/2).scale(k).translate(-cx, -cy)`.
    pub fn centered_on(center: &Point, viewport: &Viewport, k: f64) -> Self {
        let mid = viewport.center();
        Self::identity()
            .translate(mid.x, mid.y)
            .scale(k)
            .translate(-center.x, -center.y)
    }
}

/// Inclusive bounds on the transform's scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleExtent {
    pub min: f64,
    pub max: f64,
}

impl ScaleExtent {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, k: f64) -> f64 {
        k.clamp(self.min, self.max)
    }

    pub fn contains(&self, k: f64) -> bool {
        k >= self.min && k <= self.max
    }
}

impl Default for ScaleExtent {
    fn default() -> Self {
        use crate::core::constants::{MAX_SCALE, MIN_SCALE};
        Self::new(MIN_SCALE, MAX_SCALE)
    }
}
