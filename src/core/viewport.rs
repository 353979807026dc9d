use crate::core::constants::{MIN_VIEWPORT_HEIGHT, MIN_VIEWPORT_WIDTH};
use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Size of the drawing surface in pixels.
///
/// Fixed when the map starts; later window resizes do not change it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of exactly the given size
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Sizes the viewport from the window, never smaller than 960x500.
    pub fn from_window(window_width: f64, window_height: f64) -> Self {
        Self::with_minimum(
            window_width,
            window_height,
            MIN_VIEWPORT_WIDTH,
            MIN_VIEWPORT_HEIGHT,
        )
    }

    /// Sizes the viewport from the window with explicit floors.
    pub fn with_minimum(window_width: f64, window_height: f64, min_width: f64, min_height: f64) -> Self {
        Self::new(window_width.max(min_width), window_height.max(min_height))
    }

    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a screen point falls inside the viewport
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(MIN_VIEWPORT_WIDTH, MIN_VIEWPORT_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_window_applies_minimum() {
        let small = Viewport::from_window(640.0, 480.0);
        assert_eq!(small.width, 960.0);
        assert_eq!(small.height, 500.0);

        let large = Viewport::from_window(1920.0, 1080.0);
        assert_eq!(large.size(), Point::new(1920.0, 1080.0));
    }

    #[test]
    fn test_center_and_contains() {
        let viewport = Viewport::default();
        assert_eq!(viewport.center(), Point::new(480.0, 250.0));
        assert!(viewport.contains(&Point::new(10.0, 10.0)));
        assert!(!viewport.contains(&Point::new(-1.0, 10.0)));
    }
}
