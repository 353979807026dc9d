//! Configuration for the map view, the basemap and the quake overlay
//!
//! Every section has a `Default` matching the built-in constants, and the whole
//! tree can be read from JSON with missing fields falling back to defaults.

use crate::core::constants::{
    DEFAULT_DATASET, INITIAL_CENTER_LAT, INITIAL_CENTER_LNG, INITIAL_SCALE, MAX_SCALE,
    MAX_TILE_ZOOM, MAX_ZOOM_DELTA, MIN_SCALE, MIN_VIEWPORT_HEIGHT, MIN_VIEWPORT_WIDTH,
    RADIUS_RANGE, TILE_SIZE, TILE_SUBDOMAINS, TILE_URL_TEMPLATE,
};
use crate::core::geo::LatLng;
use crate::core::transform::ScaleExtent;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub viewport: ViewportConfig,
    pub zoom: ZoomConfig,
    pub tiles: TileSourceConfig,
    pub overlay: OverlayConfig,
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rejects settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let zoom = &self.zoom;
        if !(zoom.min_scale > 0.0 && zoom.min_scale <= zoom.max_scale) {
            return Err(MapError::Config(format!(
                "scale extent [{}, {}] must be positive and ordered",
                zoom.min_scale, zoom.max_scale
            )));
        }
        if !(zoom.initial_scale > 0.0) {
            return Err(MapError::Config(format!(
                "initial scale {} must be positive",
                zoom.initial_scale
            )));
        }
        if !zoom.initial_center.is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "initial center {:?} is out of range",
                zoom.initial_center
            )));
        }
        if !self.tiles.tile_size.is_power_of_two() {
            return Err(MapError::Config(format!(
                "tile size {} must be a power of two",
                self.tiles.tile_size
            )));
        }
        let delta = self.tiles.zoom_delta;
        if !delta.is_finite() || delta.abs() > MAX_ZOOM_DELTA {
            return Err(MapError::Config(format!(
                "tile zoom delta {} must be within [-{}, {}]",
                delta, MAX_ZOOM_DELTA, MAX_ZOOM_DELTA
            )));
        }
        let deepest = zoom.max_scale.log2() - (self.tiles.tile_size as f64).log2() + delta;
        if !zoom.max_scale.is_finite() || deepest.round() > MAX_TILE_ZOOM {
            return Err(MapError::Config(format!(
                "max scale {} with zoom delta {} reaches tile level {}, above {}",
                zoom.max_scale, delta, deepest, MAX_TILE_ZOOM
            )));
        }
        if self.tiles.subdomains.is_empty() && self.tiles.url_template.contains("{s}") {
            return Err(MapError::Config(
                "tile template uses {s} but no subdomains are configured".to_string(),
            ));
        }
        if self.overlay.radius_range.0 > self.overlay.radius_range.1 {
            return Err(MapError::Config(format!(
                "radius range {:?} must be ordered",
                self.overlay.radius_range
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_VIEWPORT_WIDTH,
            min_height: MIN_VIEWPORT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    pub initial_center: LatLng,
    pub initial_scale: f64,
    pub wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub drag_pan: bool,
    pub touch_zoom: bool,
}

impl ZoomConfig {
    pub fn scale_extent(&self) -> ScaleExtent {
        ScaleExtent::new(self.min_scale, self.max_scale)
    }
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            initial_center: LatLng::new(INITIAL_CENTER_LAT, INITIAL_CENTER_LNG),
            initial_scale: INITIAL_SCALE,
            wheel_zoom: true,
            double_click_zoom: true,
            drag_pan: true,
            touch_zoom: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSourceConfig {
    pub url_template: String,
    pub subdomains: Vec<String>,
    pub tile_size: u32,
    /// Offset added to the computed tile zoom before rounding.
    pub zoom_delta: f64,
}

impl Default for TileSourceConfig {
    fn default() -> Self {
        Self {
            url_template: TILE_URL_TEMPLATE.to_string(),
            subdomains: TILE_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            tile_size: TILE_SIZE,
            zoom_delta: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub dataset: String,
    pub magnitude_property: String,
    pub radius_range: (f64, f64),
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            dataset: DEFAULT_DATASET.to_string(),
            magnitude_property: "mag".to_string(),
            radius_range: RADIUS_RANGE,
        }
    }
}
