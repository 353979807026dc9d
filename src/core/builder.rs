//! Map builder for fluent API configuration
//!
//! This module provides a MapBuilder that assembles a [`MapConfig`] and the
//! viewport, then either hands them back or builds a [`QuakeMap`] directly.

use crate::{
    core::{
        config::MapConfig,
        geo::LatLng,
        map::QuakeMap,
        viewport::Viewport,
    },
    data::geojson::QuakeCollection,
    rendering::scene::Scene,
    Result,
};

/// Builder for creating and configuring QuakeMap instances
#[derive(Debug, Clone)]
pub struct MapBuilder {
    config: MapConfig,
    /// Host window size; the viewport is derived from it at build time
    window: Option<(f64, f64)>,
}

impl MapBuilder {
    /// Create a new MapBuilder with default settings
    pub fn new() -> Self {
        Self {
            config: MapConfig::default(),
            window: None,
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: MapConfig) -> Self {
        Self {
            config,
            window: None,
        }
    }

    /// Set the host window size
    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.window = Some((width, height));
        self
    }

    /// Set the viewport minimum size
    pub fn with_minimum_size(mut self, width: f64, height: f64) -> Self {
        self.config.viewport.min_width = width;
        self.config.viewport.min_height = height;
        self
    }

    /// Set the initial center and scale
    pub fn with_center_and_scale(mut self, center: LatLng, scale: f64) -> Self {
        self.config.zoom.initial_center = center;
        self.config.zoom.initial_scale = scale;
        self
    }

    /// Set scale limits
    pub fn with_scale_extent(mut self, min_scale: f64, max_scale: f64) -> Self {
        self.config.zoom.min_scale = min_scale;
        self.config.zoom.max_scale = max_scale;
        self
    }

    /// Set the tile URL template and the subdomains substituted for `{s}`
    pub fn with_tile_template(mut self, template: &str, subdomains: &[&str]) -> Self {
        self.config.tiles.url_template = template.to_string();
        self.config.tiles.subdomains = subdomains.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.config.tiles.tile_size = tile_size;
        self
    }

    /// Offset the tile zoom level before rounding
    pub fn with_zoom_delta(mut self, delta: f64) -> Self {
        self.config.tiles.zoom_delta = delta;
        self
    }

    /// Set the dataset location (path or http(s) URL)
    pub fn with_dataset(mut self, location: &str) -> Self {
        self.config.overlay.dataset = location.to_string();
        self
    }

    pub fn with_magnitude_property(mut self, property: &str) -> Self {
        self.config.overlay.magnitude_property = property.to_string();
        self
    }

    /// Set marker radius range in pixels
    pub fn with_radius_range(mut self, min: f64, max: f64) -> Self {
        self.config.overlay.radius_range = (min, max);
        self
    }

    /// Enable or disable scroll wheel zoom
    pub fn with_wheel_zoom(mut self, enabled: bool) -> Self {
        self.config.zoom.wheel_zoom = enabled;
        self
    }

    /// Enable or disable double-click zoom
    pub fn with_double_click_zoom(mut self, enabled: bool) -> Self {
        self.config.zoom.double_click_zoom = enabled;
        self
    }

    /// Enable or disable dragging
    pub fn with_dragging(mut self, enabled: bool) -> Self {
        self.config.zoom.drag_pan = enabled;
        self
    }

    /// Enable or disable touch zoom
    pub fn with_touch_zoom(mut self, enabled: bool) -> Self {
        self.config.zoom.touch_zoom = enabled;
        self
    }

    /// Viewport for the configured window, never smaller than the minimum
    pub fn viewport(&self) -> Viewport {
        let (width, height) = self.window.unwrap_or((0.0, 0.0));
        Viewport::with_minimum(
            width,
            height,
            self.config.viewport.min_width,
            self.config.viewport.min_height,
        )
    }

    /// Validate and return the configuration with its viewport
    pub fn into_parts(self) -> Result<(MapConfig, Viewport)> {
        self.config.validate()?;
        let viewport = self.viewport();
        Ok((self.config, viewport))
    }

    /// Build the map around an already loaded dataset
    pub fn build<S: Scene>(self, quakes: QuakeCollection, scene: S) -> Result<QuakeMap<S>> {
        let (config, viewport) = self.into_parts()?;
        QuakeMap::new(config, viewport, quakes, scene)
    }

    /// Load the configured dataset, then build the map
    pub async fn load<S: Scene>(self, scene: S) -> Result<QuakeMap<S>> {
        let (config, viewport) = self.into_parts()?;
        QuakeMap::load(config, viewport, scene).await
    }
}

impl Default for MapBuilder {
    fn default() -> Self {
        Self::new()
    }
}
