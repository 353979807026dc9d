//! The map controller.
//!
//! `QuakeMap` owns the view state and both layers. Every change to the
//! transform goes through [`QuakeMap::set_transform`], which clamps the scale,
//! refreshes the projection and redraws the basemap and then the overlay before
//! returning.

use crate::{
    core::{
        config::MapConfig,
        geo::{Point, TileCoord},
        projection::Projection,
        transform::{ScaleExtent, ZoomTransform},
        viewport::Viewport,
    },
    data::{
        geojson::QuakeCollection,
        loader::{load_dataset, load_with, DatasetLoader},
    },
    input::{
        events::{InputEvent, MapEvent},
        gestures::{GestureConfig, GestureRecognizer, ZoomGesture},
        handler::EventManager,
    },
    layers::{
        base::{LayerTrait, ViewState},
        raster::RasterLayer,
        reconcile::Reconciliation,
        vector::VectorLayer,
    },
    rendering::scene::{PathId, Scene},
    MapError, Result,
};

pub struct QuakeMap<S: Scene> {
    config: MapConfig,
    viewport: Viewport,
    extent: ScaleExtent,
    transform: ZoomTransform,
    projection: Projection,
    raster: RasterLayer,
    vector: VectorLayer,
    scene: S,
    recognizer: GestureRecognizer,
    event_manager: EventManager,
    hovered: Option<PathId>,
    rendered: bool,
}

impl<S: Scene> QuakeMap<S> {
    /// Builds the map around an already loaded dataset and performs the first
    /// render at the configured center and scale.
    pub fn new(
        config: MapConfig,
        viewport: Viewport,
        quakes: QuakeCollection,
        mut scene: S,
    ) -> Result<Self> {
        config.validate()?;
        scene.set_size(viewport.width, viewport.height);

        let base = Projection::base();
        let mut vector = VectorLayer::new(quakes, config.overlay.radius_range);
        vector.bind(&mut scene, &base);

        let center = base.project(&config.zoom.initial_center);
        let initial = ZoomTransform::centered_on(&center, &viewport, config.zoom.initial_scale);

        let mut map = Self {
            extent: config.zoom.scale_extent(),
            raster: RasterLayer::from_config(&config.tiles),
            recognizer: GestureRecognizer::with_config(GestureConfig::from(&config.zoom)),
            config,
            viewport,
            transform: initial,
            projection: base,
            vector,
            scene,
            event_manager: EventManager::new(),
            hovered: None,
            rendered: false,
        };
        map.set_transform(initial)?;
        // Nobody can be listening yet.
        map.event_manager.clear_events();
        Ok(map)
    }

    /// Loads the configured dataset, then builds the map. A failed load is
    /// returned as-is and nothing is rendered.
    pub async fn load(config: MapConfig, viewport: Viewport, scene: S) -> Result<Self> {
        let quakes =
            load_dataset(&config.overlay.dataset, &config.overlay.magnitude_property).await?;
        Self::new(config, viewport, quakes, scene)
    }

    /// Like [`load`](Self::load) with a caller-supplied loader.
    pub async fn load_from(
        loader: &dyn DatasetLoader,
        config: MapConfig,
        viewport: Viewport,
        scene: S,
    ) -> Result<Self> {
        let quakes = load_with(
            loader,
            &config.overlay.dataset,
            &config.overlay.magnitude_property,
        )
        .await?;
        Self::new(config, viewport, quakes, scene)
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn transform(&self) -> ZoomTransform {
        self.transform
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn raster(&self) -> &RasterLayer {
        &self.raster
    }

    pub fn vector(&self) -> &VectorLayer {
        &self.vector
    }

    /// URLs of the tiles currently displayed, in document order.
    pub fn tile_urls(&self) -> Vec<String> {
        self.raster
            .displayed()
            .iter()
            .map(|coord| self.raster.tile_url(*coord))
            .collect()
    }

    /// Register an event listener ("zoom" or "mouseover")
    pub fn on<F>(&mut self, event_type: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(event_type, callback);
    }

    /// Applies `transform` with its scale clamped around the viewport center
    /// and redraws both layers. Returns the tile changes, or `None` when the
    /// view did not change.
    pub fn set_transform(
        &mut self,
        transform: ZoomTransform,
    ) -> Result<Option<Reconciliation<TileCoord>>> {
        if !(transform.k.is_finite() && transform.x.is_finite() && transform.y.is_finite()) {
            return Err(MapError::InvalidCoordinates(format!(
                "non-finite transform k={} x={} y={}",
                transform.k, transform.x, transform.y
            )));
        }
        let transform = transform.clamp_scale(&self.extent, &self.viewport.center());
        if self.rendered && transform == self.transform {
            return Ok(None);
        }
        self.transform = transform;
        self.redraw().map(Some)
    }

    /// Zooms by `factor` keeping the screen point `anchor` fixed.
    pub fn scale_by(
        &mut self,
        factor: f64,
        anchor: &Point,
    ) -> Result<Option<Reconciliation<TileCoord>>> {
        let k = self.extent.clamp(self.transform.k * factor);
        let next = self.transform.scale_to(k, anchor);
        self.set_transform(next)
    }

    /// Pans by a screen-space delta.
    pub fn translate_by(&mut self, delta: &Point) -> Result<Option<Reconciliation<TileCoord>>> {
        let next = self.transform.translate_by(delta);
        self.set_transform(next)
    }

    /// Handles one input event to completion: gestures are applied, the scene
    /// is redrawn and listeners are notified before this returns.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<Vec<MapEvent>> {
        for gesture in self.recognizer.process_input(event) {
            match gesture {
                ZoomGesture::ScaleBy { factor, anchor } => {
                    self.scale_by(factor, &anchor)?;
                }
                ZoomGesture::TranslateBy { delta } => {
                    self.translate_by(&delta)?;
                }
                ZoomGesture::Hover { position } => self.hover(&position),
                ZoomGesture::Resize { size } => {
                    log::warn!(
                        "ignoring resize to {}x{}, viewport stays {}x{}",
                        size.x,
                        size.y,
                        self.viewport.width,
                        self.viewport.height
                    );
                }
            }
        }
        Ok(self.event_manager.process_events())
    }

    fn hover(&mut self, position: &Point) {
        let hit = self
            .vector
            .feature_at(position, &self.projection)
            .map(|(id, feature)| (id, feature.clone()));

        match hit {
            Some((id, feature)) if self.hovered != Some(id) => {
                log::info!("mouseover {}: {}", id, feature.label());
                self.hovered = Some(id);
                self.event_manager
                    .emit(MapEvent::FeatureHover { id, feature });
            }
            Some(_) => {}
            None => self.hovered = None,
        }
    }

    fn redraw(&mut self) -> Result<Reconciliation<TileCoord>> {
        self.projection.set_from_transform(&self.transform);
        let view = ViewState::new(self.viewport, self.transform);

        let mut layers: [&mut dyn LayerTrait; 2] = [&mut self.raster, &mut self.vector];
        layers.sort_by_key(|layer| layer.z_index());
        for layer in layers {
            layer.render(&mut self.scene, &view)?;
        }
        self.rendered = true;
        let diff = self.raster.last_change().clone();

        log::debug!(
            "zoom x={} y={} k={}",
            self.transform.x,
            self.transform.y,
            self.transform.k
        );

        self.event_manager.emit(MapEvent::Zoomed {
            transform: self.transform,
            tiles_added: diff.added.clone(),
            tiles_removed: diff.removed.clone(),
        });
        Ok(diff)
    }
}
