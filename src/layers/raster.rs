//! Raster basemap layer.
//!
//! Each render computes the covering tiles for the current transform, moves the
//! tile group into place and reconciles the displayed tiles by key: stale tiles
//! are removed, new ones appended, survivors left untouched.

use crate::{
    core::{config::TileSourceConfig, constants::TILE_SIZE, geo::TileCoord},
    layers::{
        base::{LayerProperties, LayerTrait, LayerType, ViewState},
        reconcile::{reconcile, Reconciliation},
    },
    rendering::scene::Scene,
    tiles::{
        calculator::{TileCalculator, TileSet},
        layout::{group_transform, TilePlacement},
        source::{TemplateTileSource, TileSource},
    },
    Result,
};

pub struct RasterLayer {
    properties: LayerProperties,
    source: Box<dyn TileSource>,
    tile_size: u32,
    zoom_delta: f64,
    displayed: Vec<TileCoord>,
    group_transform: String,
    last_change: Reconciliation<TileCoord>,
}

impl RasterLayer {
    pub fn new(id: String, name: String, source: Box<dyn TileSource>) -> Self {
        Self {
            properties: LayerProperties::new(id, name, LayerType::Raster),
            source,
            tile_size: TILE_SIZE,
            zoom_delta: 0.0,
            displayed: Vec::new(),
            group_transform: String::new(),
            last_change: Reconciliation::default(),
        }
    }

    /// Carto Voyager basemap layer.
    pub fn carto_voyager() -> Self {
        Self::new(
            "basemap".to_string(),
            "Carto Voyager".to_string(),
            Box::new(TemplateTileSource::carto_voyager()),
        )
    }

    pub fn from_config(config: &TileSourceConfig) -> Self {
        let mut layer = Self::new(
            "basemap".to_string(),
            "Basemap".to_string(),
            Box::new(TemplateTileSource::from_config(config)),
        );
        layer.tile_size = config.tile_size;
        layer.zoom_delta = config.zoom_delta;
        layer
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Tiles currently in the scene, in insertion order.
    pub fn displayed(&self) -> &[TileCoord] {
        &self.displayed
    }

    /// Last transform string applied to the tile group.
    pub fn current_group_transform(&self) -> &str {
        &self.group_transform
    }

    /// Tile changes made by the most recent render.
    pub fn last_change(&self) -> &Reconciliation<TileCoord> {
        &self.last_change
    }

    pub fn tile_url(&self, coord: TileCoord) -> String {
        self.source.url(coord)
    }

    /// Covering tiles for `view` without touching the scene.
    pub fn tile_set(&self, view: &ViewState) -> TileSet {
        TileCalculator::new(&view.viewport, self.tile_size)
            .with_zoom_delta(self.zoom_delta)
            .tiles(&view.transform)
    }

    /// Reconciles the scene's tiles against `view` and reports what changed.
    pub fn update(&mut self, scene: &mut dyn Scene, view: &ViewState) -> Reconciliation<TileCoord> {
        let set = self.tile_set(view);

        self.group_transform = group_transform(set.scale, &set.translate, self.tile_size);
        scene.set_tile_group_transform(&self.group_transform);

        let diff = reconcile(&self.displayed, &set.tiles);
        for coord in &diff.removed {
            scene.remove_tile(*coord);
        }
        for coord in &diff.added {
            let href = self.source.url(*coord);
            scene.insert_tile(*coord, &href, TilePlacement::for_tile(*coord, self.tile_size));
        }

        // Survivors keep their place, new tiles go to the end.
        self.displayed.retain(|coord| !diff.removed.contains(coord));
        self.displayed.extend(diff.added.iter().copied());

        log::debug!(
            "raster: {} tiles at z{:?} (+{} -{}), group {}",
            self.displayed.len(),
            set.zoom(),
            diff.added.len(),
            diff.removed.len(),
            self.group_transform
        );

        self.last_change = diff.clone();
        diff
    }
}

impl LayerTrait for RasterLayer {
    crate::impl_layer_trait!(RasterLayer, properties);

    fn render(&mut self, scene: &mut dyn Scene, view: &ViewState) -> Result<()> {
        self.update(scene, view);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{geo::Point, transform::ZoomTransform, viewport::Viewport};
    use crate::rendering::scene::SceneGraph;
    use fxhash::FxHashSet;

    fn view(transform: ZoomTransform) -> ViewState {
        ViewState::new(Viewport::new(960.0, 500.0), transform)
    }

    fn as_set(tiles: &[TileCoord]) -> FxHashSet<TileCoord> {
        tiles.iter().copied().collect()
    }

    #[test]
    fn test_first_render_adds_all_tiles() {
        let mut layer = RasterLayer::carto_voyager();
        let mut scene = SceneGraph::new();
        let v = view(ZoomTransform::new(16_384.0, 5_000.0, 2_000.0));

        let diff = layer.update(&mut scene, &v);
        let expected = layer.tile_set(&v);

        assert_eq!(diff.added, expected.tiles);
        assert!(diff.removed.is_empty());
        assert_eq!(scene.tile_coords(), expected.tiles);
        assert_eq!(scene.tile_group_transform, layer.current_group_transform());
    }

    #[test]
    fn test_pan_only_swaps_edge_tiles() {
        let mut layer = RasterLayer::carto_voyager();
        let mut scene = SceneGraph::new();
        let before = ZoomTransform::new(16_384.0, 5_000.0, 2_000.0);
        layer.update(&mut scene, &view(before));

        let after = before.translate_by(&Point::new(-300.0, 0.0));
        let diff = layer.update(&mut scene, &view(after));

        assert!(!diff.added.is_empty());
        assert!(!diff.removed.is_empty());
        assert!(!diff.unchanged.is_empty());
        assert_eq!(as_set(&scene.tile_coords()), as_set(&layer.tile_set(&view(after)).tiles));
    }

    #[test]
    fn test_zoom_replaces_every_tile() {
        let mut layer = RasterLayer::carto_voyager();
        let mut scene = SceneGraph::new();
        let before = ZoomTransform::new(16_384.0, 5_000.0, 2_000.0);
        layer.update(&mut scene, &view(before));

        let after = before.scale_around(2.0, &Point::new(480.0, 250.0));
        let diff = layer.update(&mut scene, &view(after));

        assert!(diff.unchanged.is_empty());
        assert!(scene.tiles().iter().all(|t| t.coord.z == 7));
        assert_eq!(as_set(layer.displayed()), as_set(&layer.tile_set(&view(after)).tiles));
    }

    #[test]
    fn test_inserted_tiles_carry_url_and_placement() {
        let mut layer = RasterLayer::carto_voyager();
        let mut scene = SceneGraph::new();
        layer.update(&mut scene, &view(ZoomTransform::new(16_384.0, 5_000.0, 2_000.0)));

        let tile = &scene.tiles()[0];
        assert_eq!(tile.href, layer.tile_url(tile.coord));
        assert_eq!(tile.placement.x, tile.coord.x as f64 * 256.0);
        assert_eq!(tile.placement.y, tile.coord.y as f64 * 256.0);
        assert_eq!(tile.placement.width, 256.0);
    }

    #[test]
    fn test_layer_render_records_last_change() {
        let mut layer = RasterLayer::carto_voyager();
        let mut scene = SceneGraph::new();
        assert!(layer.last_change().is_noop());

        let v = view(ZoomTransform::new(16_384.0, 5_000.0, 2_000.0));
        let layer_ref: &mut dyn LayerTrait = &mut layer;
        layer_ref.render(&mut scene, &v).unwrap();

        assert_eq!(layer.last_change().added, layer.tile_set(&v).tiles);
        assert_eq!(layer.displayed(), &layer.last_change().added[..]);
        assert_eq!(scene.tile_coords(), layer.displayed());
    }

    #[test]
    fn test_unchanged_view_is_noop() {
        let mut layer = RasterLayer::carto_voyager();
        let mut scene = SceneGraph::new();
        let v = view(ZoomTransform::new(16_384.0, 5_000.0, 2_000.0));
        layer.update(&mut scene, &v);
        let inserted = scene.stats().tiles_inserted;

        assert!(layer.update(&mut scene, &v).is_noop());
        assert_eq!(scene.stats().tiles_inserted, inserted);
    }
}
