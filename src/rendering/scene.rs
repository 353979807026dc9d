//! The seam between the engine and whatever actually draws.
//!
//! Layers never draw directly. They issue explicit element-level commands
//! against a [`Scene`], so a browser runtime, a native canvas or the in-memory
//! [`SceneGraph`] used for snapshots and tests can all sit behind it.

use crate::core::geo::TileCoord;
use crate::tiles::layout::TilePlacement;

/// Identifies one overlay path; the index of the feature it is bound to.
pub type PathId = usize;

pub trait Scene {
    /// Size of the drawing surface.
    fn set_size(&mut self, width: f64, height: f64);

    /// Affine transform string applied to the whole tile group.
    fn set_tile_group_transform(&mut self, transform: &str);

    /// Appends a tile image to the tile group.
    fn insert_tile(&mut self, coord: TileCoord, href: &str, placement: TilePlacement);

    fn remove_tile(&mut self, coord: TileCoord);

    /// Appends an overlay path element.
    fn insert_path(&mut self, id: PathId, geometry: &str);

    /// Replaces the geometry of an existing path element.
    fn set_path_geometry(&mut self, id: PathId, geometry: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileImage {
    pub coord: TileCoord,
    pub href: String,
    pub placement: TilePlacement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathElement {
    pub id: PathId,
    pub geometry: String,
}

/// In-memory scene: keeps elements in document order, like a retained DOM.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub width: f64,
    pub height: f64,
    pub tile_group_transform: String,
    tiles: Vec<TileImage>,
    paths: Vec<PathElement>,
    stats: SceneStats,
}

/// Counts of element operations since the scene was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub tiles_inserted: usize,
    pub tiles_removed: usize,
    pub paths_inserted: usize,
    pub path_updates: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tiles(&self) -> &[TileImage] {
        &self.tiles
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&TileImage> {
        self.tiles.iter().find(|t| t.coord == coord)
    }

    pub fn tile_coords(&self) -> Vec<TileCoord> {
        self.tiles.iter().map(|t| t.coord).collect()
    }

    pub fn paths(&self) -> &[PathElement] {
        &self.paths
    }

    pub fn path(&self, id: PathId) -> Option<&PathElement> {
        self.paths.iter().find(|p| p.id == id)
    }

    pub fn stats(&self) -> SceneStats {
        self.stats
    }
}

impl Scene for SceneGraph {
    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn set_tile_group_transform(&mut self, transform: &str) {
        self.tile_group_transform = transform.to_string();
    }

    fn insert_tile(&mut self, coord: TileCoord, href: &str, placement: TilePlacement) {
        self.tiles.push(TileImage {
            coord,
            href: href.to_string(),
            placement,
        });
        self.stats.tiles_inserted += 1;
    }

    fn remove_tile(&mut self, coord: TileCoord) {
        let before = self.tiles.len();
        self.tiles.retain(|t| t.coord != coord);
        self.stats.tiles_removed += before - self.tiles.len();
    }

    fn insert_path(&mut self, id: PathId, geometry: &str) {
        self.paths.push(PathElement {
            id,
            geometry: geometry.to_string(),
        });
        self.stats.paths_inserted += 1;
    }

    fn set_path_geometry(&mut self, id: PathId, geometry: &str) {
        if let Some(path) = self.paths.iter_mut().find(|p| p.id == id) {
            path.geometry = geometry.to_string();
            self.stats.path_updates += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiles_keep_document_order() {
        let mut scene = SceneGraph::new();
        let a = TileCoord::new(1, 1, 2);
        let b = TileCoord::new(2, 1, 2);
        scene.insert_tile(a, "a.png", TilePlacement::for_tile(a, 256));
        scene.insert_tile(b, "b.png", TilePlacement::for_tile(b, 256));
        assert_eq!(scene.tile_coords(), vec![a, b]);

        scene.remove_tile(a);
        assert_eq!(scene.tile_coords(), vec![b]);
        assert_eq!(scene.stats().tiles_inserted, 2);
        assert_eq!(scene.stats().tiles_removed, 1);
    }

    #[test]
    fn test_path_geometry_update() {
        let mut scene = SceneGraph::new();
        scene.insert_path(0, "M0,0z");
        scene.set_path_geometry(0, "M1,1z");
        scene.set_path_geometry(7, "M2,2z");

        assert_eq!(scene.path(0).unwrap().geometry, "M1,1z");
        assert_eq!(scene.paths().len(), 1);
        assert_eq!(scene.stats().path_updates, 1);
    }
}
