pub mod scene;
pub mod svg;

// Re-export main types
pub use scene::{PathElement, PathId, Scene, SceneGraph, SceneStats, TileImage};
pub use svg::to_svg;
