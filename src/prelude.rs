//! Prelude module for common quakemap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use quakemap::prelude::*;`

pub use crate::core::{
    builder::MapBuilder,
    config::{MapConfig, OverlayConfig, TileSourceConfig, ViewportConfig, ZoomConfig},
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::QuakeMap,
    projection::Projection,
    transform::{ScaleExtent, ZoomTransform},
    viewport::Viewport,
};

pub use crate::layers::{
    base::{LayerTrait, ViewState},
    raster::RasterLayer,
    reconcile::{reconcile, Reconciliation},
    vector::VectorLayer,
};

pub use crate::data::{
    geojson::{QuakeCollection, QuakeFeature},
    loader::{load_dataset, DatasetLoader, FileLoader, HttpLoader},
    scale::SqrtScale,
};

pub use crate::input::{
    events::{DeltaMode, InputEvent, KeyModifiers, MapEvent, TouchEventType, TouchPoint},
    gestures::{GestureRecognizer, ZoomGesture},
};

pub use crate::tiles::{
    calculator::{TileCalculator, TileSet},
    source::{TemplateTileSource, TileSource},
};

pub use crate::rendering::{scene::Scene, scene::SceneGraph, svg::to_svg};

pub use crate::{MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
