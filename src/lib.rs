//! # quakemap
//!
//! A headless slippy-map view engine: a raster basemap with an overlay of
//! earthquake markers sized by magnitude.
//!
//! The crate owns the view state (pan/zoom transform), the spherical Mercator
//! projection, the covering-tile calculation and the keyed reconciliation of
//! displayed tiles. Drawing is delegated to a [`Scene`] implementation, so the
//! same engine can drive an SVG snapshot, a test double, or a real runtime.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    builder::MapBuilder,
    config::MapConfig,
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::QuakeMap,
    projection::Projection,
    transform::ZoomTransform,
    viewport::Viewport,
};

pub use data::{
    geojson::{QuakeCollection, QuakeFeature},
    loader::{load_dataset, DatasetLoader},
    scale::SqrtScale,
};

pub use input::{events::InputEvent, gestures::GestureRecognizer};

pub use layers::{raster::RasterLayer, reconcile::reconcile, vector::VectorLayer};

pub use rendering::scene::{Scene, SceneGraph};

pub use tiles::{calculator::TileSet, source::TileSource};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to load dataset {location}: {reason}")]
    DatasetLoad { location: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

impl MapError {
    /// Wraps any error raised while fetching or decoding the dataset.
    pub fn dataset_load(location: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        MapError::DatasetLoad {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` honouring `RUST_LOG`, defaulting to `info`. Calling it
/// more than once is harmless.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
