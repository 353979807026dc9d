//! Core constants for the basemap, the zoom behaviour and the overlay.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Full turn in radians; the base projection maps the world onto `1 / TAU`.
pub const TAU: f64 = 2.0 * std::f64::consts::PI;

/// Smallest zoom scale the transform may reach (2^11).
pub const MIN_SCALE: f64 = (1u64 << 11) as f64;

/// Largest zoom scale the transform may reach (2^24).
pub const MAX_SCALE: f64 = (1u64 << 24) as f64;

/// Viewport floor, applied against the window size at startup.
pub const MIN_VIEWPORT_WIDTH: f64 = 960.0;
pub const MIN_VIEWPORT_HEIGHT: f64 = 500.0;

/// Initial view: central California, `(longitude, latitude)`.
pub const INITIAL_CENTER_LNG: f64 = -119.663;
pub const INITIAL_CENTER_LAT: f64 = 37.414;

/// Initial zoom scale (2^14).
pub const INITIAL_SCALE: f64 = (1u64 << 14) as f64;

/// Carto Voyager raster basemap.
pub const TILE_URL_TEMPLATE: &str =
    "http://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}.png";

/// CDN subdomains, picked by `row mod 3`.
pub const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// Dataset loaded when no location is supplied.
pub const DEFAULT_DATASET: &str = "data/earthquakes_4326_cali.geojson";

/// Pixel radius range for the magnitude scale.
pub const RADIUS_RANGE: (f64, f64) = (0.0, 10.0);

/// Largest accepted tile zoom offset, either direction.
pub const MAX_ZOOM_DELTA: f64 = 8.0;

/// Deepest tile level; keeps tile indices within `u32`.
pub const MAX_TILE_ZOOM: f64 = 30.0;

/// Mercator latitude limit.
pub const MAX_LATITUDE: f64 = 85.0511287798;
