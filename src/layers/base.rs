use crate::{
    core::{
        geo::LatLngBounds, projection::Projection, transform::ZoomTransform, viewport::Viewport,
    },
    rendering::scene::Scene,
    Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    Raster,
    Vector,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Raster => write!(f, "raster"),
            LayerType::Vector => write!(f, "vector"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
    pub layer_type: LayerType,
    pub z_index: i32,
}

impl LayerProperties {
    pub fn new(id: String, name: String, layer_type: LayerType) -> Self {
        Self {
            id,
            name,
            layer_type,
            z_index: 0,
        }
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// Everything a layer needs to know about the current view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub viewport: Viewport,
    pub transform: ZoomTransform,
    pub projection: Projection,
}

impl ViewState {
    pub fn new(viewport: Viewport, transform: ZoomTransform) -> Self {
        Self {
            viewport,
            transform,
            projection: Projection::from_transform(&transform),
        }
    }
}

/// A drawable layer of the map.
pub trait LayerTrait {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn layer_type(&self) -> LayerType;

    /// Lower z-index layers are drawn first.
    fn z_index(&self) -> i32;

    /// Brings the layer's elements in `scene` up to date with `view`.
    fn render(&mut self, scene: &mut dyn Scene, view: &ViewState) -> Result<()>;

    /// Get layer bounds if applicable
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }
}
