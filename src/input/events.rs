use crate::core::{
    geo::{Point, TileCoord},
    transform::ZoomTransform,
};
use crate::data::geojson::QuakeFeature;
use crate::rendering::scene::PathId;
use serde::{Deserialize, Serialize};

/// Raw input events delivered by the host runtime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Scroll wheel; `delta_y` as reported by the host, positive scrolls down
    Wheel {
        delta_y: f64,
        delta_mode: DeltaMode,
        position: Point,
    },
    /// Pointer pressed on the map
    DragStart { position: Point },
    /// Pointer moved while pressed
    Drag { delta: Point },
    /// Pointer released
    DragEnd,
    /// Double click; shift zooms out instead of in
    DoubleClick {
        position: Point,
        modifiers: KeyModifiers,
    },
    /// Pointer moved without a button pressed
    MouseMove { position: Point },
    /// Touch events (multi-touch)
    Touch {
        event_type: TouchEventType,
        touches: Vec<TouchPoint>,
    },
    /// Window resize
    Resize { size: Point },
}

/// Unit of a wheel delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

/// Types of touch events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchEventType {
    Start,
    Move,
    End,
    Cancel,
}

/// Individual touch point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, position: Point) -> Self {
        Self { id, position }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }
}

/// Events emitted by the map after it has handled input
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The transform changed and both layers were redrawn
    Zoomed {
        transform: ZoomTransform,
        tiles_added: Vec<TileCoord>,
        tiles_removed: Vec<TileCoord>,
    },
    /// The pointer entered a quake marker
    FeatureHover { id: PathId, feature: QuakeFeature },
}
