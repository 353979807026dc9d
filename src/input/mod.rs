pub mod events;
pub mod gestures;
pub mod handler;

// Re-export the essential types
pub use events::{
    DeltaMode, InputEvent, KeyModifiers, MapEvent, TouchEventType, TouchPoint,
};
pub use gestures::{GestureConfig, GestureRecognizer, ZoomGesture};
pub use handler::{EventCallback, EventManager};
