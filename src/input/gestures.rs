//! Turns raw input into pan/zoom gestures.
//!
//! Wheel, drag, double click and touch input are mapped the way interactive
//! web maps usually behave: the wheel zooms around the pointer, dragging pans,
//! double click or double tap doubles the scale around the pointer, and a
//! two-finger pinch scales by the change in finger distance while panning with
//! the midpoint.

use crate::{
    core::{config::ZoomConfig, geo::Point},
    input::events::{DeltaMode, InputEvent, TouchEventType, TouchPoint},
};
use fxhash::FxHashMap;
use std::time::{Duration, Instant};

/// A change the map should apply to its transform, or a hover to report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomGesture {
    /// Multiply the scale by `factor`, keeping `anchor` fixed on screen
    ScaleBy { factor: f64, anchor: Point },
    /// Shift the view by a screen-space delta
    TranslateBy { delta: Point },
    /// Pointer hovering at a screen position
    Hover { position: Point },
    /// Window resized; the viewport stays as it is
    Resize { size: Point },
}

/// Configuration for gesture recognition
#[derive(Debug, Clone)]
pub struct GestureConfig {
    pub wheel_zoom: bool,
    pub double_click_zoom: bool,
    pub drag_pan: bool,
    pub touch_zoom: bool,
    /// Maximum time for a touch to count as a tap
    pub tap_timeout: Duration,
    /// Maximum time between taps of a double tap
    pub double_tap_timeout: Duration,
    /// Maximum finger travel for a tap
    pub tap_distance_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_zoom: true,
            double_click_zoom: true,
            drag_pan: true,
            touch_zoom: true,
            tap_timeout: Duration::from_millis(500),
            double_tap_timeout: Duration::from_millis(500),
            tap_distance_threshold: 10.0,
        }
    }
}

impl From<&ZoomConfig> for GestureConfig {
    fn from(zoom: &ZoomConfig) -> Self {
        Self {
            wheel_zoom: zoom.wheel_zoom,
            double_click_zoom: zoom.double_click_zoom,
            drag_pan: zoom.drag_pan,
            touch_zoom: zoom.touch_zoom,
            ..Default::default()
        }
    }
}

/// Scale factor for one wheel event.
pub fn wheel_factor(delta_y: f64, delta_mode: DeltaMode) -> f64 {
    let unit = match delta_mode {
        DeltaMode::Pixel => 1.0,
        DeltaMode::Line | DeltaMode::Page => 120.0,
    };
    2_f64.powf(-delta_y * unit / 500.0)
}

#[derive(Debug, Clone, Copy)]
struct TapCandidate {
    start: Point,
    last: Point,
    started_at: Instant,
}

/// Gesture recognizer that processes input events and emits zoom gestures
pub struct GestureRecognizer {
    config: GestureConfig,
    dragging: bool,
    touches: FxHashMap<u64, Point>,
    tap: Option<TapCandidate>,
    last_tap: Option<(Point, Instant)>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::with_config(GestureConfig::default())
    }

    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            dragging: false,
            touches: FxHashMap::default(),
            tap: None,
            last_tap: None,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Processes one input event and returns the resulting gestures in order
    pub fn process_input(&mut self, input: InputEvent) -> Vec<ZoomGesture> {
        self.process_input_at(input, Instant::now())
    }

    /// Same as [`process_input`](Self::process_input) with an explicit timestamp.
    pub fn process_input_at(&mut self, input: InputEvent, now: Instant) -> Vec<ZoomGesture> {
        let mut gestures = Vec::new();

        match input {
            InputEvent::Wheel {
                delta_y,
                delta_mode,
                position,
            } => {
                if self.config.wheel_zoom && delta_y != 0.0 {
                    gestures.push(ZoomGesture::ScaleBy {
                        factor: wheel_factor(delta_y, delta_mode),
                        anchor: position,
                    });
                }
            }
            InputEvent::DragStart { .. } => {
                self.dragging = self.config.drag_pan;
            }
            InputEvent::Drag { delta } => {
                if self.dragging {
                    gestures.push(ZoomGesture::TranslateBy { delta });
                }
            }
            InputEvent::DragEnd => {
                self.dragging = false;
            }
            InputEvent::DoubleClick {
                position,
                modifiers,
            } => {
                if self.config.double_click_zoom {
                    let factor = if modifiers.shift { 0.5 } else { 2.0 };
                    gestures.push(ZoomGesture::ScaleBy {
                        factor,
                        anchor: position,
                    });
                }
            }
            InputEvent::MouseMove { position } => {
                if !self.dragging {
                    gestures.push(ZoomGesture::Hover { position });
                }
            }
            InputEvent::Touch {
                event_type,
                touches,
            } => {
                self.process_touch_event(event_type, touches, now, &mut gestures);
            }
            InputEvent::Resize { size } => {
                gestures.push(ZoomGesture::Resize { size });
            }
        }

        gestures
    }

    fn process_touch_event(
        &mut self,
        event_type: TouchEventType,
        touches: Vec<TouchPoint>,
        now: Instant,
        gestures: &mut Vec<ZoomGesture>,
    ) {
        match event_type {
            TouchEventType::Start => {
                for touch in &touches {
                    self.touches.insert(touch.id, touch.position);
                }
                self.tap = match (self.touches.len(), touches.first()) {
                    (1, Some(touch)) => Some(TapCandidate {
                        start: touch.position,
                        last: touch.position,
                        started_at: now,
                    }),
                    _ => None,
                };
            }
            TouchEventType::Move => self.process_touch_move(touches, gestures),
            TouchEventType::End => {
                for touch in &touches {
                    self.touches.remove(&touch.id);
                }
                if self.touches.is_empty() {
                    self.finish_tap(now, gestures);
                }
            }
            TouchEventType::Cancel => {
                for touch in &touches {
                    self.touches.remove(&touch.id);
                }
                self.tap = None;
            }
        }
    }

    fn process_touch_move(&mut self, touches: Vec<TouchPoint>, gestures: &mut Vec<ZoomGesture>) {
        let before = self.two_finger_span();

        for touch in &touches {
            if let Some(previous) = self.touches.get_mut(&touch.id) {
                let delta = touch.position.subtract(previous);
                *previous = touch.position;

                if let Some(tap) = self.tap.as_mut() {
                    tap.last = touch.position;
                }
                if before.is_none() && self.config.drag_pan {
                    gestures.push(ZoomGesture::TranslateBy { delta });
                }
            }
        }

        if let Some(tap) = self.tap {
            if tap.last.distance_to(&tap.start) > self.config.tap_distance_threshold {
                self.tap = None;
            }
        }

        if let (Some((mid0, dist0)), Some((mid1, dist1))) = (before, self.two_finger_span()) {
            if !self.config.touch_zoom {
                return;
            }
            gestures.push(ZoomGesture::TranslateBy {
                delta: mid1.subtract(&mid0),
            });
            if dist0 > 0.0 && dist1 > 0.0 {
                gestures.push(ZoomGesture::ScaleBy {
                    factor: dist1 / dist0,
                    anchor: mid1,
                });
            }
        }
    }

    /// Midpoint and distance of the two active fingers.
    fn two_finger_span(&self) -> Option<(Point, f64)> {
        if self.touches.len() != 2 {
            return None;
        }
        let mut ids: Vec<&u64> = self.touches.keys().collect();
        ids.sort();
        let a = self.touches[ids[0]];
        let b = self.touches[ids[1]];
        Some((a.midpoint(&b), a.distance_to(&b)))
    }

    fn finish_tap(&mut self, now: Instant, gestures: &mut Vec<ZoomGesture>) {
        let Some(tap) = self.tap.take() else {
            return;
        };
        if now.duration_since(tap.started_at) > self.config.tap_timeout {
            return;
        }

        if let Some((last_pos, last_time)) = self.last_tap {
            if now.duration_since(last_time) <= self.config.double_tap_timeout
                && tap.start.distance_to(&last_pos) <= self.config.tap_distance_threshold
            {
                self.last_tap = None;
                if self.config.double_click_zoom {
                    gestures.push(ZoomGesture::ScaleBy {
                        factor: 2.0,
                        anchor: tap.start,
                    });
                }
                return;
            }
        }
        self.last_tap = Some((tap.start, now));
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::KeyModifiers;

    fn touch(event_type: TouchEventType, points: &[(u64, f64, f64)]) -> InputEvent {
        InputEvent::Touch {
            event_type,
            touches: points
                .iter()
                .map(|(id, x, y)| TouchPoint::new(*id, Point::new(*x, *y)))
                .collect(),
        }
    }

    #[test]
    fn test_wheel_factor() {
        assert_eq!(wheel_factor(-500.0, DeltaMode::Pixel), 2.0);
        assert_eq!(wheel_factor(500.0, DeltaMode::Pixel), 0.5);
        assert!((wheel_factor(-3.0, DeltaMode::Line) - 2_f64.powf(0.72)).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_zooms_around_pointer() {
        let mut recognizer = GestureRecognizer::new();
        let gestures = recognizer.process_input(InputEvent::Wheel {
            delta_y: -500.0,
            delta_mode: DeltaMode::Pixel,
            position: Point::new(10.0, 20.0),
        });
        assert_eq!(
            gestures,
            vec![ZoomGesture::ScaleBy {
                factor: 2.0,
                anchor: Point::new(10.0, 20.0)
            }]
        );
    }

    #[test]
    fn test_drag_sequence() {
        let mut recognizer = GestureRecognizer::new();
        assert!(recognizer
            .process_input(InputEvent::Drag {
                delta: Point::new(5.0, 5.0)
            })
            .is_empty());

        recognizer.process_input(InputEvent::DragStart {
            position: Point::new(0.0, 0.0),
        });
        assert!(recognizer.is_dragging());
        let gestures = recognizer.process_input(InputEvent::Drag {
            delta: Point::new(5.0, -3.0),
        });
        assert_eq!(
            gestures,
            vec![ZoomGesture::TranslateBy {
                delta: Point::new(5.0, -3.0)
            }]
        );

        // No hover while the button is held
        assert!(recognizer
            .process_input(InputEvent::MouseMove {
                position: Point::new(1.0, 1.0)
            })
            .is_empty());

        recognizer.process_input(InputEvent::DragEnd);
        assert!(!recognizer.is_dragging());
    }

    #[test]
    fn test_double_click_with_shift_zooms_out() {
        let mut recognizer = GestureRecognizer::new();
        let gestures = recognizer.process_input(InputEvent::DoubleClick {
            position: Point::new(3.0, 4.0),
            modifiers: KeyModifiers::shift(),
        });
        assert_eq!(
            gestures,
            vec![ZoomGesture::ScaleBy {
                factor: 0.5,
                anchor: Point::new(3.0, 4.0)
            }]
        );
    }

    #[test]
    fn test_disabled_wheel_zoom() {
        let config = GestureConfig {
            wheel_zoom: false,
            ..Default::default()
        };
        let mut recognizer = GestureRecognizer::with_config(config);
        assert!(recognizer
            .process_input(InputEvent::Wheel {
                delta_y: 100.0,
                delta_mode: DeltaMode::Pixel,
                position: Point::new(0.0, 0.0),
            })
            .is_empty());
    }

    #[test]
    fn test_single_finger_pans() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.process_input(touch(TouchEventType::Start, &[(1, 100.0, 100.0)]));
        let gestures = recognizer.process_input(touch(TouchEventType::Move, &[(1, 130.0, 90.0)]));
        assert_eq!(
            gestures,
            vec![ZoomGesture::TranslateBy {
                delta: Point::new(30.0, -10.0)
            }]
        );
    }

    #[test]
    fn test_pinch_scales_by_distance_ratio() {
        let mut recognizer = GestureRecognizer::new();
        recognizer.process_input(touch(
            TouchEventType::Start,
            &[(1, 100.0, 100.0), (2, 200.0, 100.0)],
        ));
        let gestures = recognizer.process_input(touch(
            TouchEventType::Move,
            &[(1, 50.0, 100.0), (2, 250.0, 100.0)],
        ));

        assert_eq!(
            gestures,
            vec![
                ZoomGesture::TranslateBy {
                    delta: Point::new(0.0, 0.0)
                },
                ZoomGesture::ScaleBy {
                    factor: 2.0,
                    anchor: Point::new(150.0, 100.0)
                },
            ]
        );
    }

    #[test]
    fn test_double_tap_zooms_in() {
        let mut recognizer = GestureRecognizer::new();
        let t0 = Instant::now();

        recognizer.process_input_at(touch(TouchEventType::Start, &[(1, 40.0, 40.0)]), t0);
        let first = recognizer.process_input_at(
            touch(TouchEventType::End, &[(1, 40.0, 40.0)]),
            t0 + Duration::from_millis(50),
        );
        assert!(first.is_empty());

        recognizer.process_input_at(
            touch(TouchEventType::Start, &[(2, 42.0, 41.0)]),
            t0 + Duration::from_millis(150),
        );
        let second = recognizer.process_input_at(
            touch(TouchEventType::End, &[(2, 42.0, 41.0)]),
            t0 + Duration::from_millis(200),
        );
        assert_eq!(
            second,
            vec![ZoomGesture::ScaleBy {
                factor: 2.0,
                anchor: Point::new(42.0, 41.0)
            }]
        );
    }

    #[test]
    fn test_slow_taps_do_not_zoom() {
        let mut recognizer = GestureRecognizer::new();
        let t0 = Instant::now();

        recognizer.process_input_at(touch(TouchEventType::Start, &[(1, 40.0, 40.0)]), t0);
        recognizer.process_input_at(touch(TouchEventType::End, &[(1, 40.0, 40.0)]), t0);
        recognizer.process_input_at(
            touch(TouchEventType::Start, &[(1, 40.0, 40.0)]),
            t0 + Duration::from_secs(2),
        );
        let gestures = recognizer.process_input_at(
            touch(TouchEventType::End, &[(1, 40.0, 40.0)]),
            t0 + Duration::from_secs(2),
        );
        assert!(gestures.is_empty());
    }

    #[test]
    fn test_resize_is_reported() {
        let mut recognizer = GestureRecognizer::new();
        let gestures = recognizer.process_input(InputEvent::Resize {
            size: Point::new(1200.0, 800.0),
        });
        assert_eq!(
            gestures,
            vec![ZoomGesture::Resize {
                size: Point::new(1200.0, 800.0)
            }]
        );
    }
}
