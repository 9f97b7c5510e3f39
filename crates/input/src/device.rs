use glam::Vec2;
use sawrun_common::{Axis, Button, Key};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Read-only view of the physical input backend for the current frame.
///
/// The engine owns device polling. This crate only samples through this
/// trait, so resolution can run against a recorded or synthetic frame.
pub trait DeviceState {
    /// Whether `key` is held down this frame.
    fn key_held(&self, key: Key) -> bool;
    /// Whether `key` went down this frame (edge, not level).
    fn key_pressed(&self, key: Key) -> bool;
    fn button_held(&self, button: Button) -> bool;
    /// Axis value in `[-1.0, 1.0]`.
    fn axis(&self, axis: Axis) -> f32;
    /// Screen position of the touch at `index`, if that many touches are active.
    fn touch(&self, index: usize) -> Option<Vec2>;
    fn screen_width(&self) -> f32;
}

/// A plain-data sample of every device for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceFrame {
    pub keys_held: BTreeSet<Key>,
    pub keys_pressed: BTreeSet<Key>,
    pub buttons_held: BTreeSet<Button>,
    pub axes: BTreeMap<Axis, f32>,
    pub touches: Vec<Vec2>,
    pub screen_width: f32,
}

impl DeviceFrame {
    /// An idle frame on a screen of the given width.
    pub fn new(screen_width: f32) -> Self {
        Self {
            screen_width,
            ..Default::default()
        }
    }

    /// Hold `key`. A key held this frame is not implicitly "pressed".
    pub fn hold_key(mut self, key: Key) -> Self {
        self.keys_held.insert(key);
        self
    }

    /// Press `key` this frame; a pressed key is also held.
    pub fn press_key(mut self, key: Key) -> Self {
        self.keys_pressed.insert(key);
        self.keys_held.insert(key);
        self
    }

    pub fn hold_button(mut self, button: Button) -> Self {
        self.buttons_held.insert(button);
        self
    }

    pub fn with_axis(mut self, axis: Axis, value: f32) -> Self {
        self.axes.insert(axis, value);
        self
    }

    pub fn with_touch(mut self, position: Vec2) -> Self {
        self.touches.push(position);
        self
    }
}

impl DeviceState for DeviceFrame {
    fn key_held(&self, key: Key) -> bool {
        self.keys_held.contains(&key)
    }

    fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    fn button_held(&self, button: Button) -> bool {
        self.buttons_held.contains(&button)
    }

    fn axis(&self, axis: Axis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    fn touch(&self, index: usize) -> Option<Vec2> {
        self.touches.get(index).copied()
    }

    fn screen_width(&self) -> f32 {
        self.screen_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frame_reads_neutral() {
        let frame = DeviceFrame::new(800.0);
        assert!(!frame.key_held(Key::A));
        assert!(!frame.button_held(Button::A));
        assert_eq!(frame.axis(Axis::Horizontal), 0.0);
        assert_eq!(frame.touch(0), None);
        assert_eq!(frame.screen_width(), 800.0);
    }

    #[test]
    fn press_implies_held() {
        let frame = DeviceFrame::new(800.0).press_key(Key::H);
        assert!(frame.key_pressed(Key::H));
        assert!(frame.key_held(Key::H));

        let held = DeviceFrame::new(800.0).hold_key(Key::H);
        assert!(!held.key_pressed(Key::H));
    }

    #[test]
    fn touches_are_indexed_in_order() {
        let frame = DeviceFrame::new(800.0)
            .with_touch(Vec2::new(10.0, 5.0))
            .with_touch(Vec2::new(700.0, 5.0));
        assert_eq!(frame.touch(0), Some(Vec2::new(10.0, 5.0)));
        assert_eq!(frame.touch(1), Some(Vec2::new(700.0, 5.0)));
        assert_eq!(frame.touch(2), None);
    }
}
