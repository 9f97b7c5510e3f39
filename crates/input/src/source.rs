use std::fmt;
use std::sync::Arc;

use sawrun_common::{Axis, Button, InputValue, Key};

use crate::device::DeviceState;

/// One physical input's contribution to one action.
///
/// Sources are stateless: every call reads the device state it is given and
/// nothing else. The `Debug` rendering names the source in anomaly reports.
pub trait InputSource: fmt::Debug + Send + Sync {
    fn sample(&self, device: &dyn DeviceState) -> InputValue;
}

/// Shared handle to a bound source.
pub type SourceRef = Arc<dyn InputSource>;

/// When a key source fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTrigger {
    /// Every frame the key is down.
    Held,
    /// Only the frame the key goes down.
    Pressed,
}

/// A keyboard key, reported as `Bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySource {
    pub key: Key,
    pub trigger: KeyTrigger,
}

impl KeySource {
    pub fn held(key: Key) -> Self {
        Self {
            key,
            trigger: KeyTrigger::Held,
        }
    }

    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            trigger: KeyTrigger::Pressed,
        }
    }
}

impl InputSource for KeySource {
    fn sample(&self, device: &dyn DeviceState) -> InputValue {
        let down = match self.trigger {
            KeyTrigger::Held => device.key_held(self.key),
            KeyTrigger::Pressed => device.key_pressed(self.key),
        };
        InputValue::Bool(down)
    }
}

/// A gamepad button held down, reported as `Bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSource(pub Button);

impl InputSource for ButtonSource {
    fn sample(&self, device: &dyn DeviceState) -> InputValue {
        InputValue::Bool(device.button_held(self.0))
    }
}

/// Which half of an axis a source listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisHalf {
    Positive,
    Negative,
}

/// One half of a gamepad axis, reported as an `Analog` magnitude.
///
/// The positive half yields `max(x, 0)`; the negative half yields
/// `|min(x, 0)|`. Both are non-negative so opposite actions never see
/// each other's deflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSource {
    pub axis: Axis,
    pub half: AxisHalf,
}

impl AxisSource {
    pub fn positive(axis: Axis) -> Self {
        Self {
            axis,
            half: AxisHalf::Positive,
        }
    }

    pub fn negative(axis: Axis) -> Self {
        Self {
            axis,
            half: AxisHalf::Negative,
        }
    }
}

impl InputSource for AxisSource {
    fn sample(&self, device: &dyn DeviceState) -> InputValue {
        let x = device.axis(self.axis);
        let level = match self.half {
            AxisHalf::Positive => x.max(0.0),
            AxisHalf::Negative => x.min(0.0).abs(),
        };
        InputValue::Analog(level)
    }
}

/// Side of the screen a touch source listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSide {
    Left,
    Right,
}

/// The first active touch lying strictly on one side of the screen's
/// vertical midline. No touch reads as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSource(pub ScreenSide);

impl InputSource for TouchSource {
    fn sample(&self, device: &dyn DeviceState) -> InputValue {
        let mid = device.screen_width() / 2.0;
        let hit = device.touch(0).is_some_and(|p| match self.0 {
            ScreenSide::Left => p.x < mid,
            ScreenSide::Right => p.x > mid,
        });
        InputValue::Bool(hit)
    }
}

/// Adapts any closure into a named source.
pub struct FnSource<F> {
    label: &'static str,
    f: F,
}

impl<F> FnSource<F>
where
    F: Fn(&dyn DeviceState) -> InputValue + Send + Sync,
{
    pub fn new(label: &'static str, f: F) -> Self {
        Self { label, f }
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnSource").field(&self.label).finish()
    }
}

impl<F> InputSource for FnSource<F>
where
    F: Fn(&dyn DeviceState) -> InputValue + Send + Sync,
{
    fn sample(&self, device: &dyn DeviceState) -> InputValue {
        (self.f)(device)
    }
}

/// A source that ignores the device and always reports `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstSource(pub InputValue);

impl InputSource for ConstSource {
    fn sample(&self, _device: &dyn DeviceState) -> InputValue {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceFrame;
    use glam::Vec2;

    #[test]
    fn key_source_respects_trigger() {
        let held = DeviceFrame::new(100.0).hold_key(Key::W);
        assert_eq!(KeySource::held(Key::W).sample(&held), InputValue::Bool(true));
        assert_eq!(KeySource::pressed(Key::W).sample(&held), InputValue::Bool(false));

        let pressed = DeviceFrame::new(100.0).press_key(Key::W);
        assert_eq!(KeySource::pressed(Key::W).sample(&pressed), InputValue::Bool(true));
    }

    #[test]
    fn axis_halves_split_deflection() {
        let frame = DeviceFrame::new(100.0).with_axis(Axis::Horizontal, -0.75);
        assert_eq!(
            AxisSource::negative(Axis::Horizontal).sample(&frame),
            InputValue::Analog(0.75)
        );
        assert_eq!(
            AxisSource::positive(Axis::Horizontal).sample(&frame),
            InputValue::Analog(0.0)
        );
    }

    #[test]
    fn touch_midline_counts_for_neither_side() {
        let frame = DeviceFrame::new(100.0).with_touch(Vec2::new(50.0, 20.0));
        assert_eq!(TouchSource(ScreenSide::Left).sample(&frame), InputValue::Bool(false));
        assert_eq!(TouchSource(ScreenSide::Right).sample(&frame), InputValue::Bool(false));
    }

    #[test]
    fn touch_reads_only_first_touch() {
        let frame = DeviceFrame::new(100.0)
            .with_touch(Vec2::new(80.0, 0.0))
            .with_touch(Vec2::new(10.0, 0.0));
        assert_eq!(TouchSource(ScreenSide::Right).sample(&frame), InputValue::Bool(true));
        assert_eq!(TouchSource(ScreenSide::Left).sample(&frame), InputValue::Bool(false));
    }

    #[test]
    fn fn_source_debug_shows_label() {
        let src = FnSource::new("always-on", |_: &dyn DeviceState| InputValue::Bool(true));
        assert_eq!(format!("{src:?}"), "FnSource(\"always-on\")");
        assert_eq!(src.sample(&DeviceFrame::default()), InputValue::Bool(true));
    }
}
