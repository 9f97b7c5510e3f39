use serde::{Deserialize, Serialize};
use std::fmt;

/// A semantic, device-independent game input.
///
/// Gameplay code asks about actions, never about keys or axes. Which
/// physical inputs drive an action is decided by the binding table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    /// Debug greeting, fired on a single key press.
    HelloWorld,
}

impl Action {
    /// Every action, in declaration order.
    pub const ALL: [Action; 5] = [
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::HelloWorld,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
            Action::HelloWorld => "hello-world",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value one input source contributes for one frame.
///
/// Digital inputs report `Bool`; analog inputs report a level that is
/// expected to lie in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputValue {
    Bool(bool),
    Analog(f32),
}

impl From<bool> for InputValue {
    fn from(value: bool) -> Self {
        InputValue::Bool(value)
    }
}

impl From<f32> for InputValue {
    fn from(value: f32) -> Self {
        InputValue::Analog(value)
    }
}

/// Keyboard keys the default scheme reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    A,
    D,
    W,
    S,
    H,
}

/// Gamepad buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Button {
    /// South face button; jump.
    A,
}

/// Gamepad axes. Values are in `[-1.0, 1.0]`; positive is right / up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}
