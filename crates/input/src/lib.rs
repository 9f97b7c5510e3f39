//! Input resolution: physical sources bound to semantic actions.
//!
//! # Invariants
//! - Every action in `Action::ALL` is registered in a freshly built table.
//! - Booleans aggregate by OR, levels by MAX over values clamped to `[0, 1]`.
//! - A misbehaving source never fails a resolution; it is reported and
//!   contributes a neutral value.

pub mod binding;
pub mod device;
pub mod error;
pub mod resolver;
pub mod source;

pub use binding::ActionBindings;
pub use device::{DeviceFrame, DeviceState};
pub use error::{InputError, SourceAnomaly};
pub use resolver::{ANALOG_PRESS_THRESHOLD, ActionFrame, ActionState, InputResolver, Resolution};
pub use source::{
    AxisHalf, AxisSource, ButtonSource, ConstSource, FnSource, InputSource, KeySource, KeyTrigger,
    ScreenSide, SourceRef, TouchSource,
};

pub fn crate_info() -> &'static str {
    concat!("sawrun-input v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
