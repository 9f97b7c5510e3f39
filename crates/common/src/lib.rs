//! Shared vocabulary used by every sawrun crate.
//!
//! # Invariants
//! - `Action` is a closed set; `Action::ALL` lists every variant.
//! - `InputValue` carries exactly one of two shapes: a press or an analog level.

pub mod types;

pub use types::{Action, Axis, Button, InputValue, Key};

pub fn crate_info() -> &'static str {
    concat!("sawrun-common v", env!("CARGO_PKG_VERSION"))
}
