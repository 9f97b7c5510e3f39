//! Camera follow for a vertical chase.
//!
//! # Invariants
//! - The hazard check runs first and preempts player following.
//! - A player dropping below the leash pulls the camera down and releases
//!   a hazard takeover.
//! - While the hazard holds the camera, a player rising above the leash
//!   does not pull it up.
//! - The controller observes positions only. Game over belongs to the caller.

pub mod follow;

pub use follow::{CameraFollow, FollowBranch, FollowConfig, FollowStep, hazard_caught_player};

pub fn crate_info() -> &'static str {
    concat!("sawrun-camera v", env!("CARGO_PKG_VERSION"))
}
