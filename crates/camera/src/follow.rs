use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Follow distances, in world units.
///
/// Y increases upward and the chase runs downward: the player descends and
/// the hazard follows from above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FollowConfig {
    /// How far the player may drift from the camera before it moves.
    pub leash_length: f32,
    /// Once the hazard's visible edge is closer than this above the camera,
    /// the hazard drives the camera.
    pub hazard_lead_distance: f32,
    /// How much of the hazard must be on screen before the camera reacts.
    pub hazard_visibility_margin: f32,
    /// Fixed camera z.
    pub depth: f32,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            leash_length: 20.0,
            hazard_lead_distance: 35.0,
            hazard_visibility_margin: 5.0,
            depth: -10.0,
        }
    }
}

/// Which rule moved (or held) the camera on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FollowBranch {
    /// Hazard within its lead distance; camera pinned to it.
    HazardLead,
    /// Player dropped past the lower leash; camera follows down and the
    /// hazard releases it.
    LeashDown,
    /// Player rose past the upper leash.
    LeashUp,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FollowStep {
    pub position: Vec3,
    pub branch: FollowBranch,
}

/// Vertical follow controller for the chase camera.
#[derive(Debug, Clone, Default)]
pub struct CameraFollow {
    pub config: FollowConfig,
    hazard_takeover: bool,
}

impl CameraFollow {
    pub fn new(config: FollowConfig) -> Self {
        Self {
            config,
            hazard_takeover: false,
        }
    }

    /// Whether the hazard currently drives the camera.
    pub fn hazard_takeover(&self) -> bool {
        self.hazard_takeover
    }

    pub fn reset(&mut self) {
        self.hazard_takeover = false;
    }

    /// New camera position for this frame.
    pub fn advance(&mut self, player: Vec2, hazard: Vec2, camera: Vec3) -> Vec3 {
        self.step(player, hazard, camera).position
    }

    /// Like [`advance`](Self::advance), also reporting which rule applied.
    pub fn step(&mut self, player: Vec2, hazard: Vec2, camera: Vec3) -> FollowStep {
        let FollowConfig {
            leash_length: leash,
            hazard_lead_distance: lead,
            hazard_visibility_margin: margin,
            depth,
        } = self.config;

        let was_takeover = self.hazard_takeover;
        let mut y = camera.y;
        let branch = if hazard.y + margin - y < lead {
            y = hazard.y + margin - lead;
            self.hazard_takeover = true;
            FollowBranch::HazardLead
        } else if player.y - y < -leash {
            y = player.y + leash;
            self.hazard_takeover = false;
            FollowBranch::LeashDown
        } else if player.y - y > leash && !self.hazard_takeover {
            // Without the takeover guard the camera would bounce between
            // the hazard and the player every frame.
            y = player.y - leash;
            FollowBranch::LeashUp
        } else {
            FollowBranch::Hold
        };

        if was_takeover != self.hazard_takeover {
            tracing::debug!(
                takeover = self.hazard_takeover,
                camera_y = y,
                "hazard takeover changed"
            );
        }
        tracing::trace!(?branch, camera_y = y, "camera step");

        FollowStep {
            position: Vec3::new(camera.x, y, depth),
            branch,
        }
    }
}

/// Whether the hazard has passed the player on its way down.
pub fn hazard_caught_player(player: Vec2, hazard: Vec2) -> bool {
    hazard.y < player.y
}
