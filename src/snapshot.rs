use crate::config::PilotConfig;
use crate::kinematics::KinematicBody;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Reserved id for the ship's own body; asteroid ids are caller-assigned.
pub const SHIP_ID: u64 = u64::MAX;
/// Reserved id for the hypothetical bullet used in shot prediction.
pub const BULLET_ID: u64 = u64::MAX - 1;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSnapshot {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub heading_deg: f64,
    pub speed: f64,
    pub radius: f64,
}

impl AsteroidSnapshot {
    pub fn body(&self) -> KinematicBody {
        KinematicBody::new(
            self.id,
            DVec2::new(self.x, self.y),
            self.heading_deg,
            self.speed,
            self.radius,
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    #[serde(default)]
    pub asteroids: Vec<AsteroidSnapshot>,
    /// Ship heading in degrees, 0 = +x, counter-clockwise.
    pub heading_deg: f64,
    /// Frames until the gun may fire again. A `Fire` issued while this is
    /// nonzero is dropped by the frame loop, so it claims nothing.
    #[serde(default)]
    pub frames_to_fire: u32,
}

impl TickSnapshot {
    pub fn asteroid_bodies(&self) -> Vec<KinematicBody> {
        self.asteroids.iter().map(AsteroidSnapshot::body).collect()
    }
}

/// The ship: parked at the field origin, never translating.
pub fn ship_body(cfg: &PilotConfig, heading_deg: f64) -> KinematicBody {
    KinematicBody::new(SHIP_ID, DVec2::ZERO, heading_deg, 0.0, cfg.ship_radius)
}

/// A bullet leaving the ship now, along its heading.
pub fn bullet_body(cfg: &PilotConfig, ship: &KinematicBody, heading_deg: f64) -> KinematicBody {
    KinematicBody::new(
        BULLET_ID,
        ship.position,
        heading_deg,
        cfg.bullet_speed,
        cfg.bullet_radius,
    )
}
