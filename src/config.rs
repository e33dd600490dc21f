use crate::command::TurnDirection;
use crate::error::ConfigError;
use crate::pilots::PILOT_IDS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Points awarded per destroyed asteroid tier, and charged per shot.
///
/// The pilot never reads this; it rides along in the config so the frame
/// loop that owns the scoreboard has one place to look.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub large: i64,
    pub medium: i64,
    pub small: i64,
    pub shot: i64,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            large: 2,
            medium: 4,
            small: 10,
            shot: -1,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitTally {
    pub large: u32,
    pub medium: u32,
    pub small: u32,
    pub shots: u32,
}

impl ScoringTable {
    pub fn score(&self, tally: &HitTally) -> i64 {
        tally.large as i64 * self.large
            + tally.medium as i64 * self.medium
            + tally.small as i64 * self.small
            + tally.shots as i64 * self.shot
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PilotConfig {
    pub strategy: String,

    // Field and timing
    pub field_half_size: f64,
    pub tick_seconds: f64,
    pub decision_budget_us: u64,

    // Ship and gun
    pub ship_radius: f64,
    pub turn_rate_deg: f64,
    pub bullet_speed: f64,
    pub bullet_radius: f64,

    // Asteroid tiers, largest first
    pub asteroid_radii: Vec<f64>,
    pub asteroid_speeds: Vec<f64>,

    pub scoring: ScoringTable,

    // Policy knobs
    pub memory_rotation: u32,
    pub default_turn: TurnDirection,
    pub shield_lookahead_ticks: u32,
}

impl Default for PilotConfig {
    fn default() -> Self {
        // Matches the reference arcade setup: a 700x700 field, 20 fps ticks,
        // three asteroid tiers that halve in size and speed up by 1.5x.
        Self {
            strategy: "prioritized".to_string(),
            field_half_size: 350.0,
            tick_seconds: 0.05,
            decision_budget_us: 50_000,
            ship_radius: 8.0,
            turn_rate_deg: 4.0,
            bullet_speed: 200.0,
            bullet_radius: 2.0,
            asteroid_radii: vec![80.0, 40.0, 20.0],
            asteroid_speeds: vec![100.0, 150.0, 225.0],
            scoring: ScoringTable::default(),
            memory_rotation: 5,
            default_turn: TurnDirection::Left,
            shield_lookahead_ticks: 0,
        }
    }
}

impl PilotConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed reading config {}", path.display()))?;
        let cfg: PilotConfig = serde_json::from_slice(&raw)
            .with_context(|| format!("failed parsing config {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn decision_budget(&self) -> Duration {
        Duration::from_micros(self.decision_budget_us)
    }

    pub fn shield_lookahead_seconds(&self) -> f64 {
        self.shield_lookahead_ticks as f64 * self.tick_seconds
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_half_size > 0.0) {
            return Err(ConfigError::NonPositiveFieldSize {
                half_size: self.field_half_size,
            });
        }
        if !(self.tick_seconds > 0.0) {
            return Err(ConfigError::NonPositiveTick {
                seconds: self.tick_seconds,
            });
        }
        if !(self.bullet_speed > 0.0) {
            return Err(ConfigError::NonPositiveBulletSpeed {
                speed: self.bullet_speed,
            });
        }
        if !(self.turn_rate_deg >= 0.0) {
            return Err(ConfigError::NegativeTurnRate {
                degrees: self.turn_rate_deg,
            });
        }
        for (what, radius) in [("ship", self.ship_radius), ("bullet", self.bullet_radius)] {
            if !(radius >= 0.0) {
                return Err(ConfigError::NegativeRadius { what, radius });
            }
        }
        if self.asteroid_radii.is_empty() {
            return Err(ConfigError::EmptyAsteroidTiers);
        }
        if self.asteroid_radii.len() != self.asteroid_speeds.len() {
            return Err(ConfigError::AsteroidTierMismatch {
                radii: self.asteroid_radii.len(),
                speeds: self.asteroid_speeds.len(),
            });
        }
        if let Some(&radius) = self.asteroid_radii.iter().find(|r| !(**r >= 0.0)) {
            return Err(ConfigError::NegativeRadius {
                what: "asteroid",
                radius,
            });
        }
        if self.memory_rotation == 0 {
            return Err(ConfigError::ZeroMemoryRotation);
        }
        if self.decision_budget_us == 0 {
            return Err(ConfigError::ZeroDecisionBudget);
        }
        if !PILOT_IDS.contains(&self.strategy.as_str()) {
            return Err(ConfigError::UnknownStrategy {
                id: self.strategy.clone(),
            });
        }
        Ok(())
    }
}
