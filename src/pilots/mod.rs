pub mod aggressive;
pub mod opportunistic;
pub mod prioritized;
pub mod tracking;

use crate::command::Command;
use crate::config::PilotConfig;
use crate::error::ConfigError;
use crate::snapshot::TickSnapshot;

/// One decision strategy. A pilot is owned by a single frame loop and asked
/// for exactly one command per tick.
pub trait Pilot {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Forgets everything carried over from the previous game.
    fn new_game(&mut self);
    fn decide(&mut self, tick: &TickSnapshot) -> Command;
}

pub const PILOT_IDS: [&str; 4] = ["prioritized", "aggressive", "tracking", "opportunistic"];

pub fn pilot_ids() -> Vec<&'static str> {
    PILOT_IDS.to_vec()
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    vec![
        ("prioritized", prioritized::DESCRIPTION),
        ("aggressive", aggressive::DESCRIPTION),
        ("tracking", tracking::DESCRIPTION),
        ("opportunistic", opportunistic::DESCRIPTION),
    ]
}

pub fn create_pilot(id: &str, cfg: &PilotConfig) -> Option<Box<dyn Pilot>> {
    match id {
        "prioritized" => Some(Box::new(prioritized::PrioritizedPilot::new(cfg.clone()))),
        "aggressive" => Some(Box::new(aggressive::AggressivePilot::new(cfg.clone()))),
        "tracking" => Some(Box::new(tracking::TrackingPilot::new(cfg.clone()))),
        "opportunistic" => Some(Box::new(opportunistic::OpportunisticPilot::new(cfg.clone()))),
        _ => None,
    }
}

/// Validates `cfg` and builds the pilot its `strategy` names.
pub fn pilot_from_config(cfg: &PilotConfig) -> Result<Box<dyn Pilot>, ConfigError> {
    cfg.validate()?;
    create_pilot(&cfg.strategy, cfg).ok_or_else(|| ConfigError::UnknownStrategy {
        id: cfg.strategy.clone(),
    })
}
