use super::Pilot;
use crate::command::Command;
use crate::config::PilotConfig;
use crate::snapshot::{ship_body, TickSnapshot};
use crate::targeting::turn_toward;

pub(super) const DESCRIPTION: &str = "Points the nose at the first listed rock. Never fires.";

pub struct TrackingPilot {
    cfg: PilotConfig,
}

impl TrackingPilot {
    pub fn new(cfg: PilotConfig) -> Self {
        Self { cfg }
    }
}

impl Pilot for TrackingPilot {
    fn id(&self) -> &'static str {
        "tracking"
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn new_game(&mut self) {}

    fn decide(&mut self, tick: &TickSnapshot) -> Command {
        let Some(first) = tick.asteroids.first() else {
            return Command::HOLD;
        };
        let ship = ship_body(&self.cfg, tick.heading_deg);
        let bearing = ship.bearing_to(&first.body());
        Command::Turn(turn_toward(tick.heading_deg, bearing, self.cfg.default_turn))
    }
}
