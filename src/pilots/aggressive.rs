use super::Pilot;
use crate::command::Command;
use crate::config::PilotConfig;
use crate::snapshot::{ship_body, TickSnapshot};
use crate::targeting::{in_field_intercept, turn_toward};

pub(super) const DESCRIPTION: &str =
    "Shoots the first listed rock when an in-field hit exists, otherwise turns toward it.";

pub struct AggressivePilot {
    cfg: PilotConfig,
}

impl AggressivePilot {
    pub fn new(cfg: PilotConfig) -> Self {
        Self { cfg }
    }
}

impl Pilot for AggressivePilot {
    fn id(&self) -> &'static str {
        "aggressive"
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn new_game(&mut self) {}

    fn decide(&mut self, tick: &TickSnapshot) -> Command {
        let Some(first) = tick.asteroids.first() else {
            return Command::HOLD;
        };
        let target = first.body();
        let ship = ship_body(&self.cfg, tick.heading_deg);

        if in_field_intercept(&self.cfg, &ship, tick.heading_deg, &target).is_some() {
            return Command::Fire;
        }
        Command::Turn(turn_toward(
            tick.heading_deg,
            ship.bearing_to(&target),
            self.cfg.default_turn,
        ))
    }
}
