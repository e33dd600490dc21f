use super::Pilot;
use crate::command::Command;
use crate::config::PilotConfig;
use crate::snapshot::{ship_body, TickSnapshot};
use crate::targeting::bullet_intercept;

pub(super) const DESCRIPTION: &str =
    "Never turns; fires whenever a bullet would meet the first listed rock, even past the edge.";

pub struct OpportunisticPilot {
    cfg: PilotConfig,
}

impl OpportunisticPilot {
    pub fn new(cfg: PilotConfig) -> Self {
        Self { cfg }
    }
}

impl Pilot for OpportunisticPilot {
    fn id(&self) -> &'static str {
        "opportunistic"
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
        match bullet_intercept(&self.cfg, &ship, tick.heading_deg, &first.body()) {
            Some(_) => Command::Fire,
            None => Command::HOLD,
        }
    }
}
