//! Threat-ranked pilot: shields on contact, otherwise engages the most
//! urgent unclaimed asteroid, direct threats before indirect ones.

use super::Pilot;
use crate::command::Command;
use crate::config::PilotConfig;
use crate::kinematics::KinematicBody;
use crate::memory::EngagementMemory;
use crate::snapshot::{ship_body, TickSnapshot};
use crate::targeting::{plan_shot, turn_toward};
use crate::threat::{classify, ThreatRecord};

pub(super) const DESCRIPTION: &str =
    "Ranks collision-course rocks by time to impact, then the rest by danger; shoots or turns toward the top unclaimed one.";

pub struct PrioritizedPilot {
    cfg: PilotConfig,
    memory: EngagementMemory,
}

impl PrioritizedPilot {
    pub fn new(cfg: PilotConfig) -> Self {
        let memory = EngagementMemory::new(cfg.memory_rotation);
        Self { cfg, memory }
    }

    pub fn memory(&self) -> &EngagementMemory {
        &self.memory
    }

    /// Fires if a bullet can reach `candidate` inside the field; otherwise
    /// turns toward it. The rock the bullet meets first is claimed only when
    /// the gun is ready, since a `Fire` during cooldown is dropped.
    fn engage(
        &mut self,
        ship: &KinematicBody,
        heading_deg: f64,
        frames_to_fire: u32,
        candidate: &ThreatRecord,
        asteroids: &[KinematicBody],
    ) -> Command {
        let target = &candidate.body;
        if let Some(plan) = plan_shot(&self.cfg, ship, heading_deg, target, asteroids, &self.memory)
        {
            if frames_to_fire == 0 {
                let rotated = self.memory.commit(plan.claim_id);
                tracing::debug!(
                    target = plan.target_id,
                    claim = plan.claim_id,
                    class = ?candidate.class,
                    t = plan.intercept.time,
                    rotated,
                    "firing"
                );
            } else {
                tracing::trace!(target = plan.target_id, frames_to_fire, "lined up, gun cooling");
            }
            return Command::Fire;
        }

        let bearing = ship.bearing_to(target);
        let direction = turn_toward(heading_deg, bearing, self.cfg.default_turn);
        tracing::debug!(
            target = target.id,
            class = ?candidate.class,
            bearing,
            ?direction,
            "no shot, turning"
        );
        Command::Turn(direction)
    }
}

impl Pilot for PrioritizedPilot {
    fn id(&self) -> &'static str {
        "prioritized"
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn new_game(&mut self) {
        self.memory.reset();
    }

    fn decide(&mut self, tick: &TickSnapshot) -> Command {
        let asteroids = tick.asteroid_bodies();
        if asteroids.is_empty() {
            return Command::HOLD;
        }

        let heading = tick.heading_deg;
        let ship = ship_body(&self.cfg, heading);
        let mut threats = classify(&asteroids, &ship, self.cfg.shield_lookahead_seconds());

        if let Some(rock) = threats.emergencies.first() {
            tracing::debug!(id = rock.id, "asteroid on the hull, raising shield");
            return Command::RaiseShield;
        }

        let mut skipped = 0usize;
        match threats.next_candidate(&self.memory, &mut skipped) {
            Some(candidate) => {
                self.engage(&ship, heading, tick.frames_to_fire, &candidate, &asteroids)
            }
            None => {
                tracing::debug!(skipped, "every asteroid already engaged, sweeping");
                Command::Turn(self.cfg.default_turn)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::TurnDirection;
    use crate::snapshot::AsteroidSnapshot;

    fn rock(id: u64, x: f64, y: f64, heading_deg: f64, speed: f64, radius: f64) -> AsteroidSnapshot {
        AsteroidSnapshot {
            id,
            x,
            y,
            heading_deg,
            speed,
            radius,
        }
    }

    fn tick(heading_deg: f64, asteroids: Vec<AsteroidSnapshot>) -> TickSnapshot {
        TickSnapshot {
            asteroids,
            heading_deg,
            frames_to_fire: 0,
        }
    }

    fn pilot() -> PrioritizedPilot {
        PrioritizedPilot::new(PilotConfig::default())
    }

    #[test]
    fn empty_field_holds() {
        assert_eq!(pilot().decide(&tick(0.0, vec![])), Command::HOLD);
    }

    #[test]
    fn shield_only_on_contact() {
        let mut pilot = pilot();
        // Rock closing from the left while the ship faces right.
        let far = tick(0.0, vec![rock(1, -100.0, 0.0, 0.0, 100.0, 20.0)]);
        let cmd = pilot.decide(&far);
        assert!(!cmd.is_shield(), "got {cmd:?}");

        let touching = tick(0.0, vec![rock(1, -28.0, 0.0, 0.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&touching), Command::RaiseShield);
    }

    #[test]
    fn fires_at_rock_dead_ahead() {
        let mut pilot = pilot();
        let t = tick(0.0, vec![rock(7, 200.0, 0.0, 180.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&t), Command::Fire);
        assert!(pilot.memory().is_engaged(7));
    }

    #[test]
    fn engaged_rock_is_not_refired() {
        let mut pilot = pilot();
        let t = tick(0.0, vec![rock(7, 200.0, 0.0, 180.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&t), Command::Fire);
        // Same rock, still top threat, already claimed: sweep instead.
        assert_eq!(pilot.decide(&t), Command::Turn(TurnDirection::Left));
    }

    #[test]
    fn cooldown_shot_does_not_claim() {
        let mut pilot = pilot();
        let cooling = TickSnapshot {
            frames_to_fire: 5,
            ..tick(0.0, vec![rock(7, 200.0, 0.0, 180.0, 100.0, 20.0)])
        };
        assert_eq!(pilot.decide(&cooling), Command::Fire);
        assert!(!pilot.memory().is_engaged(7));
        assert_eq!(pilot.memory().commits(), 0);

        // Gun ready: the incoming rock is still a candidate and gets the shot.
        let ready = tick(0.0, vec![rock(7, 195.0, 0.0, 180.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&ready), Command::Fire);
        assert!(pilot.memory().is_engaged(7));
    }

    #[test]
    fn engaged_rock_falls_through_to_next_candidate() {
        let mut pilot = pilot();
        let first = tick(0.0, vec![rock(7, 200.0, 0.0, 180.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&first), Command::Fire);

        let second = tick(
            0.0,
            vec![
                rock(7, 195.0, 0.0, 180.0, 100.0, 20.0),
                rock(8, 0.0, -250.0, 0.0, 0.0, 20.0),
            ],
        );
        // Rock 8 sits straight below: turn clockwise toward it.
        assert_eq!(pilot.decide(&second), Command::Turn(TurnDirection::Right));
    }

    #[test]
    fn direct_threat_beats_indirect() {
        let mut pilot = pilot();
        // Rock 1 drifts away dead ahead (shootable, indirect). Rock 2 comes
        // straight down from above (direct). The direct one must be engaged.
        let t = tick(
            0.0,
            vec![
                rock(1, 150.0, 0.0, 0.0, 20.0, 40.0),
                rock(2, 0.0, 300.0, 270.0, 100.0, 20.0),
            ],
        );
        assert_eq!(pilot.decide(&t), Command::Turn(TurnDirection::Left));
        assert!(pilot.memory().is_empty());
    }

    #[test]
    fn opposite_bearing_uses_default_turn() {
        let cfg = PilotConfig {
            default_turn: TurnDirection::Right,
            ..PilotConfig::default()
        };
        let mut pilot = PrioritizedPilot::new(cfg);
        let t = tick(0.0, vec![rock(1, -200.0, 0.0, 0.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&t), Command::Turn(TurnDirection::Right));
    }

    #[test]
    fn out_of_field_shot_turns_instead() {
        let mut pilot = pilot();
        // Dead ahead but running for the right edge faster than the bullet
        // can catch it before it leaves the field.
        let t = tick(0.0, vec![rock(1, 300.0, 0.0, 0.0, 190.0, 20.0)]);
        let cmd = pilot.decide(&t);
        assert_eq!(cmd, Command::Turn(TurnDirection::None));
        assert!(pilot.memory().is_empty());
    }

    #[test]
    fn new_game_clears_claims() {
        let mut pilot = pilot();
        let t = tick(0.0, vec![rock(7, 200.0, 0.0, 180.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&t), Command::Fire);
        pilot.new_game();
        assert!(pilot.memory().is_empty());
        assert_eq!(pilot.decide(&t), Command::Fire);
    }

    #[test]
    fn memory_rotates_after_five_commits() {
        let mut pilot = pilot();
        for id in 1..=4u64 {
            let t = tick(0.0, vec![rock(id, 200.0, 0.0, 180.0, 100.0, 20.0)]);
            assert_eq!(pilot.decide(&t), Command::Fire);
        }
        assert_eq!(pilot.memory().len(), 4);
        let t = tick(0.0, vec![rock(5, 200.0, 0.0, 180.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&t), Command::Fire);
        assert!(pilot.memory().is_empty());
        let t = tick(0.0, vec![rock(1, 200.0, 0.0, 180.0, 100.0, 20.0)]);
        assert_eq!(pilot.decide(&t), Command::Fire);
    }
}
