use crate::command::TurnDirection;
use crate::config::PilotConfig;
use crate::kinematics::{inside_field, normalize_degrees, KinematicBody};
use crate::memory::EngagementMemory;
use crate::snapshot::bullet_body;
use glam::DVec2;

/// Where and when a bullet fired now meets a rock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletIntercept {
    pub time: f64,
    pub impact: DVec2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotPlan {
    /// The rock the pilot aimed at.
    pub target_id: u64,
    /// The rock the bullet reaches first; usually `target_id`.
    pub claim_id: u64,
    pub intercept: BulletIntercept,
}

/// Intercept of a bullet fired now along `heading_deg`, ignoring field bounds.
pub fn bullet_intercept(
    cfg: &PilotConfig,
    ship: &KinematicBody,
    heading_deg: f64,
    target: &KinematicBody,
) -> Option<BulletIntercept> {
    let bullet = bullet_body(cfg, ship, heading_deg);
    let time = target.time_to_collision(&bullet)?.time();
    Some(BulletIntercept {
        time,
        impact: target.position_at(time),
    })
}

/// Intercept that lands strictly inside the field. The field wraps, so a
/// hit predicted past the edge is treated as a miss.
pub fn in_field_intercept(
    cfg: &PilotConfig,
    ship: &KinematicBody,
    heading_deg: f64,
    target: &KinematicBody,
) -> Option<BulletIntercept> {
    bullet_intercept(cfg, ship, heading_deg, target)
        .filter(|hit| inside_field(hit.impact, cfg.field_half_size))
}

/// Plans a shot at `target`. When some other unclaimed rock sits earlier on
/// the bullet's path, that rock is the one claimed.
pub fn plan_shot(
    cfg: &PilotConfig,
    ship: &KinematicBody,
    heading_deg: f64,
    target: &KinematicBody,
    asteroids: &[KinematicBody],
    memory: &EngagementMemory,
) -> Option<ShotPlan> {
    let intercept = in_field_intercept(cfg, ship, heading_deg, target)?;

    let mut claim_id = target.id;
    let mut earliest = intercept.time;
    for other in asteroids {
        if other.id == target.id || memory.is_engaged(other.id) {
            continue;
        }
        let Some(hit) = in_field_intercept(cfg, ship, heading_deg, other) else {
            continue;
        };
        if hit.time < earliest || (hit.time == earliest && other.id < claim_id) {
            earliest = hit.time;
            claim_id = other.id;
        }
    }

    Some(ShotPlan {
        target_id: target.id,
        claim_id,
        intercept,
    })
}

/// Direction that brings `heading_deg` onto `bearing_deg` along the shorter
/// arc. Exactly opposite resolves to `tie`; already aligned holds.
pub fn turn_toward(heading_deg: f64, bearing_deg: f64, tie: TurnDirection) -> TurnDirection {
    let delta = normalize_degrees(bearing_deg - heading_deg);
    if delta.is_nan() || delta == 0.0 {
        TurnDirection::None
    } else if delta < 180.0 {
        TurnDirection::Left
    } else if delta > 180.0 {
        TurnDirection::Right
    } else {
        tie
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ship_body;
    use approx::assert_relative_eq;

    fn rock(id: u64, x: f64, y: f64, heading: f64, speed: f64, radius: f64) -> KinematicBody {
        KinematicBody::new(id, DVec2::new(x, y), heading, speed, radius)
    }

    #[test]
    fn stationary_rock_ahead_is_hit() {
        let cfg = PilotConfig::default();
        let ship = ship_body(&cfg, 0.0);
        let target = rock(1, 200.0, 0.0, 0.0, 0.0, 20.0);
        let hit = in_field_intercept(&cfg, &ship, 0.0, &target).expect("dead ahead");
        assert_relative_eq!(hit.time, (200.0 - 22.0) / 200.0, epsilon = 1e-9);
        assert_eq!(hit.impact, DVec2::new(200.0, 0.0));
    }

    #[test]
    fn rock_behind_is_missed() {
        let cfg = PilotConfig::default();
        let ship = ship_body(&cfg, 0.0);
        let target = rock(1, -200.0, 0.0, 0.0, 0.0, 20.0);
        assert!(bullet_intercept(&cfg, &ship, 0.0, &target).is_none());
    }

    #[test]
    fn impact_outside_field_is_rejected() {
        let cfg = PilotConfig::default();
        let ship = ship_body(&cfg, 90.0);
        // Running up the field fast enough that the bullet only catches it
        // past the top edge.
        let target = rock(1, 0.0, 300.0, 90.0, 150.0, 20.0);
        let raw = bullet_intercept(&cfg, &ship, 90.0, &target).expect("bullet is faster");
        assert!(raw.impact.y >= cfg.field_half_size);
        assert!(in_field_intercept(&cfg, &ship, 90.0, &target).is_none());
    }

    #[test]
    fn nearer_rock_on_the_line_is_claimed() {
        let cfg = PilotConfig::default();
        let ship = ship_body(&cfg, 0.0);
        let target = rock(7, 300.0, 0.0, 0.0, 0.0, 20.0);
        let blocker = rock(3, 120.0, 0.0, 0.0, 0.0, 20.0);
        let aside = rock(4, 0.0, 150.0, 0.0, 0.0, 20.0);
        let all = [target, blocker, aside];
        let memory = EngagementMemory::new(5);

        let plan = plan_shot(&cfg, &ship, 0.0, &target, &all, &memory).expect("clear shot");
        assert_eq!(plan.target_id, 7);
        assert_eq!(plan.claim_id, 3);

        let mut memory = EngagementMemory::new(5);
        memory.commit(3);
        let plan = plan_shot(&cfg, &ship, 0.0, &target, &all, &memory).expect("clear shot");
        assert_eq!(plan.claim_id, 7);
    }

    #[test]
    fn shorter_arc_wins() {
        let tie = TurnDirection::Left;
        assert_eq!(turn_toward(0.0, 90.0, tie), TurnDirection::Left);
        assert_eq!(turn_toward(0.0, 270.0, tie), TurnDirection::Right);
        assert_eq!(turn_toward(350.0, 10.0, tie), TurnDirection::Left);
        assert_eq!(turn_toward(10.0, 350.0, tie), TurnDirection::Right);
        assert_eq!(turn_toward(200.0, 90.0, tie), TurnDirection::Right);
        assert_eq!(turn_toward(90.0, 200.0, tie), TurnDirection::Left);
    }

    #[test]
    fn opposite_bearing_uses_tie_direction() {
        assert_eq!(turn_toward(0.0, 180.0, TurnDirection::Left), TurnDirection::Left);
        assert_eq!(turn_toward(45.0, 225.0, TurnDirection::Right), TurnDirection::Right);
    }

    #[test]
    fn aligned_heading_holds() {
        assert_eq!(turn_toward(123.0, 123.0, TurnDirection::Left), TurnDirection::None);
        assert_eq!(turn_toward(0.0, 360.0, TurnDirection::Left), TurnDirection::None);
        assert_eq!(turn_toward(f64::NAN, 10.0, TurnDirection::Left), TurnDirection::None);
    }
}
