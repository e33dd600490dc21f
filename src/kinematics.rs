use crate::quadratic::Quadratic;
use glam::DVec2;
use serde::{Deserialize, Serialize};

// ── Angle helpers ───────────────────────────────────────────────────

/// Wraps degrees into `[0, 360)`.
#[inline]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Unit vector for a heading in degrees (0 = +x, counter-clockwise).
#[inline]
pub fn heading_vector(heading_deg: f64) -> DVec2 {
    let rads = heading_deg.to_radians();
    DVec2::new(rads.cos(), rads.sin())
}

/// Heading in degrees, `[0, 360)`, of a direction vector.
#[inline]
pub fn bearing_of(delta: DVec2) -> f64 {
    normalize_degrees(delta.y.atan2(delta.x).to_degrees())
}

// ── Bodies ──────────────────────────────────────────────────────────

/// A circle moving at constant velocity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub id: u64,
    pub position: DVec2,
    pub velocity: DVec2,
    pub radius: f64,
}

/// Outcome of [`KinematicBody::time_to_collision`] when the bodies do meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollisionPrediction {
    /// Already touching at `t = 0`.
    Immediate,
    /// First contact at this strictly positive time.
    At(f64),
}

impl CollisionPrediction {
    pub fn time(&self) -> f64 {
        match *self {
            CollisionPrediction::Immediate => 0.0,
            CollisionPrediction::At(t) => t,
        }
    }
}

impl KinematicBody {
    /// Builds a body from a heading in degrees and a scalar speed.
    pub fn new(id: u64, position: DVec2, heading_deg: f64, speed: f64, radius: f64) -> Self {
        Self {
            id,
            position,
            velocity: heading_vector(heading_deg) * speed,
            radius,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    pub fn distance(&self, other: &KinematicBody) -> f64 {
        self.position.distance(other.position)
    }

    pub fn position_at(&self, t: f64) -> DVec2 {
        self.position + self.velocity * t
    }

    pub fn advanced(&self, t: f64) -> KinematicBody {
        Self {
            position: self.position_at(t),
            ..*self
        }
    }

    /// Heading in `[0, 360)` from this body's center to `other`'s.
    pub fn bearing_to(&self, other: &KinematicBody) -> f64 {
        bearing_of(other.position - self.position)
    }

    pub fn overlaps(&self, other: &KinematicBody) -> bool {
        self.distance(other) <= self.radius + other.radius
    }

    /// Earliest time the two circles touch, assuming both keep their
    /// velocity. Non-finite geometry yields `None`.
    pub fn time_to_collision(&self, other: &KinematicBody) -> Option<CollisionPrediction> {
        let collide_dist = self.radius + other.radius;
        let distance = self.distance(other);
        if !distance.is_finite() || !collide_dist.is_finite() {
            return None;
        }
        if distance <= collide_dist {
            return Some(CollisionPrediction::Immediate);
        }

        let dp = self.position - other.position;
        let dv = self.velocity - other.velocity;
        let poly = Quadratic::new(
            dv.dot(dv),
            2.0 * dp.dot(dv),
            dp.dot(dp) - collide_dist * collide_dist,
        );
        poly.smallest_positive_root().map(CollisionPrediction::At)
    }
}

/// True when `point` lies strictly inside the square field `(-half, half)²`.
#[inline]
pub fn inside_field(point: DVec2, half_size: f64) -> bool {
    point.x > -half_size && point.x < half_size && point.y > -half_size && point.y < half_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::SQRT_2;

    fn assert_touching_at(a: &KinematicBody, b: &KinematicBody, t: f64) {
        let gap = a.advanced(t).distance(&b.advanced(t));
        let want = a.radius + b.radius;
        assert_relative_eq!(gap, want, max_relative = 1e-6);
    }

    #[test]
    fn overlapping_bodies_collide_immediately() {
        let a = KinematicBody::new(1, DVec2::ZERO, 0.0, 10.0, 5.0);
        let b = KinematicBody::new(2, DVec2::new(8.0, 0.0), 180.0, 3.0, 4.0);
        assert_eq!(a.time_to_collision(&b), Some(CollisionPrediction::Immediate));
        assert_eq!(b.time_to_collision(&a), Some(CollisionPrediction::Immediate));
    }

    #[test]
    fn diverging_bodies_never_collide() {
        let a = KinematicBody::new(1, DVec2::new(-10.0, 0.0), 180.0, 5.0, 1.0);
        let b = KinematicBody::new(2, DVec2::new(10.0, 0.0), 0.0, 5.0, 1.0);
        assert_eq!(a.time_to_collision(&b), None);
    }

    #[test]
    fn parallel_bodies_at_same_velocity_never_collide() {
        let a = KinematicBody::new(1, DVec2::new(0.0, 0.0), 45.0, 3.0, 1.0);
        let b = KinematicBody::new(2, DVec2::new(0.0, 10.0), 45.0, 3.0, 1.0);
        assert_eq!(a.time_to_collision(&b), None);
    }

    #[test]
    fn crossing_paths_touch_at_predicted_time() {
        let a = KinematicBody::new(0, DVec2::ZERO, 45.0, SQRT_2, 1.0);
        let b = KinematicBody::new(1, DVec2::new(3.0, 0.0), 90.0, 1.0, 1.0);
        let t = a.time_to_collision(&b).expect("paths cross").time();
        assert!(t > 0.0);
        assert_touching_at(&a, &b, t);
    }

    #[test]
    fn chasing_body_catches_up() {
        let a = KinematicBody::new(0, DVec2::new(-3.0, -3.0), 45.0, 8.0_f64.sqrt(), 1.0);
        let b = KinematicBody::new(1, DVec2::ZERO, 45.0, SQRT_2, 1.0);
        let prediction = a.time_to_collision(&b);
        let Some(CollisionPrediction::At(t)) = prediction else {
            panic!("expected a future collision, got {prediction:?}");
        };
        assert_touching_at(&a, &b, t);
    }

    #[test]
    fn head_on_time_matches_closed_form() {
        let a = KinematicBody::new(0, DVec2::new(-100.0, 0.0), 0.0, 10.0, 5.0);
        let b = KinematicBody::new(1, DVec2::new(100.0, 0.0), 180.0, 10.0, 5.0);
        let t = a.time_to_collision(&b).map(|p| p.time());
        assert_relative_eq!(t.unwrap_or(f64::NAN), 9.5, epsilon = 1e-9);
    }

    #[test]
    fn nan_position_degrades_to_no_collision() {
        let a = KinematicBody::new(0, DVec2::new(f64::NAN, 0.0), 0.0, 1.0, 1.0);
        let b = KinematicBody::new(1, DVec2::ZERO, 0.0, 0.0, 1.0);
        assert_eq!(a.time_to_collision(&b), None);
        assert_eq!(b.time_to_collision(&a), None);
    }

    #[test]
    fn bearings_and_normalization() {
        assert_relative_eq!(normalize_degrees(-90.0), 270.0);
        assert_relative_eq!(normalize_degrees(720.0), 0.0);
        assert_relative_eq!(normalize_degrees(-1e-18), 0.0);

        let ship = KinematicBody::new(0, DVec2::ZERO, 0.0, 0.0, 8.0);
        let rock = KinematicBody::new(1, DVec2::new(0.0, -50.0), 0.0, 0.0, 20.0);
        assert_relative_eq!(ship.bearing_to(&rock), 270.0, epsilon = 1e-9);
    }

    #[test]
    fn field_bounds_are_strict() {
        assert!(inside_field(DVec2::new(349.9, -349.9), 350.0));
        assert!(!inside_field(DVec2::new(350.0, 0.0), 350.0));
        assert!(!inside_field(DVec2::new(0.0, -350.0), 350.0));
    }
}
