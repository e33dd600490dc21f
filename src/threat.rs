use crate::kinematics::KinematicBody;
use crate::memory::EngagementMemory;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatClass {
    /// On a collision course with the ship; keyed by time to impact.
    Direct,
    /// Not on a collision course; keyed by `distance / (speed · radius)`.
    Indirect,
}

/// An asteroid paired with its urgency. Smaller sorts first.
#[derive(Clone, Copy, Debug)]
pub struct ThreatRecord {
    pub body: KinematicBody,
    pub class: ThreatClass,
    pub key: OrderedFloat<f64>,
}

impl ThreatRecord {
    fn rank(&self) -> (ThreatClass, OrderedFloat<f64>, u64) {
        (self.class, self.key, self.body.id)
    }
}

impl PartialEq for ThreatRecord {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for ThreatRecord {}

impl PartialOrd for ThreatRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ThreatRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Min-heap of threats, most urgent on top.
#[derive(Clone, Debug, Default)]
pub struct ThreatQueue {
    heap: BinaryHeap<Reverse<ThreatRecord>>,
}

impl ThreatQueue {
    pub fn push(&mut self, record: ThreatRecord) {
        self.heap.push(Reverse(record));
    }

    pub fn pop(&mut self) -> Option<ThreatRecord> {
        self.heap.pop().map(|Reverse(record)| record)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn into_sorted_vec(self) -> Vec<ThreatRecord> {
        let mut out: Vec<ThreatRecord> = self.heap.into_iter().map(|Reverse(r)| r).collect();
        out.sort();
        out
    }
}

/// Result of classifying one tick's asteroids against the ship.
#[derive(Clone, Debug, Default)]
pub struct Threats {
    /// Asteroids already touching the ship (or about to, with lookahead).
    pub emergencies: Vec<KinematicBody>,
    pub direct: ThreatQueue,
    pub indirect: ThreatQueue,
}

impl Threats {
    pub fn total(&self) -> usize {
        self.emergencies.len() + self.direct.len() + self.indirect.len()
    }

    /// Pops the most urgent threat not already engaged: every direct threat
    /// before any indirect one. Engaged threats are discarded; their count
    /// is added to `skipped`.
    pub fn next_candidate(
        &mut self,
        memory: &EngagementMemory,
        skipped: &mut usize,
    ) -> Option<ThreatRecord> {
        for queue in [&mut self.direct, &mut self.indirect] {
            while let Some(record) = queue.pop() {
                if memory.is_engaged(record.body.id) {
                    *skipped += 1;
                    continue;
                }
                return Some(record);
            }
        }
        None
    }
}

/// Danger ordering for asteroids that will miss the ship: close, fast and
/// large first. Degenerate inputs sort last.
pub fn indirect_key(asteroid: &KinematicBody, ship: &KinematicBody) -> f64 {
    let key = asteroid.distance(ship) / (asteroid.speed() * asteroid.radius);
    if key.is_nan() {
        f64::INFINITY
    } else {
        key
    }
}

/// Splits asteroids into emergencies, direct threats and indirect threats.
///
/// `lookahead_s` additionally flags asteroids that will overlap the ship
/// that many seconds from now; zero checks only the present.
pub fn classify(asteroids: &[KinematicBody], ship: &KinematicBody, lookahead_s: f64) -> Threats {
    let mut threats = Threats::default();

    for asteroid in asteroids {
        let overlapping = asteroid.overlaps(ship)
            || (lookahead_s > 0.0 && asteroid.advanced(lookahead_s).overlaps(ship));
        if overlapping {
            threats.emergencies.push(*asteroid);
            continue;
        }

        match asteroid.time_to_collision(ship) {
            Some(prediction) => threats.direct.push(ThreatRecord {
                body: *asteroid,
                class: ThreatClass::Direct,
                key: OrderedFloat(prediction.time()),
            }),
            None => threats.indirect.push(ThreatRecord {
                body: *asteroid,
                class: ThreatClass::Indirect,
                key: OrderedFloat(indirect_key(asteroid, ship)),
            }),
        }
    }

    tracing::trace!(
        emergencies = threats.emergencies.len(),
        direct = threats.direct.len(),
        indirect = threats.indirect.len(),
        "classified asteroids"
    );
    threats
}
