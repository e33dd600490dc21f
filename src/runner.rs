use crate::command::{Command, TurnDirection};
use crate::pilots::Pilot;
use crate::snapshot::TickSnapshot;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decision {
    pub command: Command,
    pub elapsed: Duration,
    pub over_budget: bool,
}

/// Asks `pilot` for one command and times it. Overruns are reported, never
/// enforced: the command is still returned.
pub fn decide_within_budget(
    pilot: &mut dyn Pilot,
    tick: &TickSnapshot,
    budget: Duration,
) -> Decision {
    let started = Instant::now();
    let command = pilot.decide(tick);
    let elapsed = started.elapsed();
    let over_budget = elapsed > budget;
    if over_budget {
        tracing::warn!(
            pilot = pilot.id(),
            asteroids = tick.asteroids.len(),
            elapsed_us = elapsed.as_micros() as u64,
            budget_us = budget.as_micros() as u64,
            "decision overran its budget"
        );
    }
    Decision {
        command,
        elapsed,
        over_budget,
    }
}

// ── Recorded sessions ───────────────────────────────────────────────

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordedGame {
    pub ticks: Vec<TickSnapshot>,
}

/// Snapshots captured from a frame loop, one list per game.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub name: Option<String>,
    pub games: Vec<RecordedGame>,
}

pub fn load_session(path: &Path) -> Result<Session> {
    let raw = fs::read(path)
        .with_context(|| format!("failed reading session {}", path.display()))?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("failed parsing session {}", path.display()))
}

pub fn load_tick(path: &Path) -> Result<TickSnapshot> {
    let raw = fs::read(path)
        .with_context(|| format!("failed reading snapshot {}", path.display()))?;
    serde_json::from_slice(&raw)
        .with_context(|| format!("failed parsing snapshot {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(
        path,
        serde_json::to_vec_pretty(value).context("failed to serialize json")?,
    )
    .with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

// ── Replay ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandCounts {
    pub fire: u32,
    pub turn_left: u32,
    pub turn_right: u32,
    pub hold: u32,
    pub shield: u32,
}

impl CommandCounts {
    pub fn record(&mut self, command: Command) {
        match command {
            Command::Fire => self.fire += 1,
            Command::Turn(TurnDirection::Left) => self.turn_left += 1,
            Command::Turn(TurnDirection::Right) => self.turn_right += 1,
            Command::Turn(TurnDirection::None) => self.hold += 1,
            Command::RaiseShield => self.shield += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.fire + self.turn_left + self.turn_right + self.hold + self.shield
    }

    fn absorb(&mut self, other: &CommandCounts) {
        self.fire += other.fire;
        self.turn_left += other.turn_left;
        self.turn_right += other.turn_right;
        self.hold += other.hold;
        self.shield += other.shield;
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameMetrics {
    pub game: usize,
    pub ticks: u32,
    pub commands: CommandCounts,
    pub overruns: u32,
    pub max_decision_us: u64,
    pub total_decision_us: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReplayMetrics {
    pub pilot_id: String,
    pub session: Option<String>,
    pub game_count: usize,
    pub tick_count: u32,
    pub commands: CommandCounts,
    pub overruns: u32,
    pub max_decision_us: u64,
    pub mean_decision_us: f64,
    pub games: Vec<GameMetrics>,
}

#[derive(Clone, Debug)]
pub struct ReplayArtifact {
    pub metrics: ReplayMetrics,
    /// Commands per game, in tick order.
    pub commands: Vec<Vec<Command>>,
}

/// Feeds every recorded tick to `pilot`, signalling a new game before each
/// recorded game.
pub fn replay(pilot: &mut dyn Pilot, session: &Session, budget: Duration) -> Result<ReplayArtifact> {
    if session.games.is_empty() {
        return Err(anyhow!("session has no games"));
    }

    let mut games = Vec::with_capacity(session.games.len());
    let mut commands = Vec::with_capacity(session.games.len());
    for (index, game) in session.games.iter().enumerate() {
        pilot.new_game();
        let mut metrics = GameMetrics {
            game: index,
            ..GameMetrics::default()
        };
        let mut issued = Vec::with_capacity(game.ticks.len());
        for tick in &game.ticks {
            let decision = decide_within_budget(pilot, tick, budget);
            let us = decision.elapsed.as_micros() as u64;
            metrics.ticks += 1;
            metrics.commands.record(decision.command);
            metrics.total_decision_us += us;
            metrics.max_decision_us = metrics.max_decision_us.max(us);
            if decision.over_budget {
                metrics.overruns += 1;
            }
            issued.push(decision.command);
        }
        tracing::debug!(
            game = index,
            ticks = metrics.ticks,
            fire = metrics.commands.fire,
            shield = metrics.commands.shield,
            "game replayed"
        );
        games.push(metrics);
        commands.push(issued);
    }

    let mut totals = CommandCounts::default();
    let mut tick_count = 0u32;
    let mut overruns = 0u32;
    let mut max_decision_us = 0u64;
    let mut total_decision_us = 0u64;
    for game in &games {
        totals.absorb(&game.commands);
        tick_count += game.ticks;
        overruns += game.overruns;
        max_decision_us = max_decision_us.max(game.max_decision_us);
        total_decision_us += game.total_decision_us;
    }

    Ok(ReplayArtifact {
        metrics: ReplayMetrics {
            pilot_id: pilot.id().to_string(),
            session: session.name.clone(),
            game_count: games.len(),
            tick_count,
            commands: totals,
            overruns,
            max_decision_us,
            mean_decision_us: if tick_count == 0 {
                0.0
            } else {
                total_decision_us as f64 / tick_count as f64
            },
            games,
        },
        commands,
    })
}
