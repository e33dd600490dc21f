use crate::config::PilotConfig;
use crate::pilots::pilot_from_config;
use crate::runner::{self, write_json, ReplayMetrics};
use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionRecord {
    pub path: String,
    pub session: Option<String>,
    pub game_count: usize,
    pub tick_count: u32,
    pub fire: u32,
    pub shield: u32,
    pub overruns: u32,
    pub max_decision_us: u64,
    pub mean_decision_us: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub pilot_id: String,
    pub budget_us: u64,
    pub session_count: usize,
    pub tick_count: u64,
    pub overrun_count: u64,
    pub overrun_rate: f64,
    pub fire_rate: f64,
    pub shield_rate: f64,
    pub max_decision_us: u64,
    pub mean_decision_us: f64,
    pub sessions: Vec<SessionRecord>,
}

pub struct BenchmarkConfig {
    pub pilot_config: PilotConfig,
    pub sessions: Vec<PathBuf>,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

/// Replays every session file with a fresh pilot each, in parallel, and
/// writes `summary.json` into `out_dir`.
pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.sessions.is_empty() {
        return Err(anyhow!("benchmark requires at least one session"));
    }
    config.pilot_config.validate()?;

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let budget = config.pilot_config.decision_budget();
    let run_one = |path: &PathBuf| -> Result<(PathBuf, ReplayMetrics)> {
        let session = runner::load_session(path)?;
        let mut pilot = pilot_from_config(&config.pilot_config)?;
        let artifact = runner::replay(pilot.as_mut(), &session, budget)
            .with_context(|| format!("replay failed for {}", path.display()))?;
        Ok((path.clone(), artifact.metrics))
    };

    let run_results: Vec<Result<(PathBuf, ReplayMetrics)>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.sessions.par_iter().map(run_one).collect())
    } else {
        config.sessions.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }

    let tick_count: u64 = runs.iter().map(|(_, m)| m.tick_count as u64).sum();
    let overrun_count: u64 = runs.iter().map(|(_, m)| m.overruns as u64).sum();
    let fire_count: u64 = runs.iter().map(|(_, m)| m.commands.fire as u64).sum();
    let shield_count: u64 = runs.iter().map(|(_, m)| m.commands.shield as u64).sum();
    let max_decision_us = runs
        .iter()
        .map(|(_, m)| m.max_decision_us)
        .max()
        .unwrap_or(0);
    let weighted_us: f64 = runs
        .iter()
        .map(|(_, m)| m.mean_decision_us * m.tick_count as f64)
        .sum();
    let rate = |count: u64| {
        if tick_count == 0 {
            0.0
        } else {
            count as f64 / tick_count as f64
        }
    };

    let sessions: Vec<SessionRecord> = runs
        .iter()
        .map(|(path, m)| SessionRecord {
            path: path.to_string_lossy().into_owned(),
            session: m.session.clone(),
            game_count: m.game_count,
            tick_count: m.tick_count,
            fire: m.commands.fire,
            shield: m.commands.shield,
            overruns: m.overruns,
            max_decision_us: m.max_decision_us,
            mean_decision_us: m.mean_decision_us,
        })
        .collect();

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        pilot_id: config.pilot_config.strategy.clone(),
        budget_us: config.pilot_config.decision_budget_us,
        session_count: sessions.len(),
        tick_count,
        overrun_count,
        overrun_rate: rate(overrun_count),
        fire_rate: rate(fire_count),
        shield_rate: rate(shield_count),
        max_decision_us,
        mean_decision_us: if tick_count == 0 {
            0.0
        } else {
            weighted_us / tick_count as f64
        },
        sessions,
    };

    write_json(&config.out_dir.join("summary.json"), &report)?;
    tracing::info!(
        pilot = %report.pilot_id,
        sessions = report.session_count,
        ticks = report.tick_count,
        overruns = report.overrun_count,
        max_decision_us = report.max_decision_us,
        "benchmark complete"
    );

    Ok(report)
}
