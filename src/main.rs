use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use asteroids_pilot::benchmark::{self, BenchmarkConfig};
use asteroids_pilot::config::PilotConfig;
use asteroids_pilot::pilots::{describe_pilots, pilot_from_config};
use asteroids_pilot::runner;

#[derive(Parser)]
#[command(
    name = "asteroids-pilot",
    about = "Threat-ranking ship autopilot: single decisions, session replays, benchmarks"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide one tick from a snapshot file and print the command as JSON
    Decide {
        /// Tick snapshot (JSON)
        #[arg(long)]
        snapshot: PathBuf,

        /// Config file path (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured strategy
        #[arg(long)]
        strategy: Option<String>,
    },

    /// Replay a recorded session and report decision metrics
    Replay {
        /// Session file (JSON)
        #[arg(long)]
        session: PathBuf,

        /// Config file path (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured strategy
        #[arg(long)]
        strategy: Option<String>,

        /// Write metrics and the issued commands here
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Replay many sessions in parallel
    Bench {
        /// Session files (JSON)
        #[arg(long, num_args = 1.., required = true)]
        sessions: Vec<PathBuf>,

        /// Config file path (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured strategy
        #[arg(long)]
        strategy: Option<String>,

        /// Output directory
        #[arg(long, default_value = "bench-output")]
        out_dir: PathBuf,

        /// Parallel jobs (default: all cores)
        #[arg(long)]
        jobs: Option<usize>,
    },

    /// Print the effective config as JSON
    ShowConfig {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured strategy
        #[arg(long)]
        strategy: Option<String>,
    },

    /// List available pilots
    Pilots,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Decide {
            snapshot,
            config,
            strategy,
        } => {
            let cfg = load_config(config, strategy)?;
            let tick = runner::load_tick(&snapshot)?;
            let mut pilot = pilot_from_config(&cfg)?;
            let decision =
                runner::decide_within_budget(pilot.as_mut(), &tick, cfg.decision_budget());
            tracing::info!(
                pilot = pilot.id(),
                command = %decision.command,
                elapsed_us = decision.elapsed.as_micros() as u64,
                over_budget = decision.over_budget,
                "decided"
            );
            println!("{}", serde_json::to_string(&decision.command)?);
        }

        Command::Replay {
            session,
            config,
            strategy,
            output,
        } => {
            let cfg = load_config(config, strategy)?;
            let recorded = runner::load_session(&session)?;
            let mut pilot = pilot_from_config(&cfg)?;
            let artifact = runner::replay(pilot.as_mut(), &recorded, cfg.decision_budget())?;
            let m = &artifact.metrics;
            tracing::info!(
                "pilot={} games={} ticks={} fire={} left={} right={} hold={} shield={} overruns={} max_us={} mean_us={:.1}",
                m.pilot_id,
                m.game_count,
                m.tick_count,
                m.commands.fire,
                m.commands.turn_left,
                m.commands.turn_right,
                m.commands.hold,
                m.commands.shield,
                m.overruns,
                m.max_decision_us,
                m.mean_decision_us,
            );
            if let Some(path) = output {
                runner::write_json(
                    &path,
                    &serde_json::json!({
                        "metrics": m,
                        "commands": artifact.commands,
                    }),
                )?;
                tracing::info!("wrote {}", path.display());
            } else {
                println!("{}", serde_json::to_string_pretty(m)?);
            }
        }

        Command::Bench {
            sessions,
            config,
            strategy,
            out_dir,
            jobs,
        } => {
            let cfg = load_config(config, strategy)?;
            let report = benchmark::run_benchmark(BenchmarkConfig {
                pilot_config: cfg,
                sessions,
                out_dir: out_dir.clone(),
                jobs,
            })?;
            eprintln!(
                "pilot={} sessions={} ticks={} overruns={} ({:.3}%) fire_rate={:.3} max_us={} mean_us={:.1}",
                report.pilot_id,
                report.session_count,
                report.tick_count,
                report.overrun_count,
                report.overrun_rate * 100.0,
                report.fire_rate,
                report.max_decision_us,
                report.mean_decision_us,
            );
            eprintln!("summary: {}", out_dir.join("summary.json").display());
        }

        Command::ShowConfig { config, strategy } => {
            let cfg = load_config(config, strategy)?;
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }

        Command::Pilots => {
            for (id, description) in describe_pilots() {
                println!("{id:<14} {description}");
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>, strategy: Option<String>) -> Result<PilotConfig> {
    let mut cfg = match path {
        Some(p) => PilotConfig::from_file(&p)?,
        None => PilotConfig::default(),
    };
    if let Some(id) = strategy {
        cfg.strategy = id;
    }
    cfg.validate().map_err(|err| anyhow!("invalid config: {err}"))?;
    Ok(cfg)
}
