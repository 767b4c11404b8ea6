//! Headless BASTION runner.
//!
//! Plays one match and prints the report as JSON on stdout. By default
//! both sides are driven by the planning agent; with `--human-home` the
//! home side takes JSON commands on stdin, one per line.

use std::fs;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bastion_app::error::AppError;
use bastion_app::game_loop::{self, LoopCommand, LoopOptions};
use bastion_app::session::{self, StageSource};
use bastion_sim::{Controller, MatchConfig, MatchEngine};

#[derive(Parser, Debug)]
#[command(name = "bastion")]
#[command(about = "Run a BASTION lane battle headlessly")]
struct Cli {
    /// Built-in stage to play
    #[arg(long, default_value_t = 1)]
    stage: u32,

    /// Load the stage from a JSON file instead of the built-ins
    #[arg(long)]
    stage_file: Option<PathBuf>,

    /// Random seed for the planning agents
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Give up after this many simulated seconds
    #[arg(long, default_value_t = 600.0)]
    max_secs: f64,

    /// Pace the simulation to wall-clock time
    #[arg(long)]
    realtime: bool,

    /// Drive the home side from stdin instead of the agent
    #[arg(long)]
    human_home: bool,

    /// Campaign progress file; gates built-in stages and records stars
    #[arg(long)]
    progress: Option<PathBuf>,

    /// Write every agent decision and plan event to this JSON file
    #[arg(long)]
    agent_log: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let progress = cli
        .progress
        .as_deref()
        .map(session::load_progress)
        .transpose()?;

    let source = match &cli.stage_file {
        Some(path) => StageSource::File(path),
        None => StageSource::Builtin(cli.stage),
    };
    let stage = session::resolve_stage(&source, progress.as_ref())?;
    info!(stage = stage.id, name = %stage.name, seed = cli.seed, "starting match");

    let config = MatchConfig {
        seed: cli.seed,
        stage,
        home: if cli.human_home {
            Controller::Human
        } else {
            Controller::Agent
        },
        away: Controller::Agent,
        ..Default::default()
    };
    let mut engine = MatchEngine::new(config);

    let commands = if cli.human_home {
        game_loop::spawn_command_reader(BufReader::new(io::stdin()))?
    } else {
        let (_tx, rx) = mpsc::channel::<LoopCommand>();
        rx
    };

    let options = LoopOptions {
        max_secs: cli.max_secs,
        realtime: cli.realtime,
        record_agent_log: cli.agent_log.is_some(),
    };
    let report = game_loop::run_match(&mut engine, &options, &commands);
    info!(
        outcome = ?report.outcome,
        secs = report.elapsed_secs,
        stars = report.home_stars,
        "match over"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(path) = &cli.agent_log {
        fs::write(path, serde_json::to_string_pretty(&report.agent_log)?)?;
        info!(entries = report.agent_log.len(), path = %path.display(), "agent log written");
    }

    if let (Some(path), Some(progress)) = (cli.progress.as_deref(), progress) {
        if matches!(source, StageSource::Builtin(_)) {
            session::record_result(path, progress, &report)?;
        }
    }
    Ok(())
}
