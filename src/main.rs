use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use snake_sim::config::{EngineConfig, MIN_OBSTACLE_CLUSTER_SIZE, ObstaclePolicy, WallMode};
use snake_sim::error::ConfigError;
use snake_sim::game::GameState;
use snake_sim::input::{Direction, GameInput};
use snake_sim::session::{Session, SessionOutcome};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode summary: {0}")]
    Output(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum WallsArg {
    Wrap,
    Bounded,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ObstaclesArg {
    None,
    Cluster,
    Cadence,
}

/// Runs a headless Snake simulation and prints the final state as JSON.
#[derive(Debug, Parser)]
struct Cli {
    /// JSON engine config; command-line flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Side length of the square grid.
    #[arg(long)]
    grid_size: Option<u16>,

    #[arg(long, value_enum)]
    walls: Option<WallsArg>,

    #[arg(long, value_enum)]
    obstacles: Option<ObstaclesArg>,

    /// Keep the fruit type fixed instead of alternating.
    #[arg(long = "no-fruit-toggle")]
    no_fruit_toggle: bool,

    /// Seed for the random source; drawn from entropy when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum number of ticks to run.
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// One character per tick: U, D, L, R to turn, anything else to go straight.
    #[arg(long, default_value = "")]
    moves: String,
}

#[derive(Debug, Serialize)]
struct Summary<'a> {
    seed: u64,
    ticks_run: u64,
    best_score: u32,
    outcome: &'static str,
    state: &'a GameState,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("snake-sim: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = resolve_config(cli)?;
    let mut session = match cli.seed {
        Some(seed) => Session::new(config, seed)?,
        None => Session::from_entropy(config)?,
    };
    info!(seed = session.seed(), grid_size = config.grid_size, "simulation started");

    let moves: Vec<char> = cli.moves.chars().collect();
    let mut ticks_run = 0;
    let mut outcome = session.outcome();

    while ticks_run < cli.ticks && outcome == SessionOutcome::Running {
        let index = usize::try_from(ticks_run).unwrap_or(usize::MAX);
        if let Some(direction) = moves.get(index).copied().and_then(move_direction) {
            session.apply_input(GameInput::Direction(direction));
        }

        outcome = session.tick();
        ticks_run += 1;
    }

    info!(ticks_run, ?outcome, score = session.state().score, "simulation finished");

    let summary = Summary {
        seed: session.seed(),
        ticks_run,
        best_score: session.best_score(),
        outcome: outcome_name(outcome),
        state: session.state(),
    };
    let json = serde_json::to_string_pretty(&summary)?;
    println!("{json}");

    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<EngineConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if let Some(grid_size) = cli.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(walls) = cli.walls {
        config.walls = match walls {
            WallsArg::Wrap => WallMode::Wrap,
            WallsArg::Bounded => WallMode::Bounded,
        };
    }
    if let Some(obstacles) = cli.obstacles {
        config.obstacles = match obstacles {
            ObstaclesArg::None => ObstaclePolicy::None,
            ObstaclesArg::Cluster => ObstaclePolicy::EatCluster {
                size: MIN_OBSTACLE_CLUSTER_SIZE,
            },
            ObstaclesArg::Cadence => ObstaclePolicy::cadence(),
        };
    }
    if cli.no_fruit_toggle {
        config.fruit_toggle = false;
    }

    config.validate()?;
    Ok(config)
}

fn move_direction(symbol: char) -> Option<Direction> {
    match symbol.to_ascii_uppercase() {
        'U' => Some(Direction::Up),
        'D' => Some(Direction::Down),
        'L' => Some(Direction::Left),
        'R' => Some(Direction::Right),
        _ => None,
    }
}

fn outcome_name(outcome: SessionOutcome) -> &'static str {
    match outcome {
        SessionOutcome::Running => "running",
        SessionOutcome::Paused => "paused",
        SessionOutcome::GameOver => "game_over",
        SessionOutcome::Victory => "victory",
    }
}
