use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use grid_snake::board::Board;
use grid_snake::config::GameConfig;
use grid_snake::error::GameError;
use grid_snake::game::{DeathReason, Game, Outcome};
use grid_snake::input::{CrosstermEvents, KeyMap};
use grid_snake::terminal_runtime::{TerminalSession, install_panic_hook};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed food placement for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (filter with RUST_LOG).
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        if let Err(error) = init_logging(path) {
            eprintln!("Failed to open log file {}: {error}", path.display());
            return ExitCode::FAILURE;
        }
    }

    install_panic_hook();

    match run(GameConfig::with_seed(cli.seed)) {
        Ok(Outcome::Quit { .. }) => ExitCode::SUCCESS,
        Ok(Outcome::Lost { reason, score }) => {
            eprintln!("game over: {}, score {score}", describe(reason));
            ExitCode::FAILURE
        }
        Err(err) => {
            error!(error = %err, "run aborted");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Plays one game. The terminal is restored before this returns.
fn run(config: GameConfig) -> Result<Outcome, GameError> {
    let session = TerminalSession::enter()?;
    let canvas = session.canvas()?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new(Board::new(canvas, rng), config);
    game.start(CrosstermEvents, KeyMap::default())
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grid_snake=debug"));

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .init();

    Ok(())
}

fn describe(reason: DeathReason) -> &'static str {
    match reason {
        DeathReason::WallCollision => "hit the wall",
        DeathReason::SelfCollision => "hit yourself",
    }
}
