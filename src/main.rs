//! Terminal Tetris runner (default binary).
//!
//! Drives the core one fixed tick at a time: poll one key, step, sleep out
//! the rest of the tick. Frames go through `TerminalPresenter`.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use tty_tetris::core::{GameState, Presenter, StepOutcome};
use tty_tetris::input::{poll_input, InputEvent};
use tty_tetris::term::{GameView, TerminalPresenter, TerminalRenderer};
use tty_tetris::types::TICK_US;

/// How long the final frame stays up after the game ends
const GAME_OVER_HOLD: Duration = Duration::from_millis(1500);

#[derive(Parser, Debug)]
#[command(name = "tty-tetris", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Seed for the piece sequence. Defaults to the current time.
    #[arg(long)]
    seed: Option<u32>,

    /// Write logs to this file (filtered by RUST_LOG, default "info").
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let seed = args.seed.unwrap_or_else(clock_seed);
    info!("starting with seed {}", seed);

    let mut renderer = TerminalRenderer::new();
    renderer.enter()?;
    let mut presenter = TerminalPresenter::new(renderer, GameView::default());

    let result = run(&mut presenter, seed);

    // Always try to restore terminal state.
    let _ = presenter.renderer_mut().exit();

    let score = result?;
    info!("exiting with score {}", score);
    println!("Final score: {}", score);
    Ok(())
}

fn run(presenter: &mut TerminalPresenter, seed: u32) -> Result<u32> {
    let mut game = GameState::new(seed);
    let tick = Duration::from_micros(TICK_US);

    presenter.present(&game.snapshot())?;

    loop {
        let started = Instant::now();

        let action = match poll_input().context("reading keyboard input")? {
            Some(InputEvent::Quit) => {
                info!("quit requested");
                return Ok(game.score());
            }
            Some(InputEvent::Action(action)) => Some(action),
            None => None,
        };

        if let StepOutcome::GameOver { score } = game.step(action, presenter)? {
            thread::sleep(GAME_OVER_HOLD);
            return Ok(score);
        }

        if let Some(rest) = tick.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

/// Pipe `log` output to `path`; the terminal itself belongs to the game.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
