//! Terminal Tetris 2048 runner.
//!
//! Pieces fall on a timer set by the difficulty. Once a piece locks, equal
//! touching tiles merge, unsupported tiles drop out and full rows clear.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tetris_2048::core::{Game, GameSnapshot, GridConfig, TickOutcome};
use tetris_2048::input::{handle_key_event, should_quit};
use tetris_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris_2048::types::{Difficulty, GameAction, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Grid width in cells (4..=64).
    #[arg(long, env = "TETRIS2048_WIDTH", default_value_t = DEFAULT_GRID_WIDTH)]
    width: u8,
    /// Grid height in cells (4..=64).
    #[arg(long, env = "TETRIS2048_HEIGHT", default_value_t = DEFAULT_GRID_HEIGHT)]
    height: u8,
    /// Difficulty preselected on the start menu: easy, medium or hard.
    #[arg(long, env = "TETRIS2048_DIFFICULTY", default_value = "medium", value_parser = parse_difficulty)]
    difficulty: Difficulty,
    /// Seed for piece and tile generation. Defaults to the clock.
    #[arg(long, env = "TETRIS2048_SEED")]
    seed: Option<u64>,
    /// Write logs to this file. Nothing is logged without it.
    #[arg(long, env = "TETRIS2048_LOG_FILE")]
    log_file: Option<PathBuf>,
    /// Tracing filter used when RUST_LOG is unset, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    log: String,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty `{s}` (easy, medium, hard)"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref(), &cli.log)?;

    let config = GridConfig::new(cli.width, cli.height).context("invalid grid size")?;
    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut game = Game::new(config, seed);
    game.set_difficulty(cli.difficulty);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(
        score = game.score(),
        highest = game.highest_number(),
        pieces = game.pieces_locked(),
        "session ended"
    );
    result
}

fn init_logging(path: Option<&Path>, default_filter: &str) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file =
        File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn run(term: &mut TerminalRenderer, game: &mut Game) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
            game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let tick = Duration::from_millis(game.tick_ms() as u64);
        let timeout = tick.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        trace!(action = action.as_str(), "key action");
                        if game.apply_action(action) {
                            dirty = true;
                            if matches!(
                                action,
                                GameAction::Start | GameAction::StartWith(_) | GameAction::Restart
                            ) {
                                last_tick = Instant::now();
                            }
                        }
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            match game.tick() {
                TickOutcome::Idle => {}
                TickOutcome::GameOver(_) => {
                    info!(
                        score = game.score(),
                        reached_2048 = game.reached_max_tile(),
                        "game over"
                    );
                    dirty = true;
                }
                TickOutcome::Fell | TickOutcome::Locked(_) => dirty = true,
            }
        }
    }
}
