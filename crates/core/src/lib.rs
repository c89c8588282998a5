//! Core game logic - Tetris movement with 2048 tile merging
//!
//! This crate holds all the game rules and state. It has no terminal, input
//! or I/O dependencies, so it can be driven headless from tests and benches.
//!
//! - **Deterministic**: the same seed produces the same pieces
//! - **Tick driven**: one down-move attempt per tick, settle only after a lock
//! - **Bounds-safe**: out-of-grid queries read as empty, never fail
//!
//! # Module Structure
//!
//! - [`tile`]: numbered tiles, merging and the value-to-color palette
//! - [`tetromino`]: shape matrices, movement, rotation and lock trimming
//! - [`grid`]: locked tiles, the settle pipeline and scoring
//! - [`game`]: the session driver (menu, pause, tick, restart)
//! - [`rng`]: seeded piece spawning
//! - [`config`]: validated grid dimensions
//! - [`snapshot`]: plain render view of a session
//!
//! # Example
//!
//! ```
//! use tetris_2048_core::{Game, GridConfig, TickOutcome};
//! use tetris_2048_types::{Difficulty, GameAction};
//!
//! let mut game = Game::new(GridConfig::default(), 12345);
//! game.apply_action(GameAction::StartWith(Difficulty::Easy));
//!
//! game.apply_action(GameAction::HardDrop);
//! assert!(matches!(game.tick(), TickOutcome::Locked(_)));
//! assert_eq!(game.pieces_locked(), 1);
//! assert!(game.grid().tile_count() > 0);
//! ```

pub mod config;
pub mod game;
pub mod grid;
pub mod rng;
pub mod snapshot;
pub mod tetromino;
pub mod tile;

pub use tetris_2048_types as types;

pub use config::{ConfigError, GridConfig};
pub use game::{Game, Phase, TickOutcome};
pub use grid::{GameGrid, MergeStats, Removal, SettleReport};
pub use rng::Spawner;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tetromino::{ShapeMatrix, Tetromino, TileBlock};
pub use tile::{color_for, Cell, Tile, TileColors};
