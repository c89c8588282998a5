//! Game session module - drives one game from menu to game over
//!
//! This ties the grid, the active and next pieces, and the spawner together.
//! The outer loop feeds it [`GameAction`]s from input and calls
//! [`Game::tick`] once per fall interval. A tick tries one down move; when
//! that fails the piece is locked, the grid settles, and either the game ends
//! or the next piece becomes active.

use tracing::{debug, info};

use crate::config::GridConfig;
use crate::grid::{GameGrid, SettleReport};
use crate::rng::Spawner;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::tetromino::Tetromino;
use crate::types::{Difficulty, GameAction, MoveDirection, MAX_TILE_NUMBER};

/// Session lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting on the start menu
    #[default]
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing happened
    Idle,
    /// The active piece moved down one row
    Fell,
    /// The piece locked, the grid settled and the next piece spawned
    Locked(SettleReport),
    /// The piece locked above the grid; the game is over
    GameOver(SettleReport),
}

/// Complete game session
#[derive(Debug, Clone)]
pub struct Game {
    grid: GameGrid,
    active: Option<Tetromino>,
    next: Tetromino,
    spawner: Spawner,
    phase: Phase,
    difficulty: Difficulty,
    /// Monotonic game counter (increments on restart).
    episode_id: u32,
    pieces_locked: u32,
    /// Highest tile on the most recently locked piece.
    last_piece_highest: u16,
}

impl Game {
    /// Create a session on the start menu.
    pub fn new(config: GridConfig, seed: u64) -> Self {
        let grid = GameGrid::new(config);
        let mut spawner = Spawner::new(seed);
        let next = spawner.spawn(&grid);
        Self {
            grid,
            active: None,
            next,
            spawner,
            phase: Phase::Menu,
            difficulty: Difficulty::default(),
            episode_id: 0,
            pieces_locked: 0,
            last_piece_highest: 0,
        }
    }

    /// Leave the menu and spawn the first piece. No-op outside the menu.
    pub fn start(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.difficulty = difficulty;
        self.promote_next();
        self.phase = Phase::Playing;
        info!(
            difficulty = difficulty.as_str(),
            seed = self.spawner.seed(),
            width = self.grid.width(),
            height = self.grid.height(),
            "game started"
        );
        true
    }

    /// Clear the grid and score and begin a new game at the same difficulty.
    pub fn restart(&mut self) -> bool {
        if self.phase == Phase::Menu {
            return false;
        }
        self.grid.reset();
        self.next = self.spawner.spawn(&self.grid);
        self.promote_next();
        self.phase = Phase::Playing;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.pieces_locked = 0;
        self.last_piece_highest = 0;
        info!(episode = self.episode_id, "game restarted");
        true
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn grid(&self) -> &GameGrid {
        &self.grid
    }

    pub fn active(&self) -> Option<&Tetromino> {
        self.active.as_ref()
    }

    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn score(&self) -> u32 {
        self.grid.score()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Milliseconds between ticks for the current difficulty.
    pub fn tick_ms(&self) -> u32 {
        self.difficulty.tick_ms()
    }

    /// Highest tile seen on the grid or on the last locked piece.
    pub fn highest_number(&self) -> u16 {
        self.grid.highest_number().max(self.last_piece_highest)
    }

    /// True once a 2048 tile has been reached.
    pub fn reached_max_tile(&self) -> bool {
        self.highest_number() >= MAX_TILE_NUMBER
    }

    /// Make the preview piece active and draw a new preview.
    fn promote_next(&mut self) {
        let upcoming = self.spawner.spawn(&self.grid);
        self.active = Some(std::mem::replace(&mut self.next, upcoming));
    }

    fn with_active(&mut self, f: impl FnOnce(&mut Tetromino, &GameGrid) -> bool) -> bool {
        match self.active.as_mut() {
            Some(piece) => f(piece, &self.grid),
            None => false,
        }
    }

    /// Apply one input action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => self.start(self.difficulty),
            GameAction::StartWith(difficulty) => self.start(difficulty),
            GameAction::Restart => self.restart(),
            GameAction::Pause => match self.phase {
                Phase::Playing => {
                    self.phase = Phase::Paused;
                    true
                }
                Phase::Paused => {
                    self.phase = Phase::Playing;
                    true
                }
                _ => false,
            },
            _ if self.phase != Phase::Playing => false,
            GameAction::MoveLeft => self.with_active(|p, g| p.try_move(MoveDirection::Left, g)),
            GameAction::MoveRight => self.with_active(|p, g| p.try_move(MoveDirection::Right, g)),
            GameAction::SoftDrop => self.with_active(|p, g| p.try_move(MoveDirection::Down, g)),
            GameAction::HardDrop => self.with_active(|p, g| p.hard_drop(g) > 0),
            GameAction::RotateCw => self.with_active(|p, g| p.rotate_clockwise(g)),
            GameAction::RotateCcw => self.with_active(|p, g| p.rotate_counter_clockwise(g)),
        }
    }

    /// Advance the simulation by one down-move attempt.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }
        let Some(mut piece) = self.active else {
            return TickOutcome::Idle;
        };

        if piece.try_move(MoveDirection::Down, &self.grid) {
            self.active = Some(piece);
            return TickOutcome::Fell;
        }

        debug!(
            kind = piece.kind().as_str(),
            x = piece.anchor().x,
            y = piece.anchor().y,
            "piece landed"
        );
        let (block, bottom_left) = piece.min_bounded_tiles();
        self.last_piece_highest = piece.highest_number();
        self.active = None;
        self.pieces_locked += 1;
        let game_over = self.grid.lock_tetromino(&block, bottom_left);
        let report = self.grid.settle();

        if game_over {
            self.phase = Phase::GameOver;
            return TickOutcome::GameOver(report);
        }

        self.promote_next();
        let blocked = self
            .active
            .as_ref()
            .is_some_and(|p| !Tetromino::fits(p.matrix(), p.anchor(), &self.grid));
        if blocked {
            // The new piece spawned on top of locked tiles.
            self.active = None;
            self.grid.mark_game_over();
            self.phase = Phase::GameOver;
            return TickOutcome::GameOver(report);
        }
        TickOutcome::Locked(report)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend(
            self.grid
                .cells()
                .iter()
                .map(|c| c.map(|t| t.number()).unwrap_or(0)),
        );
        out.active = self.active.as_ref().map(ActiveSnapshot::from);
        out.next = ActiveSnapshot::from(&self.next);
        out.score = self.grid.score();
        out.phase = self.phase;
        out.difficulty = self.difficulty;
        out.highest_number = self.highest_number();
        out.episode_id = self.episode_id;
        out.pieces_locked = self.pieces_locked;
        out.seed = self.spawner.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Replace the active piece. Used by tests to set up exact positions.
    pub fn set_active(&mut self, piece: Tetromino) {
        self.active = Some(piece);
    }

    /// Replace the preview piece. Used by tests to pick the next spawn.
    pub fn set_next(&mut self, piece: Tetromino) {
        self.next = piece;
    }

    /// Mutable grid access for setting up positions in tests and benches.
    pub fn grid_mut(&mut self) -> &mut GameGrid {
        &mut self.grid
    }
}
