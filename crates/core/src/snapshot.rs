use arrayvec::ArrayVec;

use crate::game::Phase;
use crate::tetromino::Tetromino;
use crate::types::{Difficulty, Point, ShapeKind, TILES_PER_PIECE};

/// Piece tiles as `(grid position, number)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub anchor: Point,
    pub tiles: ArrayVec<(Point, u16), TILES_PER_PIECE>,
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind(),
            anchor: value.anchor(),
            tiles: value
                .tiles()
                .into_iter()
                .map(|(p, t)| (p, t.number()))
                .collect(),
        }
    }
}

impl Default for ActiveSnapshot {
    fn default() -> Self {
        Self {
            kind: ShapeKind::O,
            anchor: Point::default(),
            tiles: ArrayVec::new(),
        }
    }
}

/// Read-only view of a session for rendering
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major tile numbers from the bottom row, 0 for empty
    pub cells: Vec<u16>,
    pub active: Option<ActiveSnapshot>,
    pub next: ActiveSnapshot,
    pub score: u32,
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub highest_number: u16,
    pub episode_id: u32,
    pub pieces_locked: u32,
    pub seed: u64,
}

impl GameSnapshot {
    /// Tile number at `(row, col)`, row 0 at the bottom.
    pub fn cell(&self, row: usize, col: usize) -> Option<u16> {
        if row >= self.height as usize || col >= self.width as usize {
            return None;
        }
        match self.cells.get(row * self.width as usize + col) {
            Some(&n) if n != 0 => Some(n),
            _ => None,
        }
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            cells: Vec::new(),
            active: None,
            next: ActiveSnapshot::default(),
            score: 0,
            phase: Phase::Menu,
            difficulty: Difficulty::default(),
            highest_number: 0,
            episode_id: 0,
            pieces_locked: 0,
            seed: 0,
        }
    }
}
