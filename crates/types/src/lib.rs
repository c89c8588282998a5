//! Shared types module - plain data structures and constants
//!
//! This crate defines the fundamental types used throughout the game.
//! Everything here is pure data with no external dependencies, so it can be
//! used from the core simulation, the terminal renderer and the input layer.
//!
//! # Grid Coordinates
//!
//! The game grid is addressed as `(row, col)` with **row 0 at the bottom**:
//!
//! - **Columns**: `0..width` (left to right)
//! - **Rows**: `0..height` (bottom to top)
//! - A [`Point`] stores `x = col`, `y = row`
//!
//! Pieces may sit partly above the grid (`y >= height`) while spawning.
//!
//! # Fall Speed
//!
//! | Difficulty | Tick interval |
//! |------------|---------------|
//! | Easy | 1000ms |
//! | Medium | 500ms |
//! | Hard | 150ms |
//!
//! # Examples
//!
//! ```
//! use tetris_2048_types::{Difficulty, GameAction, ShapeKind, DEFAULT_GRID_WIDTH};
//!
//! assert_eq!(ShapeKind::from_str("t"), Some(ShapeKind::T));
//! assert_eq!(Difficulty::Medium.tick_ms(), 500);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!(DEFAULT_GRID_WIDTH, 12);
//! ```

use std::ops::Add;

/// Default grid width in cells (12 columns)
pub const DEFAULT_GRID_WIDTH: u8 = 12;

/// Default grid height in cells (20 rows)
pub const DEFAULT_GRID_HEIGHT: u8 = 20;

/// Smallest accepted grid side; a 4x4 piece matrix must fit.
pub const MIN_GRID_SIDE: u8 = 4;

/// Largest accepted grid side.
pub const MAX_GRID_SIDE: u8 = 64;

/// Highest tile value. Tiles at this value never merge again.
pub const MAX_TILE_NUMBER: u16 = 2048;

/// Lowest tile value.
pub const MIN_TILE_NUMBER: u16 = 2;

/// Side length of the largest piece bounding matrix (the I piece).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Number of tiles carried by every tetromino.
pub const TILES_PER_PIECE: usize = 4;

/// Integer position on (or above) the grid.
///
/// `x` is the column, `y` is the row counted from the bottom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Self::Output {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// The seven tetromino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    Z,
    S,
    T,
    J,
    L,
}

impl ShapeKind {
    /// All shapes in spawn-table order.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::Z,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// ```
    /// use tetris_2048_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "z" => Some(ShapeKind::Z),
            "s" => Some(ShapeKind::S),
            "t" => Some(ShapeKind::T),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::Z => "Z",
            ShapeKind::S => "S",
            ShapeKind::T => "T",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }
}

/// Direction of a one-cell piece translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Left,
    Right,
    Down,
}

impl MoveDirection {
    /// Offset applied to the piece anchor.
    pub fn offset(&self) -> Point {
        match self {
            MoveDirection::Left => Point::new(-1, 0),
            MoveDirection::Right => Point::new(1, 0),
            MoveDirection::Down => Point::new(0, -1),
        }
    }
}

/// Fall speed presets chosen on the start menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Milliseconds between automatic down moves.
    pub fn tick_ms(&self) -> u32 {
        match self {
            Difficulty::Easy => 1000,
            Difficulty::Medium => 500,
            Difficulty::Hard => 150,
        }
    }

    /// Parse difficulty from string (case-insensitive)
    ///
    /// Accepts full names or single letters: "easy" | "e", "medium" | "m", "hard" | "h".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "e" => Some(Difficulty::Easy),
            "medium" | "m" => Some(Difficulty::Medium),
            "hard" | "h" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Game actions that can be applied to a session
///
/// Produced by the key map and consumed by the core session driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Drop piece to the lowest legal position (locks on the next tick)
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Toggle pause state
    Pause,
    /// Start a fresh game
    Restart,
    /// Leave the start menu with the current difficulty
    Start,
    /// Leave the start menu with the given difficulty
    StartWith(Difficulty),
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// ```
    /// use tetris_2048_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCcw"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
            GameAction::Start | GameAction::StartWith(_) => "start",
        }
    }
}
