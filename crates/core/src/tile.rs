//! Tile module - numbered 2048-style cells
//!
//! A tile carries a power of two between 2 and 2048. Equal tiles merge into
//! one tile of twice the value; a 2048 tile never merges again.
//! Grid and piece cells are `Option<Tile>`: `None` is an empty cell.

use rand::Rng;

use crate::types::{Rgb, MAX_TILE_NUMBER, MIN_TILE_NUMBER};

/// A grid or piece cell
pub type Cell = Option<Tile>;

/// Background and foreground colors for one tile value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileColors {
    pub background: Rgb,
    pub foreground: Rgb,
}

const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// Fixed palette, indexed by log2(number) - 1
const PALETTE: [TileColors; 11] = [
    TileColors { background: Rgb::new(238, 228, 218), foreground: DARK_TEXT }, // 2
    TileColors { background: Rgb::new(237, 224, 200), foreground: DARK_TEXT }, // 4
    TileColors { background: Rgb::new(242, 177, 121), foreground: LIGHT_TEXT }, // 8
    TileColors { background: Rgb::new(245, 149, 99), foreground: LIGHT_TEXT }, // 16
    TileColors { background: Rgb::new(246, 124, 95), foreground: LIGHT_TEXT }, // 32
    TileColors { background: Rgb::new(246, 94, 59), foreground: LIGHT_TEXT }, // 64
    TileColors { background: Rgb::new(237, 207, 114), foreground: LIGHT_TEXT }, // 128
    TileColors { background: Rgb::new(237, 204, 97), foreground: LIGHT_TEXT }, // 256
    TileColors { background: Rgb::new(237, 200, 80), foreground: LIGHT_TEXT }, // 512
    TileColors { background: Rgb::new(237, 197, 63), foreground: LIGHT_TEXT }, // 1024
    TileColors { background: Rgb::new(237, 194, 46), foreground: LIGHT_TEXT }, // 2048
];

/// Look up the colors for a tile value.
///
/// # Panics
///
/// Panics if `number` is not a power of two between 2 and 2048.
pub fn color_for(number: u16) -> TileColors {
    assert!(is_valid_number(number), "no color defined for tile {number}");
    PALETTE[number.trailing_zeros() as usize - 1]
}

/// True for powers of two in `2..=2048`.
pub fn is_valid_number(number: u16) -> bool {
    number.is_power_of_two() && (MIN_TILE_NUMBER..=MAX_TILE_NUMBER).contains(&number)
}

/// A numbered tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    number: u16,
}

impl Tile {
    /// Create a tile with the given value.
    ///
    /// # Panics
    ///
    /// Panics if `number` is not a power of two between 2 and 2048.
    pub fn new(number: u16) -> Self {
        assert!(is_valid_number(number), "invalid tile number {number}");
        Self { number }
    }

    /// Create a tile holding 2 or 4 with equal probability.
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            Self::new(2)
        } else {
            Self::new(4)
        }
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn colors(&self) -> TileColors {
        color_for(self.number)
    }

    pub fn background_color(&self) -> Rgb {
        self.colors().background
    }

    pub fn foreground_color(&self) -> Rgb {
        self.colors().foreground
    }

    /// Whether this tile can still absorb an equal neighbour.
    pub fn can_merge(&self) -> bool {
        self.number < MAX_TILE_NUMBER
    }

    /// Absorb `other` if it holds the same number and this tile is below 2048.
    ///
    /// On success this tile doubles, `other` becomes `None` and the new value
    /// is returned as the merge gain. Otherwise both are left untouched and 0
    /// is returned.
    pub fn merge_with(&mut self, other: &mut Cell) -> u32 {
        match other {
            Some(o) if o.number == self.number && self.can_merge() => {
                self.number *= 2;
                *other = None;
                self.number as u32
            }
            _ => 0,
        }
    }
}
