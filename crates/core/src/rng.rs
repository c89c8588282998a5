//! RNG module - seeded piece generation
//!
//! Shapes are drawn uniformly over the seven kinds (no bag), and every tile
//! on a new piece is independently 2 or 4. A fixed seed replays the same
//! sequence of pieces, which the tests and benchmarks rely on.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::grid::GameGrid;
use crate::tetromino::Tetromino;
use crate::types::ShapeKind;

/// Seeded source of new tetrominoes
#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: StdRng,
}

impl Spawner {
    /// Create a spawner with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a shape uniformly over all seven kinds.
    pub fn next_kind(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())]
    }

    /// Create the next piece at the spawn position of `grid`.
    pub fn spawn(&mut self, grid: &GameGrid) -> Tetromino {
        let kind = self.next_kind();
        Tetromino::spawn(kind, grid, &mut self.rng)
    }
}
