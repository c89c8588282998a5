//! Grid module - the board of locked tiles and its settle pipeline
//!
//! The grid is a flat row-major array of [`Cell`]s with **row 0 at the
//! bottom**. Out-of-range queries never fail: they read as empty, so pieces
//! entering from above the top row can be tested freely.
//!
//! After a piece locks, [`GameGrid::settle`] runs the pipeline:
//!
//! 1. **Merge pass** - columns left to right, rows bottom to top. A tile
//!    equal to the tile directly above absorbs it, the column above the gap
//!    drops one row, and the same cell is examined again so chains resolve.
//!    A tile with no neighbour on any side (and not on row 0) drops one row.
//! 2. **Floating removal** - tiles with no 4-connected path to row 0 are
//!    removed and their numbers scored.
//! 3. **Row clearing** - full rows are removed and scored, rows above shift
//!    down.
//!
//! The pass repeats until nothing changes, so settling twice is a no-op.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::GridConfig;
use crate::tetromino::TileBlock;
use crate::tile::Cell;
use crate::types::Point;

/// Result of one merge pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub merges: u32,
    pub points: u32,
    pub nudges: u32,
}

/// Tiles taken off the grid by floating removal or row clearing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Removal {
    /// Tiles removed (floating) or rows removed (row clearing).
    pub count: u32,
    pub points: u32,
}

/// Everything `settle` did, summed over its passes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleReport {
    pub passes: u32,
    pub merges: u32,
    pub merge_points: u32,
    pub nudges: u32,
    pub floating_removed: u32,
    pub floating_points: u32,
    pub rows_cleared: u32,
    pub row_points: u32,
}

impl SettleReport {
    /// Score gained by this settle.
    pub fn total_points(&self) -> u32 {
        self.merge_points + self.floating_points + self.row_points
    }

    pub fn is_empty(&self) -> bool {
        self.merges == 0 && self.nudges == 0 && self.floating_removed == 0 && self.rows_cleared == 0
    }
}

/// The game grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameGrid {
    config: GridConfig,
    /// Row-major cells, `row * width + col`, row 0 at the bottom
    cells: Vec<Cell>,
    score: u32,
    game_over: bool,
}

impl GameGrid {
    /// Create an empty grid
    pub fn new(config: GridConfig) -> Self {
        Self {
            config,
            cells: vec![None; config.cell_count()],
            score: 0,
            game_over: false,
        }
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn width(&self) -> u8 {
        self.config.width()
    }

    pub fn height(&self) -> u8 {
        self.config.height()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.is_inside(row, col) {
            return None;
        }
        Some(row as usize * self.width() as usize + col as usize)
    }

    /// Check if `(row, col)` is an addressable cell
    pub fn is_inside(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.height() as i32 && col >= 0 && col < self.width() as i32
    }

    /// Check if `(row, col)` holds a tile. Always false outside the grid.
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Some(_)))
    }

    /// Get cell at `(row, col)`. Returns None if out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set cell at `(row, col)`. Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// All cells, row-major from the bottom row.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// One row of cells, left to right.
    pub fn row(&self, row: usize) -> &[Cell] {
        let w = self.width() as usize;
        &self.cells[row * w..(row + 1) * w]
    }

    /// Number of tiles on the grid.
    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Sum of all tile numbers on the grid.
    pub fn tile_sum(&self) -> u32 {
        self.cells.iter().flatten().map(|t| t.number() as u32).sum()
    }

    /// Largest tile number on the grid, 0 when empty.
    pub fn highest_number(&self) -> u16 {
        self.cells
            .iter()
            .flatten()
            .map(|t| t.number())
            .max()
            .unwrap_or(0)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.height() as usize {
            return false;
        }
        self.row(row).iter().all(|c| c.is_some())
    }

    /// Copy a landed piece's tiles into the grid.
    ///
    /// `bottom_left` is the grid position of the block's bottom-left cell.
    /// Any tile that lands outside the grid ends the game. Returns the
    /// game-over flag.
    pub fn lock_tetromino(&mut self, block: &TileBlock, bottom_left: Point) -> bool {
        let rows = block.rows();
        for row in 0..rows {
            for col in 0..block.cols() {
                let Some(tile) = block.get(row, col) else {
                    continue;
                };
                let y = bottom_left.y + (rows - 1 - row) as i32;
                let x = bottom_left.x + col as i32;
                match self.index(y, x) {
                    Some(i) => self.cells[i] = Some(tile),
                    None => self.game_over = true,
                }
            }
        }

        debug!(
            x = bottom_left.x,
            y = bottom_left.y,
            rows,
            cols = block.cols(),
            game_over = self.game_over,
            "locked tetromino"
        );
        if self.game_over {
            info!(score = self.score, highest = self.highest_number(), "game over");
        }
        self.game_over
    }

    /// End the game without a lock, e.g. when a new piece cannot spawn.
    pub fn mark_game_over(&mut self) {
        if !self.game_over {
            self.game_over = true;
            info!(score = self.score, highest = self.highest_number(), "game over");
        }
    }

    /// Run merge, floating removal and row clearing until stable.
    pub fn settle(&mut self) -> SettleReport {
        let mut report = SettleReport::default();
        loop {
            let merged = self.merge_pass();
            let floating = self.remove_floating_tiles();
            let cleared = self.remove_full_rows();

            report.passes += 1;
            report.merges += merged.merges;
            report.merge_points += merged.points;
            report.nudges += merged.nudges;
            report.floating_removed += floating.count;
            report.floating_points += floating.points;
            report.rows_cleared += cleared.count;
            report.row_points += cleared.points;

            let changed =
                merged.merges > 0 || merged.nudges > 0 || floating.count > 0 || cleared.count > 0;
            if !changed {
                break;
            }
        }

        if !report.is_empty() {
            debug!(?report, score = self.score, "settled grid");
        }
        report
    }

    /// Merge vertically adjacent equal tiles and nudge isolated tiles down.
    pub fn merge_pass(&mut self) -> MergeStats {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let mut stats = MergeStats::default();

        for col in 0..w {
            let mut row = 0;
            while row < h {
                let idx = row * w + col;
                let Some(mut tile) = self.cells[idx] else {
                    row += 1;
                    continue;
                };

                if row + 1 < h {
                    let gain = tile.merge_with(&mut self.cells[idx + w]);
                    if gain > 0 {
                        self.cells[idx] = Some(tile);
                        self.score += gain;
                        stats.merges += 1;
                        stats.points += gain;
                        self.collapse_above(row + 1, col);
                        // Same cell again: the tile that dropped in may match.
                        continue;
                    }
                }

                if row > 0 && self.is_isolated(idx) {
                    self.cells[idx - w] = Some(tile);
                    self.cells[idx] = None;
                    stats.nudges += 1;
                }
                row += 1;
            }
        }

        stats
    }

    /// Drop every tile above the emptied cell `(gap_row, col)` by one row.
    fn collapse_above(&mut self, gap_row: usize, col: usize) {
        let w = self.width() as usize;
        for row in gap_row + 1..self.height() as usize {
            let idx = row * w + col;
            if self.cells[idx].is_some() {
                self.cells[idx - w] = self.cells[idx].take();
            }
        }
    }

    /// In-grid 4-neighbours of a flat index.
    fn neighbors(&self, idx: usize) -> ArrayVec<usize, 4> {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let (row, col) = (idx / w, idx % w);
        let mut out = ArrayVec::new();
        if row + 1 < h {
            out.push(idx + w);
        }
        if row > 0 {
            out.push(idx - w);
        }
        if col + 1 < w {
            out.push(idx + 1);
        }
        if col > 0 {
            out.push(idx - 1);
        }
        out
    }

    fn is_isolated(&self, idx: usize) -> bool {
        self.neighbors(idx).iter().all(|&n| self.cells[n].is_none())
    }

    /// Remove tiles with no 4-connected path to row 0. Scores their numbers.
    pub fn remove_floating_tiles(&mut self) -> Removal {
        let w = self.width() as usize;
        let mut connected = vec![false; self.cells.len()];
        let mut stack: Vec<usize> = (0..w).filter(|&c| self.cells[c].is_some()).collect();
        for &idx in &stack {
            connected[idx] = true;
        }

        while let Some(idx) = stack.pop() {
            for n in self.neighbors(idx) {
                if !connected[n] && self.cells[n].is_some() {
                    connected[n] = true;
                    stack.push(n);
                }
            }
        }

        let mut removal = Removal::default();
        for (cell, &keep) in self.cells.iter_mut().zip(&connected) {
            if keep {
                continue;
            }
            if let Some(tile) = cell.take() {
                removal.count += 1;
                removal.points += tile.number() as u32;
            }
        }

        if removal.count > 0 {
            self.score += removal.points;
            debug!(tiles = removal.count, points = removal.points, "removed floating tiles");
        }
        removal
    }

    /// Remove every full row, scoring its tiles. Returns rows removed.
    ///
    /// Rows are found bottom to top and removed top to bottom, so earlier
    /// removals never move a row that is still pending.
    pub fn remove_full_rows(&mut self) -> Removal {
        let full: Vec<usize> = (0..self.height() as usize)
            .filter(|&row| self.is_row_full(row))
            .collect();

        let mut removal = Removal::default();
        for &row in full.iter().rev() {
            removal.points += self.remove_row(row);
            removal.count += 1;
        }

        if removal.count > 0 {
            debug!(rows = removal.count, points = removal.points, "cleared rows");
        }
        removal
    }

    /// Remove a single row and shift everything above it down.
    fn remove_row(&mut self, row: usize) -> u32 {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let points: u32 = self.row(row).iter().flatten().map(|t| t.number() as u32).sum();
        self.score += points;

        self.cells.copy_within((row + 1) * w..h * w, row * w);
        for cell in &mut self.cells[(h - 1) * w..] {
            *cell = None;
        }
        points
    }

    /// Empty the grid and zero the score for a fresh game.
    pub fn reset(&mut self) {
        self.cells.fill(None);
        self.score = 0;
        self.game_over = false;
    }
}
