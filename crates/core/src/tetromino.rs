//! Tetromino module - falling pieces as square matrices of tiles
//!
//! Each piece is an `n x n` bounding matrix (`n` = 2, 3 or 4) whose occupied
//! cells carry tiles. Matrix row 0 is the **top** of the piece; the piece
//! anchor is the grid position of the matrix's bottom-left cell, so matrix
//! cell `(row, col)` sits at grid `(anchor.y + n - 1 - row, anchor.x + col)`.
//!
//! Rotation is a pure matrix transform that keeps the tiles themselves, so
//! numbers never change on rotation. Every move or rotation is validated
//! against the grid with the same rule: no occupied cell may leave the grid
//! to the left, right or bottom, or overlap a locked tile. Cells above the
//! top row are allowed while the piece enters the grid.

use arrayvec::ArrayVec;
use rand::Rng;

use crate::grid::GameGrid;
use crate::tile::{Cell, Tile};
use crate::types::{MoveDirection, Point, ShapeKind, MAX_SHAPE_SIZE, TILES_PER_PIECE};

type Occupied = [(usize, usize); TILES_PER_PIECE];

/// Occupied `(row, col)` cells of each shape in its spawn orientation
fn shape_layout(kind: ShapeKind) -> (usize, Occupied) {
    match kind {
        ShapeKind::I => (4, [(0, 1), (1, 1), (2, 1), (3, 1)]),
        ShapeKind::O => (2, [(0, 0), (0, 1), (1, 0), (1, 1)]),
        ShapeKind::Z => (3, [(0, 0), (0, 1), (1, 1), (1, 2)]),
        ShapeKind::S => (3, [(0, 1), (0, 2), (1, 0), (1, 1)]),
        ShapeKind::T => (3, [(0, 1), (1, 0), (1, 1), (1, 2)]),
        ShapeKind::J => (3, [(0, 0), (1, 0), (1, 1), (1, 2)]),
        ShapeKind::L => (3, [(0, 2), (1, 0), (1, 1), (1, 2)]),
    }
}

/// Square bounding matrix of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeMatrix {
    size: usize,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl ShapeMatrix {
    /// Build the spawn matrix for `kind`, placing `tiles` on its occupied cells
    /// in row-major order.
    pub fn new(kind: ShapeKind, tiles: [Tile; TILES_PER_PIECE]) -> Self {
        let (size, occupied) = shape_layout(kind);
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (&(row, col), tile) in occupied.iter().zip(tiles) {
            assert!(row < size && col < size, "shape cell outside its matrix");
            cells[row][col] = Some(tile);
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `(row, col)`, row 0 at the top. Out-of-range reads are empty.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.size && col < self.size {
            self.cells[row][col]
        } else {
            None
        }
    }

    /// Occupied cells as `(row, col, tile)`.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        (0..self.size).flat_map(move |row| {
            (0..self.size).filter_map(move |col| self.cells[row][col].map(|t| (row, col, t)))
        })
    }

    /// Transpose, then reverse each row.
    pub fn rotated_cw(&self) -> Self {
        let n = self.size;
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, out) in cells.iter_mut().enumerate().take(n) {
            for (col, cell) in out.iter_mut().enumerate().take(n) {
                *cell = self.cells[n - 1 - col][row];
            }
        }
        Self { size: n, cells }
    }

    /// Transpose, then reverse the row order.
    pub fn rotated_ccw(&self) -> Self {
        let n = self.size;
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, out) in cells.iter_mut().enumerate().take(n) {
            for (col, cell) in out.iter_mut().enumerate().take(n) {
                *cell = self.cells[col][n - 1 - row];
            }
        }
        Self { size: n, cells }
    }
}

/// Minimal rectangle of a piece's tiles, ready to lock into the grid
///
/// Row 0 is the top row of the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileBlock {
    rows: usize,
    cols: usize,
    cells: [[Cell; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl TileBlock {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        if row < self.rows && col < self.cols {
            self.cells[row][col]
        } else {
            None
        }
    }
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    kind: ShapeKind,
    matrix: ShapeMatrix,
    anchor: Point,
}

impl Tetromino {
    /// Create a piece with explicit tiles at an explicit anchor.
    pub fn new(kind: ShapeKind, tiles: [Tile; TILES_PER_PIECE], anchor: Point) -> Self {
        Self {
            kind,
            matrix: ShapeMatrix::new(kind, tiles),
            anchor,
        }
    }

    /// Create a piece with random 2/4 tiles at the spawn position of `grid`.
    pub fn spawn(kind: ShapeKind, grid: &GameGrid, rng: &mut impl Rng) -> Self {
        let tiles = std::array::from_fn(|_| Tile::random(rng));
        Self::new(kind, tiles, Self::spawn_anchor(kind, grid))
    }

    /// Horizontally centred, with the matrix's bottom row on the top grid row.
    pub fn spawn_anchor(kind: ShapeKind, grid: &GameGrid) -> Point {
        let (size, _) = shape_layout(kind);
        let x = (grid.width() as i32 - size as i32) / 2;
        Point::new(x, grid.height() as i32 - 1)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn matrix(&self) -> &ShapeMatrix {
        &self.matrix
    }

    /// Grid position of matrix cell `(row, col)` for a given anchor.
    fn position_at(anchor: Point, size: usize, row: usize, col: usize) -> Point {
        Point::new(
            anchor.x + col as i32,
            anchor.y + (size as i32 - 1) - row as i32,
        )
    }

    /// Tiles with their grid positions (positions may lie above the grid).
    pub fn tiles(&self) -> ArrayVec<(Point, Tile), TILES_PER_PIECE> {
        self.matrix
            .occupied()
            .map(|(row, col, tile)| {
                (Self::position_at(self.anchor, self.matrix.size, row, col), tile)
            })
            .collect()
    }

    /// Check that `matrix` at `anchor` stays in bounds and off locked tiles.
    ///
    /// Rows at or above the grid height are not checked.
    pub fn fits(matrix: &ShapeMatrix, anchor: Point, grid: &GameGrid) -> bool {
        let width = grid.width() as i32;
        let height = grid.height() as i32;
        matrix.occupied().all(|(row, col, _)| {
            let pos = Self::position_at(anchor, matrix.size, row, col);
            if pos.x < 0 || pos.x >= width || pos.y < 0 {
                return false;
            }
            pos.y >= height || !grid.is_occupied(pos.y, pos.x)
        })
    }

    /// Move one cell. Returns false and leaves the piece unchanged if blocked.
    ///
    /// A failed `Down` move means the piece has landed.
    pub fn try_move(&mut self, direction: MoveDirection, grid: &GameGrid) -> bool {
        let candidate = self.anchor + direction.offset();
        if !Self::fits(&self.matrix, candidate, grid) {
            return false;
        }
        self.anchor = candidate;
        true
    }

    pub fn rotate_clockwise(&mut self, grid: &GameGrid) -> bool {
        let rotated = self.matrix.rotated_cw();
        self.apply_rotation(rotated, grid)
    }

    pub fn rotate_counter_clockwise(&mut self, grid: &GameGrid) -> bool {
        let rotated = self.matrix.rotated_ccw();
        self.apply_rotation(rotated, grid)
    }

    fn apply_rotation(&mut self, rotated: ShapeMatrix, grid: &GameGrid) -> bool {
        if !Self::fits(&rotated, self.anchor, grid) {
            return false;
        }
        self.matrix = rotated;
        true
    }

    /// Move down until blocked. Returns the number of rows dropped.
    ///
    /// Locking is left to the caller, which sees the next down move fail.
    pub fn hard_drop(&mut self, grid: &GameGrid) -> u32 {
        let mut rows = 0;
        while self.try_move(MoveDirection::Down, grid) {
            rows += 1;
        }
        rows
    }

    /// Trim empty border rows and columns.
    ///
    /// Returns the trimmed block and the grid position of its bottom-left cell.
    pub fn min_bounded_tiles(&self) -> (TileBlock, Point) {
        let n = self.matrix.size;
        let (mut min_row, mut max_row) = (n, 0);
        let (mut min_col, mut max_col) = (n, 0);
        for (row, col, _) in self.matrix.occupied() {
            min_row = min_row.min(row);
            max_row = max_row.max(row);
            min_col = min_col.min(col);
            max_col = max_col.max(col);
        }
        assert!(min_row <= max_row, "tetromino without tiles");

        let rows = max_row - min_row + 1;
        let cols = max_col - min_col + 1;
        let mut cells = [[None; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, out) in cells.iter_mut().enumerate().take(rows) {
            for (c, cell) in out.iter_mut().enumerate().take(cols) {
                *cell = self.matrix.cells[min_row + r][min_col + c];
            }
        }

        let bottom_left = Self::position_at(self.anchor, n, max_row, min_col);
        (TileBlock { rows, cols, cells }, bottom_left)
    }

    /// Largest tile number on the piece.
    pub fn highest_number(&self) -> u16 {
        self.matrix
            .occupied()
            .map(|(_, _, tile)| tile.number())
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;

    fn tiles(numbers: [u16; 4]) -> [Tile; 4] {
        numbers.map(Tile::new)
    }

    fn numbers_of(piece: &Tetromino) -> Vec<u16> {
        let mut n: Vec<u16> = piece.tiles().iter().map(|(_, t)| t.number()).collect();
        n.sort_unstable();
        n
    }

    #[test]
    fn every_shape_has_four_tiles_inside_its_matrix() {
        for kind in ShapeKind::ALL {
            let m = ShapeMatrix::new(kind, tiles([2, 2, 2, 2]));
            assert_eq!(m.occupied().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn four_cw_rotations_return_to_start() {
        for kind in ShapeKind::ALL {
            let m = ShapeMatrix::new(kind, tiles([2, 4, 8, 16]));
            let back = m.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(m, back, "{kind:?}");
            assert_eq!(m.rotated_cw().rotated_ccw(), m, "{kind:?}");
        }
    }

    #[test]
    fn cw_rotation_moves_top_row_to_right_column() {
        // J: tiles at (0,0)=2, (1,0)=4, (1,1)=8, (1,2)=16
        let m = ShapeMatrix::new(ShapeKind::J, tiles([2, 4, 8, 16])).rotated_cw();
        assert_eq!(m.get(0, 2).map(|t| t.number()), Some(2));
        assert_eq!(m.get(0, 1).map(|t| t.number()), Some(4));
        assert_eq!(m.get(1, 1).map(|t| t.number()), Some(8));
        assert_eq!(m.get(2, 1).map(|t| t.number()), Some(16));
    }

    #[test]
    fn spawn_anchor_is_centred_on_top_row() {
        let grid = GameGrid::new(GridConfig::default());
        assert_eq!(Tetromino::spawn_anchor(ShapeKind::O, &grid), Point::new(5, 19));
        assert_eq!(Tetromino::spawn_anchor(ShapeKind::I, &grid), Point::new(4, 19));
        assert_eq!(Tetromino::spawn_anchor(ShapeKind::T, &grid), Point::new(4, 19));
    }

    #[test]
    fn tile_positions_follow_bottom_left_anchor() {
        let piece = Tetromino::new(ShapeKind::O, tiles([2, 4, 8, 16]), Point::new(3, 5));
        let got: Vec<(Point, u16)> = piece.tiles().iter().map(|(p, t)| (*p, t.number())).collect();
        assert_eq!(
            got,
            vec![
                (Point::new(3, 6), 2),
                (Point::new(4, 6), 4),
                (Point::new(3, 5), 8),
                (Point::new(4, 5), 16),
            ]
        );
    }

    #[test]
    fn moves_are_rejected_at_walls_and_floor() {
        let grid = GameGrid::new(GridConfig::default());
        let mut piece = Tetromino::new(ShapeKind::O, tiles([2, 2, 2, 2]), Point::new(0, 0));
        assert!(!piece.try_move(MoveDirection::Left, &grid));
        assert!(!piece.try_move(MoveDirection::Down, &grid));
        assert_eq!(piece.anchor(), Point::new(0, 0));
        assert!(piece.try_move(MoveDirection::Right, &grid));
        assert_eq!(piece.anchor(), Point::new(1, 0));
    }

    #[test]
    fn cells_above_grid_are_allowed() {
        let grid = GameGrid::new(GridConfig::default());
        let piece = Tetromino::new(ShapeKind::I, tiles([2, 2, 2, 2]), Point::new(4, 30));
        assert!(Tetromino::fits(piece.matrix(), piece.anchor(), &grid));
    }

    #[test]
    fn min_bounded_tiles_trims_empty_border() {
        let piece = Tetromino::new(ShapeKind::I, tiles([2, 4, 8, 16]), Point::new(4, 10));
        let (block, pos) = piece.min_bounded_tiles();
        assert_eq!((block.rows(), block.cols()), (4, 1));
        assert_eq!(pos, Point::new(5, 10));
        assert_eq!(block.get(0, 0).map(|t| t.number()), Some(2));
        assert_eq!(block.get(3, 0).map(|t| t.number()), Some(16));

        // T keeps its empty bottom row out of the block.
        let piece = Tetromino::new(ShapeKind::T, tiles([2, 2, 2, 2]), Point::new(0, 0));
        let (block, pos) = piece.min_bounded_tiles();
        assert_eq!((block.rows(), block.cols()), (2, 3));
        assert_eq!(pos, Point::new(0, 1));
    }

    #[test]
    fn rotation_keeps_tile_numbers() {
        let grid = GameGrid::new(GridConfig::default());
        let mut piece = Tetromino::new(ShapeKind::L, tiles([2, 4, 2, 4]), Point::new(4, 8));
        let before = numbers_of(&piece);
        assert!(piece.rotate_clockwise(&grid));
        assert_eq!(numbers_of(&piece), before);
        assert!(piece.rotate_counter_clockwise(&grid));
        assert_eq!(numbers_of(&piece), before);
    }

    #[test]
    fn highest_number_reports_max_tile() {
        let piece = Tetromino::new(ShapeKind::S, tiles([2, 4, 2, 2]), Point::new(0, 0));
        assert_eq!(piece.highest_number(), 4);
    }
}
