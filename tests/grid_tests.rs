//! Grid tests - storage, bounds, configuration and locking

use tetris_2048::core::{ConfigError, GameGrid, GridConfig, Tetromino, Tile};
use tetris_2048::types::{Point, ShapeKind, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = GameGrid::new(GridConfig::default());
    assert_eq!(grid.width(), DEFAULT_GRID_WIDTH);
    assert_eq!(grid.height(), DEFAULT_GRID_HEIGHT);
    assert_eq!(grid.cells().len(), 12 * 20);
    assert_eq!(grid.tile_count(), 0);
    assert_eq!(grid.score(), 0);
    assert!(!grid.game_over());

    for row in 0..20 {
        for col in 0..12 {
            assert_eq!(grid.get(row, col), Some(None), "({row}, {col})");
        }
    }
}

#[test]
fn test_grid_out_of_bounds_reads_as_empty() {
    let grid = GameGrid::new(GridConfig::default());
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(20, 0), None);
    assert_eq!(grid.get(0, 12), None);
    assert!(!grid.is_occupied(25, 3));
    assert!(!grid.is_inside(20, 0));
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = GameGrid::new(GridConfig::default());
    assert!(grid.set(3, 7, Some(Tile::new(64))));
    assert_eq!(grid.get(3, 7), Some(Some(Tile::new(64))));
    assert!(grid.is_occupied(3, 7));
    assert_eq!(grid.highest_number(), 64);
    assert_eq!(grid.tile_sum(), 64);

    assert!(!grid.set(20, 7, Some(Tile::new(2))));
    assert_eq!(grid.tile_count(), 1);
}

#[test]
fn test_row_full_detection() {
    let mut grid = GameGrid::new(GridConfig::new(4, 4).unwrap());
    for col in 0..3 {
        grid.set(0, col, Some(Tile::new(2)));
    }
    assert!(!grid.is_row_full(0));
    grid.set(0, 3, Some(Tile::new(4)));
    assert!(grid.is_row_full(0));
    assert!(!grid.is_row_full(4));
}

#[test]
fn test_config_bounds() {
    assert!(GridConfig::new(4, 4).is_ok());
    assert!(GridConfig::new(64, 64).is_ok());
    assert_eq!(GridConfig::new(3, 20), Err(ConfigError::TooNarrow(3)));
    assert_eq!(GridConfig::new(65, 20), Err(ConfigError::TooWide(65)));
    assert_eq!(GridConfig::new(12, 0), Err(ConfigError::TooShort(0)));
    assert_eq!(GridConfig::new(12, 200), Err(ConfigError::TooTall(200)));
}

#[test]
fn test_config_error_messages() {
    let err = GridConfig::new(2, 20).unwrap_err();
    assert_eq!(err.to_string(), "grid width 2 is below the minimum of 4");
}

#[test]
fn test_custom_dimensions_flow_through() {
    let grid = GameGrid::new(GridConfig::new(8, 16).unwrap());
    assert_eq!(grid.width(), 8);
    assert_eq!(grid.height(), 16);
    assert_eq!(Tetromino::spawn_anchor(ShapeKind::O, &grid), Point::new(3, 15));
}

#[test]
fn test_lock_inside_grid() {
    let mut grid = GameGrid::new(GridConfig::default());
    let piece = Tetromino::new(ShapeKind::O, [2, 4, 8, 16].map(Tile::new), Point::new(0, 0));
    let (block, bottom_left) = piece.min_bounded_tiles();

    assert!(!grid.lock_tetromino(&block, bottom_left));
    assert_eq!(grid.get(1, 0), Some(Some(Tile::new(2))));
    assert_eq!(grid.get(1, 1), Some(Some(Tile::new(4))));
    assert_eq!(grid.get(0, 0), Some(Some(Tile::new(8))));
    assert_eq!(grid.get(0, 1), Some(Some(Tile::new(16))));
}

#[test]
fn test_lock_above_top_ends_game() {
    let mut grid = GameGrid::new(GridConfig::default());
    let piece = Tetromino::new(ShapeKind::O, [2, 4, 8, 16].map(Tile::new), Point::new(5, 19));
    let (block, bottom_left) = piece.min_bounded_tiles();

    assert!(grid.lock_tetromino(&block, bottom_left));
    assert!(grid.game_over());
    // The in-grid half is still placed.
    assert_eq!(grid.get(19, 5), Some(Some(Tile::new(8))));
    assert_eq!(grid.tile_count(), 2);
}

#[test]
fn test_reset_clears_game_over() {
    let mut grid = GameGrid::new(GridConfig::default());
    let piece = Tetromino::new(ShapeKind::I, [2; 4].map(Tile::new), Point::new(0, 19));
    let (block, bottom_left) = piece.min_bounded_tiles();
    assert!(grid.lock_tetromino(&block, bottom_left));

    grid.reset();
    assert!(!grid.game_over());
    assert_eq!(grid.tile_count(), 0);
    assert_eq!(grid.score(), 0);
}
