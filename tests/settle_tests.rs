//! Settle tests - merging, floating removal and row clearing after a lock

use tetris_2048::core::{Game, GameGrid, GridConfig, Tetromino, TickOutcome, Tile};
use tetris_2048::types::{Difficulty, GameAction, Point, ShapeKind};

fn narrow() -> GameGrid {
    GameGrid::new(GridConfig::new(4, 6).unwrap())
}

fn put(grid: &mut GameGrid, row: i32, col: i32, number: u16) {
    assert!(grid.set(row, col, Some(Tile::new(number))));
}

fn number(grid: &GameGrid, row: i32, col: i32) -> Option<u16> {
    grid.get(row, col).flatten().map(|t| t.number())
}

#[test]
fn test_o_piece_drops_onto_matching_tile() {
    let mut game = Game::new(GridConfig::default(), 2024);
    assert!(game.start(Difficulty::Medium));

    let spawn = Tetromino::spawn_anchor(ShapeKind::O, game.grid());
    assert_eq!(spawn, Point::new(5, 19));
    game.set_active(Tetromino::new(ShapeKind::O, [2; 4].map(Tile::new), spawn));
    game.grid_mut().set(0, 5, Some(Tile::new(2)));

    assert!(game.apply_action(GameAction::HardDrop));
    let report = match game.tick() {
        TickOutcome::Locked(report) => report,
        other => panic!("expected lock, got {other:?}"),
    };

    // Column 5: 2 + 2 below the piece, then the piece's own pair in column 6.
    assert_eq!(report.merges, 2);
    assert_eq!(report.merge_points, 8);
    assert_eq!(report.rows_cleared, 0);
    assert_eq!(report.floating_removed, 0);
    assert_eq!(game.score(), report.total_points());
    assert_eq!(game.score(), 8);

    let grid = game.grid();
    assert_eq!(number(grid, 0, 5), Some(4));
    assert_eq!(number(grid, 1, 5), Some(2));
    assert_eq!(number(grid, 1, 6), Some(4));
    assert_eq!(grid.tile_count(), 3);
    assert_eq!(grid.tile_sum(), 10);
}

#[test]
fn test_settle_is_idempotent() {
    let mut grid = narrow();
    put(&mut grid, 0, 0, 2);
    put(&mut grid, 1, 0, 2);
    put(&mut grid, 2, 0, 4);
    put(&mut grid, 3, 2, 8);
    for col in 0..4 {
        put(&mut grid, 4, col, 16);
    }

    let first = grid.settle();
    assert!(!first.is_empty());
    let settled = grid.clone();

    let second = grid.settle();
    assert!(second.is_empty());
    assert_eq!(second.passes, 1);
    assert_eq!(grid, settled);
}

#[test]
fn test_empty_grid_settles_to_nothing() {
    let mut grid = narrow();
    let report = grid.settle();
    assert!(report.is_empty());
    assert_eq!(report.total_points(), 0);
}

#[test]
fn test_merge_chain_cascades_down_column() {
    let mut grid = narrow();
    put(&mut grid, 0, 0, 2);
    put(&mut grid, 1, 0, 2);
    put(&mut grid, 2, 0, 4);
    put(&mut grid, 3, 0, 8);

    let report = grid.settle();
    assert_eq!(report.merges, 3);
    assert_eq!(report.merge_points, 4 + 8 + 16);
    assert_eq!(number(&grid, 0, 0), Some(16));
    assert_eq!(grid.tile_count(), 1);
    assert_eq!(grid.score(), 28);
}

#[test]
fn test_horizontal_neighbours_never_merge() {
    let mut grid = narrow();
    put(&mut grid, 0, 0, 8);
    put(&mut grid, 0, 1, 8);
    let report = grid.settle();
    assert_eq!(report.merges, 0);
    assert_eq!(grid.tile_count(), 2);
}

#[test]
fn test_2048_stack_stays_put() {
    let mut grid = narrow();
    put(&mut grid, 0, 1, 2048);
    put(&mut grid, 1, 1, 2048);
    let report = grid.settle();
    assert!(report.is_empty());
    assert_eq!(grid.highest_number(), 2048);
    assert_eq!(grid.tile_count(), 2);
}

#[test]
fn test_merge_runs_before_row_clear() {
    let mut grid = narrow();
    for (col, n) in [2, 4, 8, 16].into_iter().enumerate() {
        put(&mut grid, 0, col as i32, n);
    }
    put(&mut grid, 1, 0, 2);

    let report = grid.settle();
    assert_eq!(report.merges, 1);
    assert_eq!(report.merge_points, 4);
    // The cleared row already holds the merged 4.
    assert_eq!(report.rows_cleared, 1);
    assert_eq!(report.row_points, 4 + 4 + 8 + 16);
    assert_eq!(grid.tile_count(), 0);
    assert_eq!(grid.score(), 36);
}

#[test]
fn test_tile_left_hanging_by_row_clear_drops_to_floor() {
    let mut grid = narrow();
    put(&mut grid, 0, 0, 2);
    for (col, n) in [4, 8, 16, 32].into_iter().enumerate() {
        put(&mut grid, 1, col as i32, n);
    }
    put(&mut grid, 2, 3, 64);

    let report = grid.settle();
    assert_eq!(report.rows_cleared, 1);
    assert_eq!(report.row_points, 60);
    assert_eq!(report.nudges, 1);
    assert_eq!(report.floating_removed, 0);
    assert_eq!(number(&grid, 0, 0), Some(2));
    assert_eq!(number(&grid, 0, 3), Some(64));
    assert_eq!(grid.tile_count(), 2);
}

#[test]
fn test_group_cut_off_by_row_clear_is_removed() {
    let mut grid = narrow();
    put(&mut grid, 0, 0, 2);
    for (col, n) in [4, 8, 16, 32].into_iter().enumerate() {
        put(&mut grid, 1, col as i32, n);
    }
    put(&mut grid, 2, 2, 64);
    put(&mut grid, 2, 3, 128);

    let report = grid.settle();
    assert_eq!(report.rows_cleared, 1);
    assert_eq!(report.floating_removed, 2);
    assert_eq!(report.floating_points, 192);
    assert_eq!(report.total_points(), 252);
    assert_eq!(grid.score(), 252);
    assert_eq!(grid.tile_count(), 1);
    assert_eq!(number(&grid, 0, 0), Some(2));
}

#[test]
fn test_multiple_full_rows_clear_together() {
    let mut grid = narrow();
    for row in 0..2 {
        for col in 0..4 {
            // Alternate so no column pair is equal.
            let n = if (row + col) % 2 == 0 { 2 } else { 4 };
            put(&mut grid, row, col, n);
        }
    }
    put(&mut grid, 2, 1, 8);

    let report = grid.settle();
    assert_eq!(report.merges, 0);
    assert_eq!(report.rows_cleared, 2);
    assert_eq!(report.row_points, 24);
    assert_eq!(number(&grid, 0, 1), Some(8));
    assert_eq!(grid.tile_count(), 1);
}
