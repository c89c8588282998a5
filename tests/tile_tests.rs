//! Tile tests - merging rules and colors

use tetris_2048::core::{color_for, GameGrid, GridConfig, Spawner, Tile};
use tetris_2048::types::Rgb;

#[test]
fn test_equal_tiles_merge_into_double() {
    let mut lower = Tile::new(16);
    let mut upper = Some(Tile::new(16));

    let gain = lower.merge_with(&mut upper);
    assert_eq!(gain, 32);
    assert_eq!(lower.number(), 32);
    assert_eq!(upper, None);
}

#[test]
fn test_unequal_tiles_do_not_merge() {
    let mut lower = Tile::new(4);
    let mut upper = Some(Tile::new(8));

    assert_eq!(lower.merge_with(&mut upper), 0);
    assert_eq!(lower.number(), 4);
    assert_eq!(upper, Some(Tile::new(8)));
}

#[test]
fn test_merge_with_empty_cell_is_noop() {
    let mut lower = Tile::new(2);
    let mut empty = None;
    assert_eq!(lower.merge_with(&mut empty), 0);
    assert_eq!(lower.number(), 2);
}

#[test]
fn test_2048_is_terminal() {
    let mut lower = Tile::new(2048);
    let mut upper = Some(Tile::new(2048));

    assert!(!lower.can_merge());
    assert_eq!(lower.merge_with(&mut upper), 0);
    assert_eq!(lower.number(), 2048);
    assert!(upper.is_some());
}

#[test]
fn test_1024_pair_reaches_2048() {
    let mut lower = Tile::new(1024);
    let mut upper = Some(Tile::new(1024));
    assert_eq!(lower.merge_with(&mut upper), 2048);
    assert!(!lower.can_merge());
}

#[test]
fn test_every_value_has_distinct_background() {
    let backgrounds: Vec<Rgb> = (1..=11).map(|e| color_for(1 << e).background).collect();
    for (i, a) in backgrounds.iter().enumerate() {
        for b in &backgrounds[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn test_tile_color_accessors_match_palette() {
    let tile = Tile::new(128);
    assert_eq!(tile.background_color(), color_for(128).background);
    assert_eq!(tile.foreground_color(), color_for(128).foreground);
    assert_eq!(tile.colors(), color_for(128));
}

#[test]
fn test_spawned_tiles_are_twos_and_fours() {
    let grid = GameGrid::new(GridConfig::default());
    let mut spawner = Spawner::new(99);
    let mut seen = [false; 2];

    for _ in 0..200 {
        for (_, tile) in spawner.spawn(&grid).tiles() {
            match tile.number() {
                2 => seen[0] = true,
                4 => seen[1] = true,
                other => panic!("unexpected spawn value {other}"),
            }
        }
    }
    assert_eq!(seen, [true, true]);
}

#[test]
#[should_panic]
fn test_non_power_of_two_is_rejected() {
    Tile::new(12);
}
