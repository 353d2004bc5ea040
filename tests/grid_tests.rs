//! Grid tests - occupancy bookkeeping

use tile_merge::core::{ConfigError, Grid};
use tile_merge::types::{Direction, Position, TileId};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new(5, 3).unwrap();
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 3);
    assert_eq!(grid.cell_count(), 15);

    for x in 0..5 {
        for y in 0..3 {
            let p = Position::new(x, y);
            assert!(grid.contains(p));
            assert_eq!(grid.occupant_at(p), None, "cell {p} should be empty");
        }
    }
}

#[test]
fn test_grid_rejects_zero_dimensions() {
    assert!(matches!(
        Grid::new(0, 0),
        Err(ConfigError::InvalidDimensions { width: 0, height: 0 })
    ));
    assert!(Grid::new(1, 0).is_err());
    assert!(Grid::new(1, 1).is_ok());
}

#[test]
fn test_grid_contains() {
    let grid = Grid::new(4, 4).unwrap();
    assert!(grid.contains(Position::new(3, 3)));
    assert!(!grid.contains(Position::new(4, 0)));
    assert!(!grid.contains(Position::new(0, 4)));
}

#[test]
fn test_empty_positions_tracks_occupancy() {
    let mut grid = Grid::new(2, 2).unwrap();
    assert_eq!(grid.empty_positions().len(), 4);

    grid.set_occupant(Position::new(0, 1), Some(TileId(0)));
    grid.set_occupant(Position::new(1, 1), Some(TileId(1)));

    let mut empty = grid.empty_positions();
    empty.sort();
    assert_eq!(empty, vec![Position::new(0, 0), Position::new(1, 0)]);
    assert_eq!(grid.empty_count(), 2);
    assert_eq!(grid.occupied_count(), 2);

    grid.set_occupant(Position::new(0, 1), None);
    assert_eq!(grid.empty_count(), 3);
}

#[test]
fn test_set_occupant_overwrites() {
    // The grid is a plain map; it does not police double placement.
    let mut grid = Grid::new(3, 3).unwrap();
    let p = Position::new(1, 1);
    grid.set_occupant(p, Some(TileId(3)));
    grid.set_occupant(p, Some(TileId(4)));
    assert_eq!(grid.occupant_at(p), Some(TileId(4)));
}

#[test]
fn test_neighbor_walk_reaches_edge() {
    let grid = Grid::new(4, 4).unwrap();

    for (dir, expected_end) in [
        (Direction::Left, Position::new(0, 2)),
        (Direction::Right, Position::new(3, 2)),
        (Direction::Up, Position::new(1, 3)),
        (Direction::Down, Position::new(1, 0)),
    ] {
        let mut p = Position::new(1, 2);
        while let Some(next) = grid.neighbor(p, dir) {
            p = next;
        }
        assert_eq!(p, expected_end, "walking {dir}");
    }
}

#[test]
fn test_clear_empties_every_cell() {
    let mut grid = Grid::new(3, 2).unwrap();
    for (i, p) in grid.positions().collect::<Vec<_>>().into_iter().enumerate() {
        grid.set_occupant(p, Some(TileId(i as u32)));
    }
    assert_eq!(grid.empty_count(), 0);

    grid.clear();
    assert_eq!(grid.empty_count(), 6);
}

#[test]
#[should_panic]
fn test_out_of_bounds_access_panics() {
    let grid = Grid::new(4, 4).unwrap();
    let _ = grid.occupant_at(Position::new(0, 9));
}
