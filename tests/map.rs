use glam::IVec2;
use pacman_tick::constants::MapTile;
use pacman_tick::map::builder::Traversal;
use pacman_tick::map::direction::Direction;
use speculoos::prelude::*;

mod common;

#[test]
fn test_map_counts() {
    let map = common::create_test_map();
    assert_that(&map.width()).is_equal_to(19);
    assert_that(&map.height()).is_equal_to(21);
    assert_that(&map.total_dots()).is_equal_to(154);
    assert_that(&map.dots_remaining()).is_equal_to(154);
}

#[test]
fn test_tile_lookup_out_of_bounds() {
    let map = common::create_test_map();
    assert_that(&map.tile(IVec2::new(-1, 0))).is_none();
    assert_that(&map.tile(IVec2::new(19, 0))).is_none();
    assert_that(&map.tile(IVec2::new(0, 21))).is_none();
    assert_that(&map.tile(IVec2::new(0, 0))).is_equal_to(Some(MapTile::Wall));
}

#[test]
fn test_neighbor_wraps_horizontally() {
    let map = common::create_test_map();
    assert_that(&map.neighbor(IVec2::new(18, 9), Direction::Right)).is_equal_to(Some(IVec2::new(0, 9)));
    assert_that(&map.neighbor(IVec2::new(0, 9), Direction::Left)).is_equal_to(Some(IVec2::new(18, 9)));
    assert_that(&map.neighbor(IVec2::new(5, 0), Direction::Up)).is_none();
    assert_that(&map.neighbor(IVec2::new(5, 20), Direction::Down)).is_none();
}

#[test]
fn test_door_only_opens_for_ghosts_leaving() {
    let map = common::create_test_map();
    let door = map.start_positions.house_door;
    assert_that(&map.is_passable(door, Traversal::Pacman)).is_false();
    assert_that(&map.is_passable(door, Traversal::Ghost)).is_false();
    assert_that(&map.is_passable(door, Traversal::LeavingHouse)).is_true();
    assert_that(&map.step(map.start_positions.house_exit, Direction::Down, Traversal::Ghost)).is_none();
}

#[test]
fn test_walls_are_impassable() {
    let map = common::create_test_map();
    for traversal in [Traversal::Pacman, Traversal::Ghost, Traversal::LeavingHouse] {
        assert_that(&map.is_passable(IVec2::new(0, 0), traversal)).is_false();
    }
    assert_that(&map.step(IVec2::new(9, 15), Direction::Left, Traversal::Pacman)).is_none();
    assert_that(&map.step(IVec2::new(9, 15), Direction::Up, Traversal::Pacman)).is_equal_to(Some(IVec2::new(9, 14)));
}

#[test]
fn test_consume_and_regenerate() {
    let mut map = common::create_test_map();

    assert_that(&map.consume(IVec2::new(1, 1))).is_equal_to(Some(MapTile::Pellet));
    assert_that(&map.consume(IVec2::new(1, 1))).is_none();
    assert_that(&map.consume(IVec2::new(1, 2))).is_equal_to(Some(MapTile::PowerPellet));
    assert_that(&map.consume(IVec2::new(0, 0))).is_none();
    assert_that(&map.dots_remaining()).is_equal_to(152);
    assert_that(&map.tile(IVec2::new(1, 1))).is_equal_to(Some(MapTile::Empty));

    map.regenerate();
    assert_that(&map.dots_remaining()).is_equal_to(154);
    assert_that(&map.tile(IVec2::new(1, 1))).is_equal_to(Some(MapTile::Pellet));
}

#[test]
fn test_wrapped_distance() {
    let map = common::create_test_map();
    assert_that(&map.wrapped_dx(18.0, 0.0)).is_equal_to(1.0);
    assert_that(&map.wrapped_dx(3.0, 5.0)).is_equal_to(2.0);
}

#[test]
fn test_every_open_tile_is_reachable() {
    use std::collections::HashSet;

    let map = common::create_test_map();
    let start = map.start_positions.pacman;
    let mut seen = HashSet::from([start]);
    let mut frontier = vec![start];
    while let Some(tile) = frontier.pop() {
        for direction in Direction::DIRECTIONS {
            if let Some(next) = map.step(tile, direction, Traversal::Pacman) {
                if seen.insert(next) {
                    frontier.push(next);
                }
            }
        }
    }

    for (position, tile) in map.tiles() {
        if tile.is_edible() {
            assert!(seen.contains(&position), "Pellet at {position:?} is unreachable");
        }
    }
}
