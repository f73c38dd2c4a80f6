use glam::IVec2;
use pacman_tick::autopilot::next_direction;
use pacman_tick::events::GameCommand;
use pacman_tick::map::direction::Direction;
use pacman_tick::systems::{GhostMode, Position};
use speculoos::prelude::*;

mod common;

#[test]
fn test_autopilot_heads_for_nearest_pellet() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);

    // Pellets lie both above and below the start; Up is searched first
    let snapshot = game.snapshot();
    assert_that(&next_direction(&snapshot)).is_equal_to(Some(Direction::Up));
}

#[test]
fn test_autopilot_avoids_dangerous_ghosts() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);
    common::place_player(&mut game.world, IVec2::new(9, 16), Direction::Down);

    let mut snapshot = game.snapshot();
    // A chasing ghost sits on the pellet above Pac-Man's start
    let ghost = &mut snapshot.ghosts[0];
    ghost.tile = IVec2::new(9, 14);
    ghost.mode = GhostMode::Chase;

    let direction = next_direction(&snapshot);
    assert_that(&direction).is_some();
    assert_that(&direction).is_not_equal_to(Some(Direction::Up));
}

#[test]
fn test_autopilot_ignores_frightened_ghosts() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);

    let mut snapshot = game.snapshot();
    let ghost = &mut snapshot.ghosts[0];
    ghost.tile = IVec2::new(9, 14);
    ghost.mode = GhostMode::Frightened;

    assert_that(&next_direction(&snapshot)).is_equal_to(Some(Direction::Up));
}

#[test]
fn test_autopilot_clears_pellets() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);

    for _ in 0..(60 * 10) {
        let snapshot = game.snapshot();
        if let Some(direction) = next_direction(&snapshot) {
            game.command(GameCommand::MovePlayer(direction));
        }
        game.tick(1.0 / 60.0);
    }

    assert_that(&game.score()).is_greater_than(500);
    assert_that(&common::player_position(&mut game.world)).is_not_equal_to(Position::Stopped {
        tile: IVec2::new(9, 15),
    });
}
