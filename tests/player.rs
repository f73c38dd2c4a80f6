use glam::IVec2;
use pacman_tick::events::GameCommand;
use pacman_tick::map::direction::Direction;
use pacman_tick::systems::{GameStage, Position, Velocity};
use speculoos::prelude::*;

mod common;

#[test]
fn test_player_blocked_by_wall_stays_idle() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);

    // Pac-Man starts facing Left into a wall
    common::run_for(&mut game, 1.0);

    assert_that(&common::player_position(&mut game.world)).is_equal_to(Position::Stopped {
        tile: IVec2::new(9, 15),
    });
    assert_that(&game.stage()).is_equal_to(GameStage::Playing);
}

#[test]
fn test_player_wraps_through_tunnel() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);
    common::place_player(&mut game.world, IVec2::new(18, 9), Direction::Right);

    // 7.5 tiles/s for 0.1 s is three quarters of a tile
    common::run_for(&mut game, 0.1);

    let position = common::player_position(&mut game.world);
    match position {
        Position::Moving { from, to, .. } => {
            assert_that(&from).is_equal_to(IVec2::new(18, 9));
            assert_that(&to).is_equal_to(IVec2::new(0, 9));
        }
        other => panic!("Expected Pac-Man to be moving, got {other:?}"),
    }
    assert_that(&position.tile()).is_equal_to(IVec2::new(0, 9));
}

#[test]
fn test_player_turns_only_at_tile_centres() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);

    game.command(GameCommand::MovePlayer(Direction::Up));
    common::run_for(&mut game, 0.05);

    // Asking to turn mid-step is buffered, not applied
    game.command(GameCommand::MovePlayer(Direction::Left));
    common::run_for(&mut game, 0.05);

    let entity = common::player(&mut game.world);
    let velocity = *game.world.get::<Velocity>(entity).unwrap();
    assert_that(&velocity.direction).is_equal_to(Direction::Up);
    assert_that(&common::player_position(&mut game.world).is_stopped()).is_false();
    // Halfway into (9, 14), whose pellet is now eaten
    assert_that(&game.score()).is_equal_to(10);

    common::run_for(&mut game, 0.1);

    let velocity = *game.world.get::<Velocity>(entity).unwrap();
    assert_that(&velocity.direction).is_equal_to(Direction::Left);
    match common::player_position(&mut game.world) {
        Position::Moving { from, to, .. } => {
            assert_that(&from).is_equal_to(IVec2::new(9, 14));
            assert_that(&to).is_equal_to(IVec2::new(8, 14));
        }
        other => panic!("Expected Pac-Man to be moving, got {other:?}"),
    }
}

#[test]
fn test_pause_freezes_play() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);

    game.command(GameCommand::TogglePause);
    game.command(GameCommand::MovePlayer(Direction::Up));
    common::run_for(&mut game, 0.5);

    assert_that(&game.is_paused()).is_true();
    assert_that(&common::player_position(&mut game.world)).is_equal_to(Position::Stopped {
        tile: IVec2::new(9, 15),
    });

    game.command(GameCommand::TogglePause);
    common::run_for(&mut game, 0.05);
    assert_that(&game.is_paused()).is_false();
    assert_that(&common::player_position(&mut game.world).is_stopped()).is_false();
}

#[test]
fn test_exit_command_stops_ticking() {
    let mut game = common::create_game();
    game.command(GameCommand::Exit);
    assert_that(&game.tick(1.0 / 60.0)).is_true();
}
