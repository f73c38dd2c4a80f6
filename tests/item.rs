use bevy_ecs::system::RunSystemOnce;
use glam::IVec2;
use pacman_tick::map::builder::Map;
use pacman_tick::map::direction::Direction;
use pacman_tick::systems::{
    item_system, power_timer_system, Ghost, GhostMode, Level, ModeSchedule, PowerMode, ScoreResource,
};
use speculoos::prelude::*;

mod common;

#[test]
fn test_pellet_scores_ten() {
    let mut game = common::create_game();
    common::place_player(&mut game.world, IVec2::new(1, 1), Direction::Left);

    game.world.run_system_once(item_system).expect("System should run successfully");

    assert_that(&game.world.resource::<ScoreResource>().0).is_equal_to(10);
    assert_that(&game.world.resource::<Map>().dots_remaining()).is_equal_to(153);
    assert_that(&game.world.resource::<PowerMode>().active).is_false();
}

#[test]
fn test_pellet_is_eaten_once() {
    let mut game = common::create_game();
    common::place_player(&mut game.world, IVec2::new(1, 1), Direction::Left);

    game.world.run_system_once(item_system).expect("System should run successfully");
    game.world.run_system_once(item_system).expect("System should run successfully");

    assert_that(&game.world.resource::<ScoreResource>().0).is_equal_to(10);
}

#[test]
fn test_power_pellet_frightens_ghosts_outside_house() {
    let mut game = common::create_game();
    common::place_ghost(&mut game.world, Ghost::Blinky, IVec2::new(9, 7), GhostMode::Scatter);
    common::place_player(&mut game.world, IVec2::new(1, 15), Direction::Left);

    game.world.run_system_once(item_system).expect("System should run successfully");

    assert_that(&game.world.resource::<ScoreResource>().0).is_equal_to(50);
    let power = *game.world.resource::<PowerMode>();
    assert_that(&power.active).is_true();
    assert_that(&power.remaining).is_equal_to(7.0);
    assert_that(&common::ghost_mode(&mut game.world, Ghost::Blinky)).is_equal_to(GhostMode::Frightened);
    assert_that(&common::ghost_mode(&mut game.world, Ghost::Clyde).is_house()).is_true();
}

#[test]
fn test_power_duration_shrinks_with_level() {
    let mut game = common::create_game();
    game.world.insert_resource(Level(3));
    common::place_player(&mut game.world, IVec2::new(17, 2), Direction::Left);

    game.world.run_system_once(item_system).expect("System should run successfully");

    assert_that(&game.world.resource::<PowerMode>().remaining).is_equal_to(6.0);
}

#[test]
fn test_power_expiry_reverts_ghosts() {
    let mut game = common::create_game();
    common::place_ghost(&mut game.world, Ghost::Blinky, IVec2::new(9, 7), GhostMode::Chase);
    common::place_player(&mut game.world, IVec2::new(1, 15), Direction::Left);
    game.world.run_system_once(item_system).expect("System should run successfully");

    common::set_delta(&mut game.world, 6.9);
    game.world.run_system_once(power_timer_system).expect("System should run successfully");
    assert_that(&game.world.resource::<PowerMode>().active).is_true();

    common::set_delta(&mut game.world, 0.2);
    game.world.run_system_once(power_timer_system).expect("System should run successfully");

    let power = *game.world.resource::<PowerMode>();
    assert_that(&power.active).is_false();
    assert_that(&power.streak).is_equal_to(0);
    // Ghosts return to the current schedule phase, not the mode they had before
    let phase = game.world.resource::<ModeSchedule>().phase();
    assert_that(&common::ghost_mode(&mut game.world, Ghost::Blinky)).is_equal_to(GhostMode::from(phase));
}

#[test]
fn test_power_countdown_in_play() {
    let mut game = common::create_game();
    common::park_ghosts(&mut game.world);
    common::place_player(&mut game.world, IVec2::new(1, 15), Direction::Left);

    common::run_for(&mut game, 0.5);
    let power = *game.world.resource::<PowerMode>();
    assert_that(&power.active).is_true();
    assert_that(&power.remaining).is_less_than(7.0);

    common::run_for(&mut game, 7.0);
    assert_that(&game.world.resource::<PowerMode>().active).is_false();
}
