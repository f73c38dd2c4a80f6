use bevy_ecs::event::Events;
use bevy_ecs::system::RunSystemOnce;
use glam::IVec2;
use pacman_tick::events::StageTransition;
use pacman_tick::map::builder::Map;
use pacman_tick::map::direction::Direction;
use pacman_tick::systems::{item_system, level_clear_system, GameStage, Ghost, GhostMode, Level, PowerMode, ScoreResource};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

#[test]
fn test_clearing_board_advances_level() {
    let mut game = common::create_game();
    let edible: Vec<IVec2> = game
        .world
        .resource::<Map>()
        .tiles()
        .filter(|(_, tile)| tile.is_edible())
        .map(|(position, _)| position)
        .collect();
    assert_that(&edible.len()).is_equal_to(154);

    let (last, rest) = edible.split_last().unwrap();
    for tile in rest {
        common::place_player(&mut game.world, *tile, Direction::Left);
        game.world.run_system_once(item_system).unwrap();
    }
    game.world.run_system_once(level_clear_system).unwrap();
    assert_that(&game.world.resource::<Level>().0).is_equal_to(1);
    assert_that(&game.world.resource::<Map>().dots_remaining()).is_equal_to(1);

    common::place_ghost(&mut game.world, Ghost::Inky, IVec2::new(4, 3), GhostMode::Frightened);
    common::place_player(&mut game.world, *last, Direction::Left);
    game.world.run_system_once(item_system).unwrap();
    game.world.run_system_once(level_clear_system).unwrap();

    assert_that(&game.world.resource::<ScoreResource>().0).is_equal_to(150 * 10 + 4 * 50);
    assert_that(&game.world.resource::<Level>().0).is_equal_to(2);

    let map = game.world.resource::<Map>();
    assert_that(&map.dots_remaining()).is_equal_to(154);
    assert_that(&map.total_dots()).is_equal_to(154);

    assert_that(&game.world.resource::<PowerMode>().active).is_false();
    assert_that(&*game.world.resource::<GameStage>()).is_equal_to(GameStage::Starting { remaining: 0.0 });
    assert_that(&common::player_position(&mut game.world)).is_equal_to(pacman_tick::systems::Position::Stopped {
        tile: IVec2::new(9, 15),
    });
    assert_that(&common::ghost_mode(&mut game.world, Ghost::Inky)).is_equal_to(GhostMode::House { release_in: 5.0 });

    let events: Vec<StageTransition> = game
        .world
        .resource::<Events<StageTransition>>()
        .iter_current_update_events()
        .copied()
        .collect();
    assert_eq!(events, vec![StageTransition::LevelCleared { level: 2 }]);
}

#[test]
fn test_ready_delay_holds_actors() {
    let config = pacman_tick::config::Config {
        ready_delay: 2.0,
        ..common::test_config()
    };
    let mut game = common::create_game_with(config);
    game.command(pacman_tick::events::GameCommand::MovePlayer(Direction::Up));

    common::run_for(&mut game, 1.0);
    assert!(matches!(game.stage(), GameStage::Starting { .. }));
    assert_that(&common::player_position(&mut game.world).is_stopped()).is_true();

    common::run_for(&mut game, 1.1);
    assert_that(&game.stage()).is_equal_to(GameStage::Playing);
    assert_that(&common::player_position(&mut game.world).is_stopped()).is_false();
}

#[test]
fn test_level_speeds_up() {
    assert!(Level(2).speed_factor() > Level(1).speed_factor());
    assert_that(&Level(10).speed_factor()).is_equal_to(1.25);
    assert_that(&Level(2).power_duration(7.0)).is_equal_to(6.5);
}
