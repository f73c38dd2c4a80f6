#![allow(dead_code)]

use bevy_ecs::{entity::Entity, query::With, world::World};
use pacman_tick::{
    config::Config,
    constants::RAW_BOARD,
    game::Game,
    highscore::MemoryStore,
    map::{builder::Map, direction::Direction},
    systems::{DeltaTime, Ghost, GhostMode, PlayerControlled, Position, Velocity},
};

/// Deterministic settings: no ready pause, no random ghost moves, fixed seed.
pub fn test_config() -> Config {
    Config {
        ready_delay: 0.0,
        ghost_jitter: 0.0,
        seed: Some(7),
        ..Config::default()
    }
}

pub fn create_game() -> Game {
    create_game_with(test_config())
}

pub fn create_game_with(config: Config) -> Game {
    Game::new(config, Box::new(MemoryStore::new())).expect("Failed to create game")
}

/// Creates a test map using the default RAW_BOARD
pub fn create_test_map() -> Map {
    Map::new(&RAW_BOARD).expect("Failed to create test map")
}

pub fn player(world: &mut World) -> Entity {
    world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(world)
        .expect("Exactly one player")
}

pub fn ghost(world: &mut World, which: Ghost) -> Entity {
    world
        .query::<(Entity, &Ghost)>()
        .iter(world)
        .find(|(_, ghost)| **ghost == which)
        .map(|(entity, _)| entity)
        .expect("Ghost exists")
}

/// Places Pac-Man on a tile centre, facing `direction`.
pub fn place_player(world: &mut World, tile: glam::IVec2, direction: Direction) {
    let entity = player(world);
    let mut entity = world.entity_mut(entity);
    *entity.get_mut::<Position>().expect("Player has a position") = Position::Stopped { tile };
    entity.get_mut::<Velocity>().expect("Player has a velocity").direction = direction;
}

/// Places a ghost on a tile centre with the given mode.
pub fn place_ghost(world: &mut World, which: Ghost, tile: glam::IVec2, mode: GhostMode) {
    let entity = ghost(world, which);
    let mut entity = world.entity_mut(entity);
    *entity.get_mut::<Position>().expect("Ghost has a position") = Position::Stopped { tile };
    *entity.get_mut::<GhostMode>().expect("Ghost has a mode") = mode;
}

/// Keeps every ghost waiting in the house for the rest of the test.
pub fn park_ghosts(world: &mut World) {
    for mut mode in world.query::<&mut GhostMode>().iter_mut(world) {
        *mode = GhostMode::House { release_in: 1_000.0 };
    }
}

pub fn player_position(world: &mut World) -> Position {
    let entity = player(world);
    *world.get::<Position>(entity).expect("Player has a position")
}

pub fn ghost_mode(world: &mut World, which: Ghost) -> GhostMode {
    let entity = ghost(world, which);
    *world.get::<GhostMode>(entity).expect("Ghost has a mode")
}

pub fn set_delta(world: &mut World, seconds: f32) {
    world.insert_resource(DeltaTime(seconds));
}

/// Ticks the game in 60 Hz frames for `seconds`.
pub fn run_for(game: &mut Game, seconds: f32) {
    let frames = (seconds * 60.0).round() as u32;
    for _ in 0..frames {
        game.tick(1.0 / 60.0);
    }
}
