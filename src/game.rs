//! This module contains the main game logic and state.

use bevy_ecs::event::{EventCursor, EventRegistry, Events};
use bevy_ecs::query::With;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule};
use bevy_ecs::world::World;
use glam::{IVec2, Vec2};
use strum::IntoEnumIterator;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::constants::{MAX_FRAME_TIME, MAX_STEP, RAW_BOARD};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent, StageTransition};
use crate::formatter;
use crate::highscore::{load_high_score, record_high_score, KeyValueStore};
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::systems::{
    gameplay_active, ghost_collision_system, ghost_movement_system, ghost_release_system, high_score_system, item_system,
    level_clear_system, mode_schedule_system, not_paused, player_control_system, player_movement_system, power_timer_system,
    stage_system, Animation, DeltaTime, GameRng, GameStage, Ghost, GhostMode, GlobalState, HighScore, Level, Mechanics,
    ModeSchedule, NextDirection, PlayerControlled, PlayerLives, Position, PowerMode, ScoreResource, SpawnPoint, Velocity,
};

/// Pac-Man as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacmanView {
    pub tile: IVec2,
    /// Interpolated centre, in tile coordinates.
    pub center: Vec2,
    pub direction: Direction,
    pub moving: bool,
    pub animation: f32,
}

/// A ghost as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostView {
    pub ghost: Ghost,
    pub tile: IVec2,
    pub center: Vec2,
    pub direction: Direction,
    pub mode: GhostMode,
}

/// A read-only copy of everything needed to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub map: Map,
    pub pacman: PacmanView,
    /// Ordered Blinky, Pinky, Inky, Clyde.
    pub ghosts: Vec<GhostView>,
    pub score: u32,
    pub high_score: u32,
    pub lives: u8,
    pub level: u32,
    pub power: PowerMode,
    pub stage: GameStage,
    pub paused: bool,
}

/// The `Game` struct is the main entry point for the simulation.
///
/// It owns the ECS world and schedule, turns commands into events, advances the
/// simulation in fixed sub-steps and persists the high score whenever a run ends.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
    config: Config,
    store: Box<dyn KeyValueStore>,
    transition_cursor: EventCursor<StageTransition>,
    error_cursor: EventCursor<GameError>,
    transitions: Vec<StageTransition>,
}

impl Game {
    pub fn new(config: Config, store: Box<dyn KeyValueStore>) -> GameResult<Game> {
        config.validate()?;

        let high_score = load_high_score(store.as_ref());
        let world = Self::build_world(&config, high_score)?;

        info!(high_score, seed = ?config.seed, "Game created");

        Ok(Game {
            world,
            schedule: Self::build_schedule(),
            config,
            store,
            transition_cursor: EventCursor::default(),
            error_cursor: EventCursor::default(),
            transitions: Vec::new(),
        })
    }

    fn build_world(config: &Config, high_score: u32) -> GameResult<World> {
        let mut world = World::default();

        EventRegistry::register_event::<GameError>(&mut world);
        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<StageTransition>(&mut world);

        let map = Map::new(&RAW_BOARD)?;
        let starts = map.start_positions;

        world.spawn((
            PlayerControlled,
            Position::Stopped { tile: starts.pacman },
            Velocity {
                direction: Direction::Left,
                speed: config.pacman_speed,
            },
            NextDirection::default(),
            Animation::default(),
            SpawnPoint(starts.pacman),
        ));

        for ghost in Ghost::iter() {
            let start = ghost.start(&starts);
            world.spawn((
                ghost,
                Position::Stopped { tile: start },
                Velocity {
                    direction: if ghost == Ghost::Blinky { Direction::Left } else { Direction::Up },
                    speed: config.ghost_speed,
                },
                GhostMode::House {
                    release_in: ghost.release_delay(),
                },
                SpawnPoint(start),
            ));
        }

        world.insert_resource(map);
        world.insert_resource(GlobalState::default());
        world.insert_resource(ScoreResource(0));
        world.insert_resource(HighScore(high_score));
        world.insert_resource(PlayerLives(config.starting_lives));
        world.insert_resource(Level::default());
        world.insert_resource(PowerMode::default());
        world.insert_resource(ModeSchedule::default());
        world.insert_resource(GameStage::Starting {
            remaining: config.ready_delay,
        });
        world.insert_resource(Mechanics::from(config));
        world.insert_resource(GameRng::new(config.seed));
        world.insert_resource(DeltaTime(0f32));

        Ok(world)
    }

    fn build_schedule() -> Schedule {
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        schedule.add_systems(
            (
                player_control_system,
                stage_system.run_if(not_paused),
                (
                    power_timer_system,
                    mode_schedule_system,
                    player_movement_system,
                    ghost_release_system,
                    ghost_movement_system,
                    item_system,
                    level_clear_system,
                    ghost_collision_system,
                )
                    .chain()
                    .distributive_run_if(gameplay_active),
                high_score_system,
            )
                .chain(),
        );

        schedule
    }

    /// Queues a command for the next tick.
    pub fn command(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::from(command));
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Long frames are clamped and split into sub-steps no longer than [`MAX_STEP`].
    /// At least one sub-step always runs, so queued commands are never left waiting.
    /// A non-finite `dt` counts as zero. Returns true if the game should exit.
    pub fn tick(&mut self, dt: f32) -> bool {
        let dt = if dt.is_finite() { dt } else { 0.0 };
        let mut remaining = dt.clamp(0.0, MAX_FRAME_TIME);
        loop {
            let step = remaining.min(MAX_STEP);
            self.step(step);
            remaining -= step;
            if remaining <= 0.0 || self.world.resource::<GlobalState>().exit {
                break;
            }
        }

        let exit = self.world.resource::<GlobalState>().exit;
        if exit {
            self.save_high_score();
        }
        exit
    }

    fn step(&mut self, dt: f32) {
        formatter::increment_tick();
        self.world.insert_resource(DeltaTime(dt));

        self.schedule.run(&mut self.world);

        self.drain_errors();
        self.drain_transitions();
        self.update_events();

        if self.world.resource::<GlobalState>().restart_requested {
            self.save_high_score();
            if let Err(e) = self.restart() {
                error!(error = %e, "Failed to restart game");
                self.world.resource_mut::<GlobalState>().restart_requested = false;
            }
        }
    }

    fn drain_errors(&mut self) {
        let events = self.world.resource::<Events<GameError>>();
        for e in self.error_cursor.read(events) {
            error!(error = %e, "System reported an error");
        }
    }

    fn drain_transitions(&mut self) {
        let events = self.world.resource::<Events<StageTransition>>();
        let fresh: Vec<StageTransition> = self.transition_cursor.read(events).copied().collect();

        for transition in fresh {
            if let StageTransition::GameOver { .. } = transition {
                self.save_high_score();
            }
            self.transitions.push(transition);
        }
    }

    /// Writes the best score seen so far to the store if it beats the stored value.
    ///
    /// Called whenever a run ends: game over, restart or exit.
    fn save_high_score(&mut self) {
        let high_score = self.high_score();
        match record_high_score(self.store.as_mut(), high_score) {
            Ok(true) => info!(high_score, "New high score saved"),
            Ok(false) => debug!(high_score, "High score unchanged"),
            Err(e) => warn!(high_score, error = %e, "Failed to save high score"),
        }
    }

    fn update_events(&mut self) {
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();
        self.world.resource_mut::<Events<StageTransition>>().update();
    }

    /// Starts a fresh run, keeping only the high score.
    fn restart(&mut self) -> GameResult<()> {
        let high_score = self.high_score();
        self.world = Self::build_world(&self.config, high_score)?;
        self.schedule = Self::build_schedule();
        self.transition_cursor = EventCursor::default();
        self.error_cursor = EventCursor::default();
        info!(high_score, "Game restarted");
        Ok(())
    }

    /// Removes and returns the stage transitions seen since the last call.
    pub fn take_transitions(&mut self) -> Vec<StageTransition> {
        std::mem::take(&mut self.transitions)
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn high_score(&self) -> u32 {
        self.world.resource::<HighScore>().0
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<PlayerLives>().0
    }

    pub fn level(&self) -> u32 {
        self.world.resource::<Level>().0
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }

    pub fn is_paused(&self) -> bool {
        self.world.resource::<GlobalState>().paused
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Copies the current state into a [`GameSnapshot`].
    pub fn snapshot(&mut self) -> GameSnapshot {
        let map = self.world.resource::<Map>().clone();
        let width = map.width();

        let pacman = self
            .world
            .query_filtered::<(&Position, &Velocity, &Animation), With<PlayerControlled>>()
            .iter(&self.world)
            .next()
            .map(|(position, velocity, animation)| PacmanView {
                tile: position.tile(),
                center: position.center(width),
                direction: velocity.direction,
                moving: !position.is_stopped(),
                animation: animation.phase,
            })
            .unwrap_or(PacmanView {
                tile: map.start_positions.pacman,
                center: map.start_positions.pacman.as_vec2(),
                direction: Direction::Left,
                moving: false,
                animation: 0.0,
            });

        let mut ghosts: Vec<GhostView> = self
            .world
            .query::<(&Ghost, &Position, &Velocity, &GhostMode)>()
            .iter(&self.world)
            .map(|(ghost, position, velocity, mode)| GhostView {
                ghost: *ghost,
                tile: position.tile(),
                center: position.center(width),
                direction: velocity.direction,
                mode: *mode,
            })
            .collect();
        ghosts.sort_by_key(|view| view.ghost as u8);

        GameSnapshot {
            map,
            pacman,
            ghosts,
            score: self.score(),
            high_score: self.high_score(),
            lives: self.lives(),
            level: self.level(),
            power: *self.world.resource::<PowerMode>(),
            stage: self.stage(),
            paused: self.is_paused(),
        }
    }
}
