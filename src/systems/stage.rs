use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use tracing::{debug, info};

use crate::{
    events::StageTransition,
    map::{builder::Map, direction::Direction},
    systems::{
        components::{
            Animation, DeltaTime, GameStage, Ghost, GhostMode, GlobalState, HighScore, Level, Mechanics, ModeSchedule,
            PlayerControlled, PowerMode, ScoreResource, SpawnPoint,
        },
        movement::{NextDirection, Position, Velocity},
    },
};

/// Pac-Man's movement state, as reset on death or level clear.
pub type PlayerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Position,
        &'static mut Velocity,
        &'static mut NextDirection,
        &'static mut Animation,
        &'static SpawnPoint,
    ),
    (With<PlayerControlled>, Without<Ghost>),
>;

/// Ghost movement and mode state, as reset on death or level clear.
pub type GhostQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Ghost,
        &'static mut Position,
        &'static mut Velocity,
        &'static mut GhostMode,
        &'static SpawnPoint,
    ),
    Without<PlayerControlled>,
>;

impl GameStage {
    /// Runs down the ready countdown. Returns true when play begins.
    pub fn tick(&mut self, dt: f32) -> bool {
        if let GameStage::Starting { remaining } = self {
            *remaining -= dt;
            if *remaining <= 0.0 {
                *self = GameStage::Playing;
                return true;
            }
        }
        false
    }
}

/// Puts every actor back on its spawn, facing its starting direction.
pub fn reset_actors(players: &mut PlayerQuery, ghosts: &mut GhostQuery) {
    for (mut position, mut velocity, mut next_direction, mut animation, spawn) in players.iter_mut() {
        *position = Position::Stopped { tile: spawn.0 };
        velocity.direction = Direction::Left;
        next_direction.0 = None;
        animation.phase = 0.0;
    }

    for (ghost, mut position, mut velocity, mut mode, spawn) in ghosts.iter_mut() {
        *position = Position::Stopped { tile: spawn.0 };
        velocity.direction = if *ghost == Ghost::Blinky { Direction::Left } else { Direction::Up };
        *mode = GhostMode::House {
            release_in: ghost.release_delay(),
        };
    }
}

/// Counts down the "READY!" pause.
pub fn stage_system(delta_time: Res<DeltaTime>, mut stage: ResMut<GameStage>) {
    if stage.tick(delta_time.0) {
        debug!("Ready countdown finished, play begins");
    }
}

/// Advances to the next level once every pellet is gone.
#[allow(clippy::too_many_arguments)]
pub fn level_clear_system(
    mut map: ResMut<Map>,
    mut level: ResMut<Level>,
    mut power: ResMut<PowerMode>,
    mut schedule: ResMut<ModeSchedule>,
    mut stage: ResMut<GameStage>,
    mechanics: Res<Mechanics>,
    mut players: PlayerQuery,
    mut ghosts: GhostQuery,
    mut transitions: EventWriter<StageTransition>,
) {
    if map.dots_remaining() > 0 {
        return;
    }

    level.0 += 1;
    map.regenerate();
    power.clear();
    *schedule = ModeSchedule::default();
    reset_actors(&mut players, &mut ghosts);
    *stage = GameStage::Starting {
        remaining: mechanics.ready_delay,
    };

    info!(level = level.0, speed = level.speed_factor(), "Level cleared");
    transitions.write(StageTransition::LevelCleared { level: level.0 });
}

/// Keeps the in-memory high score in step with the current score.
pub fn high_score_system(score: Res<ScoreResource>, mut high_score: ResMut<HighScore>) {
    if score.0 > high_score.0 {
        high_score.0 = score.0;
    }
}

/// Run condition: true while the game is being played and is not paused.
pub fn gameplay_active(stage: Res<GameStage>, state: Res<GlobalState>) -> bool {
    *stage == GameStage::Playing && !state.paused
}

/// Run condition: true unless the game is paused.
pub fn not_paused(state: Res<GlobalState>) -> bool {
    !state.paused
}
