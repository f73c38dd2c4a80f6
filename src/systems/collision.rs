use bevy_ecs::{
    event::EventWriter,
    system::{Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::{
    constants::COLLISION_DISTANCE,
    events::StageTransition,
    map::builder::Map,
    systems::{
        components::{GameStage, Ghost, Mechanics, ModeSchedule, ModeTrigger, PlayerLives, PowerMode, ScoreResource},
        movement::Position,
        stage::{reset_actors, GhostQuery, PlayerQuery},
    },
};

/// Whether two actor centres (in tile coordinates) overlap, allowing for the side tunnel.
pub fn actors_collide(map: &Map, a: Vec2, b: Vec2) -> bool {
    let dx = map.wrapped_dx(a.x, b.x);
    let dy = a.y - b.y;
    dx * dx + dy * dy < COLLISION_DISTANCE * COLLISION_DISTANCE
}

/// Resolves contact between Pac-Man and the ghosts.
///
/// While power mode is active, ghosts are eaten for an escalating bonus and sent back
/// to the house; ghosts still inside the house are out of reach. Otherwise any contact
/// costs a life, and the last life ends the run.
#[allow(clippy::too_many_arguments)]
pub fn ghost_collision_system(
    map: Res<Map>,
    mechanics: Res<Mechanics>,
    mut score: ResMut<ScoreResource>,
    mut lives: ResMut<PlayerLives>,
    mut power: ResMut<PowerMode>,
    mut schedule: ResMut<ModeSchedule>,
    mut stage: ResMut<GameStage>,
    mut players: PlayerQuery,
    mut ghosts: GhostQuery,
    mut transitions: EventWriter<StageTransition>,
) {
    let Some(pacman) = players.iter().next().map(|(position, ..)| position.center(map.width())) else {
        return;
    };

    let mut caught_by: SmallVec<[Ghost; 4]> = SmallVec::new();

    for (ghost, mut position, _, mut mode, _) in ghosts.iter_mut() {
        if !actors_collide(&map, pacman, position.center(map.width())) {
            continue;
        }

        if !power.active {
            caught_by.push(*ghost);
        } else if !mode.is_house() {
            let bonus = power.eat_ghost();
            score.0 += bonus;
            *position = Position::Stopped {
                tile: map.start_positions.house_center(),
            };
            *mode = mode.transition(ModeTrigger::Eaten {
                respawn_delay: mechanics.respawn_delay,
            });
            debug!(ghost = ?ghost, bonus, streak = power.streak, "Ghost eaten");
            transitions.write(StageTransition::GhostEaten { ghost: *ghost, bonus });
        }
    }

    let Some(ghost) = caught_by.first() else {
        return;
    };

    lives.0 = lives.0.saturating_sub(1);
    info!(ghost = ?ghost, lives = lives.0, "Pac-Man caught");
    transitions.write(StageTransition::PlayerDied { lives_left: lives.0 });

    if lives.0 == 0 {
        *stage = GameStage::GameOver;
        info!(score = score.0, "Game over");
        transitions.write(StageTransition::GameOver { score: score.0 });
        return;
    }

    power.clear();
    *schedule = ModeSchedule::default();
    reset_actors(&mut players, &mut ghosts);
    *stage = GameStage::Starting {
        remaining: mechanics.ready_delay,
    };
}
