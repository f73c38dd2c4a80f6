use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, Res, ResMut},
};
use tracing::{debug, info, trace};

use crate::{
    error::GameError,
    events::{GameCommand, GameEvent},
    map::builder::{Map, Traversal},
    systems::{
        components::{Animation, DeltaTime, GameStage, GlobalState, Level, PlayerControlled},
        movement::{NextDirection, Position, Velocity},
    },
};

/// Processes queued commands and updates game state accordingly.
///
/// Movement commands are buffered on the player so a turn can be requested before
/// reaching the intersection. The remaining commands toggle global state directly.
/// This system runs even while paused, so unpausing is always possible.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    stage: Res<GameStage>,
    mut players: Query<&mut NextDirection, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event;
        match command {
            GameCommand::MovePlayer(direction) => {
                let mut next_direction = match players.single_mut() {
                    Ok(next) => next,
                    Err(e) => {
                        errors.write(GameError::InvalidState(format!(
                            "No/multiple entities queried for player system: {}",
                            e
                        )));
                        return;
                    }
                };
                trace!(direction = ?direction, "Player direction buffered");
                next_direction.0 = Some(*direction);
            }
            GameCommand::TogglePause => {
                if *stage == GameStage::GameOver {
                    continue;
                }
                state.paused = !state.paused;
                info!("{}", if state.paused { "Game paused" } else { "Game unpaused" });
            }
            GameCommand::Restart => {
                debug!("Restart requested");
                state.restart_requested = true;
            }
            GameCommand::Exit => {
                info!("Exit requested");
                state.exit = true;
            }
        }
    }
}

/// Moves Pac-Man through the maze.
///
/// At each tile centre the buffered direction is tried first, then the current heading.
/// When neither leads anywhere, Pac-Man comes to rest on the centre instead of reversing.
pub fn player_movement_system(
    map: Res<Map>,
    delta_time: Res<DeltaTime>,
    level: Res<Level>,
    mut players: Query<(&mut Position, &mut Velocity, &mut NextDirection, &mut Animation), With<PlayerControlled>>,
) {
    for (mut position, mut velocity, mut next_direction, mut animation) in players.iter_mut() {
        let mut distance = velocity.speed * level.speed_factor() * delta_time.0;

        loop {
            match *position {
                Position::Stopped { tile } => {
                    let requested = next_direction
                        .0
                        .and_then(|direction| map.step(tile, direction, Traversal::Pacman).map(|to| (direction, to)));

                    let (direction, to) = match requested {
                        Some(turn) => {
                            next_direction.0 = None;
                            turn
                        }
                        None => match map.step(tile, velocity.direction, Traversal::Pacman) {
                            Some(to) => (velocity.direction, to),
                            // Blocked: stay idle on the tile centre
                            None => break,
                        },
                    };

                    velocity.direction = direction;
                    *position = Position::Moving { from: tile, to, remaining: 1.0 };
                }
                Position::Moving { .. } => {
                    let before = distance;
                    let overflow = position.tick(distance);
                    animation.phase += before - overflow.unwrap_or(0.0);

                    match overflow {
                        Some(overflow) => distance = overflow,
                        None => break,
                    }
                }
            }
        }
    }
}
