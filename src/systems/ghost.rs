use bevy_ecs::{
    event::EventWriter,
    query::{With, Without},
    system::{Query, Res, ResMut},
};
use glam::IVec2;
use rand::{seq::IndexedRandom, Rng};
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::{
    constants::{FRIGHTENED_SPEED_FACTOR, HOUSE_SPEED_FACTOR, TUNNEL_SPEED_FACTOR},
    error::GameError,
    map::{
        builder::{Map, Traversal},
        direction::Direction,
    },
    systems::{
        components::{
            DeltaTime, GameRng, Ghost, GhostMode, Level, Mechanics, ModeSchedule, ModeTrigger, PlayerControlled, PowerMode,
        },
        movement::{Position, Velocity},
    },
};

/// Whether a ghost wants to get close to its target or away from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPolicy {
    Approach,
    Flee,
}

/// What a ghost steers toward in its current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Steering {
    pub target: IVec2,
    pub policy: TargetPolicy,
    pub traversal: Traversal,
}

impl Steering {
    pub fn for_mode(ghost: Ghost, mode: GhostMode, pacman: IVec2, map: &Map) -> Steering {
        match mode {
            GhostMode::House { .. } => Steering {
                target: map.start_positions.house_exit,
                policy: TargetPolicy::Approach,
                traversal: Traversal::LeavingHouse,
            },
            GhostMode::Scatter => Steering {
                target: ghost.scatter_target(map.width(), map.height()),
                policy: TargetPolicy::Approach,
                traversal: Traversal::Ghost,
            },
            GhostMode::Chase => Steering {
                target: pacman,
                policy: TargetPolicy::Approach,
                traversal: Traversal::Ghost,
            },
            GhostMode::Frightened => Steering {
                target: pacman,
                policy: TargetPolicy::Flee,
                traversal: Traversal::Ghost,
            },
        }
    }
}

/// Picks the next move for a ghost standing on `tile` while heading `heading`.
///
/// Reversing is only allowed when it is the sole legal move. Candidates are scored by
/// squared distance to the target; ties go to the earliest entry in
/// [`Direction::DIRECTIONS`]. With probability `jitter` a random candidate is taken instead.
/// Returns the chosen direction and the tile it leads to.
pub fn choose_direction<R: Rng>(
    map: &Map,
    tile: IVec2,
    heading: Direction,
    steering: Steering,
    jitter: f32,
    rng: &mut R,
) -> Option<(Direction, IVec2)> {
    let reverse = heading.opposite();

    let legal: SmallVec<[(Direction, IVec2); 4]> = Direction::DIRECTIONS
        .iter()
        .filter_map(|&direction| map.step(tile, direction, steering.traversal).map(|to| (direction, to)))
        .collect();

    let forward: SmallVec<[(Direction, IVec2); 4]> = legal.iter().copied().filter(|(d, _)| *d != reverse).collect();
    let candidates = if forward.is_empty() { legal } else { forward };

    if candidates.is_empty() {
        return None;
    }

    if jitter > 0.0 && rng.random::<f32>() < jitter {
        return candidates.choose(rng).copied();
    }

    let mut best: Option<((Direction, IVec2), i32)> = None;
    for &(direction, to) in candidates.iter() {
        let distance = to.distance_squared(steering.target);
        let better = match best {
            None => true,
            Some((_, best_distance)) => match steering.policy {
                TargetPolicy::Approach => distance < best_distance,
                TargetPolicy::Flee => distance > best_distance,
            },
        };
        if better {
            best = Some(((direction, to), distance));
        }
    }

    best.map(|(choice, _)| choice)
}

/// Greedy ghost navigation.
///
/// Ghosts waiting in the house stay put. Everyone else picks a new direction at each
/// tile centre according to their mode.
pub fn ghost_movement_system(
    map: Res<Map>,
    delta_time: Res<DeltaTime>,
    level: Res<Level>,
    mechanics: Res<Mechanics>,
    mut rng: ResMut<GameRng>,
    players: Query<&Position, (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<(&Ghost, &GhostMode, &mut Position, &mut Velocity), Without<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    let pacman = match players.single() {
        Ok(position) => position.tile(),
        Err(e) => {
            errors.write(GameError::InvalidState(format!(
                "No/multiple entities queried for ghost targeting: {}",
                e
            )));
            return;
        }
    };

    for (ghost, mode, mut position, mut velocity) in ghosts.iter_mut() {
        if matches!(mode, GhostMode::House { release_in } if *release_in > 0.0) {
            continue;
        }

        let mut factor = level.speed_factor();
        match mode {
            GhostMode::Frightened => factor *= FRIGHTENED_SPEED_FACTOR,
            GhostMode::House { .. } => factor *= HOUSE_SPEED_FACTOR,
            _ => {}
        }
        if map.is_tunnel(position.tile()) {
            factor *= TUNNEL_SPEED_FACTOR;
        }
        let mut distance = velocity.speed * factor * delta_time.0;

        loop {
            match *position {
                Position::Stopped { tile } => {
                    // Released ghosts wait on the exit tile for the release system to hand them a mode
                    if mode.is_house() && tile == map.start_positions.house_exit {
                        break;
                    }

                    let steering = Steering::for_mode(*ghost, *mode, pacman, &map);
                    let jitter = if mode.is_house() { 0.0 } else { mechanics.ghost_jitter };

                    match choose_direction(&map, tile, velocity.direction, steering, jitter, &mut rng.0) {
                        Some((direction, to)) => {
                            if direction == velocity.direction.opposite() {
                                trace!(ghost = ?ghost, tile = ?tile, direction = ?direction, "Ghost forced to reverse direction");
                            }
                            velocity.direction = direction;
                            *position = Position::Moving { from: tile, to, remaining: 1.0 };
                        }
                        None => {
                            warn!(ghost = ?ghost, tile = ?tile, "Ghost stuck with no available directions");
                            break;
                        }
                    }
                }
                Position::Moving { .. } => {
                    if let Some(overflow) = position.tick(distance) {
                        distance = overflow;
                    } else {
                        break;
                    }
                }
            }
        }
    }
}

/// Counts down house timers and hands ghosts that reached the exit their schedule mode,
/// or Frightened while power mode lasts.
pub fn ghost_release_system(
    map: Res<Map>,
    delta_time: Res<DeltaTime>,
    schedule: Res<ModeSchedule>,
    power: Res<PowerMode>,
    mut ghosts: Query<(&Ghost, &mut GhostMode, &Position)>,
) {
    for (ghost, mut mode, position) in ghosts.iter_mut() {
        let GhostMode::House { release_in } = *mode else {
            continue;
        };

        if release_in > 0.0 {
            let release_in = (release_in - delta_time.0).max(0.0);
            *mode = GhostMode::House { release_in };
            if release_in == 0.0 {
                debug!(ghost = ?ghost, "Ghost released from house");
            }
        } else if *position == (Position::Stopped { tile: map.start_positions.house_exit }) {
            *mode = mode.transition(ModeTrigger::LeftHouse {
                phase: schedule.phase(),
                frightened: power.active,
            });
            debug!(ghost = ?ghost, mode = ?*mode, "Ghost left the house");
        }
    }
}

/// Advances the global scatter/chase schedule. Frozen while power mode is active.
pub fn mode_schedule_system(
    delta_time: Res<DeltaTime>,
    power: Res<PowerMode>,
    mut schedule: ResMut<ModeSchedule>,
    mut ghosts: Query<&mut GhostMode>,
) {
    if power.active {
        return;
    }

    if let Some(phase) = schedule.tick(delta_time.0) {
        debug!(phase = ?phase, "Ghost schedule phase changed");
        for mut mode in ghosts.iter_mut() {
            *mode = mode.transition(ModeTrigger::ScheduleChanged(phase));
        }
    }
}
