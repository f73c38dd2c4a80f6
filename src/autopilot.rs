//! A simple pellet-seeking driver for unattended runs.

use std::collections::HashSet;

use glam::IVec2;
use pathfinding::prelude::bfs;
use tracing::trace;

use crate::game::GameSnapshot;
use crate::map::builder::Traversal;
use crate::map::direction::Direction;
use crate::systems::GhostMode;

/// Chooses the first step of the shortest path from Pac-Man to the nearest pellet.
///
/// Tiles held by, or next to, a ghost that is not frightened are treated as walls.
/// Returns `None` when nothing edible is reachable.
pub fn next_direction(snapshot: &GameSnapshot) -> Option<Direction> {
    let map = &snapshot.map;
    let start = snapshot.pacman.tile;

    let danger: HashSet<IVec2> = snapshot
        .ghosts
        .iter()
        .filter(|ghost| !matches!(ghost.mode, GhostMode::Frightened | GhostMode::House { .. }))
        .flat_map(|ghost| {
            std::iter::once(ghost.tile).chain(
                Direction::DIRECTIONS
                    .into_iter()
                    .filter_map(move |direction| map.step(ghost.tile, direction, Traversal::Pacman)),
            )
        })
        .collect();

    let path = bfs(
        &start,
        |tile| {
            Direction::DIRECTIONS
                .into_iter()
                .filter_map(|direction| map.step(*tile, direction, Traversal::Pacman))
                .filter(|next| !danger.contains(next))
                .collect::<Vec<_>>()
        },
        |tile| *tile != start && map.tile(*tile).is_some_and(|t| t.is_edible()),
    )?;

    let first = *path.get(1)?;
    let direction = Direction::DIRECTIONS
        .into_iter()
        .find(|direction| map.step(start, *direction, Traversal::Pacman) == Some(first))?;

    trace!(from = ?start, to = ?path.last(), steps = path.len() - 1, ?direction, "Autopilot route");
    Some(direction)
}
