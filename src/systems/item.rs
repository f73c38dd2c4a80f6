use bevy_ecs::{
    query::With,
    system::{Query, Res, ResMut},
};
use tracing::{debug, trace};

use crate::{
    constants::MapTile,
    map::builder::Map,
    systems::{
        components::{DeltaTime, GhostMode, Level, Mechanics, ModeSchedule, ModeTrigger, PlayerControlled, PowerMode, ScoreResource},
        movement::Position,
    },
};

/// Eats whatever lies on Pac-Man's tile.
///
/// A power pellet also starts power mode and frightens every ghost outside the house.
pub fn item_system(
    mut map: ResMut<Map>,
    mut score: ResMut<ScoreResource>,
    mut power: ResMut<PowerMode>,
    level: Res<Level>,
    mechanics: Res<Mechanics>,
    players: Query<&Position, With<PlayerControlled>>,
    mut ghosts: Query<&mut GhostMode>,
) {
    for position in players.iter() {
        let tile = position.tile();
        let Some(eaten) = map.consume(tile) else {
            continue;
        };

        if let Some(value) = eaten.score_value() {
            score.0 += value;
        }
        trace!(tile = ?tile, item = ?eaten, score = score.0, remaining = map.dots_remaining(), "Item eaten");

        if eaten == MapTile::PowerPellet {
            let duration = level.power_duration(mechanics.power_duration);
            power.activate(duration);
            for mut mode in ghosts.iter_mut() {
                *mode = mode.transition(ModeTrigger::PowerPellet);
            }
            debug!(duration, "Power pellet eaten, ghosts frightened");
        }
    }
}

/// Runs down power mode. When it expires, frightened ghosts resume the scheduled mode.
pub fn power_timer_system(
    delta_time: Res<DeltaTime>,
    schedule: Res<ModeSchedule>,
    mut power: ResMut<PowerMode>,
    mut ghosts: Query<&mut GhostMode>,
) {
    if power.tick(delta_time.0) {
        let phase = schedule.phase();
        for mut mode in ghosts.iter_mut() {
            *mode = mode.transition(ModeTrigger::PowerExpired(phase));
        }
        debug!(phase = ?phase, "Power mode expired");
    }
}
