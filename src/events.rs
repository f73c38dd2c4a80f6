use bevy_ecs::prelude::*;

use crate::map::direction::Direction;
use crate::systems::components::Ghost;

/// An intent produced by an input adapter, consumed at the next tick boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    MovePlayer(Direction),
    Restart,
    TogglePause,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Notable changes in the run, emitted by the gameplay systems.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageTransition {
    /// The board was cleared; `level` is the level now starting.
    LevelCleared { level: u32 },
    /// Pac-Man touched a ghost.
    PlayerDied { lives_left: u8 },
    /// A frightened ghost was eaten for `bonus` points.
    GhostEaten { ghost: Ghost, bonus: u32 },
    /// The last life was lost. Emitted exactly once per run.
    GameOver { score: u32 },
}
