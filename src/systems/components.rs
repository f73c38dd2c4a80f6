use bevy_ecs::{component::Component, resource::Resource};
use glam::IVec2;
use rand::{rngs::SmallRng, SeedableRng};
use strum_macros::EnumIter;

use crate::{
    config::Config,
    constants::{GHOST_BASE_SCORE, GHOST_STREAK_CAP, LEVEL_SPEED_STEP, MAX_LEVEL_SPEED, MIN_POWER_DURATION, POWER_DURATION_STEP},
    map::builder::StartPositions,
};

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A tag component identifying which ghost an entity is.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    /// Where this ghost starts a level.
    pub fn start(self, starts: &StartPositions) -> IVec2 {
        match self {
            Ghost::Blinky => starts.house_exit,
            Ghost::Pinky => starts.house[0],
            Ghost::Inky => starts.house[1],
            Ghost::Clyde => starts.house[2],
        }
    }

    /// Seconds spent in the house at the start of a level or after a death.
    pub fn release_delay(self) -> f32 {
        match self {
            Ghost::Blinky => 0.0,
            Ghost::Pinky => 2.0,
            Ghost::Inky => 5.0,
            Ghost::Clyde => 8.0,
        }
    }

    /// The corner this ghost heads for while scattering.
    pub fn scatter_target(self, width: i32, height: i32) -> IVec2 {
        match self {
            Ghost::Blinky => IVec2::new(width - 2, 0),
            Ghost::Pinky => IVec2::new(1, 0),
            Ghost::Inky => IVec2::new(width - 2, height - 1),
            Ghost::Clyde => IVec2::new(1, height - 1),
        }
    }
}

/// The tile an actor returns to when positions reset.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnPoint(pub IVec2);

/// Distance Pac-Man has travelled, in tiles. Drives the mouth animation.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Animation {
    pub phase: f32,
}

/// The two halves of the global ghost schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scatter,
    Chase,
}

/// Scatter/chase alternation, in seconds. The final chase phase never ends.
pub const MODE_SCHEDULE: [(Phase, f32); 8] = [
    (Phase::Scatter, 7.0),
    (Phase::Chase, 20.0),
    (Phase::Scatter, 7.0),
    (Phase::Chase, 20.0),
    (Phase::Scatter, 5.0),
    (Phase::Chase, 20.0),
    (Phase::Scatter, 5.0),
    (Phase::Chase, f32::INFINITY),
];

/// A ghost's behavioural mode.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum GhostMode {
    /// Waiting inside the house, or walking out once `release_in` has run down.
    House { release_in: f32 },
    Scatter,
    Chase,
    Frightened,
}

impl From<Phase> for GhostMode {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Scatter => GhostMode::Scatter,
            Phase::Chase => GhostMode::Chase,
        }
    }
}

/// Events that can move a ghost from one mode to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModeTrigger {
    PowerPellet,
    PowerExpired(Phase),
    ScheduleChanged(Phase),
    /// Reached the house exit. Ghosts leaving during power mode come out frightened.
    LeftHouse { phase: Phase, frightened: bool },
    Eaten { respawn_delay: f32 },
}

impl GhostMode {
    /// The mode after `trigger`. Pairings with no meaning leave the mode unchanged.
    pub fn transition(self, trigger: ModeTrigger) -> GhostMode {
        match (self, trigger) {
            (GhostMode::House { .. }, ModeTrigger::PowerPellet) => self,
            (_, ModeTrigger::PowerPellet) => GhostMode::Frightened,
            (GhostMode::Frightened, ModeTrigger::PowerExpired(phase)) => phase.into(),
            (GhostMode::Scatter | GhostMode::Chase, ModeTrigger::ScheduleChanged(phase)) => phase.into(),
            (GhostMode::House { .. }, ModeTrigger::LeftHouse { frightened: true, .. }) => GhostMode::Frightened,
            (GhostMode::House { .. }, ModeTrigger::LeftHouse { phase, .. }) => phase.into(),
            (_, ModeTrigger::Eaten { respawn_delay }) => GhostMode::House {
                release_in: respawn_delay,
            },
            (mode, _) => mode,
        }
    }

    pub fn is_frightened(self) -> bool {
        matches!(self, GhostMode::Frightened)
    }

    pub fn is_house(self) -> bool {
        matches!(self, GhostMode::House { .. })
    }
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
    pub paused: bool,
    pub restart_requested: bool,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// The best score seen so far, including the current run.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HighScore(pub u32);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(3)
    }
}

/// The current level, starting at 1.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(pub u32);

impl Default for Level {
    fn default() -> Self {
        Self(1)
    }
}

impl Level {
    /// Multiplier applied to every actor's base speed.
    pub fn speed_factor(self) -> f32 {
        (1.0 + LEVEL_SPEED_STEP * self.0.saturating_sub(1) as f32).min(MAX_LEVEL_SPEED)
    }

    /// How long power mode lasts on this level.
    pub fn power_duration(self, base: f32) -> f32 {
        (base - POWER_DURATION_STEP * self.0.saturating_sub(1) as f32).max(MIN_POWER_DURATION)
    }
}

/// Power mode state: the flag, its countdown and the ghost-eaten streak.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PowerMode {
    pub active: bool,
    pub remaining: f32,
    pub streak: u32,
}

impl PowerMode {
    pub fn activate(&mut self, duration: f32) {
        self.active = true;
        self.remaining = duration;
        self.streak = 0;
    }

    pub fn clear(&mut self) {
        *self = PowerMode::default();
    }

    /// Counts down by `dt`. Returns true on the tick the countdown runs out, after
    /// which the flag and streak are cleared.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.clear();
            return true;
        }
        false
    }

    /// Awards the bonus for the next ghost eaten and extends the streak.
    pub fn eat_ghost(&mut self) -> u32 {
        let bonus = GHOST_BASE_SCORE << self.streak.min(GHOST_STREAK_CAP);
        self.streak += 1;
        bonus
    }
}

/// Progress through [`MODE_SCHEDULE`].
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ModeSchedule {
    pub index: usize,
    pub remaining: f32,
}

impl Default for ModeSchedule {
    fn default() -> Self {
        Self {
            index: 0,
            remaining: MODE_SCHEDULE[0].1,
        }
    }
}

impl ModeSchedule {
    pub fn phase(&self) -> Phase {
        MODE_SCHEDULE[self.index].0
    }

    /// Counts down by `dt`, returning the new phase if the current one ended.
    pub fn tick(&mut self, dt: f32) -> Option<Phase> {
        self.remaining -= dt;
        if self.remaining > 0.0 || self.index + 1 >= MODE_SCHEDULE.len() {
            return None;
        }
        self.index += 1;
        self.remaining += MODE_SCHEDULE[self.index].1;
        Some(self.phase())
    }
}

/// Where the run is in its lifecycle.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub enum GameStage {
    /// The "READY!" pause before play begins or resumes.
    Starting { remaining: f32 },
    Playing,
    /// Terminal until a restart.
    GameOver,
}

/// Tunable gameplay values, derived from [`Config`].
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Mechanics {
    pub power_duration: f32,
    pub respawn_delay: f32,
    pub ready_delay: f32,
    pub ghost_jitter: f32,
}

impl From<&Config> for Mechanics {
    fn from(config: &Config) -> Self {
        Self {
            power_duration: config.power_duration,
            respawn_delay: config.respawn_delay,
            ready_delay: config.ready_delay,
            ghost_jitter: config.ghost_jitter,
        }
    }
}

/// The simulation's only source of randomness.
#[derive(Resource, Debug)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(SmallRng::seed_from_u64(seed)),
            None => Self(SmallRng::from_os_rng()),
        }
    }
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f32);
