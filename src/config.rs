use std::path::PathBuf;

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Runtime configuration.
///
/// Every field can be overridden from the environment with a `PACMAN_` prefix,
/// e.g. `PACMAN_GHOST_SPEED=6.5` or `PACMAN_SEED=42`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pac-Man's base speed, in tiles per second
    pub pacman_speed: f32,
    /// Ghost base speed, in tiles per second
    pub ghost_speed: f32,
    /// Power mode length on level 1, in seconds
    pub power_duration: f32,
    /// Seconds an eaten ghost waits in the house
    pub respawn_delay: f32,
    /// Length of the "READY!" pause, in seconds
    pub ready_delay: f32,
    pub starting_lives: u8,
    /// Probability that a ghost picks a random legal move instead of the greedy one
    pub ghost_jitter: f32,
    /// Fixed RNG seed; uses OS entropy when unset
    pub seed: Option<u64>,
    /// JSON file holding the persisted high score
    pub high_score_path: PathBuf,
    /// Integer zoom applied to the desktop window
    pub window_scale: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pacman_speed: 7.5,
            ghost_speed: 7.0,
            power_duration: 7.0,
            respawn_delay: 3.0,
            ready_delay: 2.0,
            starting_lives: 3,
            ghost_jitter: 0.1,
            seed: None,
            high_score_path: PathBuf::from("pacman-highscore.json"),
            window_scale: 2,
        }
    }
}

impl Config {
    /// Defaults, overridden by `PACMAN_*` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed("PACMAN_"))
    }

    /// Loads and validates configuration from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pacman_speed", self.pacman_speed),
            ("ghost_speed", self.ghost_speed),
            ("power_duration", self.power_duration),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        let non_negative = [("respawn_delay", self.respawn_delay), ("ready_delay", self.ready_delay)];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }

        if !(0.0..=1.0).contains(&self.ghost_jitter) {
            return Err(ConfigError::Invalid {
                field: "ghost_jitter",
                reason: format!("must be between 0 and 1, got {}", self.ghost_jitter),
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.window_scale == 0 {
            return Err(ConfigError::Invalid {
                field: "window_scale",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
