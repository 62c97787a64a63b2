use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ANIMATION_MS, CHASE_LENGTH, CLYDE_SHY_DISTANCE, GHOST_VALUE, PLAYER_START_LIVES,
    PLAYER_START_POINTS, POINT_VALUE, POWER_UP_BLINK_LENGTH, POWER_UP_LENGTH, POWER_UP_VALUE,
    RESET_PAUSE_MS, SCATTER_LENGTH, TICK_MS,
};
use crate::error::{GameError, Result};

/// Tunable game constants. Missing keys in a settings file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub start_lives: u32,
    pub start_points: u32,
    pub ghost_value: u32,
    pub point_value: u32,
    pub power_up_value: u32,
    pub chase_length: u32,
    pub scatter_length: u32,
    pub power_up_length: u32,
    pub blink_length: u32,
    pub clyde_shy_distance: i32,
    pub tick_ms: u64,
    pub animation_ms: u64,
    pub reset_pause_ms: u64,
    pub seed: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_lives: PLAYER_START_LIVES,
            start_points: PLAYER_START_POINTS,
            ghost_value: GHOST_VALUE,
            point_value: POINT_VALUE,
            power_up_value: POWER_UP_VALUE,
            chase_length: CHASE_LENGTH,
            scatter_length: SCATTER_LENGTH,
            power_up_length: POWER_UP_LENGTH,
            blink_length: POWER_UP_BLINK_LENGTH,
            clyde_shy_distance: CLYDE_SHY_DISTANCE,
            tick_ms: TICK_MS,
            animation_ms: ANIMATION_MS,
            reset_pause_ms: RESET_PAUSE_MS,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("start_lives", self.start_lives),
            ("chase_length", self.chase_length),
            ("scatter_length", self.scatter_length),
            ("power_up_length", self.power_up_length),
            ("blink_length", self.blink_length),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(GameError::InvalidSetting {
                    name,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        if self.tick_ms == 0 {
            return Err(GameError::InvalidSetting {
                name: "tick_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.clyde_shy_distance < 0 {
            return Err(GameError::InvalidSetting {
                name: "clyde_shy_distance",
                reason: format!("must not be negative, got {}", self.clyde_shy_distance),
            });
        }
        Ok(())
    }
}
