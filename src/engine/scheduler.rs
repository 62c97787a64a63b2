use crate::config::Settings;
use crate::types::{PowerUpMode, PursuitMode};

/// Global timers shared by every ghost: chase/scatter alternation, the power-up
/// countdown and the cosmetic power-up blink.
#[derive(Clone, Debug)]
pub struct ModeScheduler {
    chase_length: u32,
    scatter_length: u32,
    power_up_length: u32,
    blink_length: u32,
    pursuit_mode: PursuitMode,
    pursuit_ticks: u32,
    power_up_mode: PowerUpMode,
    power_up_countdown: u32,
    blink_countdown: u32,
}

impl ModeScheduler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            chase_length: settings.chase_length,
            scatter_length: settings.scatter_length,
            power_up_length: settings.power_up_length,
            blink_length: settings.blink_length,
            pursuit_mode: PursuitMode::Scatter,
            pursuit_ticks: 0,
            power_up_mode: PowerUpMode::Off,
            power_up_countdown: 0,
            blink_countdown: settings.blink_length,
        }
    }

    pub fn pursuit_mode(&self) -> PursuitMode {
        self.pursuit_mode
    }

    pub fn pursuit_ticks(&self) -> u32 {
        self.pursuit_ticks
    }

    pub fn power_up_mode(&self) -> PowerUpMode {
        self.power_up_mode
    }

    pub fn power_up_countdown(&self) -> u32 {
        self.power_up_countdown
    }

    /// Scoring a power-up (re)starts the full countdown. Returns true on the tick
    /// the power-up runs out.
    pub fn advance_power_up(&mut self, scored: bool) -> bool {
        if scored {
            // The scoring tick counts as the first of `power_up_length` active ticks.
            self.power_up_mode = PowerUpMode::Active;
            self.power_up_countdown = self.power_up_length;
            return false;
        }
        if self.power_up_mode == PowerUpMode::Off {
            return false;
        }
        self.power_up_countdown = self.power_up_countdown.saturating_sub(1);
        if self.power_up_countdown == 0 {
            self.power_up_mode = PowerUpMode::Off;
            return true;
        }
        false
    }

    /// Counts one tick in the current pursuit mode and flips it once the mode's
    /// length is reached. Returns the new mode on a flip.
    pub fn advance_pursuit(&mut self) -> Option<PursuitMode> {
        self.pursuit_ticks += 1;
        let length = match self.pursuit_mode {
            PursuitMode::Chase => self.chase_length,
            PursuitMode::Scatter => self.scatter_length,
        };
        if self.pursuit_ticks < length {
            return None;
        }
        self.pursuit_mode = match self.pursuit_mode {
            PursuitMode::Chase => PursuitMode::Scatter,
            PursuitMode::Scatter => PursuitMode::Chase,
        };
        self.pursuit_ticks = 0;
        Some(self.pursuit_mode)
    }

    /// Returns true every `blink_length` ticks.
    pub fn advance_blink(&mut self) -> bool {
        self.blink_countdown = self.blink_countdown.saturating_sub(1);
        if self.blink_countdown == 0 {
            self.blink_countdown = self.blink_length;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.pursuit_mode = PursuitMode::Scatter;
        self.pursuit_ticks = 0;
        self.power_up_mode = PowerUpMode::Off;
        self.power_up_countdown = 0;
        self.blink_countdown = self.blink_length;
    }
}
