//! Game settings: physics tuning, scoring rules and clock configuration
//!
//! Loaded from a JSON file by the shell. Every field has a default, so a
//! settings file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Per-tick physics values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub gravity: f32,
    pub max_fall: f32,
    /// Horizontal velocity multiplier while grounded
    pub ground_friction: f32,
    /// Horizontal velocity multiplier while airborne
    pub air_drag: f32,
    pub max_run: f32,
    pub accel: f32,
    /// Negative: up is -y
    pub jump_vel: f32,
    pub stomp_bounce: f32,
    pub stomp_depth: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_fall: MAX_FALL,
            ground_friction: GROUND_FRICTION,
            air_drag: AIR_DRAG,
            max_run: MAX_RUN,
            accel: ACCEL,
            jump_vel: JUMP_VEL,
            stomp_bounce: STOMP_BOUNCE,
            stomp_depth: STOMP_DEPTH,
        }
    }
}

/// Lives, timer, scoring and camera rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub start_lives: u32,
    /// Seconds on the clock at the start of each life
    pub time_budget: f32,
    pub goal_time_bonus: f32,
    pub respawn_invulnerability: u32,
    pub score_brick: u64,
    pub score_coin: u64,
    pub score_stomp: u64,
    pub score_goal: u64,
    pub camera_lead: f32,
    pub camera_respawn_offset: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            start_lives: START_LIVES,
            time_budget: TIME_BUDGET,
            goal_time_bonus: GOAL_TIME_BONUS,
            respawn_invulnerability: RESPAWN_INVULNERABILITY,
            score_brick: SCORE_BRICK,
            score_coin: SCORE_COIN,
            score_stomp: SCORE_STOMP,
            score_goal: SCORE_GOAL,
            camera_lead: CAMERA_LEAD,
            camera_respawn_offset: CAMERA_RESPAWN_OFFSET,
        }
    }
}

/// How elapsed frame time turns into simulation ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMode {
    /// One tick per frame; the timer advances by the (clamped) frame time
    #[default]
    PerFrame,
    /// Fixed-rate ticks from an accumulator, capped per frame
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockSettings {
    pub mode: StepMode,
    /// Upper bound on the elapsed time of a single frame
    pub max_frame_ms: f64,
    /// Tick rate in `StepMode::Fixed`
    pub tick_hz: f32,
    pub max_substeps: u32,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            mode: StepMode::PerFrame,
            max_frame_ms: MAX_FRAME_MS,
            tick_hz: FIXED_TICK_HZ,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

impl ClockSettings {
    /// Seconds per tick in fixed mode
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_hz
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tuning: Tuning,
    pub rules: Rules,
    pub clock: ClockSettings,
    /// Seed for enemy placement
    pub seed: u64,
    /// World label shown on the HUD
    pub world_id: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),
            rules: Rules::default(),
            clock: ClockSettings::default(),
            seed: 0x5eed,
            world_id: WORLD_ID.to_string(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                })
            }
        }

        positive("clock.max_frame_ms", self.clock.max_frame_ms)?;
        positive("clock.tick_hz", self.clock.tick_hz as f64)?;
        positive("rules.time_budget", self.rules.time_budget as f64)?;
        positive("tuning.max_run", self.tuning.max_run as f64)?;
        positive("tuning.max_fall", self.tuning.max_fall as f64)?;

        if self.clock.max_substeps == 0 {
            return Err(SettingsError::Invalid {
                field: "clock.max_substeps",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.rules.start_lives == 0 {
            return Err(SettingsError::Invalid {
                field: "rules.start_lives",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.tuning.jump_vel >= 0.0 {
            return Err(SettingsError::Invalid {
                field: "tuning.jump_vel",
                reason: format!("must point up (negative), got {}", self.tuning.jump_vel),
            });
        }
        Ok(())
    }
}
