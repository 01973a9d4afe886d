//! Tuning tables for input classification and character physics.
//!
//! All thresholds, speeds, impulses, and frame windows live here as plain
//! data injected at construction time. Defaults carry the canonical values;
//! a partial YAML file can override individual fields for experimentation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Root tuning table.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Tuning {
    pub input: InputTuning,
    pub character: CharacterTuning,
}

/// Stick/button classification thresholds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputTuning {
    /// Stick readings with magnitude at or below this are treated as centered.
    pub dead_zone: f32,
    /// Stick speed (distance per second) below which a neutral stick is at rest.
    pub idle_speed: f32,
    /// Stick speed at or above which a full-deflection move counts as a tap.
    pub tap_speed: f32,
    /// Dominant-axis magnitude a tap must reach to count as a hard switch.
    pub hard_switch_mag: f32,
    /// How many classified frames the input stream keeps for buffered reads.
    pub buffer_frames: usize,
}

impl Default for InputTuning {
    fn default() -> Self {
        InputTuning {
            dead_zone: 0.1,
            idle_speed: 0.1,
            tap_speed: 30.0,
            hard_switch_mag: 0.8,
            buffer_frames: 10,
        }
    }
}

/// Character movement constants.
///
/// Speeds are world units per second, impulses are applied through the
/// transient force accumulator, frame windows are simulation-tick counts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CharacterTuning {
    pub gravity_on: f32,
    pub gravity_off: f32,
    /// Ground friction, consumed by the external physics integrator.
    pub friction: f32,

    // -- run/walk --
    pub run: f32,
    pub walk: f32,
    pub run_pivot_frames: u32,

    // -- dash --
    pub dash_frames: u32,
    pub dash_initial: f32,
    pub dash_base: f32,
    pub dash_scale: f32,

    // -- jump --
    pub jump_wait_frames: u32,
    pub jump: f32,
    pub jump_short: f32,
    pub fast_fall: f32,

    // -- airborne --
    pub drift: f32,
    pub max_air_speed_x: f32,

    // -- air dodge / wavedash --
    pub air_dodge: f32,
    pub air_dodge_decay: f32,
    pub wave_dash_window_frames: u32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        CharacterTuning {
            gravity_on: 1.0,
            gravity_off: 0.0,
            friction: 0.65,

            run: 6.0,
            walk: 2.0,
            run_pivot_frames: 30,

            dash_frames: 15,
            dash_initial: 1.5,
            dash_base: 0.2,
            dash_scale: 0.5,

            jump_wait_frames: 8,
            jump: 5.0,
            jump_short: 3.0,
            fast_fall: 6.0,

            drift: 0.2,
            max_air_speed_x: 6.0,

            air_dodge: 5.0,
            air_dodge_decay: 0.1,
            wave_dash_window_frames: 2,
        }
    }
}

/// Validation failure for a tuning table.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    #[error("{field} must be within [0, 1) (got {value})")]
    OutOfUnitRange { field: &'static str, value: f32 },

    #[error("{field} must be at least 1 frame")]
    EmptyWindow { field: &'static str },
}

impl Tuning {
    /// Load a tuning table from a YAML file, filling unnamed fields with the
    /// canonical defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Tuning> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tuning file: {}", path.display()))?;
        let tuning: Tuning = serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse tuning file: {}", path.display()))?;
        tuning
            .validate()
            .with_context(|| format!("Invalid tuning file: {}", path.display()))?;
        Ok(tuning)
    }

    /// Reject values the state machine cannot make sense of.
    pub fn validate(&self) -> std::result::Result<(), TuningError> {
        let positive = [
            ("input.idle_speed", self.input.idle_speed),
            ("input.tap_speed", self.input.tap_speed),
            ("character.run", self.character.run),
            ("character.walk", self.character.walk),
            ("character.dash_initial", self.character.dash_initial),
            ("character.jump", self.character.jump),
            ("character.jump_short", self.character.jump_short),
            ("character.fast_fall", self.character.fast_fall),
            ("character.max_air_speed_x", self.character.max_air_speed_x),
            ("character.air_dodge", self.character.air_dodge),
            ("character.air_dodge_decay", self.character.air_dodge_decay),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let unit_range = [
            ("input.dead_zone", self.input.dead_zone),
            ("input.hard_switch_mag", self.input.hard_switch_mag),
        ];
        for (field, value) in unit_range {
            if !(0.0..1.0).contains(&value) {
                return Err(TuningError::OutOfUnitRange { field, value });
            }
        }

        let windows = [
            ("character.run_pivot_frames", self.character.run_pivot_frames),
            ("character.dash_frames", self.character.dash_frames),
            ("character.jump_wait_frames", self.character.jump_wait_frames),
            (
                "character.wave_dash_window_frames",
                self.character.wave_dash_window_frames,
            ),
        ];
        for (field, frames) in windows {
            if frames == 0 {
                return Err(TuningError::EmptyWindow { field });
            }
        }

        if self.input.buffer_frames == 0 {
            return Err(TuningError::EmptyWindow {
                field: "input.buffer_frames",
            });
        }

        Ok(())
    }
}
