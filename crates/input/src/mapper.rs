//! Input mapper: turns control intents into attitude, throttle, and brake changes.

use engine_core::{
    ensure_in_range, ensure_non_negative, per_tick_factor, ConfigError, FlightState,
};
use serde::{Deserialize, Serialize};

use crate::FlightControls;

/// Control response tuning. Decay factors are per 60 Hz reference frame and are
/// rescaled to the real frame length.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Attitude rate at full deflection, radians/s.
    #[serde(default = "default_rotation_speed")]
    pub rotation_speed: f32,
    /// Throttle change at full deflection, percent/s.
    #[serde(default = "default_throttle_rate")]
    pub throttle_rate: f32,
    /// Velocity kept per reference frame while braking.
    #[serde(default = "default_brake_decay")]
    pub brake_decay: f32,
    /// Roll kept per reference frame with no roll input.
    #[serde(default = "default_roll_auto_level")]
    pub roll_auto_level: f32,
    /// Pitch kept per reference frame with no pitch input.
    #[serde(default = "default_pitch_auto_level")]
    pub pitch_auto_level: f32,
}

fn default_rotation_speed() -> f32 {
    1.5
}
fn default_throttle_rate() -> f32 {
    50.0
}
fn default_brake_decay() -> f32 {
    0.95
}
fn default_roll_auto_level() -> f32 {
    0.98
}
fn default_pitch_auto_level() -> f32 {
    0.99
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            rotation_speed: default_rotation_speed(),
            throttle_rate: default_throttle_rate(),
            brake_decay: default_brake_decay(),
            roll_auto_level: default_roll_auto_level(),
            pitch_auto_level: default_pitch_auto_level(),
        }
    }
}

impl ControlConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_non_negative("rotation_speed", self.rotation_speed)?;
        ensure_non_negative("throttle_rate", self.throttle_rate)?;
        ensure_in_range("brake_decay", self.brake_decay, 0.0, 1.0)?;
        ensure_in_range("roll_auto_level", self.roll_auto_level, 0.0, 1.0)?;
        ensure_in_range("pitch_auto_level", self.pitch_auto_level, 0.0, 1.0)?;
        Ok(())
    }
}

/// Applies control intents to the flight state once per tick.
#[derive(Debug, Clone, Default)]
pub struct InputMapper {
    pub config: ControlConfig,
}

impl InputMapper {
    pub fn new(config: ControlConfig) -> Self {
        Self { config }
    }

    pub fn apply(&self, controls: &FlightControls, state: &mut FlightState, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let controls = controls.sanitized();
        let rate = self.config.rotation_speed * dt;

        let orientation = &mut state.orientation;
        orientation.pitch += controls.pitch * rate;
        orientation.roll += controls.roll * rate;
        orientation.yaw += controls.yaw * rate;

        if controls.throttle != 0.0 {
            let change = controls.throttle * self.config.throttle_rate * dt;
            // Throttle can only be closed once the engine has failed
            if change < 0.0 || !state.engine.is_empty() {
                state.throttle.add(change);
            }
        }

        if controls.brake {
            state.velocity *= per_tick_factor(self.config.brake_decay, dt);
            state.throttle.drain(self.config.throttle_rate * 2.0 * dt);
        }

        orientation.clamp();

        // Auto-level assist on released axes
        if controls.roll == 0.0 {
            orientation.roll *= per_tick_factor(self.config.roll_auto_level, dt);
        }
        if controls.pitch == 0.0 {
            orientation.pitch *= per_tick_factor(self.config.pitch_auto_level, dt);
        }
    }
}
