//! Aircraft flight state and the tunable constants of the flight model.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::Gauge;
use crate::error::{ensure_finite, ensure_non_negative, ensure_positive, ConfigError};
use crate::transform::Orientation;

/// Metres-per-second to kilometres-per-hour.
pub const MS_TO_KMH: f32 = 3.6;

/// Tunable constants of the arcade flight model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightConfig {
    /// Vertical acceleration in units/s² (negative pulls down).
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_lift_coefficient")]
    pub lift_coefficient: f32,
    #[serde(default = "default_drag_coefficient")]
    pub drag_coefficient: f32,
    #[serde(default = "default_air_density")]
    pub air_density: f32,
    /// Acceleration at full throttle, units/s².
    #[serde(default = "default_thrust_power")]
    pub thrust_power: f32,
    /// Fuel percent burned per second at full throttle.
    #[serde(default = "default_fuel_consumption_rate")]
    pub fuel_consumption_rate: f32,
    /// Engine health percent lost per second while the tank is dry.
    #[serde(default = "default_engine_decay_rate")]
    pub engine_decay_rate: f32,
    /// Ground contact faster than this (units/s) damages the hull.
    #[serde(default = "default_impact_speed_threshold")]
    pub impact_speed_threshold: f32,
    /// Hull percent lost per unit/s of impact speed.
    #[serde(default = "default_impact_damage_factor")]
    pub impact_damage_factor: f32,
    /// Upper bound on hull damage from a single impact.
    #[serde(default = "default_max_impact_damage")]
    pub max_impact_damage: f32,
}

fn default_gravity() -> f32 {
    -9.81
}
fn default_lift_coefficient() -> f32 {
    0.5
}
fn default_drag_coefficient() -> f32 {
    0.001
}
fn default_air_density() -> f32 {
    1.0
}
fn default_thrust_power() -> f32 {
    50.0
}
fn default_fuel_consumption_rate() -> f32 {
    0.5
}
fn default_engine_decay_rate() -> f32 {
    10.0
}
fn default_impact_speed_threshold() -> f32 {
    10.0
}
fn default_impact_damage_factor() -> f32 {
    2.0
}
fn default_max_impact_damage() -> f32 {
    50.0
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            lift_coefficient: default_lift_coefficient(),
            drag_coefficient: default_drag_coefficient(),
            air_density: default_air_density(),
            thrust_power: default_thrust_power(),
            fuel_consumption_rate: default_fuel_consumption_rate(),
            engine_decay_rate: default_engine_decay_rate(),
            impact_speed_threshold: default_impact_speed_threshold(),
            impact_damage_factor: default_impact_damage_factor(),
            max_impact_damage: default_max_impact_damage(),
        }
    }
}

impl FlightConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("gravity", self.gravity)?;
        ensure_finite("lift_coefficient", self.lift_coefficient)?;
        ensure_non_negative("drag_coefficient", self.drag_coefficient)?;
        ensure_non_negative("air_density", self.air_density)?;
        ensure_non_negative("thrust_power", self.thrust_power)?;
        ensure_non_negative("fuel_consumption_rate", self.fuel_consumption_rate)?;
        ensure_non_negative("engine_decay_rate", self.engine_decay_rate)?;
        ensure_non_negative("impact_speed_threshold", self.impact_speed_threshold)?;
        ensure_non_negative("impact_damage_factor", self.impact_damage_factor)?;
        ensure_positive("max_impact_damage", self.max_impact_damage)?;
        Ok(())
    }

    /// Hull damage for touching down at `impact_speed`, zero at or below the threshold.
    pub fn impact_damage(&self, impact_speed: f32) -> f32 {
        if impact_speed > self.impact_speed_threshold {
            (impact_speed * self.impact_damage_factor).min(self.max_impact_damage)
        } else {
            0.0
        }
    }
}

/// Mutable state of the player aircraft, owned by the simulation.
#[derive(Debug, Clone)]
pub struct FlightState {
    pub position: Vec3,
    /// World-space velocity, units/s.
    pub velocity: Vec3,
    pub orientation: Orientation,
    pub throttle: Gauge,
    pub fuel: Gauge,
    pub hull: Gauge,
    pub engine: Gauge,
    /// Resting on the ground since the last touchdown.
    pub grounded: bool,
    /// Set once the engine has died; guards the failure event.
    pub engine_failed: bool,
    // Telemetry refreshed by the integrator
    pub speed_kmh: f32,
    pub altitude: f32,
    pub heading_deg: f32,
}

impl Default for FlightState {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO)
    }
}

impl FlightState {
    /// Fresh aircraft: full tanks, idle throttle, level attitude.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        let mut state = Self {
            position,
            velocity,
            orientation: Orientation::default(),
            throttle: Gauge::empty(),
            fuel: Gauge::full(),
            hull: Gauge::full(),
            engine: Gauge::full(),
            grounded: position.y <= 0.0,
            engine_failed: false,
            speed_kmh: 0.0,
            altitude: 0.0,
            heading_deg: 0.0,
        };
        state.refresh_telemetry(velocity.length());
        state
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self.refresh_telemetry(self.velocity.length());
        self
    }

    pub fn with_throttle(mut self, throttle: f32) -> Self {
        self.throttle.set(throttle);
        self
    }

    /// Current speed in units/s.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Recompute HUD readouts. `speed` is passed in so the integrator can report the
    /// speed it used for its force terms.
    pub fn refresh_telemetry(&mut self, speed: f32) {
        self.speed_kmh = speed * MS_TO_KMH;
        self.altitude = self.position.y;
        self.heading_deg = self.orientation.heading_degrees();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impact_damage_follows_threshold_and_cap() {
        let config = FlightConfig::default();
        assert_eq!(config.impact_damage(10.0), 0.0);
        assert_eq!(config.impact_damage(9.0), 0.0);
        assert_eq!(config.impact_damage(20.0), 40.0);
        assert_eq!(config.impact_damage(40.0), 50.0);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(FlightConfig::default().validate().is_ok());
        let bad = FlightConfig { drag_coefficient: -1.0, ..FlightConfig::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn new_state_derives_telemetry() {
        let state = FlightState::new(Vec3::new(0.0, 120.0, 0.0), Vec3::new(0.0, 0.0, -10.0));
        assert!((state.speed_kmh - 36.0).abs() < 1e-4);
        assert_eq!(state.altitude, 120.0);
        assert!(!state.grounded);
        assert_eq!(state.fuel.value(), 100.0);
        assert_eq!(state.throttle.value(), 0.0);
    }
}
