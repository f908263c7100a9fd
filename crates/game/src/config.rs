//! Game configuration (flight model, controls, world, simulation). Loaded from config.ron at startup.

use anyhow::{Context, Result};
use engine_core::{ensure_positive, FlightConfig, DEFAULT_MAX_DELTA};
use input::ControlConfig;
use procgen::WorldConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::world_interaction::InteractionConfig;

/// Loop and run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// World and hazard seed. Same seed, same mission.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Largest step handed to the physics, seconds.
    #[serde(default = "default_max_dt")]
    pub max_dt: f32,
    /// Step rate of the headless demo loop.
    #[serde(default = "default_fixed_hz")]
    pub fixed_hz: f32,
    /// Demo flight length in seconds of mission time.
    #[serde(default = "default_demo_seconds")]
    pub demo_seconds: f32,
    /// Spawn altitude of the aircraft.
    #[serde(default = "default_spawn_altitude")]
    pub spawn_altitude: f32,
    /// Initial airspeed along the nose, units/s.
    #[serde(default = "default_spawn_speed")]
    pub spawn_speed: f32,
    /// Initial throttle percent.
    #[serde(default = "default_spawn_throttle")]
    pub spawn_throttle: f32,
}

fn default_seed() -> u64 {
    1337
}
fn default_max_dt() -> f32 {
    DEFAULT_MAX_DELTA
}
fn default_fixed_hz() -> f32 {
    60.0
}
fn default_demo_seconds() -> f32 {
    180.0
}
fn default_spawn_altitude() -> f32 {
    800.0
}
fn default_spawn_speed() -> f32 {
    80.0
}
fn default_spawn_throttle() -> f32 {
    60.0
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_dt: default_max_dt(),
            fixed_hz: default_fixed_hz(),
            demo_seconds: default_demo_seconds(),
            spawn_altitude: default_spawn_altitude(),
            spawn_speed: default_spawn_speed(),
            spawn_throttle: default_spawn_throttle(),
        }
    }
}

/// Persistent game settings. Loaded from `config.ron` in the current directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub flight: FlightConfig,
    #[serde(default)]
    pub controls: ControlConfig,
    #[serde(default)]
    pub world: WorldConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl GameConfig {
    /// Load config from `config.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults on any read or parse problem.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match Self::from_ron_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    pub fn from_ron_str(data: &str) -> Result<Self> {
        ron::from_str(data).context("parsing game config")
    }

    /// Save current config to `config.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    /// Reject tunables that would break the simulation's invariants.
    pub fn validate(&self) -> Result<()> {
        self.flight.validate().context("invalid flight config")?;
        self.controls.validate().context("invalid control config")?;
        self.world.validate().context("invalid world config")?;
        self.interaction.validate().context("invalid interaction config")?;
        ensure_positive("simulation.max_dt", self.simulation.max_dt)
            .context("invalid simulation config")?;
        ensure_positive("simulation.fixed_hz", self.simulation.fixed_hz)
            .context("invalid simulation config")?;
        Ok(())
    }
}

fn config_path() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")).join("config.ron")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ron_uses_defaults() {
        let config = GameConfig::from_ron_str("()").unwrap();
        assert_eq!(config.world.checkpoints, 10);
        assert_eq!(config.flight.thrust_power, 50.0);
        assert_eq!(config.interaction.capture_radius, 25.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_ron_overrides_fields() {
        let config = GameConfig::from_ron_str(
            "(flight: (gravity: -5.0), world: (checkpoints: 3), simulation: (seed: 9))",
        )
        .unwrap();
        assert_eq!(config.flight.gravity, -5.0);
        assert_eq!(config.flight.drag_coefficient, FlightConfig::default().drag_coefficient);
        assert_eq!(config.world.checkpoints, 3);
        assert_eq!(config.simulation.seed, 9);
    }

    #[test]
    fn round_trips_through_pretty_ron() {
        let original = GameConfig::default();
        let text = ron::ser::to_string_pretty(&original, ron::ser::PrettyConfig::default()).unwrap();
        let parsed = GameConfig::from_ron_str(&text).unwrap();
        assert_eq!(parsed.simulation.seed, original.simulation.seed);
        assert_eq!(parsed.controls.brake_decay, original.controls.brake_decay);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = GameConfig::load_from(Path::new("/definitely/not/here/config.ron"));
        assert_eq!(config.world.anomalies, WorldConfig::default().anomalies);
    }

    #[test]
    fn validate_reports_bad_sections() {
        let mut config = GameConfig::default();
        config.interaction.capture_radius = 0.0;
        let err = config.validate().unwrap_err();
        assert!(format!("{:#}", err).contains("capture_radius"));
    }
}
