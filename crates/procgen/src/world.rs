//! World scatter: checkpoints, turbulence zones, and anomalies placed from a seed.

use engine_core::{
    ensure_positive, Anomaly, Checkpoint, ConfigError, Placement, TurbulenceZone, Vec3,
};
use hecs::{Entity, World};
use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// World extents and object counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Edge length of the square play area, centred on the origin.
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_checkpoints")]
    pub checkpoints: usize,
    #[serde(default = "default_turbulence_zones")]
    pub turbulence_zones: usize,
    #[serde(default = "default_anomalies")]
    pub anomalies: usize,
    /// Ambient particle count.
    #[serde(default = "default_particles")]
    pub particles: usize,
}

fn default_size() -> f32 {
    10_000.0
}
fn default_checkpoints() -> usize {
    10
}
fn default_turbulence_zones() -> usize {
    15
}
fn default_anomalies() -> usize {
    8
}
fn default_particles() -> usize {
    1000
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            checkpoints: default_checkpoints(),
            turbulence_zones: default_turbulence_zones(),
            anomalies: default_anomalies(),
            particles: default_particles(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("world.size", self.size)?;
        if self.checkpoints == 0 {
            return Err(ConfigError::TooFew { field: "world.checkpoints", value: 0, min: 1 });
        }
        Ok(())
    }
}

/// A generated world ready for the simulation.
pub struct WorldLayout {
    pub seed: u64,
    pub world: World,
    /// Number of checkpoints needed to complete the mission.
    pub checkpoint_count: u32,
}

impl WorldLayout {
    /// Scatter every object class. The same seed and config give the same layout.
    pub fn generate(seed: u64, config: &WorldConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut world = World::new();
        let size = config.size;

        for id in 0..config.checkpoints {
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * size * 0.8,
                rng.gen::<f32>() * 2000.0 + 500.0,
                (rng.gen::<f32>() - 0.5) * size * 0.8,
            );
            spawn_checkpoint(&mut world, id as u32, position);
        }

        for _ in 0..config.turbulence_zones {
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * size * 0.6,
                rng.gen::<f32>() * 1500.0 + 200.0,
                (rng.gen::<f32>() - 0.5) * size * 0.6,
            );
            let intensity = rng.gen::<f32>() * 0.5 + 0.3;
            spawn_turbulence_zone(&mut world, position, intensity);
        }

        for _ in 0..config.anomalies {
            let position = Vec3::new(
                (rng.gen::<f32>() - 0.5) * size * 0.7,
                rng.gen::<f32>() * 2500.0 + 300.0,
                (rng.gen::<f32>() - 0.5) * size * 0.7,
            );
            let glitch_power = rng.gen::<f32>() * 0.8 + 0.2;
            spawn_anomaly(&mut world, position, glitch_power);
        }

        log::info!(
            "Generated world (seed {}): {} checkpoints, {} turbulence zones, {} anomalies",
            seed,
            config.checkpoints,
            config.turbulence_zones,
            config.anomalies
        );

        Self { seed, world, checkpoint_count: config.checkpoints as u32 }
    }

    /// Wrap a hand-built world (tests, scripted scenarios).
    pub fn from_world(world: World) -> Self {
        let checkpoint_count = world.query::<&Checkpoint>().iter().count() as u32;
        Self { seed: 0, world, checkpoint_count }
    }
}

pub fn spawn_checkpoint(world: &mut World, id: u32, position: Vec3) -> Entity {
    world.spawn((Placement::at(position), Checkpoint::new(id)))
}

pub fn spawn_turbulence_zone(world: &mut World, position: Vec3, intensity: f32) -> Entity {
    world.spawn((Placement::at(position), TurbulenceZone { intensity }))
}

pub fn spawn_anomaly(world: &mut World, position: Vec3, glitch_power: f32) -> Entity {
    world.spawn((Placement::at(position), Anomaly { glitch_power }))
}
