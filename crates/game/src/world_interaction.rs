//! Proximity effects between the aircraft and the static world: turbulence shake,
//! anomaly interference, and checkpoint collection.
//!
//! Chances are authored per 60 Hz reference frame and rescaled to the real frame length.

use engine_core::{
    ensure_in_range, ensure_non_negative, ensure_positive, per_tick_probability, radial_falloff,
    Anomaly, Checkpoint, ConfigError, FlightEvent, FlightState, GlitchSource, Placement,
    TurbulenceZone, Vec3, REFERENCE_HZ,
};
use hecs::World;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Ranges, strengths, and chances of world effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "default_turbulence_radius")]
    pub turbulence_radius: f32,
    /// Peak horizontal buffet acceleration per unit of local intensity.
    #[serde(default = "default_turbulence_horizontal_force")]
    pub turbulence_horizontal_force: f32,
    #[serde(default = "default_turbulence_vertical_force")]
    pub turbulence_vertical_force: f32,
    /// Attitude shake per reference frame per unit of local intensity, radians.
    #[serde(default = "default_turbulence_shake")]
    pub turbulence_shake: f32,
    #[serde(default = "default_turbulence_notice_chance")]
    pub turbulence_notice_chance: f32,
    #[serde(default = "default_anomaly_radius")]
    pub anomaly_radius: f32,
    /// Glitch chance per reference frame at full local power.
    #[serde(default = "default_glitch_chance")]
    pub glitch_chance: f32,
    /// Interference chance per reference frame at full local power.
    #[serde(default = "default_interference_chance")]
    pub interference_chance: f32,
    /// Engine health lost per interference hit at full local power.
    #[serde(default = "default_interference_damage")]
    pub interference_damage: f32,
    #[serde(default = "default_capture_radius")]
    pub capture_radius: f32,
    #[serde(default = "default_checkpoint_score")]
    pub checkpoint_score: u32,
    /// Hull percent below which the airframe glitches on its own.
    #[serde(default = "default_damage_glitch_hull")]
    pub damage_glitch_hull: f32,
    #[serde(default = "default_damage_glitch_chance")]
    pub damage_glitch_chance: f32,
}

fn default_turbulence_radius() -> f32 {
    100.0
}
fn default_turbulence_horizontal_force() -> f32 {
    20.0
}
fn default_turbulence_vertical_force() -> f32 {
    10.0
}
fn default_turbulence_shake() -> f32 {
    0.1
}
fn default_turbulence_notice_chance() -> f32 {
    0.01
}
fn default_anomaly_radius() -> f32 {
    150.0
}
fn default_glitch_chance() -> f32 {
    0.1
}
fn default_interference_chance() -> f32 {
    0.05
}
fn default_interference_damage() -> f32 {
    5.0
}
fn default_capture_radius() -> f32 {
    25.0
}
fn default_checkpoint_score() -> u32 {
    100
}
fn default_damage_glitch_hull() -> f32 {
    50.0
}
fn default_damage_glitch_chance() -> f32 {
    0.1
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            turbulence_radius: default_turbulence_radius(),
            turbulence_horizontal_force: default_turbulence_horizontal_force(),
            turbulence_vertical_force: default_turbulence_vertical_force(),
            turbulence_shake: default_turbulence_shake(),
            turbulence_notice_chance: default_turbulence_notice_chance(),
            anomaly_radius: default_anomaly_radius(),
            glitch_chance: default_glitch_chance(),
            interference_chance: default_interference_chance(),
            interference_damage: default_interference_damage(),
            capture_radius: default_capture_radius(),
            checkpoint_score: default_checkpoint_score(),
            damage_glitch_hull: default_damage_glitch_hull(),
            damage_glitch_chance: default_damage_glitch_chance(),
        }
    }
}

impl InteractionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("turbulence_radius", self.turbulence_radius)?;
        ensure_non_negative("turbulence_horizontal_force", self.turbulence_horizontal_force)?;
        ensure_non_negative("turbulence_vertical_force", self.turbulence_vertical_force)?;
        ensure_non_negative("turbulence_shake", self.turbulence_shake)?;
        ensure_in_range("turbulence_notice_chance", self.turbulence_notice_chance, 0.0, 1.0)?;
        ensure_positive("anomaly_radius", self.anomaly_radius)?;
        ensure_in_range("glitch_chance", self.glitch_chance, 0.0, 1.0)?;
        ensure_in_range("interference_chance", self.interference_chance, 0.0, 1.0)?;
        ensure_non_negative("interference_damage", self.interference_damage)?;
        ensure_positive("capture_radius", self.capture_radius)?;
        ensure_in_range("damage_glitch_hull", self.damage_glitch_hull, 0.0, 100.0)?;
        ensure_in_range("damage_glitch_chance", self.damage_glitch_chance, 0.0, 1.0)?;
        Ok(())
    }
}

/// What the aircraft touched this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionReport {
    pub turbulence_zones: u32,
    pub anomalies: u32,
    /// Ids of checkpoints collected this tick.
    pub collected: Vec<u32>,
}

/// Run every world effect for one tick, in order: turbulence, anomalies, checkpoints.
pub fn interact<R: Rng>(
    state: &mut FlightState,
    world: &mut World,
    config: &InteractionConfig,
    rng: &mut R,
    dt: f32,
    events: &mut Vec<FlightEvent>,
) -> InteractionReport {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    InteractionReport {
        turbulence_zones: apply_turbulence(state, world, config, rng, dt, events),
        anomalies: apply_anomalies(state, world, config, rng, dt, events),
        collected: collect_checkpoints(state.position, world, config, events),
    }
}

/// Buffet the aircraft inside every nearby turbulence zone. Returns how many zones applied.
pub fn apply_turbulence<R: Rng>(
    state: &mut FlightState,
    world: &World,
    config: &InteractionConfig,
    rng: &mut R,
    dt: f32,
    events: &mut Vec<FlightEvent>,
) -> u32 {
    let notice_chance = per_tick_probability(config.turbulence_notice_chance, dt);
    let frames = dt * REFERENCE_HZ;
    let position = state.position;
    let mut affected = 0;

    for (_, (placement, zone)) in world.query::<(&Placement, &TurbulenceZone)>().iter() {
        let distance = placement.distance_to(position);
        let Some(local) = radial_falloff(zone.intensity, distance, config.turbulence_radius) else {
            continue;
        };
        affected += 1;

        let push = Vec3::new(
            (rng.gen::<f32>() - 0.5) * local * config.turbulence_horizontal_force,
            (rng.gen::<f32>() - 0.5) * local * config.turbulence_vertical_force,
            (rng.gen::<f32>() - 0.5) * local * config.turbulence_horizontal_force,
        );
        state.velocity += push * dt;

        // Visual shake; pitch and roll must stay legal afterwards
        state.orientation.pitch += (rng.gen::<f32>() - 0.5) * local * config.turbulence_shake * frames;
        state.orientation.roll += (rng.gen::<f32>() - 0.5) * local * config.turbulence_shake * frames;
        state.orientation.clamp();

        if rng.gen::<f32>() < notice_chance {
            events.push(FlightEvent::TurbulenceDetected);
        }
    }
    affected
}

/// Glitch feedback and engine interference near anomalies. Returns how many anomalies applied.
pub fn apply_anomalies<R: Rng>(
    state: &mut FlightState,
    world: &World,
    config: &InteractionConfig,
    rng: &mut R,
    dt: f32,
    events: &mut Vec<FlightEvent>,
) -> u32 {
    let position = state.position;
    let mut affected = 0;

    for (_, (placement, anomaly)) in world.query::<(&Placement, &Anomaly)>().iter() {
        let distance = placement.distance_to(position);
        let Some(power) = radial_falloff(anomaly.glitch_power, distance, config.anomaly_radius) else {
            continue;
        };
        affected += 1;

        if rng.gen::<f32>() < per_tick_probability(power * config.glitch_chance, dt) {
            events.push(FlightEvent::GlitchTriggered { power, source: GlitchSource::Anomaly });
        }

        if rng.gen::<f32>() < per_tick_probability(power * config.interference_chance, dt) {
            let engine_loss = power * config.interference_damage;
            state.engine.drain(engine_loss);
            log::debug!(
                "Anomaly interference: engine -{:.1}% ({:.0}% left)",
                engine_loss,
                state.engine.value()
            );
            events.push(FlightEvent::SystemInterference { engine_loss });
        }
    }
    affected
}

/// Collect every uncollected checkpoint within capture range. Returns the collected ids.
pub fn collect_checkpoints(
    position: Vec3,
    world: &mut World,
    config: &InteractionConfig,
    events: &mut Vec<FlightEvent>,
) -> Vec<u32> {
    let mut collected = Vec::new();
    for (_, (placement, checkpoint)) in world.query_mut::<(&mut Placement, &mut Checkpoint)>() {
        if checkpoint.collected || placement.distance_to(position) >= config.capture_radius {
            continue;
        }
        if checkpoint.collect() {
            placement.visible = false;
            collected.push(checkpoint.id);
            events.push(FlightEvent::CheckpointCollected { id: checkpoint.id });
        }
    }
    collected
}
