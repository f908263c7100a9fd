//! Ambient effects: drifting sky particles and the glitch overlay.

use engine_core::{per_tick_probability, FlightEvent, FlightState, GlitchSource, Vec3};
use rand::Rng;

/// Height particles are spawned up to, and respawn at.
pub const PARTICLE_CEILING: f32 = 3000.0;
/// Particles falling below this height respawn at the ceiling.
pub const PARTICLE_FLOOR: f32 = -100.0;
const PARTICLE_DRIFT_SCALE: f32 = 100.0;

pub struct SkyParticle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Sky dust scattered over the whole play area.
pub struct AmbientParticles {
    pub particles: Vec<SkyParticle>,
    /// Edge length of the area particles respawn in.
    pub extent: f32,
}

impl AmbientParticles {
    pub fn new<R: Rng>(count: usize, extent: f32, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| SkyParticle {
                position: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * extent,
                    rng.gen::<f32>() * PARTICLE_CEILING,
                    (rng.gen::<f32>() - 0.5) * extent,
                ),
                velocity: Vec3::new(
                    (rng.gen::<f32>() - 0.5) * 0.1,
                    -rng.gen::<f32>() * 0.05,
                    (rng.gen::<f32>() - 0.5) * 0.1,
                ),
            })
            .collect();
        Self { particles, extent }
    }

    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) {
        for p in &mut self.particles {
            p.position += p.velocity * PARTICLE_DRIFT_SCALE * dt;
            if p.position.y < PARTICLE_FLOOR {
                p.position = Vec3::new(
                    (rng.gen::<f32>() - 0.5) * self.extent,
                    PARTICLE_CEILING,
                    (rng.gen::<f32>() - 0.5) * self.extent,
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

/// Full-screen glitch overlay. Each trigger flashes it for a fixed time.
#[derive(Debug, Clone, Default)]
pub struct GlitchPulse {
    timer: f32,
    /// Set when the last trigger asked for the glitch sound. Cleared by `take_sound_cue`.
    sound_cue: bool,
    pub triggers: u32,
}

impl GlitchPulse {
    pub const OPACITY: f32 = 0.3;
    pub const DURATION: f32 = 0.1;
    pub const SOUND_CHANCE: f32 = 0.3;

    pub fn trigger<R: Rng>(&mut self, rng: &mut R) {
        self.timer = Self::DURATION;
        self.triggers += 1;
        if rng.gen::<f32>() < Self::SOUND_CHANCE {
            self.sound_cue = true;
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.timer = (self.timer - dt).max(0.0);
    }

    pub fn opacity(&self) -> f32 {
        if self.timer > 0.0 {
            Self::OPACITY
        } else {
            0.0
        }
    }

    pub fn is_active(&self) -> bool {
        self.timer > 0.0
    }

    pub fn take_sound_cue(&mut self) -> bool {
        std::mem::take(&mut self.sound_cue)
    }
}

/// Random glitch from a damaged airframe. Fires at most once per call.
pub fn hull_damage_glitch<R: Rng>(
    flight: &FlightState,
    threshold: f32,
    chance: f32,
    rng: &mut R,
    dt: f32,
    events: &mut Vec<FlightEvent>,
) -> bool {
    if flight.hull.value() >= threshold {
        return false;
    }
    if rng.gen::<f32>() < per_tick_probability(chance, dt) {
        let power = 1.0 - flight.hull.fraction();
        events.push(FlightEvent::GlitchTriggered { power, source: GlitchSource::HullDamage });
        return true;
    }
    false
}
