//! SkyGlitch - arcade flight through a glitching sky.
//!
//! The core is headless: a [`Simulation`] owns the aircraft and the world and is
//! advanced one frame at a time by whatever front end drives it.

pub mod autopilot;
pub mod camera;
pub mod config;
pub mod effects;
pub mod mission_log;
pub mod simulation;
pub mod telemetry;
pub mod world_interaction;

pub use autopilot::Autopilot;
pub use camera::ChaseCamera;
pub use config::{GameConfig, SimulationConfig};
pub use effects::{AmbientParticles, GlitchPulse};
pub use mission_log::{LogEntry, MissionLog};
pub use simulation::{spawn_flight, MissionState, SimPhase, Simulation, TerminalReason};
pub use telemetry::{AudioMix, ContactKind, RadarContact, TelemetrySnapshot, ThreatLevel};
pub use world_interaction::{interact, InteractionConfig, InteractionReport};
