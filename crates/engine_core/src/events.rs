//! Discrete notifications fired by the simulation.
//!
//! Events are fire-and-forget: HUD, audio, and the mission log consume them after a
//! tick completes and the simulation never waits on them.

use std::fmt;

/// How loudly an event should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Critical,
}

/// What caused a glitch pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlitchSource {
    Anomaly,
    HullDamage,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightEvent {
    MissionStarted,
    Paused,
    Resumed,
    AudioToggled { muted: bool },
    GroundImpact { impact_speed: f32, damage: f32 },
    CheckpointCollected { id: u32 },
    TurbulenceDetected,
    GlitchTriggered { power: f32, source: GlitchSource },
    SystemInterference { engine_loss: f32 },
    EngineFailure { fuel_starved: bool },
    MissionComplete,
    MissionFailed,
}

impl FlightEvent {
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissionStarted
            | Self::Paused
            | Self::Resumed
            | Self::AudioToggled { .. }
            | Self::GlitchTriggered { .. } => Severity::Info,
            Self::CheckpointCollected { .. } | Self::MissionComplete => Severity::Success,
            Self::TurbulenceDetected | Self::SystemInterference { .. } => Severity::Warning,
            Self::GroundImpact { .. } | Self::EngineFailure { .. } | Self::MissionFailed => {
                Severity::Critical
            }
        }
    }

    /// Whether this event belongs in the mission log (glitch pulses are too frequent).
    pub fn is_loggable(&self) -> bool {
        !matches!(self, Self::GlitchTriggered { .. })
    }

    /// Whether the alert sound should accompany this event.
    pub fn plays_alert(&self) -> bool {
        matches!(self, Self::GroundImpact { .. } | Self::CheckpointCollected { .. })
    }
}

impl fmt::Display for FlightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissionStarted => write!(f, "SYSTEMS ONLINE - MISSION START"),
            Self::Paused => write!(f, "GAME PAUSED"),
            Self::Resumed => write!(f, "GAME RESUMED"),
            Self::AudioToggled { muted: true } => write!(f, "AUDIO OFF"),
            Self::AudioToggled { muted: false } => write!(f, "AUDIO ON"),
            Self::GroundImpact { damage, .. } => {
                write!(f, "GROUND IMPACT - HULL DAMAGE: {}%", damage.round())
            }
            // ids are zero-based, pilots count from one
            Self::CheckpointCollected { id } => write!(f, "CHECKPOINT {} COLLECTED", id + 1),
            Self::TurbulenceDetected => write!(f, "TURBULENCE DETECTED"),
            Self::GlitchTriggered { power, .. } => write!(f, "SIGNAL GLITCH ({:.2})", power),
            Self::SystemInterference { .. } => write!(f, "SYSTEM INTERFERENCE DETECTED"),
            Self::EngineFailure { fuel_starved: true } => write!(f, "ENGINE FAILURE - NO FUEL"),
            Self::EngineFailure { fuel_starved: false } => write!(f, "ENGINE FAILURE"),
            Self::MissionComplete => write!(f, "MISSION COMPLETE - ALL CHECKPOINTS COLLECTED"),
            Self::MissionFailed => write!(f, "CRITICAL HULL FAILURE - MISSION TERMINATED"),
        }
    }
}
