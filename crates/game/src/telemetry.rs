//! Read-only views of the simulation for the HUD, radar, and audio collaborators.

use engine_core::{Anomaly, Checkpoint, FlightState, Placement, TurbulenceZone, Vec3};
use hecs::World;

use crate::simulation::{MissionState, SimPhase};

/// Hull-based warning level shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ThreatLevel {
    Low,
    High,
    Critical,
}

impl ThreatLevel {
    pub fn from_hull(hull: f32) -> Self {
        if hull < 30.0 {
            Self::Critical
        } else if hull < 60.0 {
            Self::High
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// Everything the HUD shows, sampled after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    pub speed_kmh: f32,
    pub altitude: f32,
    pub heading_deg: f32,
    pub throttle: f32,
    pub fuel: f32,
    pub hull: f32,
    pub engine: f32,
    pub score: u32,
    pub checkpoints_collected: u32,
    pub checkpoint_total: u32,
    pub mission_time: f32,
    pub phase: SimPhase,
    pub threat: ThreatLevel,
}

impl TelemetrySnapshot {
    pub fn capture(flight: &FlightState, mission: &MissionState) -> Self {
        Self {
            speed_kmh: flight.speed_kmh,
            altitude: flight.altitude,
            heading_deg: flight.heading_deg,
            throttle: flight.throttle.value(),
            fuel: flight.fuel.value(),
            hull: flight.hull.value(),
            engine: flight.engine.value(),
            score: mission.score,
            checkpoints_collected: mission.checkpoints_collected,
            checkpoint_total: mission.checkpoint_total,
            mission_time: mission.game_time,
            phase: mission.phase,
            threat: ThreatLevel::from_hull(flight.hull.value()),
        }
    }
}

/// Looping sound levels derived from flight state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioMix {
    pub master: f32,
    pub engine_volume: f32,
    pub engine_playing: bool,
    pub wind_volume: f32,
    pub wind_playing: bool,
}

impl AudioMix {
    pub const MASTER_VOLUME: f32 = 0.7;

    pub fn from_flight(flight: &FlightState, muted: bool) -> Self {
        let master = if muted { 0.0 } else { Self::MASTER_VOLUME };
        let throttle = flight.throttle.value();
        let kmh = flight.speed_kmh;
        Self {
            master,
            engine_volume: (throttle / 100.0) * 0.6 * master,
            engine_playing: throttle > 0.0,
            wind_volume: (kmh / 200.0).min(0.4) * master,
            wind_playing: kmh > 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Checkpoint { id: u32 },
    Turbulence,
    Anomaly,
}

/// A world object relative to the aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarContact {
    pub kind: ContactKind,
    pub offset: Vec3,
    pub distance: f32,
}

/// Visible world objects within `range` of `origin`, nearest first.
pub fn radar_contacts(world: &World, origin: Vec3, range: f32) -> Vec<RadarContact> {
    let mut contacts = Vec::new();
    for (_, (placement, checkpoint, zone, anomaly)) in world
        .query::<(&Placement, Option<&Checkpoint>, Option<&TurbulenceZone>, Option<&Anomaly>)>()
        .iter()
    {
        if !placement.visible {
            continue;
        }
        let kind = match (checkpoint, zone, anomaly) {
            (Some(c), _, _) => ContactKind::Checkpoint { id: c.id },
            (None, Some(_), _) => ContactKind::Turbulence,
            (None, None, Some(_)) => ContactKind::Anomaly,
            (None, None, None) => continue,
        };
        let offset = placement.position - origin;
        let distance = offset.length();
        if distance <= range {
            contacts.push(RadarContact { kind, offset, distance });
        }
    }
    contacts.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    contacts
}
