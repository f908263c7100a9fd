//! Simple autopilot used by the headless demo: steer at the nearest open checkpoint.

use engine_core::{angle_difference, Checkpoint, FlightState, Placement, Vec3};
use hecs::World;
use input::FlightControls;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Throttle percent to hold.
    pub cruise_throttle: f32,
    /// Largest climb or dive angle commanded, radians.
    pub max_climb: f32,
    pub yaw_gain: f32,
    pub pitch_gain: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self { cruise_throttle: 80.0, max_climb: 0.5, yaw_gain: 2.0, pitch_gain: 3.0 }
    }
}

impl Autopilot {
    /// Position of the closest uncollected checkpoint.
    pub fn nearest_target(world: &World, from: Vec3) -> Option<Vec3> {
        world
            .query::<(&Placement, &Checkpoint)>()
            .iter()
            .filter(|(_, (_, checkpoint))| !checkpoint.collected)
            .map(|(_, (placement, _))| placement.position)
            .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
    }

    pub fn steer(&self, flight: &FlightState, target: Vec3) -> FlightControls {
        let to_target = target - flight.position;
        let horizontal = Vec3::new(to_target.x, 0.0, to_target.z).length();

        // forward is -Z at yaw 0
        let desired_yaw = (-to_target.x).atan2(-to_target.z);
        let yaw_error = angle_difference(flight.orientation.yaw, desired_yaw);

        let desired_pitch = to_target.y.atan2(horizontal).clamp(-self.max_climb, self.max_climb);
        let pitch_error = desired_pitch - flight.orientation.pitch;

        let throttle_error = self.cruise_throttle - flight.throttle.value();
        let throttle = if throttle_error.abs() < 1.0 { 0.0 } else { throttle_error.signum() };

        FlightControls {
            pitch: (pitch_error * self.pitch_gain).clamp(-1.0, 1.0),
            yaw: (yaw_error * self.yaw_gain).clamp(-1.0, 1.0),
            throttle,
            ..FlightControls::default()
        }
    }

    /// Controls for this tick, or neutral controls when nothing is left to collect.
    pub fn controls(&self, flight: &FlightState, world: &World) -> FlightControls {
        match Self::nearest_target(world, flight.position) {
            Some(target) => self.steer(flight, target),
            None => FlightControls::default(),
        }
    }
}
