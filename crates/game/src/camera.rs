//! Third-person chase camera that trails the aircraft.

use engine_core::{FlightState, Vec3};
use glam::Mat4;

/// Chase camera. Follows a point behind and above the aircraft with a smoothed lag.
#[derive(Debug, Clone)]
pub struct ChaseCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Offset from the aircraft in its local frame.
    pub offset: Vec3,
    /// Look-at point above the aircraft origin.
    pub look_height: f32,
    /// Follow stiffness, 1/s.
    pub follow_rate: f32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 5.0, 15.0),
            target: Vec3::ZERO,
            offset: Vec3::new(0.0, 5.0, 15.0),
            look_height: 2.0,
            follow_rate: 2.0,
            fov_degrees: 75.0,
            near: 0.1,
            far: 20_000.0,
            aspect: 16.0 / 9.0,
        }
    }
}

impl ChaseCamera {
    /// Place the camera on its rest spot behind `flight`, without lag.
    pub fn behind(flight: &FlightState) -> Self {
        let mut camera = Self::default();
        camera.snap_to(flight);
        camera
    }

    pub fn desired_position(&self, flight: &FlightState) -> Vec3 {
        flight.position + flight.orientation.rotation() * self.offset
    }

    pub fn snap_to(&mut self, flight: &FlightState) {
        self.position = self.desired_position(flight);
        self.target = flight.position + Vec3::Y * self.look_height;
    }

    pub fn update(&mut self, flight: &FlightState, dt: f32) {
        let t = (self.follow_rate * dt.max(0.0)).min(1.0);
        self.position = self.position.lerp(self.desired_position(flight), t);
        self.target = flight.position + Vec3::Y * self.look_height;
    }

    /// Update aspect ratio (call on window resize).
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
