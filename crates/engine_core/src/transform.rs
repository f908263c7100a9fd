//! Aircraft orientation and spatial helpers.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use glam::{EulerRot, Quat, Vec3};

/// Largest nose-up / nose-down angle, in radians.
pub const PITCH_LIMIT: f32 = FRAC_PI_3;
/// Largest bank angle, in radians.
pub const ROLL_LIMIT: f32 = FRAC_PI_2;

/// Euler orientation of the aircraft in radians.
///
/// Rotation order is yaw (Y), then pitch (X), then roll (Z). With zero angles the
/// nose points down negative Z and positive pitch raises it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Orientation {
    /// Create an orientation with pitch and roll already clamped.
    pub fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        let mut orientation = Self { pitch, yaw, roll };
        orientation.clamp();
        orientation
    }

    /// Pull pitch and roll back inside their legal ranges. Non-finite angles reset to level.
    pub fn clamp(&mut self) {
        self.pitch = clamp_angle(self.pitch, PITCH_LIMIT);
        self.roll = clamp_angle(self.roll, ROLL_LIMIT);
        if !self.yaw.is_finite() {
            self.yaw = 0.0;
        }
    }

    /// Whether pitch and roll are inside their legal ranges.
    pub fn is_within_limits(&self) -> bool {
        self.pitch.abs() <= PITCH_LIMIT && self.roll.abs() <= ROLL_LIMIT
    }

    /// Rotation quaternion for this orientation.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, self.roll)
    }

    /// Nose direction (negative Z rotated into world space).
    pub fn forward(&self) -> Vec3 {
        self.rotation() * -Vec3::Z
    }

    /// Yaw wrapped into `[0, 2π)`.
    pub fn heading_radians(&self) -> f32 {
        wrap_radians(self.yaw)
    }

    /// Compass heading in degrees, `[0, 360)`.
    pub fn heading_degrees(&self) -> f32 {
        let deg = self.yaw.to_degrees().rem_euclid(360.0);
        // rem_euclid can round up to exactly 360.0 for tiny negative inputs
        if deg >= 360.0 {
            0.0
        } else {
            deg
        }
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_radians(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest signed difference `to - from`, in `[-π, π]`.
pub fn angle_difference(from: f32, to: f32) -> f32 {
    let diff = wrap_radians(to - from);
    if diff > std::f32::consts::PI {
        diff - TAU
    } else {
        diff
    }
}

fn clamp_angle(angle: f32, limit: f32) -> f32 {
    if angle.is_finite() {
        angle.clamp(-limit, limit)
    } else {
        0.0
    }
}
