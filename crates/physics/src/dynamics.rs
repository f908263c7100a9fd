//! Flight dynamics integrator: gravity, lift, drag, and thrust applied each tick.

use engine_core::{FlightConfig, FlightState};

/// Force magnitudes computed during one integration step (accelerations, units/s²).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceSample {
    /// Speed after gravity, used for lift and drag.
    pub speed: f32,
    pub lift: f32,
    pub drag: f32,
    pub thrust: f32,
}

/// Advance velocity and position of `state` by `dt` seconds.
///
/// Orientation is read, never written; input and turbulence own it. A zero velocity
/// yields zero lift and drag and only the thrust term contributes.
pub fn integrate(state: &mut FlightState, config: &FlightConfig, dt: f32) -> ForceSample {
    if !(dt > 0.0) || !dt.is_finite() {
        state.refresh_telemetry(state.speed());
        return ForceSample { speed: state.speed(), ..Default::default() };
    }

    state.velocity.y += config.gravity * dt;

    let speed = state.velocity.length();
    let lift = config.lift_coefficient * speed * state.orientation.pitch.sin() * config.air_density;
    state.velocity.y += lift * dt;

    // Drag opposes motion but never flips it
    let drag = config.drag_coefficient * speed * speed * config.air_density;
    let current = state.velocity.length();
    let drag_loss = (drag * dt).min(current);
    state.velocity -= state.velocity.normalize_or_zero() * drag_loss;

    // A dead engine produces nothing whatever the throttle reads
    let thrust = if state.engine.is_empty() {
        0.0
    } else {
        state.throttle.fraction() * config.thrust_power
    };
    state.velocity += state.orientation.forward() * (thrust * dt);

    state.position += state.velocity * dt;
    state.refresh_telemetry(speed);

    ForceSample { speed, lift, drag, thrust }
}
