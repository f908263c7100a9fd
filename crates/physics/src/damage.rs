//! Resource and damage model: fuel burn, engine starvation, and ground impacts.
//!
//! Runs after the integrator so ground checks see the position advanced this tick.
//! Hull depletion itself is reported through `FlightState::hull`; the orchestrator
//! owns the transition to mission failure.

use engine_core::{FlightConfig, FlightEvent, FlightState};

/// Apply one tick of fuel, ground-contact, and engine bookkeeping.
pub fn apply_resources(
    state: &mut FlightState,
    config: &FlightConfig,
    dt: f32,
    events: &mut Vec<FlightEvent>,
) {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    burn_fuel(state, config, dt);
    resolve_ground_contact(state, config, events);
    starve_engine(state, config, dt);
    enforce_engine_failure(state, events);
}

/// Burn fuel in proportion to throttle. Returns the amount burned.
pub fn burn_fuel(state: &mut FlightState, config: &FlightConfig, dt: f32) -> f32 {
    if state.throttle.value() <= 0.0 {
        return 0.0;
    }
    let before = state.fuel.value();
    state.fuel.drain(config.fuel_consumption_rate * state.throttle.fraction() * dt);
    before - state.fuel.value()
}

/// Stop the aircraft at the ground plane and damage the hull on a hard touchdown.
///
/// Only the tick that brings an airborne aircraft down registers an impact; sitting
/// on the ground afterwards does not keep re-damaging the hull. Returns the damage dealt.
pub fn resolve_ground_contact(
    state: &mut FlightState,
    config: &FlightConfig,
    events: &mut Vec<FlightEvent>,
) -> f32 {
    if state.position.y > 0.0 {
        state.grounded = false;
        return 0.0;
    }
    if state.position.y == 0.0 {
        return 0.0;
    }

    let impact_speed = state.velocity.length();
    state.position.y = 0.0;
    state.velocity.y = 0.0;
    state.altitude = 0.0;

    if state.grounded {
        return 0.0;
    }
    state.grounded = true;

    let damage = config.impact_damage(impact_speed);
    if damage > 0.0 {
        state.hull.drain(damage);
        log::warn!(
            "Ground impact at {:.1} u/s: hull -{:.0}% ({:.0}% left)",
            impact_speed,
            damage,
            state.hull.value()
        );
        events.push(FlightEvent::GroundImpact { impact_speed, damage });
    } else {
        log::debug!("Touchdown at {:.1} u/s", impact_speed);
    }
    damage
}

/// Wear down the engine while the tank is dry.
pub fn starve_engine(state: &mut FlightState, config: &FlightConfig, dt: f32) {
    if state.fuel.is_empty() {
        state.engine.drain(config.engine_decay_rate * dt);
    }
}

/// A dead engine holds throttle at zero. The failure event fires on the first tick only.
pub fn enforce_engine_failure(state: &mut FlightState, events: &mut Vec<FlightEvent>) {
    if !state.engine.is_empty() {
        return;
    }
    state.throttle.set(0.0);
    if !state.engine_failed {
        state.engine_failed = true;
        let fuel_starved = state.fuel.is_empty();
        log::warn!("Engine failure (fuel starved: {})", fuel_starved);
        events.push(FlightEvent::EngineFailure { fuel_starved });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine_core::Vec3;

    #[test]
    fn full_throttle_burns_rate_times_time() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO).with_throttle(100.0);
        let mut events = Vec::new();
        for _ in 0..600 {
            apply_resources(&mut state, &config, 1.0 / 60.0, &mut events);
        }
        let expected = 100.0 - config.fuel_consumption_rate * 10.0;
        assert!((state.fuel.value() - expected).abs() < 1e-3);
        assert!(events.is_empty());
    }

    #[test]
    fn fuel_clamps_at_zero() {
        let config = FlightConfig { fuel_consumption_rate: 50.0, ..FlightConfig::default() };
        let mut state = FlightState::new(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO).with_throttle(100.0);
        let burned = burn_fuel(&mut state, &config, 5.0);
        assert_eq!(state.fuel.value(), 0.0);
        assert_eq!(burned, 100.0);
    }

    #[test]
    fn idle_throttle_burns_nothing() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO);
        assert_eq!(burn_fuel(&mut state, &config, 10.0), 0.0);
        assert_eq!(state.fuel.value(), 100.0);
    }

    #[test]
    fn hard_landing_damages_hull() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, -0.5, 0.0), Vec3::new(0.0, -20.0, 0.0));
        state.grounded = false;
        let mut events = Vec::new();
        let damage = resolve_ground_contact(&mut state, &config, &mut events);
        assert_eq!(damage, 40.0);
        assert_eq!(state.hull.value(), 60.0);
        assert_eq!(state.position.y, 0.0);
        assert_eq!(state.velocity.y, 0.0);
        assert_eq!(events, vec![FlightEvent::GroundImpact { impact_speed: 20.0, damage: 40.0 }]);
    }

    #[test]
    fn gentle_landing_is_free() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, -0.1, 0.0), Vec3::new(6.0, -8.0, 0.0));
        state.grounded = false;
        let mut events = Vec::new();
        // |v| = 10, right at the threshold
        assert_eq!(resolve_ground_contact(&mut state, &config, &mut events), 0.0);
        assert_eq!(state.hull.value(), 100.0);
        assert!(events.is_empty());
        assert!(state.grounded);
    }

    #[test]
    fn impact_damage_is_capped() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, -90.0, 0.0));
        state.grounded = false;
        let mut events = Vec::new();
        assert_eq!(resolve_ground_contact(&mut state, &config, &mut events), 50.0);
        assert_eq!(state.hull.value(), 50.0);
    }

    #[test]
    fn resting_on_ground_does_not_repeat_damage() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(30.0, -20.0, 0.0));
        state.grounded = false;
        let mut events = Vec::new();
        resolve_ground_contact(&mut state, &config, &mut events);
        let hull_after_first = state.hull.value();
        for _ in 0..10 {
            state.position.y = -0.01;
            state.velocity.y = -0.2;
            resolve_ground_contact(&mut state, &config, &mut events);
        }
        assert_eq!(state.hull.value(), hull_after_first);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn climbing_away_rearms_impacts() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::ZERO, Vec3::ZERO);
        assert!(state.grounded);
        let mut events = Vec::new();
        state.position.y = 5.0;
        resolve_ground_contact(&mut state, &config, &mut events);
        assert!(!state.grounded);
        state.position.y = -1.0;
        state.velocity = Vec3::new(0.0, -15.0, 0.0);
        assert_eq!(resolve_ground_contact(&mut state, &config, &mut events), 30.0);
    }

    #[test]
    fn dry_tank_kills_engine_once() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO).with_throttle(80.0);
        state.fuel.set(0.0);
        let mut events = Vec::new();
        // 10 %/s decay empties the engine in 10 s
        for _ in 0..(60 * 12) {
            apply_resources(&mut state, &config, 1.0 / 60.0, &mut events);
        }
        assert!(state.engine.is_empty());
        assert_eq!(state.throttle.value(), 0.0);
        assert_eq!(events, vec![FlightEvent::EngineFailure { fuel_starved: true }]);
    }

    #[test]
    fn dead_engine_overrides_throttle_requests() {
        let config = FlightConfig::default();
        let mut state = FlightState::new(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO);
        state.engine.set(0.0);
        let mut events = Vec::new();
        apply_resources(&mut state, &config, 0.016, &mut events);
        state.throttle.set(100.0);
        apply_resources(&mut state, &config, 0.016, &mut events);
        assert_eq!(state.throttle.value(), 0.0);
        assert_eq!(events, vec![FlightEvent::EngineFailure { fuel_starved: false }]);
    }
}
