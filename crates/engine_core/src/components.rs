//! Common ECS components and value types used across the simulation.

use glam::Vec3;

/// A percentage-valued reading (fuel, hull, engine health, throttle).
///
/// Every mutation clamps into `[0, 100]`; NaN input collapses to zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Gauge(f32);

impl Gauge {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        Self(clamp_percent(value))
    }

    pub fn full() -> Self {
        Self(Self::MAX)
    }

    pub fn empty() -> Self {
        Self(Self::MIN)
    }

    pub fn value(&self) -> f32 {
        self.0
    }

    pub fn set(&mut self, value: f32) {
        self.0 = clamp_percent(value);
    }

    /// Add `amount` (may be negative).
    pub fn add(&mut self, amount: f32) {
        self.set(self.0 + amount);
    }

    /// Remove `amount`. Returns true only on the call that takes the gauge to zero.
    pub fn drain(&mut self, amount: f32) -> bool {
        let was_empty = self.is_empty();
        self.set(self.0 - amount.max(0.0));
        !was_empty && self.is_empty()
    }

    pub fn fill(&mut self, amount: f32) {
        self.set(self.0 + amount.max(0.0));
    }

    pub fn is_empty(&self) -> bool {
        self.0 <= Self::MIN
    }

    /// Reading as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f32 {
        self.0 / Self::MAX
    }
}

impl Default for Gauge {
    fn default() -> Self {
        Self::full()
    }
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        Gauge::MIN
    } else {
        value.clamp(Gauge::MIN, Gauge::MAX)
    }
}

/// World-space placement of a static world object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    /// Cleared by the simulation when an object should stop rendering.
    pub visible: bool,
}

impl Placement {
    pub fn at(position: Vec3) -> Self {
        Self { position, visible: true }
    }

    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

/// Collectible marker. `collected` only ever goes from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub id: u32,
    pub collected: bool,
}

impl Checkpoint {
    pub fn new(id: u32) -> Self {
        Self { id, collected: false }
    }

    /// Mark collected. Returns false if it already was.
    pub fn collect(&mut self) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        true
    }
}

/// Region that shakes the aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurbulenceZone {
    /// Peak strength at the zone centre, nominally `[0.3, 0.8]`.
    pub intensity: f32,
}

/// Hazard that glitches the display and interferes with the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anomaly {
    /// Peak strength at the anomaly centre, nominally `[0.2, 1.0]`.
    pub glitch_power: f32,
}

/// Strength of a radial effect at `distance` from its centre: `peak * (1 - d / radius)`,
/// or `None` outside the radius.
pub fn radial_falloff(peak: f32, distance: f32, radius: f32) -> Option<f32> {
    if radius <= 0.0 || !(distance < radius) {
        return None;
    }
    Some(peak * (1.0 - distance / radius))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gauge_clamps_every_mutation() {
        let mut g = Gauge::new(150.0);
        assert_eq!(g.value(), 100.0);
        g.add(-250.0);
        assert_eq!(g.value(), 0.0);
        g.set(f32::NAN);
        assert_eq!(g.value(), 0.0);
        g.fill(42.0);
        assert_eq!(g.value(), 42.0);
        g.fill(-10.0);
        assert_eq!(g.value(), 42.0);
    }

    #[test]
    fn gauge_drain_reports_only_the_emptying_call() {
        let mut g = Gauge::new(10.0);
        assert!(!g.drain(5.0));
        assert!(g.drain(20.0));
        assert!(!g.drain(20.0));
        assert!(g.is_empty());
    }

    #[test]
    fn checkpoint_collect_is_one_shot() {
        let mut c = Checkpoint::new(3);
        assert!(c.collect());
        assert!(!c.collect());
        assert!(c.collected);
    }

    #[test]
    fn radial_falloff_is_linear_inside_radius() {
        assert_eq!(radial_falloff(0.8, 0.0, 100.0), Some(0.8));
        let half = radial_falloff(0.8, 50.0, 100.0).unwrap();
        assert!((half - 0.4).abs() < 1e-6);
        assert_eq!(radial_falloff(0.8, 100.0, 100.0), None);
        assert_eq!(radial_falloff(0.8, f32::NAN, 100.0), None);
    }
}
