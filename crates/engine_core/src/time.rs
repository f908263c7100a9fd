//! Time management for the game loop.

/// Frame rate that per-frame tuning factors are authored against.
pub const REFERENCE_HZ: f32 = 60.0;

/// Default upper bound for a single simulation step, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Clamp an externally supplied frame delta into `[0, max_delta]`.
///
/// NaN, infinities, and negative values collapse to zero.
pub fn sanitize_delta(raw: f32, max_delta: f32) -> f32 {
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    raw.min(max_delta.max(0.0))
}

/// Convert a factor applied once per reference frame into the factor for `dt` seconds.
///
/// `per_tick_factor(0.98, 1.0 / 60.0)` is exactly `0.98`; two half-length frames
/// compound to the same result as one full frame.
pub fn per_tick_factor(factor: f32, dt: f32) -> f32 {
    factor.max(0.0).powf(dt.max(0.0) * REFERENCE_HZ)
}

/// Convert a probability per reference frame into the probability over `dt` seconds.
pub fn per_tick_probability(probability: f32, dt: f32) -> f32 {
    let p = probability.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powf(dt.max(0.0) * REFERENCE_HZ)
}

/// Manages frame timing and delta time calculation.
#[derive(Debug)]
pub struct Time {
    /// Unsanitized duration reported for the last frame.
    raw_delta: f32,
    /// Sum of sanitized deltas since start.
    elapsed: f64,
    /// Frame count since start.
    frame_count: u64,
    /// Largest step handed to the simulation.
    max_delta: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

impl Time {
    /// Create a new time manager that clamps frames to `max_delta` seconds.
    pub fn new(max_delta: f32) -> Self {
        Self {
            raw_delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            max_delta,
        }
    }

    /// Advance by an externally measured delta and return the sanitized step.
    pub fn advance(&mut self, raw_seconds: f32) -> f32 {
        let dt = sanitize_delta(raw_seconds, self.max_delta);
        if !raw_seconds.is_finite() || raw_seconds < 0.0 {
            log::warn!("Rejected invalid frame delta {}; stepping by 0", raw_seconds);
        } else if raw_seconds > self.max_delta {
            log::debug!("Clamped frame delta {:.3}s to {:.3}s", raw_seconds, self.max_delta);
        }
        self.raw_delta = raw_seconds;
        self.elapsed += dt as f64;
        self.frame_count += 1;
        dt
    }

    /// Get the delta exactly as it was reported.
    pub fn raw_delta_seconds(&self) -> f32 {
        self.raw_delta
    }

    /// Get total elapsed (sanitized) time in seconds.
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
