//! Think time between task invocations.

use std::time::Duration;
use rand::Rng;

/// Uniform wait range in seconds, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitTime {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl WaitTime {
    pub const fn between(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// Bounds are finite, positive and ordered.
    pub fn is_valid(&self) -> bool {
        self.min_secs.is_finite()
            && self.max_secs.is_finite()
            && self.min_secs > 0.0
            && self.min_secs <= self.max_secs
    }

    /// Draw one wait duration.
    ///
    /// An invalid range yields `min_secs` clamped to zero rather than panicking;
    /// profiles are validated before any user runs.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if !self.is_valid() {
            return Duration::from_secs_f64(self.min_secs.max(0.0));
        }
        Duration::from_secs_f64(rng.gen_range(self.min_secs..=self.max_secs))
    }
}

impl std::fmt::Display for WaitTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s..{}s", self.min_secs, self.max_secs)
    }
}
