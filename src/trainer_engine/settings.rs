//! Trainer configuration.
//!
//! The only knobs are the attempt count and the bias of the color draw. The
//! timer windows are presentation polish and are exposed for front ends that
//! want different pacing.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TrainerError};
use crate::trainer_engine::models::{MAX_MAX_ATTEMPTS, MIN_MAX_ATTEMPTS};

/// How long the pressed side stays highlighted.
pub const FEEDBACK_WINDOW: Duration = Duration::from_millis(300);
/// Pause between the last guess and the results overlay.
pub const RESULTS_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerSettings {
    /// Attempt count for the next session that has not started yet. `None`
    /// keeps whatever the stored record says.
    pub max_attempts: Option<u32>,
    /// Probability that blue is revealed.
    pub blue_bias: f64,
    /// Fixed seed for reproducible color sequences; entropy when `None`.
    pub rng_seed: Option<u64>,
    pub feedback_window: Duration,
    pub results_delay: Duration,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        TrainerSettings {
            max_attempts: None,
            blue_bias: 0.5,
            rng_seed: None,
            feedback_window: FEEDBACK_WINDOW,
            results_delay: RESULTS_DELAY,
        }
    }
}

impl TrainerSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_blue_bias(mut self, bias: f64) -> Self {
        self.blue_bias = bias;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Reject a bias that is not a probability and clamp the attempt count.
    pub fn validate(mut self) -> Result<Self> {
        if !(0.0..=1.0).contains(&self.blue_bias) {
            return Err(TrainerError::InvalidBias(self.blue_bias));
        }
        self.max_attempts = self.max_attempts.map(clamp_max_attempts);
        Ok(self)
    }
}

/// Force an attempt count into the supported range, logging when it moves.
pub fn clamp_max_attempts(requested: u32) -> u32 {
    let clamped = requested.clamp(MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS);
    if clamped != requested {
        warn!(requested, clamped, "attempt count out of range, clamping");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = TrainerSettings::default();
        assert_eq!(s.max_attempts, None);
        assert_eq!(s.blue_bias, 0.5);
        assert!(s.rng_seed.is_none());
        assert_eq!(s.feedback_window, Duration::from_millis(300));
        assert_eq!(s.results_delay, Duration::from_millis(500));
    }

    #[test]
    fn clamps_attempts_into_range() {
        assert_eq!(clamp_max_attempts(0), 50);
        assert_eq!(clamp_max_attempts(49), 50);
        assert_eq!(clamp_max_attempts(50), 50);
        assert_eq!(clamp_max_attempts(321), 321);
        assert_eq!(clamp_max_attempts(500), 500);
        assert_eq!(clamp_max_attempts(10_000), 500);
    }

    #[test]
    fn validate_rejects_bad_bias() {
        let err = TrainerSettings::new().with_blue_bias(1.5).validate().unwrap_err();
        assert!(matches!(err, TrainerError::InvalidBias(b) if b == 1.5));
        assert!(TrainerSettings::new().with_blue_bias(f64::NAN).validate().is_err());
    }

    #[test]
    fn validate_clamps_attempts() {
        let s = TrainerSettings::new().with_max_attempts(20).validate().unwrap();
        assert_eq!(s.max_attempts, Some(50));
    }
}
