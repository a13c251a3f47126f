//! Temporal filtering of the raw per-frame detection signal.

use crate::constants::SMOOTHING_ALPHA;

/// Single-pole exponential low-pass filter for the vertical position signal.
///
/// The first sample of a session passes through unchanged; afterwards
/// `smoothed = alpha * smoothed + (1 - alpha) * raw`. With the default
/// alpha of 0.7 the time constant is about three frames (~100 ms at 30 fps),
/// enough to suppress per-frame detector jitter while staying responsive.
pub struct ExponentialSmoother {
    alpha: f64,
    last: Option<f64>,
}

impl ExponentialSmoother {
    /// Create a smoother with the given coefficient.
    ///
    /// `alpha` is the weight of the previous estimate and must be in [0, 1).
    #[must_use]
    pub fn new(alpha: f64) -> Self {
        assert!((0.0..1.0).contains(&alpha), "alpha must be in [0, 1)");
        Self { alpha, last: None }
    }

    /// Feed a raw sample and return the smoothed value.
    pub fn apply(&mut self, raw: f64) -> f64 {
        let smoothed = match self.last {
            Some(last) => self.alpha * last + (1.0 - self.alpha) * raw,
            None => raw,
        };
        self.last = Some(smoothed);
        smoothed
    }

    /// Forget all history. The next sample passes through unchanged.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for ExponentialSmoother {
    fn default() -> Self {
        Self::new(SMOOTHING_ALPHA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_passes_through() {
        let mut filter = ExponentialSmoother::new(0.7);
        assert_eq!(filter.apply(10.0), 10.0);
    }

    #[test]
    fn test_smoothing_formula() {
        let mut filter = ExponentialSmoother::new(0.7);
        filter.apply(10.0);
        let second = filter.apply(20.0);
        // 0.7 * 10 + 0.3 * 20
        assert!((second - 13.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_response_monotonic_without_overshoot() {
        let mut filter = ExponentialSmoother::new(0.7);
        let mut prev = filter.apply(10.0);
        for _ in 0..50 {
            let next = filter.apply(20.0);
            assert!(next > prev, "smoothed signal must strictly approach the step");
            assert!(next < 20.0, "smoothed signal must never overshoot");
            prev = next;
        }
        assert!(prev > 19.9, "should converge close to the target");
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut filter = ExponentialSmoother::new(0.7);
        filter.apply(100.0);
        filter.reset();
        assert_eq!(filter.apply(5.0), 5.0);
    }
}
