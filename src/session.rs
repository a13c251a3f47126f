//! Tracking session state: calibration window, baseline displacement
//! evaluation and the scroll cooldown lock.
//!
//! A [`TrackingSession`] consolidates all per-session mutable state so that
//! session teardown is a single drop and nothing leaks across sessions.

use crate::filters::ExponentialSmoother;
use crate::gesture::ScrollDirection;
use log::{debug, info};
use std::time::{Duration, Instant};

/// Observable pipeline status, published on the driver's status stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No session is running
    Ready,
    /// Collecting baseline samples; payload is percent complete
    Calibrating(u8),
    /// Baseline established, watching for displacement
    Tracking,
    /// A scroll action just fired
    Scrolling {
        direction: ScrollDirection,
        magnitude: i32,
    },
    /// Calibration finished but no face-like region is currently visible
    NoSubject,
    /// A recoverable boundary failure occurred
    Error(String),
}

/// Calibration/tracking phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Calibrating,
    Active,
}

/// Outcome of feeding one detected sample into the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleOutcome {
    /// Still collecting the baseline window
    Calibrating { percent: u8 },
    /// This sample completed the window; baseline is now fixed
    Calibrated { baseline: f64 },
    /// Active, but displacement stayed at or below the threshold
    Steady { displacement: f64 },
    /// Active, threshold exceeded, but the cooldown lock is still held
    LockHeld,
    /// Threshold exceeded and the lock was free; the lock is now acquired
    Gesture { displacement: f64 },
}

/// All mutable state of one tracking session.
pub struct TrackingSession {
    smoother: ExponentialSmoother,
    window_len: usize,
    samples: Vec<f64>,
    baseline: Option<f64>,
    frame_count: u64,
    cooldown: Duration,
    status_delay: Duration,
    lock_deadline: Option<Instant>,
    status_deadline: Option<Instant>,
}

impl TrackingSession {
    /// Create a fresh session. Smoothing and calibration state start empty.
    #[must_use]
    pub fn new(
        alpha: f64,
        window_len: usize,
        cooldown: Duration,
        status_delay: Duration,
    ) -> Self {
        info!("tracking session started, calibration window {window_len} samples");
        Self {
            smoother: ExponentialSmoother::new(alpha),
            window_len,
            samples: Vec::with_capacity(window_len),
            baseline: None,
            frame_count: 0,
            cooldown,
            status_delay,
            lock_deadline: None,
            status_deadline: None,
        }
    }

    /// Feed one raw detected position through smoothing and the state
    /// machine.
    ///
    /// Only detected frames reach this method; no-detection frames must not
    /// advance calibration or displacement evaluation and are handled by the
    /// caller. The first post-calibration sample is frame `window_len + 1`;
    /// the phase test uses strict greater-than on the counter.
    pub fn advance(&mut self, raw_y: f64, threshold: f64, now: Instant) -> SampleOutcome {
        self.frame_count += 1;
        let smoothed = self.smoother.apply(raw_y);

        if self.frame_count <= self.window_len as u64 {
            self.samples.push(smoothed);
            if self.frame_count == self.window_len as u64 {
                let baseline =
                    self.samples.iter().sum::<f64>() / self.samples.len() as f64;
                self.baseline = Some(baseline);
                // The window is not needed once the baseline is fixed.
                self.samples = Vec::new();
                info!("calibration complete, baseline y = {baseline:.2}");
                return SampleOutcome::Calibrated { baseline };
            }
            let percent = (self.frame_count * 100 / self.window_len as u64) as u8;
            return SampleOutcome::Calibrating { percent };
        }

        // Active phase: baseline is write-once and always present here.
        let baseline = self.baseline.unwrap_or(smoothed);
        let displacement = smoothed - baseline;

        if displacement.abs() <= threshold {
            return SampleOutcome::Steady { displacement };
        }
        if self.is_lock_held(now) {
            return SampleOutcome::LockHeld;
        }

        self.lock_deadline = Some(now + self.cooldown);
        debug!("gesture displacement {displacement:.2}, lock acquired");
        SampleOutcome::Gesture { displacement }
    }

    /// Current phase of the state machine.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.baseline.is_some() {
            Phase::Active
        } else {
            Phase::Calibrating
        }
    }

    /// The fixed baseline, once calibration has completed.
    #[must_use]
    pub const fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Number of detected samples consumed so far.
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Whether the scroll cooldown lock currently blocks new actions.
    ///
    /// The lock auto-releases when its deadline passes; there is no timer
    /// thread, the deadline is simply compared against the caller's clock.
    pub fn is_lock_held(&mut self, now: Instant) -> bool {
        match self.lock_deadline {
            Some(deadline) if now < deadline => true,
            Some(_) => {
                self.lock_deadline = None;
                false
            }
            None => false,
        }
    }

    /// Arm the status-reset timer after publishing a transient status.
    ///
    /// Deliberately decoupled from the cooldown lock: the lock gates the
    /// next action, this deadline only gates user-facing feedback.
    pub fn arm_status_reset(&mut self, now: Instant) {
        self.status_deadline = Some(now + self.status_delay);
    }

    /// True exactly once when the armed status-reset deadline has passed.
    pub fn take_status_reset(&mut self, now: Instant) -> bool {
        match self.status_deadline {
            Some(deadline) if now >= deadline => {
                self.status_deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Whether any timer deadline is still armed.
    #[must_use]
    pub const fn has_pending_timers(&self) -> bool {
        self.lock_deadline.is_some() || self.status_deadline.is_some()
    }
}
