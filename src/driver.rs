//! Frame driver: the per-frame scheduling loop tying the pipeline together.
//!
//! One logical loop, paced by the host's per-frame callback: pull a frame,
//! run the detector tier chain, smooth the result, advance the session state
//! machine, and hand any resulting gesture to the scroll executor. At most
//! one frame is analyzed at a time; a slow detection on frame N naturally
//! back-pressures frame N+1.

use crate::detector::TierSelector;
use crate::frame::FrameSource;
use crate::gesture;
use crate::session::{Phase, SampleOutcome, Status, TrackingSession};
use crate::settings::SettingsHandle;
use crate::{constants, Result};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Executes a scroll against the active document.
///
/// The delta is a signed pixel distance, positive scrolling down. Failure is
/// recoverable: the session continues and only the one action is dropped.
pub trait ScrollExecutor {
    fn scroll_by(&mut self, delta: i32) -> Result<()>;
}

/// Consumer of the observable status stream.
pub trait StatusSink {
    fn publish(&mut self, status: &Status);
}

impl<F: FnMut(&Status)> StatusSink for F {
    fn publish(&mut self, status: &Status) {
        self(status);
    }
}

/// Pipeline tuning knobs, defaulting to the calibrated constants.
#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    /// Exponential smoothing coefficient
    pub smoothing_alpha: f64,
    /// Number of samples in the calibration window
    pub calibration_window: usize,
    /// Linear down-scale factor for heuristic analysis
    pub analysis_scale: f64,
    /// Minimum gap between scroll actions
    pub cooldown: Duration,
    /// Delay before the transient scrolling status reverts to tracking
    pub status_delay: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            smoothing_alpha: constants::SMOOTHING_ALPHA,
            calibration_window: constants::CALIBRATION_WINDOW,
            analysis_scale: constants::ANALYSIS_SCALE,
            cooldown: constants::SCROLL_COOLDOWN,
            status_delay: constants::STATUS_RESET_DELAY,
        }
    }
}

/// The per-frame driver and session lifecycle owner.
pub struct FrameDriver {
    source: Box<dyn FrameSource>,
    executor: Box<dyn ScrollExecutor>,
    selector: TierSelector,
    settings: SettingsHandle,
    sink: Box<dyn StatusSink>,
    config: DriverConfig,
    session: Option<TrackingSession>,
}

impl FrameDriver {
    pub fn new(
        source: Box<dyn FrameSource>,
        executor: Box<dyn ScrollExecutor>,
        selector: TierSelector,
        settings: SettingsHandle,
        sink: Box<dyn StatusSink>,
        config: DriverConfig,
    ) -> Self {
        Self {
            source,
            executor,
            selector,
            settings,
            sink,
            config,
            session: None,
        }
    }

    /// Start a tracking session. Idempotent: a second call while a session
    /// is running does nothing.
    pub fn start_session(&mut self) {
        if self.session.is_some() {
            debug!("start_session ignored, session already running");
            return;
        }
        self.session = Some(TrackingSession::new(
            self.config.smoothing_alpha,
            self.config.calibration_window,
            self.config.cooldown,
            self.config.status_delay,
        ));
        self.sink.publish(&Status::Calibrating(0));
    }

    /// Stop the current session, cancelling all pending timers and
    /// discarding every piece of session state. Idempotent.
    pub fn stop_session(&mut self) {
        if self.session.take().is_none() {
            debug!("stop_session ignored, no session running");
            return;
        }
        info!("tracking session stopped");
        self.sink.publish(&Status::Ready);
    }

    /// Whether a session is currently running.
    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Process one frame tick at the host-supplied timestamp.
    ///
    /// Returns `Ok(true)` when a frame was consumed, `Ok(false)` when no
    /// session is running or the source was not ready this tick. A frame
    /// source error tears the session down and propagates.
    pub fn on_frame(&mut self, now: Instant) -> Result<bool> {
        let Some(session) = &mut self.session else {
            return Ok(false);
        };

        // Deadline-driven status reset, checked before any new work.
        if session.take_status_reset(now) && session.phase() == Phase::Active {
            self.sink.publish(&Status::Tracking);
        }

        let frame = match self.source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return Ok(false),
            Err(e) => {
                warn!("frame source failed: {e}");
                self.sink.publish(&Status::Error(e.to_string()));
                self.session = None;
                return Err(e);
            }
        };

        let Some(raw_y) = self.selector.detect(&frame) else {
            // An undetected frame advances nothing; once calibrated it is
            // surfaced as a visible no-subject condition.
            if session.phase() == Phase::Active {
                self.sink.publish(&Status::NoSubject);
            }
            return Ok(true);
        };

        let settings = self.settings.get();
        let outcome = session.advance(raw_y, f64::from(settings.movement_threshold()), now);
        match outcome {
            SampleOutcome::Calibrating { percent } => {
                self.sink.publish(&Status::Calibrating(percent));
            }
            SampleOutcome::Calibrated { baseline } => {
                debug!("baseline fixed at {baseline:.2}");
                self.sink.publish(&Status::Tracking);
            }
            SampleOutcome::Steady { .. } | SampleOutcome::LockHeld => {}
            SampleOutcome::Gesture { displacement } => {
                let action = gesture::translate(
                    displacement,
                    f64::from(settings.movement_threshold()),
                    f64::from(settings.scroll_speed()),
                );
                match self.executor.scroll_by(action.signed_delta()) {
                    Ok(()) => {
                        info!(
                            "scroll {:?} by {} px (displacement {displacement:.1})",
                            action.direction, action.magnitude
                        );
                        self.sink.publish(&Status::Scrolling {
                            direction: action.direction,
                            magnitude: action.magnitude,
                        });
                    }
                    Err(e) => {
                        // Recoverable: drop this one action, keep the session.
                        warn!("scroll executor failed: {e}");
                        self.sink.publish(&Status::Error(e.to_string()));
                    }
                }
                session.arm_status_reset(now);
            }
        }

        Ok(true)
    }

    /// Convenience tick using the current wall clock.
    pub fn step(&mut self) -> Result<bool> {
        self.on_frame(Instant::now())
    }

    /// Drive the loop until the source stops yielding frames, then stop the
    /// session. Intended for offline replay; live hosts call [`Self::on_frame`]
    /// from their own frame callback instead.
    pub fn run(&mut self) -> Result<()> {
        self.start_session();
        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => return Err(e),
            }
        }
        self.stop_session();
        Ok(())
    }
}
