//! Hands-free page scrolling driven by heuristic head tracking.
//!
//! This library converts a live stream of RGBA frames of a user's head into
//! discrete scroll commands without markers, special hardware or a trained
//! model. The pipeline is built from cheap pixel heuristics and runs in real
//! time at ~30 frames per second:
//!
//! 1. Per-frame position detection over a tiered chain: an optional platform
//!    face-box capability, the heuristic region scorer offloaded to a worker
//!    thread, or the scorer run synchronously as a last resort
//! 2. Exponential temporal smoothing of the raw vertical position
//! 3. A calibration phase establishing a neutral baseline, then displacement
//!    evaluation against it
//! 4. Translation of above-threshold displacement into a scroll action with
//!    a cooldown lock preventing action storms
//!
//! # Examples
//!
//! ```no_run
//! use head_scroll::detector::TierSelector;
//! use head_scroll::driver::{DriverConfig, FrameDriver, ScrollExecutor};
//! use head_scroll::frame::{FrameSource, PixelBuffer};
//! use head_scroll::session::Status;
//! use head_scroll::settings::SettingsHandle;
//! use head_scroll::worker::DetectionWorker;
//! use head_scroll::Result;
//!
//! struct Camera;
//! impl FrameSource for Camera {
//!     fn next_frame(&mut self) -> Result<Option<PixelBuffer>> {
//!         // Pull the current frame from the capture device.
//!         Ok(None)
//!     }
//! }
//!
//! struct PageScroller;
//! impl ScrollExecutor for PageScroller {
//!     fn scroll_by(&mut self, delta: i32) -> Result<()> {
//!         println!("scroll {delta} px");
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let worker = DetectionWorker::spawn().ok();
//! let config = DriverConfig::default();
//! let selector = TierSelector::new(None, worker, config.analysis_scale);
//! let mut driver = FrameDriver::new(
//!     Box::new(Camera),
//!     Box::new(PageScroller),
//!     selector,
//!     SettingsHandle::default(),
//!     Box::new(|status: &Status| println!("{status:?}")),
//!     config,
//! );
//!
//! driver.start_session();
//! loop {
//!     if !driver.step()? {
//!         break;
//!     }
//! }
//! driver.stop_session();
//! # Ok(())
//! # }
//! ```

/// Pixel buffer type and the frame source boundary
pub mod frame;

/// Heuristic region scorer for face-like position detection
pub mod region_scorer;

/// Detector tier selector combining detection strategies per frame
pub mod detector;

/// Worker offload channel running the scorer on a dedicated thread
pub mod worker;

/// Temporal filtering of the raw detection signal
pub mod filters;

/// Tracking session state machine and scroll lock
pub mod session;

/// Translation of head displacement into scroll actions
pub mod gesture;

/// Per-frame driver loop and session lifecycle
pub mod driver;

/// Live-updatable user settings
pub mod settings;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

/// Error types and result handling
pub mod error;

pub use error::{Error, Result};
