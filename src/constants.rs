//! Constants used throughout the application

use std::time::Duration;

/// Default frames per second assumption
pub const DEFAULT_FPS: f64 = 30.0;

/// Side length of a square scan region, in pixels
pub const REGION_SIZE: u32 = 30;

/// Step between adjacent scan regions (50% overlap), in pixels
pub const SCAN_STEP: u32 = 15;

/// Horizontal scan band: fraction of frame width where a seated face is expected
pub const SCAN_X_MIN_FRAC: f64 = 0.25;
pub const SCAN_X_MAX_FRAC: f64 = 0.75;

/// Vertical scan band: fraction of frame height where a seated face is expected
pub const SCAN_Y_MIN_FRAC: f64 = 0.15;
pub const SCAN_Y_MAX_FRAC: f64 = 0.85;

/// Rec. 601 luma weights
pub const LUMA_R: f64 = 0.299;
pub const LUMA_G: f64 = 0.587;
pub const LUMA_B: f64 = 0.114;

/// Average-brightness gate: regions outside (min, max) are rejected
pub const BRIGHTNESS_MIN: f64 = 60.0;
pub const BRIGHTNESS_MAX: f64 = 220.0;

/// Minimum skin-tone ratio for a region to survive (strict greater-than)
pub const SKIN_RATIO_MIN: f64 = 0.1;

/// Region score weights: skin ratio dominates, brightness is a tie-breaker
pub const SCORE_BRIGHTNESS_WEIGHT: f64 = 0.7;
pub const SCORE_SKIN_WEIGHT: f64 = 1000.0;

/// Penalty per pixel of distance from the expected face anchor
pub const ANCHOR_DISTANCE_PENALTY: f64 = 0.1;

/// Expected face anchor: horizontal center, this fraction down from the top
pub const ANCHOR_Y_FRAC: f64 = 0.4;

/// Exponential smoothing coefficient (weight of the previous estimate)
pub const SMOOTHING_ALPHA: f64 = 0.7;

/// Number of smoothed samples used to establish the neutral baseline
pub const CALIBRATION_WINDOW: usize = 90;

/// Minimum gap between two scroll actions
pub const SCROLL_COOLDOWN: Duration = Duration::from_millis(500);

/// How long the transient scrolling status is displayed before reverting
pub const STATUS_RESET_DELAY: Duration = Duration::from_millis(800);

/// Amplification cap: a single head motion never scrolls more than this
/// multiple of the configured speed
pub const MAX_INTENSITY: f64 = 4.0;

/// Movement threshold range, in analysis-buffer pixels
pub const THRESHOLD_MIN: i32 = 10;
pub const THRESHOLD_MAX: i32 = 50;
pub const DEFAULT_THRESHOLD: i32 = 25;

/// Scroll speed range, in document pixels per unit intensity
pub const SPEED_MIN: i32 = 20;
pub const SPEED_MAX: i32 = 150;
pub const DEFAULT_SPEED: i32 = 80;

/// Linear down-scale factor for the heuristic analysis buffer
pub const ANALYSIS_SCALE: f64 = 0.3;
