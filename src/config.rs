//! Configuration management for the head-scroll application

use crate::constants::{
    ANALYSIS_SCALE, CALIBRATION_WINDOW, DEFAULT_SPEED, DEFAULT_THRESHOLD, SMOOTHING_ALPHA,
    SPEED_MAX, SPEED_MIN, THRESHOLD_MAX, THRESHOLD_MIN,
};
use crate::driver::DriverConfig;
use crate::settings::Settings;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gesture sensitivity and scroll speed
    pub tracking: TrackingConfig,

    /// Temporal smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Calibration configuration
    pub calibration: CalibrationConfig,

    /// Detection tier configuration
    pub detector: DetectorConfig,
}

/// Gesture sensitivity parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Movement threshold in analysis pixels (10-50)
    pub movement_threshold: i32,

    /// Scroll speed in document pixels per unit intensity (20-150)
    pub scroll_speed: i32,

    /// Minimum gap between scroll actions, in milliseconds
    pub cooldown_ms: u64,

    /// Delay before transient status feedback reverts, in milliseconds
    pub status_reset_ms: u64,
}

/// Temporal smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Exponential filter alpha value (weight of the previous estimate)
    pub alpha: f64,
}

/// Calibration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Number of smoothed samples used to compute the baseline
    pub window: usize,
}

/// Detection tier parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Linear down-scale factor for the analysis buffer (0-1]
    pub analysis_scale: f64,

    /// Offload heuristic scoring to a worker thread
    pub offload: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tracking: TrackingConfig::default(),
            smoothing: SmoothingConfig::default(),
            calibration: CalibrationConfig::default(),
            detector: DetectorConfig::default(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            movement_threshold: DEFAULT_THRESHOLD,
            scroll_speed: DEFAULT_SPEED,
            cooldown_ms: 500,
            status_reset_ms: 800,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            alpha: SMOOTHING_ALPHA,
        }
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            window: CALIBRATION_WINDOW,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            analysis_scale: ANALYSIS_SCALE,
            offload: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(THRESHOLD_MIN..=THRESHOLD_MAX).contains(&self.tracking.movement_threshold) {
            return Err(Error::Config(format!(
                "Movement threshold must be between {THRESHOLD_MIN} and {THRESHOLD_MAX}"
            )));
        }
        if !(SPEED_MIN..=SPEED_MAX).contains(&self.tracking.scroll_speed) {
            return Err(Error::Config(format!(
                "Scroll speed must be between {SPEED_MIN} and {SPEED_MAX}"
            )));
        }
        if !(0.0..1.0).contains(&self.smoothing.alpha) {
            return Err(Error::Config(
                "Smoothing alpha must be in [0.0, 1.0)".to_string(),
            ));
        }
        if self.calibration.window == 0 {
            return Err(Error::Config(
                "Calibration window must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.analysis_scale) || self.detector.analysis_scale == 0.0 {
            return Err(Error::Config(
                "Analysis scale must be in (0.0, 1.0]".to_string(),
            ));
        }
        Ok(())
    }

    /// Settings view for the driver's live-updatable handle
    #[must_use]
    pub fn settings(&self) -> Settings {
        Settings::new(self.tracking.movement_threshold, self.tracking.scroll_speed)
    }

    /// Driver configuration view
    #[must_use]
    pub fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            smoothing_alpha: self.smoothing.alpha,
            calibration_window: self.calibration.window,
            analysis_scale: self.detector.analysis_scale,
            cooldown: Duration::from_millis(self.tracking.cooldown_ms),
            status_delay: Duration::from_millis(self.tracking.status_reset_ms),
        }
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Head Scroll Configuration

# Gesture sensitivity
tracking:
  movement_threshold: 25
  scroll_speed: 80
  cooldown_ms: 500
  status_reset_ms: 800

# Temporal smoothing
smoothing:
  alpha: 0.7

# Calibration
calibration:
  window: 90

# Detection tiers
detector:
  analysis_scale: 0.3
  offload: true
"#;
