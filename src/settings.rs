//! Live-updatable user settings shared between a settings surface and the
//! frame driver.

use crate::constants::{
    DEFAULT_SPEED, DEFAULT_THRESHOLD, SPEED_MAX, SPEED_MIN, THRESHOLD_MAX, THRESHOLD_MIN,
};
use std::sync::{Arc, Mutex};

/// Sensitivity and speed settings, always held within their documented
/// ranges: threshold 10-50 analysis pixels, speed 20-150 document pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    movement_threshold: i32,
    scroll_speed: i32,
}

impl Settings {
    /// Build settings, clamping both values into range.
    #[must_use]
    pub fn new(movement_threshold: i32, scroll_speed: i32) -> Self {
        Self {
            movement_threshold: movement_threshold.clamp(THRESHOLD_MIN, THRESHOLD_MAX),
            scroll_speed: scroll_speed.clamp(SPEED_MIN, SPEED_MAX),
        }
    }

    /// Minimum displacement, in analysis-buffer pixels, that triggers a scroll.
    #[must_use]
    pub const fn movement_threshold(&self) -> i32 {
        self.movement_threshold
    }

    /// Scroll distance per unit intensity, in document pixels.
    #[must_use]
    pub const fn scroll_speed(&self) -> i32 {
        self.scroll_speed
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_SPEED)
    }
}

/// Cloneable shared handle so a settings UI can adjust values while a
/// session is running.
#[derive(Debug, Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<Mutex<Settings>>,
}

impl SettingsHandle {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(Mutex::new(settings)),
        }
    }

    /// Snapshot of the current values.
    #[must_use]
    pub fn get(&self) -> Settings {
        *self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    pub fn set_movement_threshold(&self, threshold: i32) {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Settings::new(threshold, guard.scroll_speed);
    }

    pub fn set_scroll_speed(&self, speed: i32) {
        let mut guard = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Settings::new(guard.movement_threshold, speed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.movement_threshold(), 25);
        assert_eq!(s.scroll_speed(), 80);
    }

    #[test]
    fn test_clamping() {
        let s = Settings::new(5, 1000);
        assert_eq!(s.movement_threshold(), 10);
        assert_eq!(s.scroll_speed(), 150);

        let s = Settings::new(100, 0);
        assert_eq!(s.movement_threshold(), 50);
        assert_eq!(s.scroll_speed(), 20);
    }

    #[test]
    fn test_live_update_through_handle() {
        let handle = SettingsHandle::default();
        let other = handle.clone();
        other.set_movement_threshold(40);
        other.set_scroll_speed(120);
        let seen = handle.get();
        assert_eq!(seen.movement_threshold(), 40);
        assert_eq!(seen.scroll_speed(), 120);
    }
}
