//! Translation of a vertical head displacement into a scroll action.

use crate::constants::MAX_INTENSITY;

/// Scroll direction.
///
/// Polarity is a product convention, not a derived fact: the head moving
/// *down* in the frame (displacement > 0, since frame y grows downward)
/// scrolls the page *down*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// A single discrete scroll command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollAction {
    /// Scroll distance in document pixels, always non-negative
    pub magnitude: i32,
    pub direction: ScrollDirection,
}

impl ScrollAction {
    /// Signed pixel delta for the scroll executor: positive scrolls down.
    #[must_use]
    pub const fn signed_delta(&self) -> i32 {
        match self.direction {
            ScrollDirection::Down => self.magnitude,
            ScrollDirection::Up => -self.magnitude,
        }
    }
}

/// Map a baseline displacement into a scroll magnitude and direction.
///
/// Intensity is the displacement measured in threshold units, capped at 4x
/// so a single large head motion cannot cause an extreme scroll.
#[must_use]
pub fn translate(displacement: f64, threshold: f64, speed: f64) -> ScrollAction {
    let intensity = (displacement.abs() / threshold).min(MAX_INTENSITY);
    let magnitude = (intensity * speed).round() as i32;
    let direction = if displacement > 0.0 {
        ScrollDirection::Down
    } else {
        ScrollDirection::Up
    };
    ScrollAction { magnitude, direction }
}
