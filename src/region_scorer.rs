//! Heuristic region scorer: pixel buffer in, best vertical face position out.
//!
//! The scorer partitions a central band of the frame into overlapping square
//! regions, rates each by average brightness and skin-tone pixel ratio, and
//! returns the vertical center of the best surviving region. It is a pure
//! function: no state, no side effects, cost proportional to the scanned
//! pixel count.

use crate::constants::{
    ANCHOR_DISTANCE_PENALTY, ANCHOR_Y_FRAC, BRIGHTNESS_MAX, BRIGHTNESS_MIN, LUMA_B, LUMA_G,
    LUMA_R, REGION_SIZE, SCAN_STEP, SCAN_X_MAX_FRAC, SCAN_X_MIN_FRAC, SCAN_Y_MAX_FRAC,
    SCAN_Y_MIN_FRAC, SCORE_BRIGHTNESS_WEIGHT, SCORE_SKIN_WEIGHT, SKIN_RATIO_MIN,
};
use crate::frame::PixelBuffer;

/// A candidate face region, created fresh per frame and discarded after
/// best-of selection.
#[derive(Debug, Clone, Copy)]
pub struct Region {
    /// Horizontal center, in buffer coordinates
    pub center_x: f64,
    /// Vertical center, in buffer coordinates
    pub center_y: f64,
    /// Mean luma over the region, 0..255
    pub avg_brightness: f64,
    /// Fraction of pixels matching the skin-tone predicate, 0..1
    pub skin_tone_ratio: f64,
    /// Combined ranking score
    pub score: f64,
}

/// Fixed heuristic RGB inequality test approximating visible skin under
/// normal lighting.
#[must_use]
pub fn is_skin_tone(r: u8, g: u8, b: u8) -> bool {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    r > 95
        && g > 40
        && b > 20
        && max - min > 15
        && (i16::from(r) - i16::from(g)).abs() > 15
        && r > g
        && r > b
}

/// Perceptual brightness approximation from weighted RGB channels (Rec. 601).
#[must_use]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b)
}

/// Find the most face-like region and return its vertical center, or `None`
/// when no region passes the brightness and skin-tone gates.
#[must_use]
pub fn score(buffer: &PixelBuffer) -> Option<f64> {
    best_region(buffer).map(|r| r.center_y)
}

/// Full best-of selection over the scan band.
///
/// Only regions lying entirely inside the band are scanned; a trailing
/// partial region is skipped rather than clipped, so every region averages
/// over the same pixel count.
#[must_use]
pub fn best_region(buffer: &PixelBuffer) -> Option<Region> {
    let width = buffer.width();
    let height = buffer.height();

    let band_x0 = (f64::from(width) * SCAN_X_MIN_FRAC) as u32;
    let band_x1 = (f64::from(width) * SCAN_X_MAX_FRAC) as u32;
    let band_y0 = (f64::from(height) * SCAN_Y_MIN_FRAC) as u32;
    let band_y1 = (f64::from(height) * SCAN_Y_MAX_FRAC) as u32;

    let anchor_x = f64::from(width) / 2.0;
    let anchor_y = f64::from(height) * ANCHOR_Y_FRAC;

    let mut best: Option<Region> = None;

    let mut y = band_y0;
    while y + REGION_SIZE <= band_y1 {
        let mut x = band_x0;
        while x + REGION_SIZE <= band_x1 {
            if let Some(region) = evaluate_region(buffer, x, y, anchor_x, anchor_y) {
                let better = best.map_or(true, |b| region.score > b.score);
                if better {
                    best = Some(region);
                }
            }
            x += SCAN_STEP;
        }
        y += SCAN_STEP;
    }

    best
}

/// Accumulate one region's pixel statistics and apply the survival gates.
fn evaluate_region(
    buffer: &PixelBuffer,
    x0: u32,
    y0: u32,
    anchor_x: f64,
    anchor_y: f64,
) -> Option<Region> {
    let mut luma_sum = 0.0;
    let mut skin_count = 0u32;

    for y in y0..y0 + REGION_SIZE {
        for x in x0..x0 + REGION_SIZE {
            let (r, g, b) = buffer.rgb(x, y);
            luma_sum += luma(r, g, b);
            if is_skin_tone(r, g, b) {
                skin_count += 1;
            }
        }
    }

    let pixel_count = f64::from(REGION_SIZE * REGION_SIZE);
    let avg_brightness = luma_sum / pixel_count;
    let skin_tone_ratio = f64::from(skin_count) / pixel_count;

    // Reject near-black, over-exposed and non-skin-like regions.
    if avg_brightness <= BRIGHTNESS_MIN || avg_brightness >= BRIGHTNESS_MAX {
        return None;
    }
    if skin_tone_ratio <= SKIN_RATIO_MIN {
        return None;
    }

    let half = f64::from(REGION_SIZE) / 2.0;
    let center_x = f64::from(x0) + half;
    let center_y = f64::from(y0) + half;

    let distance = ((center_x - anchor_x).powi(2) + (center_y - anchor_y).powi(2)).sqrt();
    let score = avg_brightness * SCORE_BRIGHTNESS_WEIGHT
        + skin_tone_ratio * SCORE_SKIN_WEIGHT
        - distance * ANCHOR_DISTANCE_PENALTY;

    Some(Region {
        center_x,
        center_y,
        avg_brightness,
        skin_tone_ratio,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // A tone comfortably inside both the skin predicate and the brightness gate.
    const SKIN: (u8, u8, u8) = (180, 120, 90);

    fn paint_rect(buf: &mut PixelBuffer, x0: u32, y0: u32, w: u32, h: u32, (r, g, b): (u8, u8, u8)) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                buf.set_rgb(x, y, r, g, b);
            }
        }
    }

    #[test]
    fn test_skin_tone_predicate() {
        assert!(is_skin_tone(180, 120, 90));
        assert!(is_skin_tone(200, 140, 110));
        // Too dark
        assert!(!is_skin_tone(90, 50, 30));
        // Grey: no channel spread
        assert!(!is_skin_tone(128, 128, 128));
        // Green dominant
        assert!(!is_skin_tone(100, 150, 50));
        // R-G gap too small
        assert!(!is_skin_tone(120, 110, 40));
    }

    #[test]
    fn test_luma_weights() {
        assert!((luma(255, 255, 255) - 255.0).abs() < 0.01);
        assert!(luma(255, 0, 0) < luma(0, 255, 0));
        assert!((luma(100, 100, 100) - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_black_frame_yields_none() {
        let buf = PixelBuffer::blank(200, 200);
        assert!(score(&buf).is_none());
    }

    #[test]
    fn test_bright_but_not_skin_yields_none() {
        let mut buf = PixelBuffer::blank(200, 200);
        // Mid-grey everywhere: brightness passes, skin ratio is zero.
        paint_rect(&mut buf, 0, 0, 200, 200, (128, 128, 128));
        assert!(score(&buf).is_none());
    }

    #[test]
    fn test_overexposed_frame_yields_none() {
        let mut buf = PixelBuffer::blank(200, 200);
        paint_rect(&mut buf, 0, 0, 200, 200, (255, 230, 210));
        // Every region is skin-like but blown out past the brightness gate.
        assert!(score(&buf).is_none());
    }

    #[test]
    fn test_single_region_returns_its_center() {
        // 200x200 frame: scan band is x in [50,150), y in [30,170).
        let mut buf = PixelBuffer::blank(200, 200);
        // One region-sized skin square aligned to the scan grid at (50, 30).
        paint_rect(&mut buf, 50, 30, 30, 30, SKIN);
        let y = score(&buf).expect("skin square should be detected");
        assert!((y - 45.0).abs() < f64::EPSILON, "expected center 45, got {y}");
    }

    #[test]
    fn test_best_region_prefers_full_coverage() {
        let mut buf = PixelBuffer::blank(200, 200);
        paint_rect(&mut buf, 50, 60, 30, 30, SKIN);
        let best = best_region(&buf).expect("square should be detected");
        // Overlapping half-covered neighbours survive the gates, but the fully
        // covered region has twice the skin ratio and must win.
        assert!((best.center_y - 75.0).abs() < f64::EPSILON);
        assert!(best.skin_tone_ratio > 0.99);
    }

    #[test]
    fn test_anchor_penalty_breaks_ties() {
        let mut buf = PixelBuffer::blank(300, 300);
        // Band: x in [75,225), y in [45,255). Anchor at (150, 120).
        // Two identical squares, one near the anchor, one far below it.
        paint_rect(&mut buf, 135, 105, 30, 30, SKIN);
        paint_rect(&mut buf, 135, 210, 30, 30, SKIN);
        let best = best_region(&buf).expect("squares should be detected");
        assert!(best.center_y < 150.0, "near-anchor square should win, got {}", best.center_y);
    }

    #[test]
    fn test_region_outside_band_is_ignored() {
        let mut buf = PixelBuffer::blank(200, 200);
        // Entirely left of the x in [50,150) band.
        paint_rect(&mut buf, 0, 60, 30, 30, SKIN);
        assert!(score(&buf).is_none());
    }

    #[test]
    fn test_deterministic_across_calls() {
        let mut buf = PixelBuffer::blank(240, 240);
        paint_rect(&mut buf, 90, 90, 40, 40, SKIN);
        let first = score(&buf);
        let second = score(&buf);
        assert_eq!(first, second);
        assert!(first.is_some());
    }
}
