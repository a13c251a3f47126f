//! Detector tier selector: per-frame position detection over an ordered
//! chain of strategies.
//!
//! Tiers are tried in strict priority order, short-circuiting on the first
//! success: a platform face-box capability when available, then the region
//! scorer offloaded to the worker thread, then the scorer run synchronously
//! when no worker exists. A frame where every tier misses yields `None`,
//! which is an undetected frame and never an error.

use crate::frame::PixelBuffer;
use crate::region_scorer;
use crate::worker::DetectionWorker;
use log::debug;

/// A face bounding box reported by a platform detection capability, in
/// source-frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceBox {
    /// Top edge of the box
    pub y: f64,
    /// Box height
    pub height: f64,
}

impl FaceBox {
    /// Vertical center of the box.
    #[must_use]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Optional hardware-accelerated face detection capability.
///
/// `None` means the capability failed or produced nothing this frame; the
/// selector falls through to the heuristic tiers either way.
pub trait FaceBoxDetector {
    fn detect_faces(&mut self, frame: &PixelBuffer) -> Option<Vec<FaceBox>>;
}

/// Ordered detection chain producing at most one vertical position per frame.
pub struct TierSelector {
    platform: Option<Box<dyn FaceBoxDetector>>,
    worker: Option<DetectionWorker>,
    analysis_scale: f64,
}

impl TierSelector {
    /// Build a selector.
    ///
    /// `analysis_scale` is the linear down-scale factor applied to frames
    /// before heuristic scoring; the platform tier always sees the frame at
    /// full resolution, and its result is rescaled into analysis
    /// coordinates so every tier reports in the same space.
    #[must_use]
    pub fn new(
        platform: Option<Box<dyn FaceBoxDetector>>,
        worker: Option<DetectionWorker>,
        analysis_scale: f64,
    ) -> Self {
        debug_assert!(analysis_scale > 0.0 && analysis_scale <= 1.0);
        Self {
            platform,
            worker,
            analysis_scale,
        }
    }

    /// Whether the worker offload tier is available.
    #[must_use]
    pub const fn has_worker(&self) -> bool {
        self.worker.is_some()
    }

    /// Detect the subject's vertical position, in analysis-buffer
    /// coordinates, or `None` when every tier misses.
    pub fn detect(&mut self, frame: &PixelBuffer) -> Option<f64> {
        // Tier 1: platform capability on the full-resolution frame.
        if let Some(platform) = &mut self.platform {
            if let Some(faces) = platform.detect_faces(frame) {
                if let Some(face) = faces.first() {
                    debug!("platform tier hit at y {:.1}", face.center_y());
                    return Some(face.center_y() * self.analysis_scale);
                }
            }
        }

        // Tiers 2 and 3 share the down-scaled analysis buffer.
        let analysis = frame.downscale(self.analysis_scale);

        // Tier 2: offloaded heuristic scoring; buffer ownership moves to
        // the worker thread.
        if let Some(worker) = &mut self.worker {
            return worker.submit(analysis).wait();
        }

        // Tier 3: synchronous fallback, blocking the frame step.
        region_scorer::score(&analysis)
    }
}
