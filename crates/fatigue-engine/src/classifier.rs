//! Debounced eye-closure classification

use crate::status::DetectionStatus;
use tracing::debug;

/// Frame-count hysteresis over the smoothed openness signal.
///
/// A closed run shorter than the fatigue bound is treated as a transient
/// blink and still reports `NotTired`; only a run reaching `tired_frames`
/// reports `Tired`, and keeps reporting it while the closure persists.
#[derive(Debug, Clone)]
pub struct Classifier {
    blink_frames: u32,
    tired_frames: u32,
    closed_frames: u32,
    blink_count: u32,
}

impl Classifier {
    /// Create a classifier with the given debounce bounds
    pub fn new(blink_frames: u32, tired_frames: u32) -> Self {
        Self {
            blink_frames,
            tired_frames,
            closed_frames: 0,
            blink_count: 0,
        }
    }

    /// Classify one post-calibration frame
    pub fn classify(&mut self, smoothed: f64, threshold: f64) -> DetectionStatus {
        if smoothed < threshold {
            self.closed_frames += 1;
            if self.closed_frames == self.tired_frames {
                debug!(
                    closed_frames = self.closed_frames,
                    "Sustained closure reached fatigue bound"
                );
            }
            if self.closed_frames >= self.tired_frames {
                DetectionStatus::Tired
            } else {
                DetectionStatus::NotTired
            }
        } else {
            if self.closed_frames >= self.blink_frames {
                self.blink_count += 1;
                debug!(
                    run = self.closed_frames,
                    blinks = self.blink_count,
                    "Blink recorded"
                );
            }
            self.closed_frames = 0;
            DetectionStatus::NotTired
        }
    }

    /// Length of the current consecutive-closed run
    pub fn closed_frames(&self) -> u32 {
        self.closed_frames
    }

    /// Blinks recorded so far (diagnostic)
    pub fn blink_count(&self) -> u32 {
        self.blink_count
    }
}
