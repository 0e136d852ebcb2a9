//! Detection status and per-frame analysis result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Externally observable ocular state, emitted once per processed frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DetectionStatus {
    /// Baseline collection in progress, no classification yet
    #[default]
    Calibrating,

    /// Eyes open, or a closure still below the fatigue bound
    NotTired,

    /// Sustained eye closure past the fatigue bound
    Tired,
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DetectionStatus::Calibrating => "Calibrating",
            DetectionStatus::NotTired => "Not Tired",
            DetectionStatus::Tired => "Tired",
        };
        f.write_str(label)
    }
}

/// Complete per-frame analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameAnalysis {
    /// Status for this frame
    pub status: DetectionStatus,

    /// Smoothed openness ratio this frame classified on
    pub smoothed_ratio: f64,

    /// Frozen closed-eye threshold, `None` while calibrating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Length of the current consecutive-closed run (frames)
    pub closed_frames: u32,

    /// Blinks recorded so far this session (diagnostic)
    pub blink_count: u32,
}

impl FrameAnalysis {
    /// Whether this frame reports fatigue
    pub fn is_tired(&self) -> bool {
        self.status == DetectionStatus::Tired
    }

    /// Whether calibration is still in progress
    pub fn is_calibrating(&self) -> bool {
        self.status == DetectionStatus::Calibrating
    }
}
