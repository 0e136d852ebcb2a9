//! Per-frame observations from the landmark detector boundary

use eye_metrics::EyeLandmarks;
use serde::{Deserialize, Serialize};

/// One frame's observation from the external face/landmark detector.
///
/// Absence of a face is modeled as `landmarks: None`; such frames advance
/// nothing in the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameObservation {
    /// Frame sequence number
    pub sequence: u64,
    /// Capture timestamp (milliseconds)
    pub timestamp_ms: u64,
    /// Eye landmarks, `None` when no face was found
    pub landmarks: Option<EyeLandmarks>,
}

impl FrameObservation {
    /// Observation for a frame with a visible face
    pub fn face(sequence: u64, timestamp_ms: u64, landmarks: EyeLandmarks) -> Self {
        Self {
            sequence,
            timestamp_ms,
            landmarks: Some(landmarks),
        }
    }

    /// Observation for a frame where no face was found
    pub fn no_face(sequence: u64, timestamp_ms: u64) -> Self {
        Self {
            sequence,
            timestamp_ms,
            landmarks: None,
        }
    }
}
