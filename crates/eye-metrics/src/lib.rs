//! Eye Metrics
//!
//! Landmark geometry and eye-openness computation for the fatigue pipeline.

mod landmarks;
mod openness;

pub use landmarks::{EyeLandmarks, Point2, EYE_LANDMARK_COUNT};
pub use openness::{eye_aspect_ratio, openness_ratio};

use thiserror::Error;

/// Errors during openness computation
#[derive(Debug, Clone, Error)]
pub enum EyeMetricsError {
    /// Horizontal eye span is (near) zero, the ratio is undefined
    #[error("Degenerate {eye} eye: horizontal span {span} below minimum")]
    DegenerateEye { eye: &'static str, span: f64 },

    /// A landmark coordinate is NaN or infinite
    #[error("Non-finite coordinate in {eye} eye landmarks")]
    NonFiniteLandmark { eye: &'static str },
}
