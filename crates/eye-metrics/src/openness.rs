//! Eye aspect ratio computation

use crate::landmarks::{EyeLandmarks, Point2, EYE_LANDMARK_COUNT};
use crate::EyeMetricsError;

/// Minimum horizontal eye span (pixels) below which the ratio is undefined
const MIN_EYE_SPAN: f64 = 1e-6;

/// Eye aspect ratio for a single eye contour:
/// `(|p1-p5| + |p2-p4|) / (2 * |p0-p3|)`.
///
/// Low values indicate a closed eye. Fails on degenerate geometry so that
/// NaN/Inf never enters the smoothing window.
pub fn eye_aspect_ratio(
    eye: &[Point2; EYE_LANDMARK_COUNT],
    label: &'static str,
) -> Result<f64, EyeMetricsError> {
    if eye.iter().any(|p| !p.is_finite()) {
        return Err(EyeMetricsError::NonFiniteLandmark { eye: label });
    }

    let vertical_a = eye[1].distance(&eye[5]);
    let vertical_b = eye[2].distance(&eye[4]);
    let horizontal = eye[0].distance(&eye[3]);

    if horizontal < MIN_EYE_SPAN {
        return Err(EyeMetricsError::DegenerateEye {
            eye: label,
            span: horizontal,
        });
    }

    Ok((vertical_a + vertical_b) / (2.0 * horizontal))
}

/// Per-frame openness sample: mean of the left- and right-eye aspect ratios.
pub fn openness_ratio(landmarks: &EyeLandmarks) -> Result<f64, EyeMetricsError> {
    let left = eye_aspect_ratio(&landmarks.left, "left")?;
    let right = eye_aspect_ratio(&landmarks.right, "right")?;
    Ok((left + right) / 2.0)
}
