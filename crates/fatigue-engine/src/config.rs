//! Engine configuration

use serde::{Deserialize, Serialize};

/// Fatigue engine configuration
///
/// All values are construction-time; a running engine never re-reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Moving-average window over openness samples (frames)
    pub smoothing_window: usize,

    /// Smoothed samples collected before the threshold is derived
    pub calibration_samples: usize,

    /// Margin factor applied to the calibration baseline mean
    pub calibration_margin: f64,

    /// Consecutive closed frames that count as a blink
    pub blink_frames: u32,

    /// Consecutive closed frames before the user is reported tired
    pub tired_frames: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            smoothing_window: 10,
            calibration_samples: 50,
            calibration_margin: 0.85,
            blink_frames: 3,
            tired_frames: 15,
        }
    }
}

impl EngineConfig {
    /// Create strict config (reports fatigue sooner)
    pub fn strict() -> Self {
        Self {
            tired_frames: 10,
            ..Default::default()
        }
    }

    /// Create lenient config (tolerates longer closures)
    pub fn lenient() -> Self {
        Self {
            tired_frames: 25,
            ..Default::default()
        }
    }
}
