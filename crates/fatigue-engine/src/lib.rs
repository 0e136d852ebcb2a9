//! Fatigue Detection Engine
//!
//! Per-session ocular state classification from eye-landmark observations:
//! - Eye-openness signal smoothing
//! - Adaptive self-calibration of a personalized closed-eye threshold
//! - Debounced classification (blink vs. sustained closure)
//! - Per-frame status reporting for the wellness notification layer

pub mod calibration;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod status;

pub use calibration::Calibrator;
pub use classifier::Classifier;
pub use config::EngineConfig;
pub use engine::FatigueEngine;
pub use status::{DetectionStatus, FrameAnalysis};

use eye_metrics::EyeMetricsError;
use thiserror::Error;

/// Engine error types
#[derive(Debug, Error)]
pub enum EngineError {
    /// Frame submitted while the engine is not accepting frames
    #[error("Engine is not running")]
    NotRunning,

    /// Landmark geometry unusable for this frame; engine state is unchanged
    #[error(transparent)]
    Landmarks(#[from] EyeMetricsError),
}
