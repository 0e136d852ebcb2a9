//! Personalized closed-eye threshold calibration

use tracing::{debug, info};

/// Collects a fixed number of smoothed openness samples at session start and
/// derives the session's closed-eye threshold from their mean.
///
/// The threshold is computed exactly once per calibrator lifetime, on the
/// sample that completes the baseline, and is frozen afterwards.
#[derive(Debug, Clone)]
pub struct Calibrator {
    baseline: Vec<f64>,
    target: usize,
    margin: f64,
    threshold: Option<f64>,
}

impl Calibrator {
    /// Create a calibrator collecting `target` samples with the given margin
    pub fn new(target: usize, margin: f64) -> Self {
        assert!(target > 0, "Calibration sample count must be > 0");
        Self {
            baseline: Vec::with_capacity(target),
            target,
            margin,
            threshold: None,
        }
    }

    /// Feed one smoothed sample into the baseline.
    ///
    /// No-op once calibration is complete.
    pub fn observe(&mut self, smoothed: f64) {
        if self.threshold.is_some() {
            return;
        }

        self.baseline.push(smoothed);
        debug!(
            collected = self.baseline.len(),
            target = self.target,
            "Calibration sample collected"
        );

        if self.baseline.len() >= self.target {
            let mean = self.baseline.iter().sum::<f64>() / self.baseline.len() as f64;
            let threshold = mean * self.margin;
            self.threshold = Some(threshold);
            info!(baseline_mean = mean, threshold, "Calibration complete");
        }
    }

    /// Frozen closed-eye threshold, `None` until the baseline is complete
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Whether the baseline is complete and the threshold frozen
    pub fn is_complete(&self) -> bool {
        self.threshold.is_some()
    }

    /// Baseline samples collected so far
    pub fn samples_collected(&self) -> usize {
        self.baseline.len()
    }
}
