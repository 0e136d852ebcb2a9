//! Per-session detection engine

use crate::calibration::Calibrator;
use crate::classifier::Classifier;
use crate::config::EngineConfig;
use crate::status::{DetectionStatus, FrameAnalysis};
use crate::EngineError;
use eye_metrics::{openness_ratio, EyeLandmarks};
use signal_window::RingWindow;
use tracing::{debug, info};

/// Fatigue detection engine owning all per-session mutable state.
///
/// Single-writer: one detection task calls `process_frame` serially, once per
/// frame with a visible face. Frames without a face are simply not submitted.
/// `stop` halts further processing without resetting accumulated state; a
/// fresh session requires a new engine instance.
pub struct FatigueEngine {
    config: EngineConfig,
    window: RingWindow,
    calibrator: Calibrator,
    classifier: Classifier,
    running: bool,
}

impl FatigueEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: EngineConfig) -> Self {
        let window = RingWindow::new(config.smoothing_window);
        let calibrator = Calibrator::new(config.calibration_samples, config.calibration_margin);
        let classifier = Classifier::new(config.blink_frames, config.tired_frames);
        Self {
            config,
            window,
            calibrator,
            classifier,
            running: false,
        }
    }

    /// Begin accepting frames; idempotent
    pub fn start(&mut self) {
        if self.running {
            debug!("Engine already running");
            return;
        }
        self.running = true;
        info!(
            smoothing_window = self.config.smoothing_window,
            calibration_samples = self.config.calibration_samples,
            "Fatigue engine started"
        );
    }

    /// Halt further processing; accumulated state is retained
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        info!(
            blinks = self.classifier.blink_count(),
            "Fatigue engine stopped"
        );
    }

    /// Whether the engine is accepting frames
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Process one frame's eye landmarks and report the resulting status.
    ///
    /// While the calibration baseline is incomplete the frame contributes to
    /// it and reports `Calibrating`, including the frame that completes the
    /// baseline. Afterwards the smoothed ratio is classified against the
    /// frozen threshold. Every processed frame yields an explicit status:
    /// a closure still below the fatigue bound reports `NotTired`.
    ///
    /// Degenerate landmark geometry fails without mutating any state; the
    /// caller should skip the frame.
    pub fn process_frame(&mut self, landmarks: &EyeLandmarks) -> Result<FrameAnalysis, EngineError> {
        if !self.running {
            return Err(EngineError::NotRunning);
        }

        let ratio = openness_ratio(landmarks)?;
        let smoothed = self.window.smooth(ratio);

        let status = match self.calibrator.threshold() {
            None => {
                self.calibrator.observe(smoothed);
                DetectionStatus::Calibrating
            }
            Some(threshold) => self.classifier.classify(smoothed, threshold),
        };

        Ok(FrameAnalysis {
            status,
            smoothed_ratio: smoothed,
            threshold: self.calibrator.threshold(),
            closed_frames: self.classifier.closed_frames(),
            blink_count: self.classifier.blink_count(),
        })
    }

    /// Frozen closed-eye threshold, `None` while calibrating
    pub fn threshold(&self) -> Option<f64> {
        self.calibrator.threshold()
    }

    /// Blinks recorded so far this session (diagnostic)
    pub fn blink_count(&self) -> u32 {
        self.classifier.blink_count()
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eye_metrics::Point2;

    /// Landmarks whose per-eye aspect ratio is exactly `ratio`
    /// (horizontal span 2, both vertical lid distances `2 * ratio`).
    fn landmarks_with_ratio(ratio: f64) -> EyeLandmarks {
        let h = 2.0 * ratio;
        let eye = [
            Point2::new(0.0, 0.0),
            Point2::new(0.6, h / 2.0),
            Point2::new(1.4, h / 2.0),
            Point2::new(2.0, 0.0),
            Point2::new(1.4, -h / 2.0),
            Point2::new(0.6, -h / 2.0),
        ];
        EyeLandmarks::new(eye, eye)
    }

    fn degenerate_landmarks() -> EyeLandmarks {
        let eye = [Point2::new(1.0, 1.0); 6];
        EyeLandmarks::new(eye, eye)
    }

    fn test_config() -> EngineConfig {
        EngineConfig {
            smoothing_window: 10,
            calibration_samples: 3,
            calibration_margin: 0.85,
            blink_frames: 3,
            tired_frames: 5,
        }
    }

    fn started_engine(config: EngineConfig) -> FatigueEngine {
        let mut engine = FatigueEngine::new(config);
        engine.start();
        engine
    }

    #[test]
    fn test_rejects_frames_when_not_running() {
        let mut engine = FatigueEngine::new(test_config());
        let err = engine.process_frame(&landmarks_with_ratio(0.3)).unwrap_err();
        assert!(matches!(err, EngineError::NotRunning));

        engine.start();
        engine.stop();
        let err = engine.process_frame(&landmarks_with_ratio(0.3)).unwrap_err();
        assert!(matches!(err, EngineError::NotRunning));
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut engine = started_engine(test_config());
        engine.start();
        assert!(engine.is_running());
        assert!(engine.process_frame(&landmarks_with_ratio(0.3)).is_ok());
    }

    #[test]
    fn test_calibration_scenario_then_fatigue() {
        // Calibration on 3 frames at 0.30 -> threshold 0.255, then five
        // frames at 0.10 tire on the fifth.
        let mut engine = started_engine(test_config());

        for _ in 0..3 {
            let analysis = engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
            assert_eq!(analysis.status, DetectionStatus::Calibrating);
        }
        let threshold = engine.threshold().unwrap();
        assert!((threshold - 0.255).abs() < 1e-12);

        for i in 1..5 {
            let analysis = engine.process_frame(&landmarks_with_ratio(0.10)).unwrap();
            assert_eq!(
                analysis.status,
                DetectionStatus::NotTired,
                "closed frame {} is still transient",
                i
            );
            assert_eq!(analysis.closed_frames, i);
        }
        let analysis = engine.process_frame(&landmarks_with_ratio(0.10)).unwrap();
        assert_eq!(analysis.status, DetectionStatus::Tired);
    }

    #[test]
    fn test_calibration_completes_on_exact_frame_count() {
        let config = EngineConfig {
            calibration_samples: 50,
            ..test_config()
        };
        let mut engine = started_engine(config);

        for i in 0..50 {
            let analysis = engine.process_frame(&landmarks_with_ratio(0.3)).unwrap();
            assert_eq!(
                analysis.status,
                DetectionStatus::Calibrating,
                "frame {} is a calibration frame",
                i + 1
            );
        }
        // Frame 51 classifies
        let analysis = engine.process_frame(&landmarks_with_ratio(0.3)).unwrap();
        assert_eq!(analysis.status, DetectionStatus::NotTired);
    }

    #[test]
    fn test_threshold_tracks_smoothed_baseline() {
        // Varying openness during calibration: threshold is the mean of the
        // *smoothed* samples times the margin.
        let mut engine = started_engine(test_config());
        let inputs = [0.28, 0.32, 0.30];
        let mut window = RingWindow::new(10);
        let mut smoothed_sum = 0.0;
        for v in inputs {
            smoothed_sum += window.smooth(v);
            engine.process_frame(&landmarks_with_ratio(v)).unwrap();
        }
        let expected = smoothed_sum / inputs.len() as f64 * 0.85;
        assert!((engine.threshold().unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_immutable_after_calibration() {
        let mut engine = started_engine(test_config());
        for _ in 0..3 {
            engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        }
        let frozen = engine.threshold().unwrap();

        for _ in 0..40 {
            engine.process_frame(&landmarks_with_ratio(0.05)).unwrap();
        }
        assert_eq!(engine.threshold().unwrap(), frozen);
    }

    #[test]
    fn test_open_eyes_never_report_tired() {
        let mut engine = started_engine(test_config());
        for _ in 0..3 {
            engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        }
        for _ in 0..100 {
            let analysis = engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
            assert_eq!(analysis.status, DetectionStatus::NotTired);
        }
    }

    #[test]
    fn test_blink_does_not_trigger_fatigue() {
        let mut engine = started_engine(test_config());
        for _ in 0..3 {
            engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        }

        // Three-frame dip: smoothed means 0.25, 0.22, 0.20 stay below the
        // 0.255 threshold; the wide reopen pulls the mean back above it.
        for _ in 0..3 {
            let analysis = engine.process_frame(&landmarks_with_ratio(0.10)).unwrap();
            assert_ne!(analysis.status, DetectionStatus::Tired);
        }
        let analysis = engine.process_frame(&landmarks_with_ratio(0.60)).unwrap();
        assert_eq!(analysis.status, DetectionStatus::NotTired);
        assert_eq!(analysis.blink_count, 1);
        assert_eq!(analysis.closed_frames, 0);
    }

    #[test]
    fn test_degenerate_frame_mutates_nothing() {
        let mut engine = started_engine(test_config());
        engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();

        // Calibration progress and window must be untouched by the failure
        let err = engine.process_frame(&degenerate_landmarks()).unwrap_err();
        assert!(matches!(err, EngineError::Landmarks(_)));

        // Third valid frame still completes calibration
        let analysis = engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        assert_eq!(analysis.status, DetectionStatus::Calibrating);
        assert!(engine.threshold().is_some());
    }

    #[test]
    fn test_degenerate_frame_preserves_closed_run() {
        let mut engine = started_engine(test_config());
        for _ in 0..3 {
            engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        }
        for _ in 0..2 {
            engine.process_frame(&landmarks_with_ratio(0.02)).unwrap();
        }
        engine.process_frame(&degenerate_landmarks()).unwrap_err();

        let analysis = engine.process_frame(&landmarks_with_ratio(0.02)).unwrap();
        assert_eq!(analysis.closed_frames, 3);
    }

    #[test]
    fn test_stop_retains_state_for_restart() {
        let mut engine = started_engine(test_config());
        for _ in 0..3 {
            engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        }
        let frozen = engine.threshold().unwrap();

        engine.stop();
        engine.start();
        assert_eq!(engine.threshold().unwrap(), frozen);
        let analysis = engine.process_frame(&landmarks_with_ratio(0.30)).unwrap();
        assert_ne!(analysis.status, DetectionStatus::Calibrating);
    }
}
