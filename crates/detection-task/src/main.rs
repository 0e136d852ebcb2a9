//! OcuGuard Fatigue Monitor - Demo Entry Point
//!
//! Wires a synthetic landmark source through the full detection pipeline:
//! calibration on open eyes, then a sustained closure that trips the alert.

use alerting::{AlertConfig, AlertGate, ChannelAlertSink};
use detection_task::{init_logging, DetectionTask, FrameObservation};
use eye_metrics::{EyeLandmarks, Point2};
use fatigue_engine::{EngineConfig, FatigueEngine};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

/// Synthetic eye contour with the requested aspect ratio
fn synthetic_landmarks(ratio: f64) -> EyeLandmarks {
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== OcuGuard fatigue monitor v{} ===", env!("CARGO_PKG_VERSION"));

    // Short calibration so the demo reaches classification quickly
    let config = EngineConfig {
        calibration_samples: 30,
        ..Default::default()
    };
    let engine = FatigueEngine::new(config);
    let gate = AlertGate::new(AlertConfig::default());
    let (sink, mut alert_rx) = ChannelAlertSink::channel();
    let (status_tx, mut status_rx) = mpsc::channel(64);

    let (frame_tx, task) = DetectionTask::channel(16, engine, gate, Arc::new(sink), status_tx);
    let handle = task.spawn();

    // Presentation side: print status transitions as they arrive
    let observer = tokio::spawn(async move {
        let mut last = None;
        while let Some(update) = status_rx.recv().await {
            if last != Some(update.analysis.status) {
                last = Some(update.analysis.status);
                if let Ok(json) = serde_json::to_string(&update) {
                    println!("{json}");
                }
            }
        }
    });

    let alert_listener = tokio::spawn(async move {
        while let Some(event) = alert_rx.recv().await {
            info!(fired_at_ms = event.fired_at_ms, "ALERT: time to rest your eyes");
        }
    });

    // Synthetic detector: open eyes with mild jitter, then a long closure
    for seq in 0..60u64 {
        let ratio = if seq < 40 {
            0.30 + 0.01 * ((seq as f64) * 0.7).sin()
        } else {
            0.08
        };
        let observation = FrameObservation::face(seq, seq * 33, synthetic_landmarks(ratio));
        if frame_tx.send(observation).await.is_err() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    drop(frame_tx);

    let summary = handle.join().await;
    info!(
        processed = summary.frames_processed,
        blinks = summary.blink_count,
        alerts = summary.alerts_fired,
        "Session finished"
    );

    let _ = observer.await;
    let _ = alert_listener.await;

    Ok(())
}
