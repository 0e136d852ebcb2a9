//! Detection task implementation

use crate::observation::FrameObservation;
use alerting::{AlertGate, AlertSink};
use fatigue_engine::{EngineError, FatigueEngine, FrameAnalysis};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Per-frame status delivered to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Detection session this update belongs to
    pub session_id: Uuid,
    /// Frame sequence number
    pub sequence: u64,
    /// Frame capture timestamp (milliseconds)
    pub timestamp_ms: u64,
    /// Engine analysis for this frame
    pub analysis: FrameAnalysis,
}

/// Bookkeeping returned when a detection session ends
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Frames run through the engine
    pub frames_processed: u64,
    /// Frames skipped (no face or unusable landmarks)
    pub frames_skipped: u64,
    /// Blinks recorded by the classifier
    pub blink_count: u32,
    /// Alerts the gate let through
    pub alerts_fired: usize,
}

/// Dedicated background detection task.
///
/// Consumes `FrameObservation`s from the detector boundary and drives the
/// engine serially, one frame at a time. Status updates are forwarded with
/// `try_send` so a slow presentation layer can never stall the frame loop.
pub struct DetectionTask {
    receiver: mpsc::Receiver<FrameObservation>,
    engine: FatigueEngine,
    gate: AlertGate,
    sink: Arc<dyn AlertSink>,
    status_tx: mpsc::Sender<StatusUpdate>,
    session_id: Uuid,
}

/// Handle to a spawned detection task
pub struct DetectionHandle {
    stop_tx: watch::Sender<bool>,
    join: JoinHandle<SessionSummary>,
}

impl DetectionHandle {
    /// Prevent scheduling of further frames; the in-flight frame completes
    pub fn stop(&self) {
        let _ = self.stop_tx.send(true);
    }

    /// Wait for the task to finish and return its session summary
    pub async fn join(self) -> SessionSummary {
        match self.join.await {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Detection task failed: {}", e);
                SessionSummary::default()
            }
        }
    }
}

impl DetectionTask {
    /// Create a task reading observations from `receiver`
    pub fn new(
        receiver: mpsc::Receiver<FrameObservation>,
        engine: FatigueEngine,
        gate: AlertGate,
        sink: Arc<dyn AlertSink>,
        status_tx: mpsc::Sender<StatusUpdate>,
    ) -> Self {
        Self {
            receiver,
            engine,
            gate,
            sink,
            status_tx,
            session_id: Uuid::new_v4(),
        }
    }

    /// Create an observation channel pair for the task
    pub fn channel(
        capacity: usize,
        engine: FatigueEngine,
        gate: AlertGate,
        sink: Arc<dyn AlertSink>,
        status_tx: mpsc::Sender<StatusUpdate>,
    ) -> (mpsc::Sender<FrameObservation>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self::new(rx, engine, gate, sink, status_tx))
    }

    /// Session identifier stamped on every status update
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Spawn the task on the runtime and return a stop/join handle
    pub fn spawn(self) -> DetectionHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let join = tokio::spawn(self.run_inner(stop_rx));
        DetectionHandle { stop_tx, join }
    }

    /// Run the task on the current task until the observation stream ends
    pub async fn run(self) -> SessionSummary {
        // Keep the sender alive so the stop channel never reports closure
        let (_stop_tx, stop_rx) = watch::channel(false);
        self.run_inner(stop_rx).await
    }

    async fn run_inner(mut self, mut stop_rx: watch::Receiver<bool>) -> SessionSummary {
        info!(session = %self.session_id, "Detection task started");
        self.engine.start();

        let mut summary = SessionSummary::default();

        loop {
            let observation = tokio::select! {
                biased;
                _ = stop_rx.changed() => {
                    debug!(session = %self.session_id, "Stop requested");
                    break;
                }
                observation = self.receiver.recv() => match observation {
                    Some(observation) => observation,
                    None => {
                        debug!(session = %self.session_id, "Observation stream closed");
                        break;
                    }
                },
            };

            let Some(landmarks) = observation.landmarks else {
                summary.frames_skipped += 1;
                debug!(sequence = observation.sequence, "No face in frame, skipping");
                continue;
            };

            match self.engine.process_frame(&landmarks) {
                Ok(analysis) => {
                    summary.frames_processed += 1;
                    summary.blink_count = analysis.blink_count;

                    if self.gate.observe(analysis.status) {
                        self.sink.request_alert();
                    }

                    let update = StatusUpdate {
                        session_id: self.session_id,
                        sequence: observation.sequence,
                        timestamp_ms: observation.timestamp_ms,
                        analysis,
                    };
                    if let Err(e) = self.status_tx.try_send(update) {
                        debug!("Status observer not keeping up, dropping update: {}", e);
                    }
                }
                Err(EngineError::NotRunning) => {
                    warn!(session = %self.session_id, "Engine stopped, ending task");
                    break;
                }
                Err(e) => {
                    summary.frames_skipped += 1;
                    warn!(sequence = observation.sequence, "Skipping frame: {}", e);
                }
            }
        }

        self.engine.stop();
        summary.alerts_fired = self.gate.fire_count();
        info!(
            session = %self.session_id,
            processed = summary.frames_processed,
            skipped = summary.frames_skipped,
            blinks = summary.blink_count,
            alerts = summary.alerts_fired,
            "Detection task stopped"
        );
        summary
    }
}
