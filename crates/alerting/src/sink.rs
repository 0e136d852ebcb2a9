//! Notification sink boundary

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A fired wellness alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Wall-clock firing time (milliseconds since the Unix epoch)
    pub fired_at_ms: u64,
}

impl AlertEvent {
    /// Create an event stamped with the current wall clock
    pub fn now() -> Self {
        let fired_at_ms = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self { fired_at_ms }
    }
}

/// One-way notification boundary.
///
/// Invoked from the detection task; implementations must hand off and
/// return immediately, never blocking the frame loop.
pub trait AlertSink: Send + Sync {
    /// Request an alert, fire-and-forget
    fn request_alert(&self);
}

/// Sink that only logs; useful default when no presentation layer is wired
#[derive(Debug, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn request_alert(&self) {
        warn!("Fatigue alert: user appears tired");
    }
}

/// Sink that forwards alert events to the presentation layer over a channel
pub struct ChannelAlertSink {
    tx: mpsc::UnboundedSender<AlertEvent>,
}

impl ChannelAlertSink {
    /// Create a sink and the receiving end for the presentation layer
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<AlertEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl AlertSink for ChannelAlertSink {
    fn request_alert(&self) {
        if self.tx.send(AlertEvent::now()).is_err() {
            debug!("Alert receiver dropped, discarding alert");
        }
    }
}
