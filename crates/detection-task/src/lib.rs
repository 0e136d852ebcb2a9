//! Detection Task
//!
//! Runs the fatigue engine on a dedicated background task: consumes
//! per-frame landmark observations from the detector boundary, forwards a
//! status to the presentation layer for every processed frame, and pokes
//! the alert sink when the gate decides a notification is due.

mod observation;
mod task;

pub use observation::FrameObservation;
pub use task::{DetectionHandle, DetectionTask, SessionSummary, StatusUpdate};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}
