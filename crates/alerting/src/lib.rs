//! Alerting
//!
//! Decides when a Tired classification actually fires the wellness
//! notification, and provides the non-blocking sink boundary to whatever
//! plays the sound or shows the banner.

mod gate;
mod sink;

pub use gate::{AlertConfig, AlertGate, TriggerMode};
pub use sink::{AlertEvent, AlertSink, ChannelAlertSink, LogAlertSink};
