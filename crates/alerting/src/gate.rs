//! Alert gate implementation

use fatigue_engine::DetectionStatus;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// When the alert side effect fires while the user is tired.
///
/// `Level` fires on every frame the condition holds, which can flood the
/// notification channel; `Edge` fires once per episode and is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TriggerMode {
    /// Fire only on the transition into Tired
    #[default]
    Edge,
    /// Fire on every frame reporting Tired
    Level,
}

/// Alert gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Edge- or level-triggered firing
    pub trigger_mode: TriggerMode,
    /// Minimum interval between firings in milliseconds (0 = no cooldown)
    pub cooldown_ms: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            trigger_mode: TriggerMode::Edge,
            cooldown_ms: 0,
        }
    }
}

/// Per-session alert gate.
///
/// Consumes the per-frame detection status and decides whether the sink
/// should be poked this frame.
pub struct AlertGate {
    config: AlertConfig,
    was_tired: bool,
    last_fired: Option<Instant>,
    fire_count: usize,
}

impl AlertGate {
    /// Create a new gate
    pub fn new(config: AlertConfig) -> Self {
        Self {
            config,
            was_tired: false,
            last_fired: None,
            fire_count: 0,
        }
    }

    /// Observe one frame's status; returns whether to fire the alert
    pub fn observe(&mut self, status: DetectionStatus) -> bool {
        let tired = status == DetectionStatus::Tired;
        let qualifies = match self.config.trigger_mode {
            TriggerMode::Edge => tired && !self.was_tired,
            TriggerMode::Level => tired,
        };
        self.was_tired = tired;

        if !qualifies {
            return false;
        }

        if self.config.cooldown_ms > 0 {
            if let Some(last) = self.last_fired {
                let cooldown = Duration::from_millis(self.config.cooldown_ms);
                if last.elapsed() < cooldown {
                    debug!("Alert suppressed: in cooldown period");
                    return false;
                }
            }
        }

        self.last_fired = Some(Instant::now());
        self.fire_count += 1;
        info!(count = self.fire_count, "Fatigue alert fired");
        true
    }

    /// Number of alerts fired so far
    pub fn fire_count(&self) -> usize {
        self.fire_count
    }

    /// Clear episode and cooldown tracking
    pub fn reset(&mut self) {
        self.was_tired = false;
        self.last_fired = None;
        self.fire_count = 0;
    }
}

impl Default for AlertGate {
    fn default() -> Self {
        Self::new(AlertConfig::default())
    }
}
