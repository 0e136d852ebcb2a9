//! Signal Window
//!
//! Provides a fixed-capacity moving-average window for noisy scalar signals.

mod window;

pub use window::RingWindow;
