//! Moving-Average Ring Window

use std::collections::VecDeque;

/// Fixed-capacity window over the most recent samples of a scalar signal.
///
/// Appending evicts the oldest sample once the window is full. The mean is
/// defined from the first sample on; before that there is no valid output.
#[derive(Debug, Clone)]
pub struct RingWindow {
    samples: VecDeque<f64>,
    capacity: usize,
}

impl RingWindow {
    /// Create a new window with given capacity
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Window capacity must be > 0");
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest if the window is full
    pub fn push(&mut self, value: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(value);
    }

    /// Append a sample and return the current mean
    pub fn smooth(&mut self, value: f64) -> f64 {
        self.push(value);
        self.samples.iter().sum::<f64>() / self.samples.len() as f64
    }

    /// Arithmetic mean of current contents, `None` before the first sample
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f64>() / self.samples.len() as f64)
    }

    /// Number of samples currently held
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the window holds no samples yet
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Whether the window has reached capacity
    pub fn is_full(&self) -> bool {
        self.samples.len() == self.capacity
    }

    /// Window capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop all samples
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_has_no_mean() {
        let window = RingWindow::new(10);
        assert!(window.mean().is_none());
        assert!(window.is_empty());
    }

    #[test]
    fn test_partial_fill_mean() {
        let mut window = RingWindow::new(10);
        window.push(0.2);
        window.push(0.4);
        assert_eq!(window.len(), 2);
        assert!(!window.is_full());
        assert!((window.mean().unwrap() - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut window = RingWindow::new(3);
        for v in [1.0, 2.0, 3.0, 4.0] {
            window.push(v);
        }
        // Oldest (1.0) evicted, contents are [2, 3, 4]
        assert_eq!(window.len(), 3);
        assert!(window.is_full());
        assert!((window.mean().unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_smooth_returns_running_mean() {
        let mut window = RingWindow::new(10);
        assert!((window.smooth(0.3) - 0.3).abs() < 1e-12);
        assert!((window.smooth(0.1) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_clear() {
        let mut window = RingWindow::new(5);
        window.push(1.0);
        window.push(2.0);
        window.clear();
        assert!(window.is_empty());
        assert!(window.mean().is_none());
        // Usable after clearing
        assert!((window.smooth(4.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "capacity must be > 0")]
    fn test_zero_capacity_panics() {
        RingWindow::new(0);
    }

    proptest! {
        /// The mean never leaves the range of the window contents.
        #[test]
        fn prop_mean_bounded(values in proptest::collection::vec(-1e6f64..1e6, 1..64)) {
            let mut window = RingWindow::new(10);
            for &v in &values {
                window.push(v);
            }
            let held: Vec<f64> = values.iter().rev().take(10).copied().collect();
            let lo = held.iter().cloned().fold(f64::MAX, f64::min);
            let hi = held.iter().cloned().fold(f64::MIN, f64::max);
            let mean = window.mean().unwrap();
            prop_assert!(mean >= lo - 1e-6 && mean <= hi + 1e-6);
        }

        /// Window length never exceeds capacity.
        #[test]
        fn prop_len_bounded(values in proptest::collection::vec(-1.0f64..1.0, 0..128), cap in 1usize..16) {
            let mut window = RingWindow::new(cap);
            for &v in &values {
                window.push(v);
            }
            prop_assert!(window.len() <= cap);
            prop_assert_eq!(window.len(), values.len().min(cap));
        }
    }
}
