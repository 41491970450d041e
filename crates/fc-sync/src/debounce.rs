//! Debounced trigger for driver-field edits.
//!
//! Coalesces rapid edits into at most one compute call per quiescence
//! window. Time is injected: the window is armed against a caller-supplied
//! monotonic timestamp and fires when a later timestamp passes the
//! deadline. Only one deadline exists at a time regardless of direction,
//! since only one field drives at a time.

use serde::{Deserialize, Serialize};

/// One replaceable deadline over a fixed quiescence window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebounceWindow {
    /// Quiescence window in seconds.
    window_s: f64,
    /// Pending deadline, if armed.
    deadline_s: Option<f64>,
}

impl DebounceWindow {
    /// Create an unarmed window.
    ///
    /// # Panics
    ///
    /// Panics if `window_s` is not positive.
    pub fn new(window_s: f64) -> Self {
        assert!(window_s > 0.0, "Debounce window must be positive");
        Self {
            window_s,
            deadline_s: None,
        }
    }

    /// Arm the window, replacing any pending deadline.
    pub fn arm(&mut self, now_s: f64) {
        self.deadline_s = Some(now_s + self.window_s);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline_s = None;
    }

    /// True if a deadline is pending.
    pub fn is_armed(&self) -> bool {
        self.deadline_s.is_some()
    }

    /// Fire the window if its deadline has passed.
    ///
    /// Returns `true` exactly once per armed deadline; firing disarms.
    pub fn fire_due(&mut self, now_s: f64) -> bool {
        match self.deadline_s {
            Some(deadline) if now_s >= deadline => {
                self.deadline_s = None;
                true
            }
            _ => false,
        }
    }
}
