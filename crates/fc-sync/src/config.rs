//! Engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the synchronization engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Quiescence window between the last driver edit and the compute
    /// call, in seconds.
    pub debounce_window_s: f64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce_window_s: 0.3,
        }
    }
}

impl SyncConfig {
    /// Create a configuration with an explicit debounce window.
    ///
    /// # Panics
    ///
    /// Panics if `debounce_window_s` is not positive.
    pub fn new(debounce_window_s: f64) -> Self {
        assert!(
            debounce_window_s > 0.0,
            "Debounce window must be positive"
        );
        Self { debounce_window_s }
    }
}
