use thiserror::Error;

/// Failures surfaced through the engine's `last_error` observable.
///
/// Engine commands never return errors; a failed compute call is recorded
/// here and the previous values are retained.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    #[error("Compute call failed: {message}")]
    Compute { message: String },
}
