//! fc-sync: bidirectional field synchronization engine.
//!
//! Keeps the supplied quantity and the derived compliance-units value
//! mutually consistent. Either field may drive; an edit to the driver is
//! debounced into at most one compute request per quiescence window, and
//! responses apply in issuance order so a superseded computation can never
//! overwrite a newer one.
//!
//! # Architecture
//!
//! The engine is an explicit finite-state machine with injected time:
//! every time-sensitive entry point takes a monotonic `now_s` timestamp,
//! and the engine owns no clock, timer, or thread. Compute calls are
//! pulled, not pushed: [`SyncEngine::tick`] returns a [`ComputeRequest`]
//! when the debounce window fires, the host performs the call however it
//! likes, and delivers the resolution to [`SyncEngine::apply_response`].
//! Out-of-order and superseded resolutions are discarded by a sequence
//! check rather than by cancelling transport.
//!
//! # Loop prevention
//!
//! When the engine publishes a result it writes the non-driver field under
//! a one-shot [`SyncGuard`] token. A rendering layer that echoes that
//! write back as an edit event finds the token set, and the event is
//! treated as engine-originated: the driver mode does not flip and no new
//! window is armed.

pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod guard;

pub use config::SyncConfig;
pub use debounce::DebounceWindow;
pub use engine::{ComputeRequest, EngineEvent, EngineState, SyncEngine};
pub use error::SyncError;
pub use guard::SyncGuard;
