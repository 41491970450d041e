//! The synchronization engine: an explicit state machine over the two
//! mutually dependent calculator fields.
//!
//! States:
//!
//! ```text
//! Idle ──edit──> Scheduled ──fire──> Computing ──resolve──> Settled
//!   ^               ^  ^                 │                     │
//!   │               │  └────── edit ─────┘ (supersede)         │
//!   └── params ─────┴──────────────────── edit ────────────────┘
//! ```
//!
//! An edit while a request is in flight re-arms the window; the in-flight
//! request's eventual resolution fails the sequence check and is dropped.

use fc_compute::ComputeError;
use fc_model::{Computation, FieldValue, Mode, ParamChange, ParameterSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::SyncConfig;
use crate::debounce::DebounceWindow;
use crate::error::SyncError;
use crate::guard::SyncGuard;

/// Engine lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No complete parameter set or no driver value; nothing to compute.
    Idle,
    /// Debounce window armed; a compute request will be issued on fire.
    Scheduled,
    /// A compute request is in flight.
    Computing,
    /// A result is published and no work is pending.
    Settled,
}

/// A compute request issued when the debounce window fires.
///
/// The host performs the matching service call (forward for
/// [`Mode::Quantity`], inverse for [`Mode::Units`]) and delivers the
/// outcome to [`SyncEngine::apply_response`] together with `seq` and
/// `mode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeRequest {
    /// Monotonically increasing issue number; only the latest issued
    /// request per mode is ever applied.
    pub seq: u64,
    /// Driver mode at issue time.
    pub mode: Mode,
    /// Parameter snapshot at issue time.
    pub params: ParameterSet,
    /// Driver-field value at issue time.
    pub input: f64,
}

/// Enum-event entry point mirroring the individual commands.
#[derive(Debug)]
pub enum EngineEvent {
    EditQuantity { value: Option<f64> },
    EditUnits { value: Option<f64> },
    ParameterChanged { change: ParamChange },
    Tick,
    ComputeResolved {
        seq: u64,
        mode: Mode,
        outcome: Result<Computation, ComputeError>,
    },
    Reset,
}

/// The bidirectional synchronization engine.
///
/// Owns the only mutable shared state of the calculator: the parameter
/// set, the driver mode, and the two field values. Hosts submit edit
/// events and read observables; they never mutate state directly.
#[derive(Debug)]
pub struct SyncEngine {
    config: SyncConfig,
    params: ParameterSet,
    mode: Mode,
    state: EngineState,
    quantity: FieldValue,
    units: FieldValue,
    guard: SyncGuard,
    debounce: DebounceWindow,
    next_seq: u64,
    issued_quantity: Option<u64>,
    issued_units: Option<u64>,
    last_result: Option<Computation>,
    last_error: Option<SyncError>,
}

impl SyncEngine {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            params: ParameterSet::default(),
            mode: Mode::default(),
            state: EngineState::Idle,
            quantity: FieldValue::empty(),
            units: FieldValue::empty(),
            guard: SyncGuard::default(),
            debounce: DebounceWindow::new(config.debounce_window_s),
            next_seq: 0,
            issued_quantity: None,
            issued_units: None,
            last_result: None,
            last_error: None,
        }
    }

    // ---- observables -----------------------------------------------------

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn quantity(&self) -> FieldValue {
        self.quantity
    }

    pub fn units(&self) -> FieldValue {
        self.units
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn last_result(&self) -> Option<&Computation> {
        self.last_result.as_ref()
    }

    pub fn last_error(&self) -> Option<&SyncError> {
        self.last_error.as_ref()
    }

    pub fn is_computing(&self) -> bool {
        self.state == EngineState::Computing
    }

    // ---- commands --------------------------------------------------------

    /// Dispatch an event to the matching command.
    pub fn transition(&mut self, event: EngineEvent, now_s: f64) -> Option<ComputeRequest> {
        match event {
            EngineEvent::EditQuantity { value } => {
                self.edit_quantity(value, now_s);
                None
            }
            EngineEvent::EditUnits { value } => {
                self.edit_units(value, now_s);
                None
            }
            EngineEvent::ParameterChanged { change } => {
                self.set_parameter(&change);
                None
            }
            EngineEvent::Tick => self.tick(now_s),
            EngineEvent::ComputeResolved { seq, mode, outcome } => {
                self.apply_response(seq, mode, outcome);
                None
            }
            EngineEvent::Reset => {
                self.reset();
                None
            }
        }
    }

    /// An edit event on the quantity field.
    pub fn edit_quantity(&mut self, value: Option<f64>, now_s: f64) {
        self.edit_field(Mode::Quantity, value, now_s);
    }

    /// An edit event on the compliance-units field.
    pub fn edit_units(&mut self, value: Option<f64>, now_s: f64) {
        self.edit_field(Mode::Units, value, now_s);
    }

    fn edit_field(&mut self, field: Mode, value: Option<f64>, now_s: f64) {
        if self.guard.take(field) {
            // The engine just wrote this field itself; the event is an echo
            // of that write, not a user edit.
            trace!(?field, "ignoring guarded self-write");
            return;
        }

        // Non-numeric input is indistinguishable from an empty display.
        let value = value.filter(|v| v.is_finite());
        self.field_mut(field).set(value);
        self.mode = field;

        if value.is_none() {
            // Cleared driver: never compute against an empty value.
            self.debounce.cancel();
            self.last_result = None;
            self.state = EngineState::Idle;
            trace!(?field, "driver cleared, pending work cancelled");
            return;
        }

        if !self.params.is_complete() {
            self.debounce.cancel();
            self.state = EngineState::Idle;
            trace!(?field, "parameter set incomplete, staying idle");
            return;
        }

        self.debounce.arm(now_s);
        self.state = EngineState::Scheduled;
    }

    /// Apply a parameter change and its declared cascade.
    ///
    /// Pending and in-flight work is cancelled: a scheduled window is
    /// dropped and any outstanding resolution will fail the state check in
    /// [`Self::apply_response`]. Completing a previously missing
    /// parameter does not arm the window; the user must edit again.
    pub fn set_parameter(&mut self, change: &ParamChange) {
        self.params.apply(change);
        self.last_result = None;
        self.last_error = None;
        if change.key().resets_fields() {
            self.quantity.clear();
            self.units.clear();
            self.mode = Mode::default();
            self.guard.clear();
            debug!(key = ?change.key(), "cascading reset");
        }
        self.debounce.cancel();
        self.state = EngineState::Idle;
    }

    /// Advance the engine to `now_s`.
    ///
    /// Clears guard tokens left from the previous publication and fires
    /// the debounce window if its deadline has passed, issuing a compute
    /// request stamped with the next sequence number.
    pub fn tick(&mut self, now_s: f64) -> Option<ComputeRequest> {
        self.guard.clear();

        if self.state != EngineState::Scheduled || !self.debounce.fire_due(now_s) {
            return None;
        }

        let Some(input) = self.field(self.mode).get() else {
            self.state = EngineState::Idle;
            return None;
        };

        let seq = self.next_seq;
        self.next_seq += 1;
        *self.issued_mut(self.mode) = Some(seq);
        self.state = EngineState::Computing;
        debug!(seq, mode = ?self.mode, input, "issuing compute request");

        Some(ComputeRequest {
            seq,
            mode: self.mode,
            params: self.params.clone(),
            input,
        })
    }

    /// Deliver the resolution of a previously issued request.
    ///
    /// Resolutions apply in issuance order: anything that is not the
    /// latest issued request for the current driver mode, or that arrives
    /// after the engine has left `Computing`, is discarded.
    pub fn apply_response(
        &mut self,
        seq: u64,
        mode: Mode,
        outcome: Result<Computation, ComputeError>,
    ) {
        let stale = self.state != EngineState::Computing
            || mode != self.mode
            || self.issued(mode) != Some(seq);
        if stale {
            trace!(seq, ?mode, "discarding stale compute response");
            return;
        }

        match outcome {
            Ok(result) => {
                let derived = mode.other();
                self.guard.set(derived);
                self.field_mut(derived).set(Some(result.value));
                self.last_result = Some(result);
                self.last_error = None;
                self.state = EngineState::Settled;
                debug!(seq, ?mode, value = result.value, "published computation");
            }
            Err(err) => {
                warn!(seq, ?mode, error = %err, "compute call failed");
                self.last_error = Some(SyncError::Compute {
                    message: err.to_string(),
                });
                // Keep showing the last good result if there is one.
                self.state = if self.last_result.is_some() {
                    EngineState::Settled
                } else {
                    EngineState::Idle
                };
            }
        }
    }

    /// Restore the engine to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    // ---- internals -------------------------------------------------------

    fn field(&self, mode: Mode) -> &FieldValue {
        match mode {
            Mode::Quantity => &self.quantity,
            Mode::Units => &self.units,
        }
    }

    fn field_mut(&mut self, mode: Mode) -> &mut FieldValue {
        match mode {
            Mode::Quantity => &mut self.quantity,
            Mode::Units => &mut self.units,
        }
    }

    fn issued(&self, mode: Mode) -> Option<u64> {
        match mode {
            Mode::Quantity => self.issued_quantity,
            Mode::Units => self.issued_units,
        }
    }

    fn issued_mut(&mut self, mode: Mode) -> &mut Option<u64> {
        match mode {
            Mode::Quantity => &mut self.issued_quantity,
            Mode::Units => &mut self.issued_units,
        }
    }
}
