//! Calculator service: engine plus compute backend.

use fc_compute::ComputeService;
use fc_model::{Computation, Mode, ParamChange};
use fc_sync::{ComputeRequest, EngineState, SyncConfig, SyncEngine, SyncError};
use serde::Serialize;
use tracing::debug;

/// Snapshot of every engine observable, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorView {
    pub mode: Mode,
    pub state: EngineState,
    pub quantity: Option<f64>,
    pub units: Option<f64>,
    pub last_result: Option<Computation>,
    pub last_error: Option<String>,
    pub is_computing: bool,
}

impl CalculatorView {
    /// Capture the engine's current observables.
    pub fn capture(engine: &SyncEngine) -> Self {
        Self {
            mode: engine.mode(),
            state: engine.state(),
            quantity: engine.quantity().get(),
            units: engine.units().get(),
            last_result: engine.last_result().copied(),
            last_error: engine.last_error().map(|err| err.to_string()),
            is_computing: engine.is_computing(),
        }
    }
}

/// Owns a [`SyncEngine`] and a compute backend, forwarding commands and
/// driving the debounce/compute cycle on a caller-supplied clock.
pub struct CalculatorService {
    engine: SyncEngine,
    service: Box<dyn ComputeService>,
    in_flight: Vec<ComputeRequest>,
}

impl CalculatorService {
    pub fn new(config: SyncConfig, service: Box<dyn ComputeService>) -> Self {
        Self {
            engine: SyncEngine::new(config),
            service,
            in_flight: Vec::new(),
        }
    }

    // ---- rendering-layer commands ---------------------------------------

    pub fn edit_quantity(&mut self, value: Option<f64>, now_s: f64) {
        self.engine.edit_quantity(value, now_s);
    }

    pub fn edit_units(&mut self, value: Option<f64>, now_s: f64) {
        self.engine.edit_units(value, now_s);
    }

    pub fn set_parameter(&mut self, change: &ParamChange) {
        self.engine.set_parameter(change);
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.in_flight.clear();
    }

    // ---- clock driving ---------------------------------------------------

    /// Advance to `now_s`, dispatching any fired request to the backend
    /// and applying its resolution immediately.
    pub fn advance(&mut self, now_s: f64) {
        if let Some(seq) = self.advance_deferred(now_s) {
            self.resolve(seq);
        }
    }

    /// Advance to `now_s` without dispatching: a fired request is parked
    /// and its sequence number returned. Lets hosts resolve requests
    /// later, and out of order.
    pub fn advance_deferred(&mut self, now_s: f64) -> Option<u64> {
        let request = self.engine.tick(now_s)?;
        let seq = request.seq;
        debug!(seq, mode = ?request.mode, "request parked for dispatch");
        self.in_flight.push(request);
        Some(seq)
    }

    /// Dispatch a parked request to the backend and deliver the outcome.
    ///
    /// Unknown sequence numbers are ignored; the engine performs its own
    /// staleness check on delivery.
    pub fn resolve(&mut self, seq: u64) {
        let Some(index) = self.in_flight.iter().position(|r| r.seq == seq) else {
            return;
        };
        let request = self.in_flight.swap_remove(index);
        let outcome = match request.mode {
            Mode::Quantity => self
                .service
                .units_from_quantity(&request.params, request.input),
            Mode::Units => self
                .service
                .quantity_from_units(&request.params, request.input),
        };
        self.engine.apply_response(request.seq, request.mode, outcome);
    }

    // ---- observables -----------------------------------------------------

    pub fn view(&self) -> CalculatorView {
        CalculatorView::capture(&self.engine)
    }

    pub fn engine(&self) -> &SyncEngine {
        &self.engine
    }

    pub fn last_error(&self) -> Option<SyncError> {
        self.engine.last_error().cloned()
    }
}
