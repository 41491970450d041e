//! Protocol-level tests for the synchronization engine: debounce
//! collapsing, loop prevention, stale-response discard, precondition
//! gating, and cascading resets.

use fc_compute::ComputeError;
use fc_model::{
    CiMethod, Computation, EndUse, FormulaTerms, FuelCategory, FuelType, Mode, ParamChange,
};
use fc_sync::{EngineState, SyncConfig, SyncEngine};

fn ready_engine() -> SyncEngine {
    let mut engine = SyncEngine::new(SyncConfig::default());
    for change in [
        ParamChange::CompliancePeriod { value: Some(2025) },
        ParamChange::FuelCategory {
            value: Some(FuelCategory::Gasoline),
        },
        ParamChange::FuelType {
            value: Some(FuelType::Ethanol),
        },
        ParamChange::EndUse {
            value: Some(EndUse::LightDutyRoad),
        },
        ParamChange::DeterminationMethod {
            value: Some(CiMethod::DefaultCi),
        },
    ] {
        engine.set_parameter(&change);
    }
    engine
}

fn computation(value: f64) -> Computation {
    Computation {
        value,
        terms: FormulaTerms {
            ci_limit: 75.57,
            ci_fuel: 53.0,
            energy_density: 23.58,
            eer: 1.0,
            energy_content: 0.0,
            ci_difference: 22.57,
        },
    }
}

#[test]
fn rapid_edits_collapse_to_one_request_with_last_value() {
    let mut engine = ready_engine();
    let mut requests = Vec::new();

    // Five keystrokes, each within the 300 ms window of the previous.
    for (step, value) in [1.0, 12.0, 123.0, 1234.0, 12345.0].iter().enumerate() {
        let now = step as f64 * 0.1;
        engine.edit_quantity(Some(*value), now);
        requests.extend(engine.tick(now));
    }

    // Drain well past quiescence.
    for step in 5..20 {
        requests.extend(engine.tick(step as f64 * 0.1));
    }

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].input, 12345.0);
    assert_eq!(requests[0].mode, Mode::Quantity);
}

#[test]
fn guarded_write_arms_nothing() {
    let mut engine = ready_engine();
    engine.edit_quantity(Some(100_000.0), 0.0);
    let request = engine.tick(0.3).unwrap();
    engine.apply_response(request.seq, request.mode, Ok(computation(45.2)));

    // The rendering layer reflects the engine's write back as an edit.
    engine.edit_units(Some(45.2), 0.31);

    assert_eq!(engine.mode(), Mode::Quantity);
    for step in 0..20 {
        assert!(engine.tick(0.31 + step as f64 * 0.1).is_none());
    }
    assert_eq!(engine.state(), EngineState::Settled);
}

#[test]
fn stale_response_resolving_last_is_discarded() {
    let mut engine = ready_engine();

    engine.edit_quantity(Some(100.0), 0.0);
    let a = engine.tick(0.3).unwrap();

    // Second edit before A resolves; its request supersedes A.
    engine.edit_quantity(Some(200.0), 0.4);
    let b = engine.tick(0.7).unwrap();
    assert!(b.seq > a.seq);

    engine.apply_response(b.seq, b.mode, Ok(computation(2.0)));
    engine.apply_response(a.seq, a.mode, Ok(computation(1.0)));

    assert_eq!(engine.last_result().unwrap().value, 2.0);
    assert_eq!(engine.units().get(), Some(2.0));
}

#[test]
fn stale_response_resolving_first_is_discarded() {
    let mut engine = ready_engine();

    engine.edit_quantity(Some(100.0), 0.0);
    let a = engine.tick(0.3).unwrap();
    engine.edit_quantity(Some(200.0), 0.4);
    let b = engine.tick(0.7).unwrap();

    engine.apply_response(a.seq, a.mode, Ok(computation(1.0)));
    assert!(engine.is_computing());
    assert!(engine.last_result().is_none());

    engine.apply_response(b.seq, b.mode, Ok(computation(2.0)));
    assert_eq!(engine.last_result().unwrap().value, 2.0);
}

#[test]
fn cross_mode_stale_response_cannot_overwrite_drivers_field() {
    let mut engine = ready_engine();

    engine.edit_quantity(Some(100.0), 0.0);
    let a = engine.tick(0.3).unwrap();
    assert_eq!(a.mode, Mode::Quantity);

    // User switches to typing units while A is still in flight.
    engine.edit_units(Some(50.0), 0.4);
    assert_eq!(engine.mode(), Mode::Units);

    // A would have written the units field; it must not.
    engine.apply_response(a.seq, a.mode, Ok(computation(999.0)));
    assert_eq!(engine.units().get(), Some(50.0));
    assert!(engine.last_result().is_none());

    // The user's units edit proceeds normally.
    let b = engine.tick(0.7).unwrap();
    assert_eq!(b.mode, Mode::Units);
    engine.apply_response(b.seq, b.mode, Ok(computation(1234.5)));
    assert_eq!(engine.quantity().get(), Some(1234.5));
    assert_eq!(engine.units().get(), Some(50.0));
}

#[test]
fn incomplete_parameters_gate_requests() {
    let mut engine = SyncEngine::new(SyncConfig::default());
    engine.set_parameter(&ParamChange::CompliancePeriod { value: Some(2025) });
    engine.set_parameter(&ParamChange::FuelCategory {
        value: Some(FuelCategory::Gasoline),
    });

    engine.edit_quantity(Some(100.0), 0.0);
    for step in 0..20 {
        assert!(engine.tick(step as f64 * 0.1).is_none());
    }
    assert_eq!(engine.state(), EngineState::Idle);

    // Complete the set; nothing fires until the user edits again.
    engine.set_parameter(&ParamChange::FuelType {
        value: Some(FuelType::Ethanol),
    });
    engine.set_parameter(&ParamChange::EndUse {
        value: Some(EndUse::LightDutyRoad),
    });
    engine.set_parameter(&ParamChange::DeterminationMethod {
        value: Some(CiMethod::DefaultCi),
    });
    assert!(engine.tick(5.0).is_none());

    engine.edit_quantity(Some(100.0), 5.0);
    let mut requests = Vec::new();
    for step in 0..20 {
        requests.extend(engine.tick(5.0 + step as f64 * 0.1));
    }
    assert_eq!(requests.len(), 1);
}

#[test]
fn cascading_parameter_change_resets_fields_and_mode() {
    let mut engine = ready_engine();

    engine.edit_units(Some(50.0), 0.0);
    let request = engine.tick(0.3).unwrap();
    engine.apply_response(request.seq, request.mode, Ok(computation(1000.0)));
    assert_eq!(engine.mode(), Mode::Units);
    assert!(engine.last_result().is_some());

    engine.set_parameter(&ParamChange::FuelType {
        value: Some(FuelType::Biodiesel),
    });

    assert_eq!(engine.mode(), Mode::Quantity);
    assert_eq!(engine.state(), EngineState::Idle);
    assert!(engine.quantity().is_empty());
    assert!(engine.units().is_empty());
    assert!(engine.last_result().is_none());
}

#[test]
fn pending_window_is_cancelled_when_preconditions_lapse() {
    let mut engine = ready_engine();
    engine.edit_quantity(Some(100.0), 0.0);
    assert_eq!(engine.state(), EngineState::Scheduled);

    // Changing the method mid-flow leaves the set incomplete.
    engine.set_parameter(&ParamChange::DeterminationMethod {
        value: Some(CiMethod::CustomCi),
    });

    for step in 0..20 {
        assert!(engine.tick(step as f64 * 0.1).is_none());
    }
    assert_eq!(engine.state(), EngineState::Idle);
}

#[test]
fn in_flight_response_is_dropped_after_parameter_change() {
    let mut engine = ready_engine();
    engine.edit_quantity(Some(100.0), 0.0);
    let request = engine.tick(0.3).unwrap();

    engine.set_parameter(&ParamChange::EndUse {
        value: Some(EndUse::HeavyDutyRoad),
    });

    engine.apply_response(request.seq, request.mode, Ok(computation(45.2)));
    assert!(engine.last_result().is_none());
    assert!(engine.units().is_empty());
}

#[test]
fn compute_failure_surfaces_without_retry() {
    let mut engine = ready_engine();
    engine.edit_quantity(Some(100.0), 0.0);
    let request = engine.tick(0.3).unwrap();

    engine.apply_response(
        request.seq,
        request.mode,
        Err(ComputeError::UnknownPathway {
            code: "BCLCF-999.9".to_string(),
        }),
    );

    assert!(engine.last_error().is_some());
    // No retry: nothing further fires until the user edits again.
    for step in 4..20 {
        assert!(engine.tick(step as f64 * 0.1).is_none());
    }
}
