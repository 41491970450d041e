//! End-to-end calculator flows against the local formula service.

use fc_app::{CalculatorService, replay, Action, Scenario, Step};
use fc_compute::LocalFormulaService;
use fc_core::{Tolerances, nearly_equal};
use fc_model::{CiMethod, EndUse, FuelCategory, FuelType, Mode, ParamChange};
use fc_sync::SyncConfig;

fn ready_calculator() -> CalculatorService {
    let mut calc =
        CalculatorService::new(SyncConfig::default(), Box::new(LocalFormulaService::new()));
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
        calc.set_parameter(&change);
    }
    calc
}

#[test]
fn typing_a_quantity_publishes_units_once() {
    let mut calc = ready_calculator();

    calc.edit_quantity(Some(100_000.0), 1.0);
    calc.advance(1.3);

    let view = calc.view();
    let expected = (75.57 - 53.0) * 23.58 * 100_000.0 / 1e6;
    assert!(nearly_equal(view.units.unwrap(), expected, Tolerances::default()));
    assert_eq!(view.mode, Mode::Quantity);
    assert!(view.last_result.is_some());
    assert!(!view.is_computing);

    // The write to the units field must not trigger a second computation.
    let settled = calc.view();
    for step in 0..20 {
        calc.advance(1.3 + step as f64 * 0.1);
    }
    assert_eq!(calc.view(), settled);
}

#[test]
fn editing_units_derives_quantity() {
    let mut calc = ready_calculator();

    calc.edit_units(Some(10.0), 0.0);
    calc.advance(0.3);

    let view = calc.view();
    assert_eq!(view.mode, Mode::Units);
    let quantity = view.quantity.unwrap();
    assert!(quantity > 0.0);

    // Round trip: the derived quantity yields the requested units.
    let forward = (75.57 - 53.0) * 23.58 * quantity / 1e6;
    assert!(nearly_equal(forward, 10.0, Tolerances::round_trip()));
}

#[test]
fn rapid_typing_settles_on_final_keystroke() {
    let mut calc = ready_calculator();

    for (step, value) in [1.0, 12.0, 123.0, 1234.0].iter().enumerate() {
        let now = step as f64 * 0.1;
        calc.edit_quantity(Some(*value), now);
        calc.advance(now);
    }
    calc.advance(1.0);

    let view = calc.view();
    let expected = (75.57 - 53.0) * 23.58 * 1234.0 / 1e6;
    assert!(nearly_equal(view.units.unwrap(), expected, Tolerances::default()));
}

#[test]
fn unknown_pathway_surfaces_as_last_error() {
    let mut calc = ready_calculator();
    calc.set_parameter(&ParamChange::DeterminationMethod {
        value: Some(CiMethod::ApprovedPathway),
    });
    calc.set_parameter(&ParamChange::PathwayCode {
        value: Some("BCLCF-999.9".to_string()),
    });

    calc.edit_quantity(Some(1000.0), 0.0);
    calc.advance(0.3);

    let view = calc.view();
    assert!(view.last_error.unwrap().contains("BCLCF-999.9"));
    assert!(view.units.is_none());
    assert!(view.last_result.is_none());
}

#[test]
fn fuel_change_resets_a_settled_calculator() {
    let mut calc = ready_calculator();
    calc.edit_quantity(Some(1000.0), 0.0);
    calc.advance(0.3);
    assert!(calc.view().last_result.is_some());

    calc.set_parameter(&ParamChange::FuelType {
        value: Some(FuelType::Biodiesel),
    });

    let view = calc.view();
    assert_eq!(view.mode, Mode::Quantity);
    assert!(view.quantity.is_none());
    assert!(view.units.is_none());
    assert!(view.last_result.is_none());
}

#[test]
fn scenario_replay_matches_direct_driving() {
    let changes = [
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
    ];
    let mut steps: Vec<Step> = changes
        .into_iter()
        .map(|change| Step {
            at_s: 0.0,
            action: Action::SetParameter { change },
        })
        .collect();
    steps.push(Step {
        at_s: 1.0,
        action: Action::EditQuantity {
            value: Some(100_000.0),
        },
    });
    let scenario = Scenario {
        name: "ethanol supply".to_string(),
        debounce_window_s: 0.3,
        steps,
    };

    let report = replay(&scenario, Box::new(LocalFormulaService::new())).unwrap();

    let mut direct = ready_calculator();
    direct.edit_quantity(Some(100_000.0), 1.0);
    direct.advance(1.3);

    assert_eq!(report.settled, direct.view());
}
