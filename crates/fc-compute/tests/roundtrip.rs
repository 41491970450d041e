//! Property test: forward then inverse computation recovers the quantity.

use fc_compute::{ComputeService, LocalFormulaService};
use fc_core::{Tolerances, nearly_equal};
use fc_model::{CiMethod, EndUse, FuelCategory, FuelType, ParameterSet};
use proptest::prelude::*;

fn fuel_types() -> impl Strategy<Value = FuelType> {
    prop_oneof![
        Just(FuelType::Ethanol),
        Just(FuelType::Biodiesel),
        Just(FuelType::RenewableDiesel),
        Just(FuelType::Cng),
        Just(FuelType::Electricity),
        Just(FuelType::Hydrogen),
    ]
}

fn end_uses() -> impl Strategy<Value = EndUse> {
    prop_oneof![
        Just(EndUse::LightDutyRoad),
        Just(EndUse::HeavyDutyRoad),
        Just(EndUse::Marine),
        Just(EndUse::Rail),
    ]
}

fn categories() -> impl Strategy<Value = FuelCategory> {
    prop_oneof![Just(FuelCategory::Gasoline), Just(FuelCategory::Diesel)]
}

proptest! {
    #[test]
    fn forward_then_inverse_recovers_quantity(
        quantity in 1.0_f64..1e9,
        period in 2023_u32..=2030,
        category in categories(),
        fuel in fuel_types(),
        end_use in end_uses(),
    ) {
        let params = ParameterSet {
            compliance_period: Some(period),
            fuel_category: Some(category),
            fuel_type: Some(fuel),
            end_use: Some(end_use),
            determination_method: Some(CiMethod::DefaultCi),
            ..Default::default()
        };
        let service = LocalFormulaService::new();

        // Some combinations are degenerate (fuel CI equal to the scaled
        // limit); those are compute errors, not round-trip cases.
        if let Ok(forward) = service.units_from_quantity(&params, quantity) {
            let back = service.quantity_from_units(&params, forward.value).unwrap();
            prop_assert!(nearly_equal(back.value, quantity, Tolerances::round_trip()));
            prop_assert_eq!(back.terms.ci_fuel, forward.terms.ci_fuel);
        }
    }
}
