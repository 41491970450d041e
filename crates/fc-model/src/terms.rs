//! Formula display terms and compute payloads.

use serde::{Deserialize, Serialize};

/// Intermediate terms of the credit formula, carried for display.
///
/// The engine passes these through unmodified; only the compute service
/// assigns meaning to them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormulaTerms {
    /// Carbon-intensity limit for the category and period (g CO2e/MJ).
    pub ci_limit: f64,
    /// Carbon intensity of the supplied fuel as determined (g CO2e/MJ).
    pub ci_fuel: f64,
    /// Energy density of the fuel (MJ per supply unit).
    pub energy_density: f64,
    /// Energy effectiveness ratio for the end use.
    pub eer: f64,
    /// Total energy supplied (MJ).
    pub energy_content: f64,
    /// `ci_limit * eer - ci_fuel` (g CO2e/MJ).
    pub ci_difference: f64,
}

/// Successful outcome of one compute call: the derived value plus the
/// formula terms that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Computation {
    /// The derived numeric value: compliance units for the forward
    /// operation, fuel quantity for the inverse.
    pub value: f64,
    pub terms: FormulaTerms,
}
