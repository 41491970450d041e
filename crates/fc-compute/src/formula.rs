//! Local reference implementation of the credit formula.
//!
//! Credits are linear in the supplied quantity:
//!
//! ```text
//! units = (ci_limit * eer - ci_fuel) * energy_density * quantity / 1e6
//! ```
//!
//! with units in tonnes CO2e. Linearity makes the inverse operation exact:
//! dividing by the same per-unit credit factor recovers the quantity.

use fc_core::{ensure_finite, ensure_positive};
use fc_model::{CiMethod, Computation, FormulaTerms, ParameterSet};
use tracing::trace;

use crate::catalog;
use crate::error::{ComputeError, ComputeResult};
use crate::service::ComputeService;

/// In-process compute service backed by the const catalogs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFormulaService;

impl LocalFormulaService {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the per-unit credit factor (tonnes CO2e per supply unit)
    /// and the display terms for a parameter set.
    fn credit_factor(&self, params: &ParameterSet) -> ComputeResult<(f64, FormulaTerms)> {
        let period = params
            .compliance_period
            .ok_or(ComputeError::IncompleteParameters {
                what: "compliance period",
            })?;
        let category = params
            .fuel_category
            .ok_or(ComputeError::IncompleteParameters {
                what: "fuel category",
            })?;
        let fuel = params.fuel_type.ok_or(ComputeError::IncompleteParameters {
            what: "fuel type",
        })?;
        let end_use = params.end_use.ok_or(ComputeError::IncompleteParameters {
            what: "end use",
        })?;
        let method = params
            .determination_method
            .ok_or(ComputeError::IncompleteParameters {
                what: "determination method",
            })?;

        let entry = catalog::fuel_entry(fuel);
        let ci_limit =
            catalog::ci_limit(category, period).ok_or(ComputeError::UnknownPeriod {
                category,
                period,
            })?;

        let ci_fuel = match method {
            CiMethod::DefaultCi => entry.default_ci,
            CiMethod::ApprovedPathway => {
                let code =
                    params
                        .pathway_code
                        .as_deref()
                        .ok_or(ComputeError::IncompleteParameters {
                            what: "pathway code",
                        })?;
                let pathway =
                    catalog::pathway(code).ok_or_else(|| ComputeError::UnknownPathway {
                        code: code.to_string(),
                    })?;
                if pathway.fuel != fuel {
                    return Err(ComputeError::PathwayMismatch {
                        code: code.to_string(),
                        fuel,
                    });
                }
                pathway.certified_ci
            }
            CiMethod::CustomCi => {
                let value = params
                    .custom_ci
                    .ok_or(ComputeError::IncompleteParameters {
                        what: "custom carbon intensity",
                    })?;
                ensure_finite(value, "custom carbon intensity")?
            }
        };

        let eer = entry.eer_for(end_use);
        let ci_difference = ci_limit * eer - ci_fuel;
        let factor = ci_difference * entry.energy_density / 1e6;
        if factor == 0.0 {
            return Err(ComputeError::DegenerateFactor);
        }

        trace!(?fuel, ci_limit, ci_fuel, eer, factor, "resolved credit factor");

        let terms = FormulaTerms {
            ci_limit,
            ci_fuel,
            energy_density: entry.energy_density,
            eer,
            energy_content: 0.0,
            ci_difference,
        };
        Ok((factor, terms))
    }
}

impl ComputeService for LocalFormulaService {
    fn units_from_quantity(
        &self,
        params: &ParameterSet,
        quantity: f64,
    ) -> ComputeResult<Computation> {
        let quantity = ensure_positive(quantity, "fuel quantity")?;
        let (factor, mut terms) = self.credit_factor(params)?;
        terms.energy_content = terms.energy_density * quantity;
        Ok(Computation {
            value: factor * quantity,
            terms,
        })
    }

    fn quantity_from_units(&self, params: &ParameterSet, units: f64) -> ComputeResult<Computation> {
        let units = ensure_finite(units, "compliance units")?;
        let (factor, mut terms) = self.credit_factor(params)?;
        let quantity = ensure_positive(units / factor, "derived fuel quantity")?;
        terms.energy_content = terms.energy_density * quantity;
        Ok(Computation {
            value: quantity,
            terms,
        })
    }
}
