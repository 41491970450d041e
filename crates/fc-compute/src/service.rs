//! The compute-service seam between the engine and a backend.

use fc_model::{Computation, ParameterSet};

use crate::error::ComputeResult;

/// Two idempotent request/response operations over an opaque credit
/// formula.
///
/// Implementations must be pure with respect to their inputs: issuing the
/// same request twice yields the same outcome, and neither operation holds
/// state between calls. The synchronization engine relies on this to
/// discard superseded responses instead of cancelling transport.
pub trait ComputeService {
    /// Compute the compliance units earned by supplying `quantity` of the
    /// configured fuel.
    fn units_from_quantity(
        &self,
        params: &ParameterSet,
        quantity: f64,
    ) -> ComputeResult<Computation>;

    /// Compute the fuel quantity required to earn `units` compliance
    /// units. Exact inverse of [`Self::units_from_quantity`].
    fn quantity_from_units(&self, params: &ParameterSet, units: f64) -> ComputeResult<Computation>;
}
