//! fc-model: data model for the compliance-unit calculator.
//!
//! This crate defines the shared vocabulary between the synchronization
//! engine, the compute service, and front ends:
//! - fields (driver mode + editable field values)
//! - params (reporting selections + the declared cascade table)
//! - terms (formula display terms and compute payloads)

pub mod field;
pub mod params;
pub mod terms;

pub use field::{FieldValue, Mode};
pub use params::{
    CiMethod, EndUse, FuelCategory, FuelType, ParamChange, ParamKey, ParameterSet,
};
pub use terms::{Computation, FormulaTerms};
