//! fc-compute: compute-service contract and local reference formula.
//!
//! The synchronization engine treats computation as a black box: two
//! idempotent request/response operations, forward (quantity to units) and
//! inverse (units to quantity). This crate defines that contract
//! ([`ComputeService`]) and ships a local implementation backed by const
//! fuel, carbon-intensity-limit, and pathway catalogs.

pub mod catalog;
pub mod error;
pub mod formula;
pub mod service;

pub use catalog::{FuelCatalogEntry, PathwayEntry, ci_limit, fuel_entry, fuels, pathway, pathways};
pub use error::{ComputeError, ComputeResult};
pub use formula::LocalFormulaService;
pub use service::ComputeService;
