//! fc-app: calculator service layer for front ends.
//!
//! Wires the synchronization engine to a compute service behind a small
//! command/observe surface, and provides scenario replay for scripted
//! sessions. Front ends (CLI today) talk to this crate only.

pub mod calculator;
pub mod error;
pub mod scenario;

pub use calculator::{CalculatorService, CalculatorView};
pub use error::{AppError, AppResult};
pub use scenario::{Action, ReplayReport, Scenario, Step, StepReport, load_scenario, replay};
