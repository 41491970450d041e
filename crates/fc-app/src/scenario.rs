//! Scripted calculator sessions on a virtual clock.
//!
//! A scenario is a YAML document listing timed steps. Replay drives a
//! [`CalculatorService`] through the steps deterministically, capturing
//! the view after each one, and finally advances past the debounce window
//! so the last edit settles.

use std::fs;
use std::path::Path;

use fc_compute::ComputeService;
use fc_model::ParamChange;
use fc_sync::SyncConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculator::{CalculatorService, CalculatorView};
use crate::error::{AppError, AppResult};

/// One timed action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Virtual timestamp of the action, seconds from session start.
    pub at_s: f64,
    pub action: Action,
}

/// The rendering-layer command a step performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    EditQuantity { value: Option<f64> },
    EditUnits { value: Option<f64> },
    SetParameter { change: ParamChange },
    Reset,
}

/// A scripted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default = "default_window")]
    pub debounce_window_s: f64,
    #[serde(default)]
    pub steps: Vec<Step>,
}

fn default_window() -> f64 {
    SyncConfig::default().debounce_window_s
}

/// View captured after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    pub at_s: f64,
    pub view: CalculatorView,
}

/// Full replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    /// View after the final settle advance.
    pub settled: CalculatorView,
}

/// Load a scenario from a YAML file.
pub fn load_scenario(path: &Path) -> AppResult<Scenario> {
    let text = fs::read_to_string(path).map_err(|source| AppError::ScenarioRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_str(&text)?)
}

/// Replay a scenario against a compute backend.
pub fn replay(scenario: &Scenario, service: Box<dyn ComputeService>) -> AppResult<ReplayReport> {
    if scenario.debounce_window_s <= 0.0 {
        return Err(AppError::InvalidInput(
            "debounce_window_s must be positive".to_string(),
        ));
    }

    let mut calc = CalculatorService::new(SyncConfig::new(scenario.debounce_window_s), service);
    let mut reports = Vec::with_capacity(scenario.steps.len());
    let mut clock = 0.0_f64;

    info!(name = %scenario.name, steps = scenario.steps.len(), "replaying scenario");

    for step in &scenario.steps {
        if step.at_s < clock {
            return Err(AppError::InvalidInput(format!(
                "scenario steps must be in time order (step at {} s after {} s)",
                step.at_s, clock
            )));
        }
        clock = step.at_s;

        // Fire anything that became due before this step.
        calc.advance(clock);

        match &step.action {
            Action::EditQuantity { value } => calc.edit_quantity(*value, clock),
            Action::EditUnits { value } => calc.edit_units(*value, clock),
            Action::SetParameter { change } => calc.set_parameter(change),
            Action::Reset => calc.reset(),
        }

        reports.push(StepReport {
            at_s: clock,
            view: calc.view(),
        });
    }

    // Let the last edit settle.
    calc.advance(clock + scenario.debounce_window_s);

    Ok(ReplayReport {
        name: scenario.name.clone(),
        steps: reports,
        settled: calc.view(),
    })
}
