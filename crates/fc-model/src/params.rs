//! Reporting selections and the declared parameter cascade.
//!
//! The cascade table replaces implicit reactive reset ordering with data:
//! each parameter declares which downstream selections a change to it
//! invalidates, and whether the change also resets the derived fields.

use serde::{Deserialize, Serialize};

/// Compliance category (fuel pool) being reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelCategory {
    Gasoline,
    Diesel,
}

/// Low-carbon fuel being supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Ethanol,
    Biodiesel,
    RenewableDiesel,
    Cng,
    Electricity,
    Hydrogen,
}

/// End use the fuel is supplied for. Determines the energy effectiveness
/// ratio applied against the category limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndUse {
    LightDutyRoad,
    HeavyDutyRoad,
    Marine,
    Rail,
}

/// How the fuel's carbon intensity is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CiMethod {
    /// Prescribed default carbon intensity for the fuel type.
    DefaultCi,
    /// Certified carbon intensity of an approved pathway (requires a code).
    ApprovedPathway,
    /// Reporter-supplied carbon intensity (requires a numeric value).
    CustomCi,
}

/// Identifies one member of [`ParameterSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParamKey {
    CompliancePeriod,
    FuelCategory,
    FuelType,
    EndUse,
    DeterminationMethod,
    PathwayCode,
    CustomCi,
}

impl ParamKey {
    /// Selections invalidated when this parameter changes.
    pub fn downstream(self) -> &'static [ParamKey] {
        match self {
            Self::FuelCategory => &[
                Self::FuelType,
                Self::EndUse,
                Self::DeterminationMethod,
                Self::PathwayCode,
                Self::CustomCi,
            ],
            Self::FuelType => &[
                Self::EndUse,
                Self::DeterminationMethod,
                Self::PathwayCode,
                Self::CustomCi,
            ],
            Self::DeterminationMethod => &[Self::PathwayCode, Self::CustomCi],
            _ => &[],
        }
    }

    /// Whether a change to this parameter also resets the derived fields
    /// and the driver mode.
    pub fn resets_fields(self) -> bool {
        !self.downstream().is_empty()
    }
}

/// A single parameter assignment, `value: None` clears the selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "param")]
pub enum ParamChange {
    CompliancePeriod { value: Option<u32> },
    FuelCategory { value: Option<FuelCategory> },
    FuelType { value: Option<FuelType> },
    EndUse { value: Option<EndUse> },
    DeterminationMethod { value: Option<CiMethod> },
    PathwayCode { value: Option<String> },
    CustomCi { value: Option<f64> },
}

impl ParamChange {
    /// The parameter this change targets.
    pub fn key(&self) -> ParamKey {
        match self {
            Self::CompliancePeriod { .. } => ParamKey::CompliancePeriod,
            Self::FuelCategory { .. } => ParamKey::FuelCategory,
            Self::FuelType { .. } => ParamKey::FuelType,
            Self::EndUse { .. } => ParamKey::EndUse,
            Self::DeterminationMethod { .. } => ParamKey::DeterminationMethod,
            Self::PathwayCode { .. } => ParamKey::PathwayCode,
            Self::CustomCi { .. } => ParamKey::CustomCi,
        }
    }
}

/// Snapshot of the non-derived selections that, together with a driver
/// value, determine a computation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_category: Option<FuelCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_use: Option<EndUse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub determination_method: Option<CiMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathway_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_ci: Option<f64>,
}

impl ParameterSet {
    /// Apply a single change, clearing every downstream selection the
    /// cascade table declares for it.
    pub fn apply(&mut self, change: &ParamChange) {
        match change.clone() {
            ParamChange::CompliancePeriod { value } => self.compliance_period = value,
            ParamChange::FuelCategory { value } => self.fuel_category = value,
            ParamChange::FuelType { value } => self.fuel_type = value,
            ParamChange::EndUse { value } => self.end_use = value,
            ParamChange::DeterminationMethod { value } => self.determination_method = value,
            ParamChange::PathwayCode { value } => self.pathway_code = value,
            ParamChange::CustomCi { value } => self.custom_ci = value,
        }
        for &key in change.key().downstream() {
            self.clear(key);
        }
    }

    /// Clear one selection.
    pub fn clear(&mut self, key: ParamKey) {
        match key {
            ParamKey::CompliancePeriod => self.compliance_period = None,
            ParamKey::FuelCategory => self.fuel_category = None,
            ParamKey::FuelType => self.fuel_type = None,
            ParamKey::EndUse => self.end_use = None,
            ParamKey::DeterminationMethod => self.determination_method = None,
            ParamKey::PathwayCode => self.pathway_code = None,
            ParamKey::CustomCi => self.custom_ci = None,
        }
    }

    /// True when every selection the active determination method requires
    /// is present. Computation is only permitted on a complete set.
    pub fn is_complete(&self) -> bool {
        let base = self.compliance_period.is_some()
            && self.fuel_category.is_some()
            && self.fuel_type.is_some()
            && self.end_use.is_some();
        let Some(method) = self.determination_method else {
            return false;
        };
        base && match method {
            CiMethod::DefaultCi => true,
            CiMethod::ApprovedPathway => self
                .pathway_code
                .as_deref()
                .is_some_and(|code| !code.trim().is_empty()),
            CiMethod::CustomCi => self.custom_ci.is_some_and(f64::is_finite),
        }
    }
}
