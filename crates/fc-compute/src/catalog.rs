//! Const catalogs backing the local formula: fuels, carbon-intensity
//! limits, and approved pathways.

use fc_model::{EndUse, FuelCategory, FuelType};

/// Catalog data for one fuel type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelCatalogEntry {
    pub fuel: FuelType,
    pub display_name: &'static str,
    /// Prescribed default carbon intensity (g CO2e/MJ).
    pub default_ci: f64,
    /// Energy density (MJ per supply unit).
    pub energy_density: f64,
    /// Supply unit the quantity field is denominated in.
    pub unit: &'static str,
    /// Energy effectiveness ratios by end use; unlisted end uses are 1.0.
    pub eer: &'static [(EndUse, f64)],
}

impl FuelCatalogEntry {
    /// Energy effectiveness ratio for an end use.
    pub fn eer_for(&self, end_use: EndUse) -> f64 {
        self.eer
            .iter()
            .find(|(candidate, _)| *candidate == end_use)
            .map_or(1.0, |(_, ratio)| *ratio)
    }

    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }
        self.display_name.to_ascii_lowercase().contains(&query)
            || self.unit.to_ascii_lowercase() == query
    }
}

// Order must match the FuelType enum; see catalog_covers_all_fuels below.
const FUEL_CATALOG: [FuelCatalogEntry; 6] = [
    FuelCatalogEntry {
        fuel: FuelType::Ethanol,
        display_name: "Ethanol",
        default_ci: 53.0,
        energy_density: 23.58,
        unit: "L",
        eer: &[],
    },
    FuelCatalogEntry {
        fuel: FuelType::Biodiesel,
        display_name: "Biodiesel",
        default_ci: 45.0,
        energy_density: 35.40,
        unit: "L",
        eer: &[],
    },
    FuelCatalogEntry {
        fuel: FuelType::RenewableDiesel,
        display_name: "Renewable diesel",
        default_ci: 40.2,
        energy_density: 36.51,
        unit: "L",
        eer: &[],
    },
    FuelCatalogEntry {
        fuel: FuelType::Cng,
        display_name: "Compressed natural gas",
        default_ci: 63.6,
        energy_density: 37.85,
        unit: "m3",
        eer: &[(EndUse::HeavyDutyRoad, 0.9)],
    },
    FuelCatalogEntry {
        fuel: FuelType::Electricity,
        display_name: "Electricity",
        default_ci: 19.7,
        energy_density: 3.6,
        unit: "kWh",
        eer: &[
            (EndUse::LightDutyRoad, 3.4),
            (EndUse::HeavyDutyRoad, 2.7),
            (EndUse::Marine, 2.5),
            (EndUse::Rail, 2.8),
        ],
    },
    FuelCatalogEntry {
        fuel: FuelType::Hydrogen,
        display_name: "Hydrogen",
        default_ci: 96.8,
        energy_density: 141.24,
        unit: "kg",
        eer: &[
            (EndUse::LightDutyRoad, 2.0),
            (EndUse::HeavyDutyRoad, 1.9),
        ],
    },
];

/// All catalogued fuels.
pub fn fuels() -> &'static [FuelCatalogEntry] {
    &FUEL_CATALOG
}

/// Catalog entry for a fuel type.
pub fn fuel_entry(fuel: FuelType) -> &'static FuelCatalogEntry {
    let index = match fuel {
        FuelType::Ethanol => 0,
        FuelType::Biodiesel => 1,
        FuelType::RenewableDiesel => 2,
        FuelType::Cng => 3,
        FuelType::Electricity => 4,
        FuelType::Hydrogen => 5,
    };
    &FUEL_CATALOG[index]
}

const LIMIT_FIRST_PERIOD: u32 = 2023;

// g CO2e/MJ limits by compliance period, stepping down each year.
const GASOLINE_LIMITS: [f64; 8] = [78.68, 77.13, 75.57, 74.02, 72.46, 70.91, 69.35, 67.80];
const DIESEL_LIMITS: [f64; 8] = [79.28, 77.71, 76.14, 74.57, 73.00, 71.43, 69.86, 68.29];

/// Carbon-intensity limit for a category and compliance period, if one is
/// published.
pub fn ci_limit(category: FuelCategory, period: u32) -> Option<f64> {
    let index = period.checked_sub(LIMIT_FIRST_PERIOD)? as usize;
    let limits = match category {
        FuelCategory::Gasoline => &GASOLINE_LIMITS,
        FuelCategory::Diesel => &DIESEL_LIMITS,
    };
    limits.get(index).copied()
}

/// An approved fuel pathway with a certified carbon intensity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathwayEntry {
    pub code: &'static str,
    pub fuel: FuelType,
    /// Certified carbon intensity (g CO2e/MJ).
    pub certified_ci: f64,
    pub description: &'static str,
}

const PATHWAY_CATALOG: [PathwayEntry; 5] = [
    PathwayEntry {
        code: "BCLCF-104.2",
        fuel: FuelType::Ethanol,
        certified_ci: 38.4,
        description: "Wheat ethanol, biomass process heat",
    },
    PathwayEntry {
        code: "BCLCF-211.0",
        fuel: FuelType::Biodiesel,
        certified_ci: 21.7,
        description: "Used cooking oil biodiesel",
    },
    PathwayEntry {
        code: "BCLCF-231.1",
        fuel: FuelType::RenewableDiesel,
        certified_ci: 27.3,
        description: "Tallow renewable diesel",
    },
    PathwayEntry {
        code: "BCLCF-402.0",
        fuel: FuelType::Electricity,
        certified_ci: 11.2,
        description: "Grid electricity, hydro region",
    },
    PathwayEntry {
        code: "BCLCF-510.3",
        fuel: FuelType::Hydrogen,
        certified_ci: 32.9,
        description: "Electrolytic hydrogen",
    },
];

/// All approved pathways.
pub fn pathways() -> &'static [PathwayEntry] {
    &PATHWAY_CATALOG
}

/// Look up a pathway by its code (case-insensitive, trimmed).
pub fn pathway(code: &str) -> Option<&'static PathwayEntry> {
    let code = code.trim();
    PATHWAY_CATALOG
        .iter()
        .find(|entry| entry.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_covers_all_fuels() {
        for entry in fuels() {
            assert_eq!(fuel_entry(entry.fuel).fuel, entry.fuel);
        }
    }

    #[test]
    fn eer_defaults_to_one() {
        let ethanol = fuel_entry(FuelType::Ethanol);
        assert_eq!(ethanol.eer_for(EndUse::Marine), 1.0);

        let electricity = fuel_entry(FuelType::Electricity);
        assert_eq!(electricity.eer_for(EndUse::LightDutyRoad), 3.4);
    }

    #[test]
    fn limits_step_down() {
        let first = ci_limit(FuelCategory::Gasoline, 2023).unwrap();
        let later = ci_limit(FuelCategory::Gasoline, 2026).unwrap();
        assert!(later < first);
    }

    #[test]
    fn limits_outside_schedule_are_absent() {
        assert!(ci_limit(FuelCategory::Gasoline, 2022).is_none());
        assert!(ci_limit(FuelCategory::Diesel, 2031).is_none());
    }

    #[test]
    fn pathway_lookup_is_case_insensitive() {
        assert!(pathway("bclcf-104.2").is_some());
        assert!(pathway(" BCLCF-104.2 ").is_some());
        assert!(pathway("BCLCF-999.9").is_none());
    }
}
