use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use fc_app::{AppResult, load_scenario, replay};
use fc_compute::{ComputeService, LocalFormulaService, ci_limit, fuels, pathways};
use fc_model::{
    CiMethod, Computation, EndUse, FuelCategory, FuelType, ParameterSet,
};

#[derive(Parser)]
#[command(name = "fc-cli")]
#[command(about = "Fuel credit calculator - compliance unit computation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute compliance units from a supplied fuel quantity
    Units {
        #[command(flatten)]
        compute: ComputeArgs,
        /// Fuel quantity in the fuel's supply unit
        quantity: f64,
    },
    /// Compute the fuel quantity needed for a number of compliance units
    Quantity {
        #[command(flatten)]
        compute: ComputeArgs,
        /// Target compliance units in tonnes CO2e
        units: f64,
    },
    /// Replay a scenario YAML file through the calculator
    Replay {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List catalog data
    #[command(subcommand)]
    Catalog(CatalogCommands),
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List catalogued fuels
    Fuels {
        /// Filter by name or supply unit
        #[arg(long)]
        query: Option<String>,
    },
    /// List approved pathways
    Pathways,
    /// List carbon-intensity limits for a category
    Limits {
        #[arg(long, value_enum)]
        category: CategoryArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CategoryArg {
    Gasoline,
    Diesel,
}

impl From<CategoryArg> for FuelCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Gasoline => FuelCategory::Gasoline,
            CategoryArg::Diesel => FuelCategory::Diesel,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FuelArg {
    Ethanol,
    Biodiesel,
    RenewableDiesel,
    Cng,
    Electricity,
    Hydrogen,
}

impl From<FuelArg> for FuelType {
    fn from(arg: FuelArg) -> Self {
        match arg {
            FuelArg::Ethanol => FuelType::Ethanol,
            FuelArg::Biodiesel => FuelType::Biodiesel,
            FuelArg::RenewableDiesel => FuelType::RenewableDiesel,
            FuelArg::Cng => FuelType::Cng,
            FuelArg::Electricity => FuelType::Electricity,
            FuelArg::Hydrogen => FuelType::Hydrogen,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum EndUseArg {
    LightDutyRoad,
    HeavyDutyRoad,
    Marine,
    Rail,
}

impl From<EndUseArg> for EndUse {
    fn from(arg: EndUseArg) -> Self {
        match arg {
            EndUseArg::LightDutyRoad => EndUse::LightDutyRoad,
            EndUseArg::HeavyDutyRoad => EndUse::HeavyDutyRoad,
            EndUseArg::Marine => EndUse::Marine,
            EndUseArg::Rail => EndUse::Rail,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    DefaultCi,
    ApprovedPathway,
    CustomCi,
}

impl From<MethodArg> for CiMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::DefaultCi => CiMethod::DefaultCi,
            MethodArg::ApprovedPathway => CiMethod::ApprovedPathway,
            MethodArg::CustomCi => CiMethod::CustomCi,
        }
    }
}

#[derive(Args)]
struct ComputeArgs {
    /// Compliance period (year)
    #[arg(long)]
    period: u32,
    #[arg(long, value_enum)]
    category: CategoryArg,
    #[arg(long, value_enum)]
    fuel: FuelArg,
    #[arg(long, value_enum)]
    end_use: EndUseArg,
    #[arg(long, value_enum, default_value = "default-ci")]
    method: MethodArg,
    /// Approved pathway code (with --method approved-pathway)
    #[arg(long)]
    pathway: Option<String>,
    /// Reporter carbon intensity in g CO2e/MJ (with --method custom-ci)
    #[arg(long)]
    custom_ci: Option<f64>,
    /// Emit JSON instead of a formatted breakdown
    #[arg(long)]
    json: bool,
}

impl ComputeArgs {
    fn params(&self) -> ParameterSet {
        ParameterSet {
            compliance_period: Some(self.period),
            fuel_category: Some(self.category.into()),
            fuel_type: Some(self.fuel.into()),
            end_use: Some(self.end_use.into()),
            determination_method: Some(self.method.into()),
            pathway_code: self.pathway.clone(),
            custom_ci: self.custom_ci,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Units { compute, quantity } => cmd_units(&compute, quantity),
        Commands::Quantity { compute, units } => cmd_quantity(&compute, units),
        Commands::Replay {
            scenario_path,
            json,
        } => cmd_replay(&scenario_path, json),
        Commands::Catalog(catalog_cmd) => match catalog_cmd {
            CatalogCommands::Fuels { query } => cmd_catalog_fuels(query.as_deref()),
            CatalogCommands::Pathways => cmd_catalog_pathways(),
            CatalogCommands::Limits { category } => cmd_catalog_limits(category.into()),
        },
    }
}

fn cmd_units(compute: &ComputeArgs, quantity: f64) -> AppResult<()> {
    let service = LocalFormulaService::new();
    let result = service.units_from_quantity(&compute.params(), quantity)?;
    if compute.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Compliance units: {:.3} t CO2e", result.value);
        print_terms(&result);
    }
    Ok(())
}

fn cmd_quantity(compute: &ComputeArgs, units: f64) -> AppResult<()> {
    let service = LocalFormulaService::new();
    let result = service.quantity_from_units(&compute.params(), units)?;
    if compute.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("Fuel quantity: {:.3}", result.value);
        print_terms(&result);
    }
    Ok(())
}

fn print_terms(result: &Computation) {
    let terms = &result.terms;
    println!("  CI limit:       {:.2} g CO2e/MJ", terms.ci_limit);
    println!("  Fuel CI:        {:.2} g CO2e/MJ", terms.ci_fuel);
    println!("  EER:            {:.2}", terms.eer);
    println!("  CI difference:  {:.2} g CO2e/MJ", terms.ci_difference);
    println!("  Energy density: {:.2} MJ/unit", terms.energy_density);
    println!("  Energy content: {:.0} MJ", terms.energy_content);
}

fn cmd_replay(scenario_path: &Path, json: bool) -> AppResult<()> {
    let scenario = load_scenario(scenario_path)?;
    let report = replay(&scenario, Box::new(LocalFormulaService::new()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Scenario: {}", report.name);
    for step in &report.steps {
        println!(
            "  t={:>6.2}s  mode={:?}  quantity={}  units={}  state={:?}",
            step.at_s,
            step.view.mode,
            format_field(step.view.quantity),
            format_field(step.view.units),
            step.view.state,
        );
    }

    let settled = &report.settled;
    println!("Settled:");
    println!("  quantity: {}", format_field(settled.quantity));
    println!("  units:    {}", format_field(settled.units));
    match (&settled.last_error, &settled.last_result) {
        (Some(error), _) => println!("  error:    {error}"),
        (None, Some(result)) => print_terms(result),
        (None, None) => println!("  (no result)"),
    }
    Ok(())
}

fn format_field(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

fn cmd_catalog_fuels(query: Option<&str>) -> AppResult<()> {
    println!(
        "{:<24} {:>12} {:>16} {:>6}",
        "Fuel", "CI (g/MJ)", "Density (MJ/u)", "Unit"
    );
    for entry in fuels()
        .iter()
        .filter(|entry| entry.matches_query(query.unwrap_or("")))
    {
        println!(
            "{:<24} {:>12.1} {:>16.2} {:>6}",
            entry.display_name, entry.default_ci, entry.energy_density, entry.unit
        );
    }
    Ok(())
}

fn cmd_catalog_pathways() -> AppResult<()> {
    println!("{:<14} {:>12}  {}", "Code", "CI (g/MJ)", "Description");
    for entry in pathways() {
        println!(
            "{:<14} {:>12.1}  {}",
            entry.code, entry.certified_ci, entry.description
        );
    }
    Ok(())
}

fn cmd_catalog_limits(category: FuelCategory) -> AppResult<()> {
    println!("{:?} carbon-intensity limits:", category);
    for period in 2023..=2030 {
        if let Some(limit) = ci_limit(category, period) {
            println!("  {period}: {limit:.2} g CO2e/MJ");
        }
    }
    Ok(())
}
