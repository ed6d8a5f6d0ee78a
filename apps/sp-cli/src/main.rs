use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use sp_config::{ConfigSource, ParamTable, load_path};
use sp_core::units::k;
use sp_fluids::{EnergyUnit, NasaMechanism, ThermoModel};
use sp_spray::{
    LoadOptions, NAMESPACE, SPACEDIM, SerialContext, SetupOptions, SpraySetup, load_spray_params,
    setup_spray,
};

/// Largest fuel count the CLI is compiled for.
const MAX_FUELS: usize = 4;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] sp_config::ConfigError),

    #[error(transparent)]
    Fluid(#[from] sp_fluids::FluidError),

    #[error(transparent)]
    Spray(#[from] sp_spray::SprayError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported fuel count {0}; this build handles 1 to {max}", max = MAX_FUELS)]
    FuelCount(usize),

    #[error("Body force needs {dim} components, got {0}", dim = SPACEDIM)]
    BodyForce(usize),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "sp-cli")]
#[command(about = "Spray setup CLI - load and check spray fuel properties", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct LoadArgs {
    /// Parameter file (inputs text, .yaml or .json)
    inputs: PathBuf,
    /// Compiled fuel count; defaults to the length of particles.fuel_species
    #[arg(long)]
    fuel_count: Option<usize>,
    /// Energy units of cp and latent heats (cgs or si)
    #[arg(long, default_value = "cgs")]
    units: EnergyUnit,
    /// Largest allowed particle CFL
    #[arg(long, default_value_t = 0.5)]
    max_cfl: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Load spray parameters and resolve them against a gas-phase mechanism
    Check {
        #[command(flatten)]
        load: LoadArgs,
        /// Gas-phase NASA-7 mechanism (YAML)
        #[arg(long)]
        mech: PathBuf,
        /// Body force components, comma separated
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        body_force: Option<Vec<f64>>,
        /// Print the setup as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the derived plot variables for a parameter file
    DeriveVars {
        #[command(flatten)]
        load: LoadArgs,
    },
    /// List the species of a mechanism with their enthalpy
    Species {
        /// Gas-phase NASA-7 mechanism (YAML)
        mech: PathBuf,
        /// Evaluation temperature in K
        #[arg(long, default_value_t = 300.0)]
        temperature: f64,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            load,
            mech,
            body_force,
            json,
        } => cmd_check(&load, &mech, body_force.as_deref(), json),
        Commands::DeriveVars { load } => cmd_derive_vars(&load),
        Commands::Species { mech, temperature } => cmd_species(&mech, temperature),
    }
}

fn load_options(args: &LoadArgs) -> LoadOptions {
    LoadOptions {
        max_cfl: args.max_cfl,
        energy_unit: args.units,
        ..LoadOptions::default()
    }
}

fn fuel_count(args: &LoadArgs, table: &ParamTable) -> CliResult<usize> {
    let n = args
        .fuel_count
        .unwrap_or_else(|| table.prefixed(NAMESPACE).count("fuel_species"));
    if n == 0 || n > MAX_FUELS {
        return Err(CliError::FuelCount(n));
    }
    Ok(n)
}

// Monomorphize `$body` for the runtime fuel count.
macro_rules! with_fuel_count {
    ($n:expr, $f:ident => $body:expr) => {
        match $n {
            1 => $f::<1>($body),
            2 => $f::<2>($body),
            3 => $f::<3>($body),
            4 => $f::<4>($body),
            n => Err(CliError::FuelCount(n)),
        }
    };
}

struct CheckInput<'a> {
    table: &'a ParamTable,
    mech: &'a NasaMechanism,
    options: SetupOptions,
    json: bool,
}

fn cmd_check(args: &LoadArgs, mech_path: &Path, body_force: Option<&[f64]>, json: bool) -> CliResult<()> {
    let table = load_path(&args.inputs)?;
    let mech = NasaMechanism::load_yaml(mech_path)?;

    let mut force = [0.0; SPACEDIM];
    if let Some(values) = body_force {
        if values.len() != SPACEDIM {
            return Err(CliError::BodyForce(values.len()));
        }
        force.copy_from_slice(values);
    }

    let input = CheckInput {
        table: &table,
        mech: &mech,
        options: SetupOptions {
            load: load_options(args),
            body_force: force,
        },
        json,
    };
    with_fuel_count!(fuel_count(args, &table)?, run_check => &input)
}

fn run_check<const F: usize>(input: &CheckInput<'_>) -> CliResult<()> {
    let setup: SpraySetup<F> = setup_spray(input.table, input.mech, &input.options, &SerialContext)?;
    let summary = setup.summary();

    if input.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{summary}");
        println!("✓ Spray setup is valid");
    }
    Ok(())
}

struct DeriveInput<'a> {
    table: &'a ParamTable,
    options: LoadOptions,
}

fn cmd_derive_vars(args: &LoadArgs) -> CliResult<()> {
    let table = load_path(&args.inputs)?;
    let input = DeriveInput {
        table: &table,
        options: load_options(args),
    };
    with_fuel_count!(fuel_count(args, &table)?, run_derive_vars => &input)
}

fn run_derive_vars<const F: usize>(input: &DeriveInput<'_>) -> CliResult<()> {
    let setup = load_spray_params::<F, _, _>(input.table, &input.options, &SerialContext)?;
    for name in &setup.names().derive_vars {
        println!("{name}");
    }
    Ok(())
}

fn cmd_species(mech_path: &Path, temperature: f64) -> CliResult<()> {
    let mech = NasaMechanism::load_yaml(mech_path)?;
    let h = mech.enthalpies(k(temperature))?;

    println!(
        "Species in {} (h at {} K, {}):",
        mech.name(),
        temperature,
        mech.energy_unit()
    );
    for ((i, name), h) in mech.species().iter().zip(h) {
        println!("  {:>3}  {:<12} {:.6e}", i, name, h);
    }
    Ok(())
}
