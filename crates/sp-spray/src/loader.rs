//! Property loader: reads `particles.*` parameters into a spray setup.

use tracing::{debug, info};

use sp_config::ConfigSource;
use sp_core::numeric::{Real, ensure_finite};
use sp_core::units::k;
use sp_fluids::EnergyUnit;

use crate::derive::derived_variable_names;
use crate::error::{SprayError, SprayResult};
use crate::parallel::ParallelContext;
use crate::record::{FuelProperty, FuelPropertyRecord, FuelScalar, PropertyCoef};
use crate::setup::{SprayControls, SprayNames, SpraySetup};

/// Namespace of every spray parameter.
pub const NAMESPACE: &str = "particles";

/// Whether a parameter must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

impl FuelProperty {
    /// Density is the only mandatory scalar-or-polynomial property.
    pub fn requirement(&self) -> Requirement {
        match self {
            FuelProperty::Density => Requirement::Required,
            _ => Requirement::Optional,
        }
    }
}

/// Caller-side inputs to the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOptions {
    /// Largest particle CFL the caller's time stepping tolerates
    pub max_cfl: Real,
    /// Values used for controls the source does not set
    pub defaults: SprayControls,
    /// Unit convention of `cp` and latent heats in the source
    pub energy_unit: EnergyUnit,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_cfl: 0.5,
            defaults: SprayControls::default(),
            energy_unit: EnergyUnit::default(),
        }
    }
}

fn fuel_key(fuel: &str, key: &str) -> String {
    format!("{fuel}_{key}")
}

fn read_finite<S: ConfigSource>(source: &S, key: &str) -> SprayResult<Vec<Real>> {
    let values: Vec<Real> = source.get_arr(key)?;
    for v in &values {
        ensure_finite(*v, source.qualified(key))?;
    }
    Ok(values)
}

/// Resolve `<fuel>_<key>` as a constant (1 value) or 4-coefficient fit (4 values).
///
/// Any other value count counts as absent: a required property fails, an
/// optional one leaves `slot` untouched.
pub fn resolve_property<S: ConfigSource>(
    source: &S,
    fuel: &str,
    key: &str,
    requirement: Requirement,
    slot: &mut PropertyCoef,
) -> SprayResult<()> {
    let name = fuel_key(fuel, key);
    let count = source.count(&name);
    if count == 1 || count == 4 {
        let values = read_finite(source, &name)?;
        if let Some(coef) = PropertyCoef::from_values(&values) {
            *slot = coef;
        }
        return Ok(());
    }

    match requirement {
        Requirement::Required if count == 0 => Err(SprayError::MissingRequired {
            key: source.qualified(&name),
        }),
        Requirement::Required => Err(SprayError::InvalidArity {
            key: source.qualified(&name),
            count,
            expected: "1 value or 4 coefficients",
        }),
        Requirement::Optional => {
            if count > 0 {
                debug!(key = %source.qualified(&name), count, "ignoring property with unusable value count");
            }
            Ok(())
        }
    }
}

/// Resolve the required single value `<fuel>_<key>`.
pub fn resolve_scalar<S: ConfigSource>(source: &S, fuel: &str, key: &str) -> SprayResult<Real> {
    let name = fuel_key(fuel, key);
    match source.count(&name) {
        0 => Err(SprayError::MissingRequired {
            key: source.qualified(&name),
        }),
        1 => Ok(ensure_finite(source.get(&name)?, source.qualified(&name))?),
        count => Err(SprayError::InvalidArity {
            key: source.qualified(&name),
            count,
            expected: "exactly 1 value",
        }),
    }
}

fn require_positive<S: ConfigSource>(source: &S, key: &str, value: Real) -> SprayResult<Real> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SprayError::InvalidValue {
            key: source.qualified(key),
            value,
            reason: "must be positive and finite",
        });
    }
    Ok(value)
}

/// Read every spray parameter for `F` fuels.
///
/// The returned setup has all properties filled in; species indices stay
/// unresolved until [`SpraySetup::resolve`] runs. A failure aborts `ctx`
/// so peers waiting at the closing barrier are released.
pub fn load_spray_params<const F: usize, S, P>(
    source: &S,
    options: &LoadOptions,
    ctx: &P,
) -> SprayResult<SpraySetup<F>>
where
    S: ConfigSource,
    P: ParallelContext + ?Sized,
{
    match read_spray_params::<F, S, P>(source, options, ctx) {
        Ok(setup) => {
            ctx.barrier()?;
            Ok(setup)
        }
        Err(err) => {
            ctx.abort();
            Err(err)
        }
    }
}

fn read_spray_params<const F: usize, S, P>(
    source: &S,
    options: &LoadOptions,
    ctx: &P,
) -> SprayResult<SpraySetup<F>>
where
    S: ConfigSource,
    P: ParallelContext + ?Sized,
{
    let pp = source.prefixed(NAMESPACE);
    let defaults = &options.defaults;
    let mut record = FuelPropertyRecord::<F>::new();
    record.energy_unit = options.energy_unit;

    let verbose: i32 = pp.query_or("v", defaults.verbose)?;
    record.mass_trans = pp.query_or("mass_transfer", record.mass_trans)?;
    record.mom_trans = pp.query_or("mom_transfer", record.mom_trans)?;
    record.fixed_parts = pp.query_or("fixed_parts", record.fixed_parts)?;
    let cfl: Real = ensure_finite(pp.query_or("cfl", defaults.cfl)?, pp.qualified("cfl"))?;
    if cfl > options.max_cfl {
        return Err(SprayError::CflTooLarge {
            cfl,
            max: options.max_cfl,
        });
    }

    // Must match the count fixed at compile time
    let nfuel = pp.count("fuel_species");
    if nfuel != F {
        return Err(SprayError::FuelCountMismatch {
            expected: F,
            found: nfuel,
        });
    }
    let fuel_list: Vec<String> = pp.get_arr("fuel_species")?;
    let dep_list: Option<Vec<String>> = if pp.contains("dep_fuel_species") {
        let ndep = pp.count("dep_fuel_species");
        if ndep != F {
            return Err(SprayError::DepositionCountMismatch {
                expected: F,
                found: ndep,
            });
        }
        Some(pp.get_arr("dep_fuel_species")?)
    } else {
        None
    };

    let fuel: [String; F] =
        fuel_list
            .try_into()
            .map_err(|list: Vec<String>| SprayError::FuelCountMismatch {
                expected: F,
                found: list.len(),
            })?;
    let dep: [String; F] = match dep_list {
        Some(list) => list
            .try_into()
            .map_err(|list: Vec<String>| SprayError::DepositionCountMismatch {
                expected: F,
                found: list.len(),
            })?,
        None => fuel.clone(),
    };

    for scalar in FuelScalar::ALL {
        for (i, name) in fuel.iter().enumerate() {
            record.scalar_mut(scalar)[i] = resolve_scalar(&pp, name, scalar.key())?;
        }
    }
    for prop in FuelProperty::ALL {
        for (i, name) in fuel.iter().enumerate() {
            let slot = &mut record.coef_mut(prop)[i];
            resolve_property(&pp, name, prop.key(), prop.requirement(), slot)?;
        }
    }
    record.latent = record.ref_latent;

    let parcel_size = pp.query_or("parcel_size", record.num_ppp)?;
    record.num_ppp = require_positive(&pp, "parcel_size", parcel_size)?;
    if pp.query_or("use_splash_model", false)? {
        return Err(SprayError::SplashModelUnsupported);
    }
    // Must use same reference temperature for all fuels
    let ref_t: Real = pp.get("fuel_ref_temp")?;
    record.ref_t = k(require_positive(&pp, "fuel_ref_temp", ref_t)?);

    let controls = SprayControls {
        verbose,
        cfl,
        write_ascii_files: pp.query_or("write_ascii_files", defaults.write_ascii_files)?,
        plot_src: pp.query_or("plot_src", defaults.plot_src)?,
        init_file: pp.query("init_file")?.or_else(|| defaults.init_file.clone()),
        init_function: pp.query_or("init_function", defaults.init_function)?,
        derive_plot_vars: pp.query_or("derive_plot_vars", defaults.derive_plot_vars)?,
        derive_plot_species: pp.query_or("derive_plot_species", defaults.derive_plot_species)?,
    };

    #[cfg(feature = "eb")]
    {
        // Spray sources only go to cells with a larger volume fraction
        let vfrac: Real = pp.query_or("min_eb_vfrac", record.min_eb_vfrac)?;
        record.min_eb_vfrac = ensure_finite(vfrac, pp.qualified("min_eb_vfrac"))?;
    }

    let derive_vars = derived_variable_names(&fuel, controls.derive_plot_species);

    if verbose >= 1 && ctx.is_io_rank() {
        info!(
            "Spray fuel species {}; particles per parcel {}",
            fuel.join(", "),
            record.num_ppp
        );
    }

    Ok(SpraySetup::from_parts(
        record,
        controls,
        SprayNames {
            fuel,
            dep,
            derive_vars,
        },
    ))
}
