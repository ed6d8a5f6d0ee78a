//! Setup orchestration: loader then resolver, plus a printable summary.

use std::fmt;

use serde::{Deserialize, Serialize};

use sp_config::ConfigSource;
use sp_core::numeric::Real;
use sp_core::units::kelvin_of;
use sp_fluids::{EnergyUnit, ThermoModel};

use crate::SPACEDIM;
use crate::error::SprayResult;
use crate::loader::{LoadOptions, load_spray_params};
use crate::parallel::ParallelContext;
use crate::record::{FuelProperty, FuelPropertyRecord, PropertyCoef};
use crate::resolver::resolve_species;

/// Run controls read alongside the fuel properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SprayControls {
    pub verbose: i32,
    pub cfl: Real,
    pub write_ascii_files: bool,
    pub plot_src: bool,
    pub init_file: Option<String>,
    pub init_function: bool,
    pub derive_plot_vars: bool,
    pub derive_plot_species: bool,
}

impl Default for SprayControls {
    fn default() -> Self {
        Self {
            verbose: 0,
            cfl: 0.5,
            write_ascii_files: false,
            plot_src: false,
            init_file: None,
            init_function: true,
            derive_plot_vars: true,
            derive_plot_species: true,
        }
    }
}

/// Name lists carried next to the numeric record.
#[derive(Debug, Clone, PartialEq)]
pub struct SprayNames<const F: usize> {
    pub fuel: [String; F],
    /// Gas species receiving each fuel's evaporated mass
    pub dep: [String; F],
    pub derive_vars: Vec<String>,
}

/// Loaded spray configuration for `F` fuels.
#[derive(Debug, Clone, PartialEq)]
pub struct SpraySetup<const F: usize> {
    record: FuelPropertyRecord<F>,
    controls: SprayControls,
    names: SprayNames<F>,
}

impl<const F: usize> SpraySetup<F> {
    pub(crate) fn from_parts(
        record: FuelPropertyRecord<F>,
        controls: SprayControls,
        names: SprayNames<F>,
    ) -> Self {
        Self {
            record,
            controls,
            names,
        }
    }

    pub fn record(&self) -> &FuelPropertyRecord<F> {
        &self.record
    }

    pub fn controls(&self) -> &SprayControls {
        &self.controls
    }

    pub fn names(&self) -> &SprayNames<F> {
        &self.names
    }

    /// Bind the fuels to the species of `thermo`; see [`resolve_species`].
    pub fn resolve<T, P>(&mut self, thermo: &T, body_force: [Real; SPACEDIM], ctx: &P) -> SprayResult<()>
    where
        T: ThermoModel + ?Sized,
        P: ParallelContext + ?Sized,
    {
        resolve_species(&mut self.record, &self.names, thermo, body_force, ctx)
    }

    pub fn summary(&self) -> SetupSummary {
        SetupSummary::from_setup(self)
    }
}

/// Inputs to [`setup_spray`] beyond the parameter source.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupOptions {
    pub load: LoadOptions,
    /// Gravity or other body acceleration applied to droplets
    pub body_force: [Real; SPACEDIM],
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            body_force: [0.0; SPACEDIM],
        }
    }
}

/// Load every spray parameter and resolve it against the gas phase.
pub fn setup_spray<const F: usize, S, T, P>(
    source: &S,
    thermo: &T,
    options: &SetupOptions,
    ctx: &P,
) -> SprayResult<SpraySetup<F>>
where
    S: ConfigSource,
    T: ThermoModel + ?Sized,
    P: ParallelContext + ?Sized,
{
    let mut setup = load_spray_params::<F, S, P>(source, &options.load, ctx)?;
    setup.resolve(thermo, options.body_force, ctx)?;
    Ok(setup)
}

/// Per-fuel view of a setup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelSummary {
    pub name: String,
    pub deposition: String,
    pub species_index: Option<usize>,
    pub deposition_index: Option<usize>,
    pub crit_temp: Real,
    pub boil_temp: Real,
    pub cp: Real,
    pub ref_latent: Real,
    pub latent: Real,
    pub lambda: PropertyCoef,
    pub psat: PropertyCoef,
    pub rho: PropertyCoef,
    pub mu: PropertyCoef,
}

/// Fuel-count independent, serializable view of a [`SpraySetup`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetupSummary {
    pub energy_unit: EnergyUnit,
    pub ref_temp: Real,
    pub parcel_size: Real,
    pub body_force: Vec<Real>,
    pub mass_transfer: bool,
    pub mom_transfer: bool,
    pub fixed_parts: bool,
    pub min_eb_vfrac: Real,
    pub controls: SprayControls,
    pub fuels: Vec<FuelSummary>,
    pub derive_vars: Vec<String>,
}

impl SetupSummary {
    fn from_setup<const F: usize>(setup: &SpraySetup<F>) -> Self {
        let rec = &setup.record;
        let names = &setup.names;
        let fuels = (0..F)
            .map(|i| FuelSummary {
                name: names.fuel[i].clone(),
                deposition: names.dep[i].clone(),
                species_index: rec.indx[i],
                deposition_index: rec.dep_indx[i],
                crit_temp: rec.crit_t[i],
                boil_temp: rec.boil_t[i],
                cp: rec.cp[i],
                ref_latent: rec.ref_latent[i],
                latent: rec.latent[i],
                lambda: rec.coef(FuelProperty::ThermalConductivity)[i],
                psat: rec.coef(FuelProperty::SaturationPressure)[i],
                rho: rec.coef(FuelProperty::Density)[i],
                mu: rec.coef(FuelProperty::Viscosity)[i],
            })
            .collect();
        Self {
            energy_unit: rec.energy_unit,
            ref_temp: kelvin_of(rec.ref_t),
            parcel_size: rec.num_ppp,
            body_force: rec.body_force.to_vec(),
            mass_transfer: rec.mass_trans,
            mom_transfer: rec.mom_trans,
            fixed_parts: rec.fixed_parts,
            min_eb_vfrac: rec.min_eb_vfrac,
            controls: setup.controls.clone(),
            fuels,
            derive_vars: names.derive_vars.clone(),
        }
    }
}

fn fmt_coef(c: &PropertyCoef) -> String {
    match c {
        PropertyCoef::Constant(v) => format!("{v}"),
        PropertyCoef::Polynomial(p) => format!("[{}, {}, {}, {}]", p[0], p[1], p[2], p[3]),
    }
}

fn fmt_index(i: Option<usize>) -> String {
    i.map_or_else(|| "-".to_string(), |i| i.to_string())
}

impl fmt::Display for SetupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Spray setup ({} fuels, energies in {})", self.fuels.len(), self.energy_unit)?;
        writeln!(f, "  reference temperature: {} K", self.ref_temp)?;
        writeln!(f, "  particles per parcel:  {}", self.parcel_size)?;
        writeln!(f, "  cfl:                   {}", self.controls.cfl)?;
        writeln!(
            f,
            "  transfer:              mass={} momentum={} fixed={}",
            self.mass_transfer, self.mom_transfer, self.fixed_parts
        )?;
        writeln!(f, "  body force:            {:?}", self.body_force)?;
        for fuel in &self.fuels {
            writeln!(
                f,
                "  {} (species {}, deposits to {} [{}])",
                fuel.name,
                fmt_index(fuel.species_index),
                fuel.deposition,
                fmt_index(fuel.deposition_index)
            )?;
            writeln!(
                f,
                "    crit_temp={} boil_temp={} cp={}",
                fuel.crit_temp, fuel.boil_temp, fuel.cp
            )?;
            writeln!(f, "    latent={} (configured {})", fuel.latent, fuel.ref_latent)?;
            writeln!(
                f,
                "    rho={} mu={} lambda={} psat={}",
                fmt_coef(&fuel.rho),
                fmt_coef(&fuel.mu),
                fmt_coef(&fuel.lambda),
                fmt_coef(&fuel.psat)
            )?;
        }
        write!(f, "  derived variables: {}", self.derive_vars.join(", "))
    }
}
