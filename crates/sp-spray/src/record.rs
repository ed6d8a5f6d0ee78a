//! Fuel property record and the scalar-or-polynomial coefficient type.

use serde::{Deserialize, Serialize};

use sp_core::numeric::Real;
use sp_core::units::{Temperature, k};
use sp_fluids::EnergyUnit;

use crate::SPACEDIM;

/// A fuel property given either as one constant or as a 4-coefficient fit.
///
/// Decided once at load time from the number of values supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCoef {
    Constant(Real),
    Polynomial([Real; 4]),
}

impl Default for PropertyCoef {
    fn default() -> Self {
        PropertyCoef::Constant(0.0)
    }
}

impl PropertyCoef {
    /// 1 value is a constant, 4 values a fit; any other arity is `None`.
    pub fn from_values(values: &[Real]) -> Option<Self> {
        match *values {
            [v] => Some(PropertyCoef::Constant(v)),
            [a, b, c, d] => Some(PropertyCoef::Polynomial([a, b, c, d])),
            _ => None,
        }
    }

    /// The 4-wide coefficient slot; a constant fills position 0.
    pub fn coefficients(&self) -> [Real; 4] {
        match *self {
            PropertyCoef::Constant(v) => [v, 0.0, 0.0, 0.0],
            PropertyCoef::Polynomial(c) => c,
        }
    }

    pub fn is_polynomial(&self) -> bool {
        matches!(self, PropertyCoef::Polynomial(_))
    }
}

/// Per-fuel scalar-or-polynomial properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelProperty {
    ThermalConductivity,
    SaturationPressure,
    Density,
    Viscosity,
}

impl FuelProperty {
    pub const ALL: [FuelProperty; 4] = [
        FuelProperty::ThermalConductivity,
        FuelProperty::SaturationPressure,
        FuelProperty::Density,
        FuelProperty::Viscosity,
    ];

    /// Suffix of the `<fuel>_<key>` parameter.
    pub fn key(&self) -> &'static str {
        match self {
            FuelProperty::ThermalConductivity => "lambda",
            FuelProperty::SaturationPressure => "psat",
            FuelProperty::Density => "rho",
            FuelProperty::Viscosity => "mu",
        }
    }
}

/// Per-fuel single-valued properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelScalar {
    CriticalTemperature,
    BoilingTemperature,
    SpecificHeat,
    LatentHeat,
}

impl FuelScalar {
    pub const ALL: [FuelScalar; 4] = [
        FuelScalar::CriticalTemperature,
        FuelScalar::BoilingTemperature,
        FuelScalar::SpecificHeat,
        FuelScalar::LatentHeat,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            FuelScalar::CriticalTemperature => "crit_temp",
            FuelScalar::BoilingTemperature => "boil_temp",
            FuelScalar::SpecificHeat => "cp",
            FuelScalar::LatentHeat => "latent",
        }
    }
}

/// Numeric spray configuration for `F` fuels.
///
/// Populated by the property loader, completed by the species resolver,
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelPropertyRecord<const F: usize> {
    /// Critical temperature per fuel
    pub crit_t: [Real; F],
    /// Boiling temperature per fuel
    pub boil_t: [Real; F],
    /// Liquid specific heat per fuel
    pub cp: [Real; F],
    /// Latent heat as configured, at the reference temperature
    pub ref_latent: [Real; F],
    /// Latent heat relative to the gas-phase enthalpy baseline
    pub latent: [Real; F],
    /// Gas-phase species index of each fuel
    pub indx: [Option<usize>; F],
    /// Gas-phase species index credited on evaporation/deposition
    pub dep_indx: [Option<usize>; F],
    pub lambda: [PropertyCoef; F],
    pub psat: [PropertyCoef; F],
    pub rho: [PropertyCoef; F],
    pub mu: [PropertyCoef; F],
    /// Physical droplets per computational parcel
    pub num_ppp: Real,
    /// Reference temperature shared by every fuel
    pub ref_t: Temperature,
    pub body_force: [Real; SPACEDIM],
    pub mass_trans: bool,
    pub mom_trans: bool,
    pub fixed_parts: bool,
    /// Source terms only go to cells above this volume fraction
    pub min_eb_vfrac: Real,
    /// Unit of `cp`, `ref_latent` and `latent`
    pub energy_unit: EnergyUnit,
}

impl<const F: usize> Default for FuelPropertyRecord<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const F: usize> FuelPropertyRecord<F> {
    pub fn new() -> Self {
        Self {
            crit_t: [0.0; F],
            boil_t: [0.0; F],
            cp: [0.0; F],
            ref_latent: [0.0; F],
            latent: [0.0; F],
            indx: [None; F],
            dep_indx: [None; F],
            lambda: [PropertyCoef::default(); F],
            psat: [PropertyCoef::default(); F],
            rho: [PropertyCoef::default(); F],
            mu: [PropertyCoef::default(); F],
            num_ppp: 1.0,
            ref_t: k(300.0),
            body_force: [0.0; SPACEDIM],
            mass_trans: true,
            mom_trans: true,
            fixed_parts: false,
            min_eb_vfrac: 0.1,
            energy_unit: EnergyUnit::default(),
        }
    }

    pub fn coef(&self, prop: FuelProperty) -> &[PropertyCoef; F] {
        match prop {
            FuelProperty::ThermalConductivity => &self.lambda,
            FuelProperty::SaturationPressure => &self.psat,
            FuelProperty::Density => &self.rho,
            FuelProperty::Viscosity => &self.mu,
        }
    }

    pub fn coef_mut(&mut self, prop: FuelProperty) -> &mut [PropertyCoef; F] {
        match prop {
            FuelProperty::ThermalConductivity => &mut self.lambda,
            FuelProperty::SaturationPressure => &mut self.psat,
            FuelProperty::Density => &mut self.rho,
            FuelProperty::Viscosity => &mut self.mu,
        }
    }

    pub fn scalar(&self, prop: FuelScalar) -> &[Real; F] {
        match prop {
            FuelScalar::CriticalTemperature => &self.crit_t,
            FuelScalar::BoilingTemperature => &self.boil_t,
            FuelScalar::SpecificHeat => &self.cp,
            FuelScalar::LatentHeat => &self.ref_latent,
        }
    }

    pub fn scalar_mut(&mut self, prop: FuelScalar) -> &mut [Real; F] {
        match prop {
            FuelScalar::CriticalTemperature => &mut self.crit_t,
            FuelScalar::BoilingTemperature => &mut self.boil_t,
            FuelScalar::SpecificHeat => &mut self.cp,
            FuelScalar::LatentHeat => &mut self.ref_latent,
        }
    }

    /// Flat `4 * F` coefficient table, fuel-major.
    pub fn flat_coefficients(&self, prop: FuelProperty) -> Vec<Real> {
        self.coef(prop)
            .iter()
            .flat_map(PropertyCoef::coefficients)
            .collect()
    }

    /// True once every fuel and deposition index has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.indx.iter().chain(&self.dep_indx).all(Option::is_some)
    }
}
