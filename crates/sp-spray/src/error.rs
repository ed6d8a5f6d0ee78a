//! Spray setup errors.
//!
//! Every variant is a configuration error found during one-time startup; none
//! of them is retried.

use std::fmt;

use sp_config::ConfigError;
use sp_core::{Real, SpError};
use sp_fluids::FluidError;
use thiserror::Error;

pub type SprayResult<T> = Result<T, SprayError>;

/// Which name list a species lookup came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeciesRole {
    Fuel,
    Deposition,
}

impl fmt::Display for SpeciesRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesRole::Fuel => f.write_str("Fuel"),
            SpeciesRole::Deposition => f.write_str("Deposition"),
        }
    }
}

#[derive(Error, Debug)]
pub enum SprayError {
    #[error("Number of fuel species in input ({found}) must match the compiled fuel count ({expected})")]
    FuelCountMismatch { expected: usize, found: usize },

    #[error("particles.dep_fuel_species lists {found} species; expected {expected}")]
    DepositionCountMismatch { expected: usize, found: usize },

    #[error("Missing required parameter: {key}")]
    MissingRequired { key: String },

    #[error("{key} has {count} values; expected {expected}")]
    InvalidArity {
        key: String,
        count: usize,
        expected: &'static str,
    },

    #[error("particles.cfl must be <= {max} (got {cfl})")]
    CflTooLarge { cfl: Real, max: Real },

    #[error("Invalid value: {key} = {value} ({reason})")]
    InvalidValue {
        key: String,
        value: Real,
        reason: &'static str,
    },

    #[error("Splash model is not fully implemented; particles.use_splash_model must be false")]
    SplashModelUnsupported,

    #[error("{role} species '{species}' for fuel '{fuel}' not found in species list")]
    SpeciesNotFound {
        fuel: String,
        species: String,
        role: SpeciesRole,
    },

    #[error("Gas-phase species table is empty")]
    EmptySpeciesTable,

    #[error("Setup aborted: another rank failed")]
    Aborted,

    #[error("Configuration error: {0}")]
    Config(ConfigError),

    #[error("Thermo error: {0}")]
    Fluid(#[from] FluidError),

    #[error(transparent)]
    Core(#[from] SpError),
}

impl From<ConfigError> for SprayError {
    fn from(err: ConfigError) -> Self {
        // Required reads through the source surface as the spray's own category
        match err {
            ConfigError::Missing { key } => SprayError::MissingRequired { key },
            other => SprayError::Config(other),
        }
    }
}
