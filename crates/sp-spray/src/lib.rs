//! sp-spray: spray-phase property setup for a reacting-flow solver.
//!
//! Startup runs in two phases:
//! 1. [`load_spray_params`] reads the `particles.*` namespace into a
//!    [`FuelPropertyRecord`] for a compile-time fuel count `F`.
//! 2. [`resolve_species`] maps fuel and deposition names onto gas-phase species
//!    indices and rebases the latent heats onto the gas-phase enthalpy
//!    baseline at the reference temperature.
//!
//! [`setup_spray`] runs both phases. Every rank performs the same work on the
//! same inputs; a [`ParallelContext`] supplies rank identity and barriers.

pub mod derive;
pub mod error;
pub mod loader;
pub mod parallel;
pub mod record;
pub mod resolver;
pub mod setup;

pub use derive::{BASE_DERIVE_VARS, base_derive_count, derived_variable_names};
pub use error::{SpeciesRole, SprayError, SprayResult};
pub use loader::{LoadOptions, NAMESPACE, Requirement, load_spray_params, resolve_property, resolve_scalar};
pub use parallel::{LocalGroup, LocalRank, ParallelContext, SerialContext};
pub use record::{FuelProperty, FuelPropertyRecord, FuelScalar, PropertyCoef};
pub use resolver::resolve_species;
pub use setup::{FuelSummary, SetupOptions, SetupSummary, SprayControls, SprayNames, SpraySetup, setup_spray};

/// Number of spatial dimensions of the host solver.
pub const SPACEDIM: usize = if cfg!(feature = "dim2") { 2 } else { 3 };
