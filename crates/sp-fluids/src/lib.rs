//! sp-fluids: gas-phase species tables and enthalpy evaluation.
//!
//! Provides:
//! - Ordered species-name tables
//! - Energy unit conventions (CGS erg/g, SI J/kg)
//! - `ThermoModel` trait for per-species enthalpy at a temperature
//! - NASA 7-coefficient mechanism backend loaded from YAML
//! - Frozen-cp backend for tabulated reference enthalpies
//!
//! # Architecture
//!
//! The spray setup only needs two things from the gas phase: the ordered list
//! of species names and `h_i(T)` for every species. `ThermoModel` isolates that
//! contract so the caller can plug in any equation-of-state service.
//!
//! # Example
//!
//! ```no_run
//! use sp_core::units::k;
//! use sp_fluids::{NasaMechanism, ThermoModel};
//!
//! let mech = NasaMechanism::load_yaml(std::path::Path::new("mech.yaml")).unwrap();
//! let h = mech.enthalpies(k(300.0)).unwrap();
//! println!("{} species, h[0] = {} J/kg", mech.species().len(), h[0]);
//! ```

pub mod error;
pub mod frozen;
pub mod mechanism;
pub mod model;
pub mod species;
pub mod units;

// Re-exports for ergonomics
pub use error::{FluidError, FluidResult};
pub use frozen::FrozenCpThermo;
pub use mechanism::{NasaMechanism, Nasa7, SpeciesThermo};
pub use model::ThermoModel;
pub use species::SpeciesTable;
pub use units::EnergyUnit;
