//! Fluid property errors.

use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while building or querying a thermo model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Non-physical values (negative temperature, molar mass, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Species name not present in the table.
    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    /// Mechanism file could not be read or parsed.
    #[error("Mechanism error: {message}")]
    Mechanism { message: String },
}
