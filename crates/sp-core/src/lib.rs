//! sp-core: shared foundation for the spray setup crates.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{SpError, SpResult};
pub use numeric::*;
pub use units::*;
