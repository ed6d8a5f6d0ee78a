//! Thermo model trait and validation helpers.

use crate::error::FluidResult;
use crate::species::SpeciesTable;
use crate::units::EnergyUnit;
use sp_core::numeric::Real;
use sp_core::units::Temperature;

/// Gas-phase thermodynamics as seen by the spray setup.
///
/// Implementations must be thread-safe (Send + Sync) so every rank of a
/// local group can share one model.
pub trait ThermoModel: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Species in mechanism order.
    fn species(&self) -> &SpeciesTable;

    /// Unit of the values returned by [`ThermoModel::enthalpies`].
    fn energy_unit(&self) -> EnergyUnit;

    /// Specific enthalpy of every species at `t`, in table order.
    fn enthalpies(&self, t: Temperature) -> FluidResult<Vec<Real>>;

    fn num_species(&self) -> usize {
        self.species().len()
    }
}

/// Validation helpers for thermo inputs and outputs.
pub(crate) mod validation {
    use crate::error::{FluidError, FluidResult};
    use sp_core::units::{Temperature, kelvin_of};

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: Temperature) -> FluidResult<f64> {
        let t_k = kelvin_of(t);
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(t_k)
    }

    /// Ensure enthalpy is finite (can be negative).
    pub fn validate_enthalpy(h: f64) -> FluidResult<()> {
        if !h.is_finite() {
            return Err(FluidError::NonPhysical {
                what: "enthalpy must be finite",
            });
        }
        Ok(())
    }

    /// Ensure molar mass is positive and finite.
    pub fn validate_molar_mass(w: f64) -> FluidResult<()> {
        if !w.is_finite() || w <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "molar mass must be positive and finite",
            });
        }
        Ok(())
    }
}
