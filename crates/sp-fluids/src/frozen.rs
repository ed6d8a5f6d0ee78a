//! Frozen-cp thermo model.
//!
//! Each species carries a reference enthalpy at a reference temperature and a
//! constant specific heat:
//!
//! ```text
//! h(T) ≈ h_ref + cp_frozen * (T - T_ref)
//! ```
//!
//! Useful when only tabulated enthalpies are available, and for checking the
//! spray latent-heat correction against hand-computed values.

use crate::error::{FluidError, FluidResult};
use crate::model::{ThermoModel, validation};
use crate::species::SpeciesTable;
use crate::units::EnergyUnit;
use sp_core::numeric::Real;
use sp_core::units::Temperature;

#[derive(Debug, Clone, Copy, PartialEq)]
struct FrozenEntry {
    h_ref: Real,
    cp_frozen: Real,
}

/// Species table with constant-cp enthalpies around a reference temperature.
#[derive(Debug, Clone)]
pub struct FrozenCpThermo {
    table: SpeciesTable,
    entries: Vec<FrozenEntry>,
    ref_temperature: Real,
    unit: EnergyUnit,
}

impl FrozenCpThermo {
    /// Start an empty model referenced at `ref_t_k`, reporting in `unit`.
    pub fn new(ref_t_k: Real, unit: EnergyUnit) -> FluidResult<Self> {
        if !ref_t_k.is_finite() || ref_t_k <= 0.0 {
            return Err(FluidError::NonPhysical {
                what: "reference temperature must be positive and finite",
            });
        }
        Ok(Self {
            table: SpeciesTable::default(),
            entries: Vec::new(),
            ref_temperature: ref_t_k,
            unit,
        })
    }

    /// Append a species with enthalpy `h_ref` at the reference temperature.
    pub fn with_species(mut self, name: &str, h_ref: Real, cp_frozen: Real) -> FluidResult<Self> {
        validation::validate_enthalpy(h_ref)?;
        if !cp_frozen.is_finite() || cp_frozen < 0.0 {
            return Err(FluidError::NonPhysical {
                what: "cp must be non-negative and finite",
            });
        }
        let mut names = self.table.names().to_vec();
        names.push(name.to_string());
        self.table = SpeciesTable::new(names);
        self.entries.push(FrozenEntry { h_ref, cp_frozen });
        Ok(self)
    }
}

impl ThermoModel for FrozenCpThermo {
    fn name(&self) -> &str {
        "frozen-cp"
    }

    fn species(&self) -> &SpeciesTable {
        &self.table
    }

    fn energy_unit(&self) -> EnergyUnit {
        self.unit
    }

    fn enthalpies(&self, t: Temperature) -> FluidResult<Vec<Real>> {
        let t_k = validation::validate_temperature(t)?;
        Ok(self
            .entries
            .iter()
            .map(|e| e.h_ref + e.cp_frozen * (t_k - self.ref_temperature))
            .collect())
    }
}
