//! NASA 7-coefficient gas mechanism.
//!
//! Mechanism files are YAML:
//!
//! ```yaml
//! units: si            # or cgs; unit of reported enthalpy
//! species:
//!   - name: N2
//!     molar_mass: 28.014
//!     t_mid: 1000.0
//!     low:  [a1, a2, a3, a4, a5, a6, a7]
//!     high: [a1, a2, a3, a4, a5, a6, a7]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FluidError, FluidResult};
use crate::model::{ThermoModel, validation};
use crate::species::SpeciesTable;
use crate::units::EnergyUnit;
use sp_core::numeric::Real;
use sp_core::units::{Temperature, constants::R_UNIVERSAL};

/// One temperature range of NASA polynomial coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nasa7(pub [Real; 7]);

impl Nasa7 {
    /// Dimensionless enthalpy h / (R T).
    ///
    /// ```text
    /// h/RT = a1 + a2 T/2 + a3 T²/3 + a4 T³/4 + a5 T⁴/5 + a6/T
    /// ```
    pub fn h_over_rt(&self, t: Real) -> Real {
        let a = &self.0;
        a[0] + t * (a[1] / 2.0 + t * (a[2] / 3.0 + t * (a[3] / 4.0 + t * a[4] / 5.0)))
            + a[5] / t
    }
}

/// Thermo data for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesThermo {
    pub name: String,
    /// Molar mass [kg/kmol]
    pub molar_mass: Real,
    /// Switch temperature between `low` and `high` [K]
    #[serde(default = "default_t_mid")]
    pub t_mid: Real,
    pub low: Nasa7,
    pub high: Nasa7,
}

fn default_t_mid() -> Real {
    1000.0
}

impl SpeciesThermo {
    /// Specific enthalpy [J/kg] at `t_k`.
    pub fn enthalpy_si(&self, t_k: Real) -> Real {
        let poly = if t_k < self.t_mid { &self.low } else { &self.high };
        poly.h_over_rt(t_k) * R_UNIVERSAL / self.molar_mass * t_k
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MechanismFile {
    #[serde(default, with = "unit_label")]
    units: EnergyUnit,
    species: Vec<SpeciesThermo>,
}

mod unit_label {
    use super::EnergyUnit;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(unit: &EnergyUnit, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(match unit {
            EnergyUnit::ErgPerGram => "cgs",
            EnergyUnit::JoulePerKilogram => "si",
        })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<EnergyUnit, D::Error> {
        let label = String::deserialize(d)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// Gas mechanism evaluating enthalpy from NASA polynomials.
#[derive(Debug, Clone)]
pub struct NasaMechanism {
    name: String,
    unit: EnergyUnit,
    table: SpeciesTable,
    thermo: Vec<SpeciesThermo>,
}

impl NasaMechanism {
    /// Build a mechanism reporting enthalpy in `unit`.
    pub fn new(
        name: impl Into<String>,
        unit: EnergyUnit,
        thermo: Vec<SpeciesThermo>,
    ) -> FluidResult<Self> {
        if thermo.is_empty() {
            return Err(FluidError::InvalidArg {
                what: "mechanism must define at least one species",
            });
        }
        for sp in &thermo {
            validation::validate_molar_mass(sp.molar_mass)?;
            if !sp.t_mid.is_finite() || sp.t_mid <= 0.0 {
                return Err(FluidError::NonPhysical {
                    what: "t_mid must be positive and finite",
                });
            }
        }
        let table = thermo.iter().map(|sp| sp.name.clone()).collect();
        Ok(Self {
            name: name.into(),
            unit,
            table,
            thermo,
        })
    }

    pub fn from_yaml_str(name: impl Into<String>, text: &str) -> FluidResult<Self> {
        let file: MechanismFile =
            serde_yaml::from_str(text).map_err(|e| FluidError::Mechanism {
                message: e.to_string(),
            })?;
        Self::new(name, file.units, file.species)
    }

    pub fn load_yaml(path: &Path) -> FluidResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| FluidError::Mechanism {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mechanism")
            .to_string();
        Self::from_yaml_str(name, &text)
    }

    pub fn species_thermo(&self, name: &str) -> FluidResult<&SpeciesThermo> {
        self.table
            .position(name)
            .map(|i| &self.thermo[i])
            .ok_or_else(|| FluidError::UnknownSpecies {
                name: name.to_string(),
            })
    }
}

impl ThermoModel for NasaMechanism {
    fn name(&self) -> &str {
        &self.name
    }

    fn species(&self) -> &SpeciesTable {
        &self.table
    }

    fn energy_unit(&self) -> EnergyUnit {
        self.unit
    }

    fn enthalpies(&self, t: Temperature) -> FluidResult<Vec<Real>> {
        let t_k = validation::validate_temperature(t)?;
        let to_unit = EnergyUnit::JoulePerKilogram.factor_to(self.unit);
        self.thermo
            .iter()
            .map(|sp| {
                let h = sp.enthalpy_si(t_k) * to_unit;
                validation::validate_enthalpy(h)?;
                Ok(h)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sp_core::numeric::{Tolerances, nearly_equal};
    use sp_core::units::k;

    // GRI-Mech 3.0 N2 coefficients
    const N2_LOW: [Real; 7] = [
        3.298677,
        1.4082404e-3,
        -3.963222e-6,
        5.641515e-9,
        -2.444854e-12,
        -1020.8999,
        3.950372,
    ];
    const N2_HIGH: [Real; 7] = [
        2.92664,
        1.4879768e-3,
        -5.68476e-7,
        1.0097038e-10,
        -6.753351e-15,
        -922.7977,
        5.980528,
    ];

    fn n2() -> SpeciesThermo {
        SpeciesThermo {
            name: "N2".to_string(),
            molar_mass: 28.014,
            t_mid: 1000.0,
            low: Nasa7(N2_LOW),
            high: Nasa7(N2_HIGH),
        }
    }

    #[test]
    fn n2_enthalpy_near_zero_at_standard_state() {
        // Formation enthalpy of N2 is zero at 298.15 K
        let h = n2().enthalpy_si(298.15);
        assert!(h.abs() < 100.0, "h(298.15) = {h}");
    }

    #[test]
    fn constant_cp_polynomial_gives_linear_enthalpy() {
        // a1 only: h = a1 R T / W
        let sp = SpeciesThermo {
            name: "X".to_string(),
            molar_mass: 10.0,
            t_mid: 1000.0,
            low: Nasa7([2.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
            high: Nasa7([2.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]),
        };
        let expected = 2.5 * R_UNIVERSAL / 10.0 * 400.0;
        assert!(nearly_equal(sp.enthalpy_si(400.0), expected, Tolerances::default()));
    }

    #[test]
    fn cgs_mechanism_scales_by_1e4() {
        let si = NasaMechanism::new("si", EnergyUnit::JoulePerKilogram, vec![n2()]).unwrap();
        let cgs = NasaMechanism::new("cgs", EnergyUnit::ErgPerGram, vec![n2()]).unwrap();
        let h_si = si.enthalpies(k(500.0)).unwrap()[0];
        let h_cgs = cgs.enthalpies(k(500.0)).unwrap()[0];
        assert!(nearly_equal(h_cgs, h_si * 1.0e4, Tolerances::default()));
    }

    #[test]
    fn rejects_non_physical_input() {
        assert!(NasaMechanism::new("empty", EnergyUnit::JoulePerKilogram, vec![]).is_err());

        let mut bad = n2();
        bad.molar_mass = -1.0;
        assert!(NasaMechanism::new("bad", EnergyUnit::JoulePerKilogram, vec![bad]).is_err());

        let mech = NasaMechanism::new("ok", EnergyUnit::JoulePerKilogram, vec![n2()]).unwrap();
        assert!(mech.enthalpies(k(0.0)).is_err());
    }

    #[test]
    fn yaml_mechanism_parses() {
        let yaml = r#"
units: cgs
species:
  - name: N2
    molar_mass: 28.014
    low:  [3.298677, 1.4082404e-3, -3.963222e-6, 5.641515e-9, -2.444854e-12, -1020.8999, 3.950372]
    high: [2.92664, 1.4879768e-3, -5.68476e-7, 1.0097038e-10, -6.753351e-15, -922.7977, 5.980528]
"#;
        let mech = NasaMechanism::from_yaml_str("test", yaml).unwrap();
        assert_eq!(mech.energy_unit(), EnergyUnit::ErgPerGram);
        assert_eq!(mech.species().names(), ["N2"]);
        assert_eq!(mech.species_thermo("N2").unwrap().t_mid, 1000.0);
        assert!(matches!(
            mech.species_thermo("O2"),
            Err(FluidError::UnknownSpecies { .. })
        ));
    }

    #[test]
    fn yaml_rejects_unknown_units() {
        let yaml = "units: furlongs\nspecies: []\n";
        assert!(matches!(
            NasaMechanism::from_yaml_str("bad", yaml),
            Err(FluidError::Mechanism { .. })
        ));
    }
}
