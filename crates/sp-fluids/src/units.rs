//! Energy unit conventions.
//!
//! Gas-phase services report specific enthalpy in either CGS (erg/g) or SI
//! (J/kg); the spray record carries its own convention and converts on read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unit of specific energy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyUnit {
    /// erg/g (CGS)
    ErgPerGram,
    /// J/kg (SI)
    #[default]
    JoulePerKilogram,
}

impl EnergyUnit {
    /// Multiplier taking a value in this unit to J/kg.
    pub fn to_si(self) -> f64 {
        match self {
            // 1 erg/g = 1e-7 J / 1e-3 kg
            EnergyUnit::ErgPerGram => 1.0e-4,
            EnergyUnit::JoulePerKilogram => 1.0,
        }
    }

    /// Multiplier converting a value in `self` into `target`.
    pub fn factor_to(self, target: EnergyUnit) -> f64 {
        self.to_si() / target.to_si()
    }

    pub fn symbol(self) -> &'static str {
        match self {
            EnergyUnit::ErgPerGram => "erg/g",
            EnergyUnit::JoulePerKilogram => "J/kg",
        }
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for EnergyUnit {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cgs" | "erg/g" | "erg_per_gram" => Ok(EnergyUnit::ErgPerGram),
            "si" | "j/kg" | "joule_per_kilogram" => Ok(EnergyUnit::JoulePerKilogram),
            _ => Err("unknown energy unit (expected cgs or si)"),
        }
    }
}
