//! Loads the demo mechanism shipped with the workspace.

use std::path::Path;

use sp_core::units::k;
use sp_fluids::{EnergyUnit, NasaMechanism, ThermoModel};

fn demo_mech() -> NasaMechanism {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/spray/mech.yaml");
    NasaMechanism::load_yaml(&path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

#[test]
fn demo_mechanism_species_order() {
    let mech = demo_mech();
    assert_eq!(mech.name(), "mech");
    assert_eq!(mech.energy_unit(), EnergyUnit::JoulePerKilogram);
    assert_eq!(mech.num_species(), 4);
    assert_eq!(mech.species().position("O2"), Some(0));
    assert_eq!(mech.species().position("NC12H26"), Some(3));
}

#[test]
fn demo_fuel_enthalpy_is_negative_at_room_temperature() {
    let mech = demo_mech();
    let h = mech.enthalpies(k(300.0)).unwrap();
    assert_eq!(h.len(), 4);
    // Liquid-fuel vapors have large negative formation enthalpy
    assert!(h[2] < -1.0e6, "h(NC10H22) = {}", h[2]);
    assert!(h[3] < -1.0e6, "h(NC12H26) = {}", h[3]);
    // Diatomics sit near zero at 300 K
    assert!(h[0].abs() < 1.0e3);
    assert!(h[1].abs() < 1.0e3);
}
