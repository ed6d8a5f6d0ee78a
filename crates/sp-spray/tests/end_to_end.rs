//! Full setup runs: two fuels against tabulated and file-backed gas phases.

use std::path::Path;

use sp_config::{ParamTable, load_inputs};
use sp_core::units::kelvin_of;
use sp_fluids::{EnergyUnit, FrozenCpThermo, NasaMechanism, ThermoModel};
use sp_spray::{
    FuelProperty, LoadOptions, LocalGroup, ParallelContext, PropertyCoef, SPACEDIM, SerialContext,
    SetupOptions, SprayError, base_derive_count, setup_spray,
};

const INPUTS: &str = r#"
particles.fuel_species = NC10H22 NC12H26
particles.fuel_ref_temp = 300
particles.cfl = 0.5
particles.parcel_size = 5
particles.NC10H22_crit_temp = 617.8
particles.NC10H22_boil_temp = 447.27
particles.NC10H22_cp = 2.5e7
particles.NC10H22_latent = 3.5e9
particles.NC10H22_rho = 1.1926 -0.000625 0 0
particles.NC12H26_crit_temp = 658.2
particles.NC12H26_boil_temp = 489.5
particles.NC12H26_cp = 2.2e7
particles.NC12H26_latent = 3.6e9
particles.NC12H26_rho = 0.75
particles.NC12H26_mu = 0.001 0.002
"#;

fn cgs_options() -> SetupOptions {
    let mut body_force = [0.0; SPACEDIM];
    body_force[SPACEDIM - 1] = -981.0;
    SetupOptions {
        load: LoadOptions {
            energy_unit: EnergyUnit::ErgPerGram,
            ..LoadOptions::default()
        },
        body_force,
    }
}

fn gas() -> FrozenCpThermo {
    FrozenCpThermo::new(300.0, EnergyUnit::JoulePerKilogram)
        .unwrap()
        .with_species("N2", 0.0, 1040.0)
        .unwrap()
        .with_species("NC12H26", -2.0e5, 1650.0)
        .unwrap()
        .with_species("NC10H22", -1.5e5, 1650.0)
        .unwrap()
}

#[test]
fn two_fuel_setup_matches_hand_values() {
    let table = ParamTable::from_inputs_str(INPUTS).unwrap();
    let setup = setup_spray::<2, _, _, _>(&table, &gas(), &cgs_options(), &SerialContext).unwrap();
    let rec = setup.record();

    assert_eq!(rec.indx, [Some(2), Some(1)]);
    assert_eq!(rec.dep_indx, rec.indx);
    assert_eq!(rec.rho[0], PropertyCoef::Polynomial([1.1926, -0.000625, 0.0, 0.0]));
    assert_eq!(rec.rho[1], PropertyCoef::Constant(0.75));
    // Two viscosity values is an unusable arity for an optional property
    assert_eq!(rec.mu[1], PropertyCoef::default());
    assert_eq!(
        rec.flat_coefficients(FuelProperty::Density),
        vec![1.1926, -0.000625, 0.0, 0.0, 0.75, 0.0, 0.0, 0.0]
    );

    // J/kg enthalpies land in erg/g
    let expected = [3.5e9 + 1.5e9, 3.6e9 + 2.0e9];
    for (got, want) in rec.latent.iter().zip(expected) {
        assert!((got - want).abs() <= 1e-9 * want, "{got} vs {want}");
    }
    assert_eq!(rec.ref_latent, [3.5e9, 3.6e9]);
    assert_eq!(rec.num_ppp, 5.0);
    assert_eq!(kelvin_of(rec.ref_t), 300.0);
    assert_eq!(rec.body_force[SPACEDIM - 1], -981.0);
    // Inclusive limit: cfl equal to max_cfl is accepted
    assert_eq!(setup.controls().cfl, 0.5);
    assert_eq!(setup.names().dep, setup.names().fuel);

    let derive = &setup.names().derive_vars;
    assert_eq!(derive.len(), base_derive_count() + 2);
    assert_eq!(derive[base_derive_count()], "spray_mass_NC10H22");
}

#[test]
fn every_rank_builds_the_same_setup() {
    let table = ParamTable::from_inputs_str(INPUTS).unwrap();
    let thermo = gas();
    let options = cgs_options();
    let results = LocalGroup::new(4).run(|ctx| setup_spray::<2, _, _, _>(&table, &thermo, &options, ctx));

    assert_eq!(results.len(), 4);
    let first = results[0].as_ref().unwrap();
    for r in &results[1..] {
        assert_eq!(r.as_ref().unwrap(), first);
    }
}

#[test]
fn every_rank_fails_the_same_way() {
    let mut table = ParamTable::from_inputs_str(INPUTS).unwrap();
    table.set("particles.dep_fuel_species", ["NC10H22", "SOOT"]);
    let thermo = gas();
    let options = cgs_options();
    let results = LocalGroup::new(3).run(|ctx| setup_spray::<2, _, _, _>(&table, &thermo, &options, ctx));

    for r in results {
        assert!(matches!(r, Err(SprayError::SpeciesNotFound { ref species, .. }) if species == "SOOT"));
    }
}

#[test]
fn one_failing_rank_releases_its_peers() {
    let table = ParamTable::from_inputs_str(INPUTS).unwrap();
    let without_decane = FrozenCpThermo::new(300.0, EnergyUnit::JoulePerKilogram)
        .unwrap()
        .with_species("N2", 0.0, 1040.0)
        .unwrap()
        .with_species("NC12H26", -2.0e5, 1650.0)
        .unwrap();
    let thermos = [gas(), without_decane, gas()];
    let options = cgs_options();
    let results = LocalGroup::new(3)
        .run(|ctx| setup_spray::<2, _, _, _>(&table, &thermos[ctx.rank()], &options, ctx));

    assert!(matches!(results[0], Err(SprayError::Aborted)));
    assert!(matches!(
        results[1],
        Err(SprayError::SpeciesNotFound { ref species, .. }) if species == "NC10H22"
    ));
    assert!(matches!(results[2], Err(SprayError::Aborted)));
}

#[test]
fn load_failure_on_one_rank_releases_its_peers() {
    let good = ParamTable::from_inputs_str(INPUTS).unwrap();
    let mut bad = good.clone();
    bad.remove("particles.NC12H26_rho");
    let tables = [good.clone(), good, bad];
    let thermo = gas();
    let options = cgs_options();
    let results = LocalGroup::new(3)
        .run(|ctx| setup_spray::<2, _, _, _>(&tables[ctx.rank()], &thermo, &options, ctx));

    assert!(matches!(results[0], Err(SprayError::Aborted)));
    assert!(matches!(results[1], Err(SprayError::Aborted)));
    assert!(matches!(results[2], Err(SprayError::MissingRequired { .. })));
}

#[test]
fn demo_inputs_against_demo_mechanism() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/spray");
    let table = load_inputs(&root.join("inputs")).unwrap();
    let mech = NasaMechanism::load_yaml(&root.join("mech.yaml")).unwrap();

    let setup = setup_spray::<2, _, _, _>(&table, &mech, &cgs_options(), &SerialContext).unwrap();
    let rec = setup.record();
    assert_eq!(rec.indx, [Some(2), Some(3)]);
    assert!(rec.psat[1].is_polynomial());
    assert_eq!(rec.lambda[0], PropertyCoef::Constant(0.11));
    assert_eq!(rec.num_ppp, 10.0);

    // Fuel vapor enthalpy is negative, so the rebased latent heat grows
    let h = mech.enthalpies(rec.ref_t).unwrap();
    let factor = mech.energy_unit().factor_to(EnergyUnit::ErgPerGram);
    for i in 0..2 {
        let want = rec.ref_latent[i] - h[2 + i] * factor;
        assert!((rec.latent[i] - want).abs() <= 1e-9 * want.abs());
        assert!(rec.latent[i] > rec.ref_latent[i]);
    }
}
