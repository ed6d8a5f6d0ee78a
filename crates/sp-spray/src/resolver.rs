//! Species resolver: binds fuels to gas-phase species and rebases latent heats.

use tracing::debug;

use sp_core::numeric::{Real, checked_index};
use sp_fluids::{SpeciesTable, ThermoModel};

use crate::SPACEDIM;
use crate::error::{SpeciesRole, SprayError, SprayResult};
use crate::parallel::ParallelContext;
use crate::record::FuelPropertyRecord;
use crate::setup::SprayNames;

fn lookup(
    table: &SpeciesTable,
    fuel: &str,
    species: &str,
    role: SpeciesRole,
) -> SprayResult<usize> {
    table
        .position(species)
        .ok_or_else(|| SprayError::SpeciesNotFound {
            fuel: fuel.to_string(),
            species: species.to_string(),
            role,
        })
}

/// Complete `record` against the gas-phase species of `thermo`.
///
/// With a single gas species every fuel maps to index 0 and names are not
/// checked. The latent heat becomes `ref_latent - h_gas(ref_t)`, with the gas
/// enthalpy converted into the record's energy unit; running this twice gives
/// the same record. On failure `record` is left untouched and `ctx` is
/// aborted.
pub fn resolve_species<const F: usize, T, P>(
    record: &mut FuelPropertyRecord<F>,
    names: &SprayNames<F>,
    thermo: &T,
    body_force: [Real; SPACEDIM],
    ctx: &P,
) -> SprayResult<()>
where
    T: ThermoModel + ?Sized,
    P: ParallelContext + ?Sized,
{
    if let Err(err) = bind_species(record, names, thermo, body_force) {
        ctx.abort();
        return Err(err);
    }
    ctx.barrier()
}

fn bind_species<const F: usize, T>(
    record: &mut FuelPropertyRecord<F>,
    names: &SprayNames<F>,
    thermo: &T,
    body_force: [Real; SPACEDIM],
) -> SprayResult<()>
where
    T: ThermoModel + ?Sized,
{
    let table = thermo.species();
    if table.is_empty() {
        return Err(SprayError::EmptySpeciesTable);
    }

    let mut indx = [None; F];
    let mut dep_indx = [None; F];
    if table.len() == 1 {
        indx = [Some(0); F];
        dep_indx = [Some(0); F];
    } else {
        for i in 0..F {
            let fuel = &names.fuel[i];
            indx[i] = Some(lookup(table, fuel, fuel, SpeciesRole::Fuel)?);
            dep_indx[i] = Some(lookup(table, fuel, &names.dep[i], SpeciesRole::Deposition)?);
        }
    }

    let enthalpies = thermo.enthalpies(record.ref_t)?;
    let factor = thermo.energy_unit().factor_to(record.energy_unit);
    let mut latent = record.ref_latent;
    for i in 0..F {
        let Some(idx) = indx[i] else {
            continue;
        };
        let h = *checked_index(&enthalpies, idx, "gas-phase enthalpy")?;
        latent[i] = record.ref_latent[i] - h * factor;
        debug!(
            fuel = %names.fuel[i],
            species = idx,
            deposition = dep_indx[i].unwrap_or(idx),
            latent = latent[i],
            "resolved spray fuel"
        );
    }

    record.indx = indx;
    record.dep_indx = dep_indx;
    record.latent = latent;
    record.body_force = body_force;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parallel::SerialContext;
    use sp_core::units::k;
    use sp_fluids::{EnergyUnit, FrozenCpThermo};

    fn names<const F: usize>(fuel: [&str; F], dep: [&str; F]) -> SprayNames<F> {
        SprayNames {
            fuel: fuel.map(String::from),
            dep: dep.map(String::from),
            derive_vars: Vec::new(),
        }
    }

    fn record<const F: usize>(ref_latent: [Real; F]) -> FuelPropertyRecord<F> {
        let mut rec = FuelPropertyRecord::<F>::new();
        rec.ref_t = k(300.0);
        rec.ref_latent = ref_latent;
        rec.latent = ref_latent;
        rec.energy_unit = EnergyUnit::ErgPerGram;
        rec
    }

    fn gas() -> FrozenCpThermo {
        FrozenCpThermo::new(300.0, EnergyUnit::JoulePerKilogram)
            .unwrap()
            .with_species("O2", 0.0, 918.0)
            .unwrap()
            .with_species("NC10H22", -1.5e5, 1650.0)
            .unwrap()
            .with_species("NC12H26", -2.0e5, 1650.0)
            .unwrap()
    }

    #[test]
    fn latent_is_rebased_on_gas_enthalpy() {
        let mut rec = record([3.5e9]);
        let n = names(["NC10H22"], ["NC10H22"]);
        resolve_species(&mut rec, &n, &gas(), [0.0; SPACEDIM], &SerialContext).unwrap();

        assert_eq!(rec.indx, [Some(1)]);
        assert_eq!(rec.dep_indx, [Some(1)]);
        // -1.5e5 J/kg is -1.5e9 erg/g
        let expected = 3.5e9 + 1.5e9;
        assert!((rec.latent[0] - expected).abs() < 1e-3 * expected.abs());
        assert_eq!(rec.ref_latent, [3.5e9]);
        assert!(rec.is_resolved());
    }

    #[test]
    fn resolving_twice_is_idempotent() {
        let mut rec = record([3.5e9, 3.6e9]);
        let n = names(["NC10H22", "NC12H26"], ["NC10H22", "NC12H26"]);
        let thermo = gas();
        resolve_species(&mut rec, &n, &thermo, [0.0; SPACEDIM], &SerialContext).unwrap();
        let once = rec.clone();
        resolve_species(&mut rec, &n, &thermo, [0.0; SPACEDIM], &SerialContext).unwrap();
        assert_eq!(rec, once);
    }

    #[test]
    fn deposition_target_may_differ_from_fuel() {
        let mut rec = record([3.5e9]);
        let n = names(["NC12H26"], ["NC10H22"]);
        resolve_species(&mut rec, &n, &gas(), [0.0; SPACEDIM], &SerialContext).unwrap();
        assert_eq!(rec.indx, [Some(2)]);
        assert_eq!(rec.dep_indx, [Some(1)]);
    }

    #[test]
    fn single_species_table_maps_everything_to_zero() {
        let thermo = FrozenCpThermo::new(300.0, EnergyUnit::JoulePerKilogram)
            .unwrap()
            .with_species("N2", 0.0, 1040.0)
            .unwrap();
        let mut rec = record([3.5e9, 3.6e9]);
        let n = names(["NOT_A_GAS", "ALSO_MISSING"], ["X", "Y"]);
        resolve_species(&mut rec, &n, &thermo, [0.0; SPACEDIM], &SerialContext).unwrap();
        assert_eq!(rec.indx, [Some(0); 2]);
        assert_eq!(rec.dep_indx, [Some(0); 2]);
    }

    #[test]
    fn unknown_fuel_names_role_and_species() {
        let mut rec = record([3.5e9]);
        let n = names(["C7H16"], ["C7H16"]);
        let err = resolve_species(&mut rec, &n, &gas(), [0.0; SPACEDIM], &SerialContext).unwrap_err();
        assert!(matches!(
            err,
            SprayError::SpeciesNotFound { ref species, role: SpeciesRole::Fuel, .. } if species == "C7H16"
        ));
        assert!(err.to_string().contains("C7H16"));
        assert!(!rec.is_resolved());
    }

    #[test]
    fn unknown_deposition_species_fails() {
        let mut rec = record([3.5e9]);
        let n = names(["NC10H22"], ["SOOT"]);
        let err = resolve_species(&mut rec, &n, &gas(), [0.0; SPACEDIM], &SerialContext).unwrap_err();
        assert!(matches!(
            err,
            SprayError::SpeciesNotFound { role: SpeciesRole::Deposition, ref fuel, .. } if fuel == "NC10H22"
        ));
    }

    #[test]
    fn empty_table_is_an_error() {
        let thermo = FrozenCpThermo::new(300.0, EnergyUnit::JoulePerKilogram).unwrap();
        let mut rec = record([3.5e9]);
        let n = names(["NC10H22"], ["NC10H22"]);
        assert!(matches!(
            resolve_species(&mut rec, &n, &thermo, [0.0; SPACEDIM], &SerialContext),
            Err(SprayError::EmptySpeciesTable)
        ));
    }

    #[test]
    fn body_force_is_copied() {
        let mut rec = record([3.5e9]);
        let n = names(["NC10H22"], ["NC10H22"]);
        let mut g = [0.0; SPACEDIM];
        g[SPACEDIM - 1] = -981.0;
        resolve_species(&mut rec, &n, &gas(), g, &SerialContext).unwrap();
        assert_eq!(rec.body_force, g);
    }
}
