//! Names of derived spray diagnostics.

use crate::SPACEDIM;

/// Derived quantities always available, in plot order.
pub const BASE_DERIVE_VARS: [&str; 9] = [
    "spray_mass",      // Total liquid mass in a cell
    "spray_density",   // Liquid mass divided by cell volume
    "spray_num",       // Number of spray droplets in a cell
    "spray_vol",       // Total liquid volume in a cell
    "spray_surf_area", // Total liquid surface area in a cell
    "spray_vol_frac",  // Volume fraction of liquid in cell
    "d10",             // Average diameter
    "d32",             // SMD
    "spray_temp",      // Mass-weighted average temperature
];

const VELOCITY_DERIVE_VARS: [&str; 3] = ["spray_x_vel", "spray_y_vel", "spray_z_vel"];

/// Size of the fixed part of the list (base set plus one velocity per dimension).
pub const fn base_derive_count() -> usize {
    BASE_DERIVE_VARS.len() + SPACEDIM
}

/// Build the derived-variable list.
///
/// Per-fuel mass entries (`spray_mass_<fuel>`) follow the fixed set only when
/// `per_species` is set and more than one fuel is configured.
pub fn derived_variable_names<S: AsRef<str>>(fuel_names: &[S], per_species: bool) -> Vec<String> {
    let mut names: Vec<String> = BASE_DERIVE_VARS
        .iter()
        .chain(&VELOCITY_DERIVE_VARS[..SPACEDIM])
        .map(|s| s.to_string())
        .collect();
    if per_species && fuel_names.len() > 1 {
        names.extend(
            fuel_names
                .iter()
                .map(|fuel| format!("spray_mass_{}", fuel.as_ref())),
        );
    }
    names
}
