//! Mass density and mean molecular weight.

use super::fch;
use crate::{
    constants::{AMU, KBOLTZMANN},
    data::atomic::{ELEMENTS, NUM_ELEMENTS},
    depth::DualArray,
    error::AtmosphereResult,
    math::interpolate_clamped,
};
use lazy_static::lazy_static;
use ndarray::{Array1, Array2};

/// Mean molecular weight of cool, molecular gas.
pub const COOL_MEAN_MOLECULAR_WEIGHT: fch = 1.3;
/// Mean molecular weight of hot, ionized gas.
pub const HOT_MEAN_MOLECULAR_WEIGHT: fch = 0.62;
/// Temperature below which the cool mean molecular weight applies [K].
pub const COOL_TEMPERATURE_LIMIT: fch = 4000.0;
/// Temperature above which the hot mean molecular weight applies [K].
pub const HOT_TEMPERATURE_LIMIT: fch = 10000.0;

lazy_static! {
    static ref LOG_TEMPERATURE_LIMITS: [fch; 2] =
        [COOL_TEMPERATURE_LIMIT.ln(), HOT_TEMPERATURE_LIMIT.ln()];
    static ref LOG_MEAN_MOLECULAR_WEIGHTS: [fch; 2] =
        [COOL_MEAN_MOLECULAR_WEIGHT.ln(), HOT_MEAN_MOLECULAR_WEIGHT.ln()];
}

/// Analytic mean molecular weight used before any chemistry has been solved,
/// going from 1.3 for cool gas to 0.62 for hot gas linearly in ln T.
pub fn analytic_mean_molecular_weight(temperature: &DualArray) -> AtmosphereResult<DualArray> {
    DualArray::from_log(
        "mean molecular weight",
        temperature.log().mapv(|log_temperature| {
            interpolate_clamped(
                &LOG_TEMPERATURE_LIMITS[..],
                &LOG_MEAN_MOLECULAR_WEIGHTS[..],
                log_temperature,
            )
        }),
    )
}

/// Mass density from the ideal gas law, `ρ = P μ amu/(kT)`.
pub fn mass_density_from_pressure(
    gas_pressure: &DualArray,
    temperature: &DualArray,
    mean_molecular_weight: &DualArray,
) -> AtmosphereResult<DualArray> {
    let log_scale = AMU.ln() - KBOLTZMANN.ln();
    DualArray::from_log(
        "mass density",
        gas_pressure.log() - temperature.log() + mean_molecular_weight.log() + log_scale,
    )
}

/// Mass density summed over the total number densities of all elements,
/// `ρ = Σ_z N_z m_z amu`.
///
/// `log_element_densities` is indexed as `[element][depth]`.
pub fn mass_density_from_populations(
    log_element_densities: &Array2<fch>,
) -> AtmosphereResult<DualArray> {
    let num_depths = log_element_densities.ncols();
    let linear = Array1::from_shape_fn(num_depths, |depth| {
        (0..NUM_ELEMENTS)
            .map(|idx| log_element_densities[[idx, depth]].exp() * ELEMENTS[idx].mass * AMU)
            .sum()
    });
    DualArray::from_linear("mass density", linear)
}

/// Mean molecular weight of the free particles, `μ = ρ/(amu N)`.
///
/// Each diatomic molecule binds two nuclei into one particle, so the count is
/// `N = Σ_z N_z - Σ_m N_m + N_e`, never falling below half the nuclei.
///
/// `log_molecule_populations` is indexed as `[molecule][depth]`.
pub fn mean_molecular_weight(
    mass_density: &DualArray,
    log_element_densities: &Array2<fch>,
    log_molecule_populations: &Array2<fch>,
    electron_density: &DualArray,
) -> AtmosphereResult<DualArray> {
    let num_depths = mass_density.len();
    let linear = Array1::from_shape_fn(num_depths, |depth| {
        let num_nuclei: fch = (0..NUM_ELEMENTS)
            .map(|idx| log_element_densities[[idx, depth]].exp())
            .sum();
        let num_molecules: fch = log_molecule_populations
            .column(depth)
            .iter()
            .map(|log_population| log_population.exp())
            .sum();
        let num_heavy_particles = fch::max(num_nuclei - num_molecules, 0.5 * num_nuclei);
        mass_density.linear_at(depth)
            / (AMU * (num_heavy_particles + electron_density.linear_at(depth)))
    });
    DualArray::from_linear("mean molecular weight", linear)
}
