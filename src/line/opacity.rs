//! Lower level populations and line extinction.

use super::{descriptor::LineDescriptor, fln, grid::LineGrid};
use crate::{
    chemistry::{composition::Composition, ionization::log_partition_functions, ChemicalState},
    constants::{
        CLIGHT, EV_TO_ERG, HPLANCK, KBOLTZMANN, LN10, LN_CLIGHT, LN_M_ELECTRON, LN_Q_ELECTRON,
        PI,
    },
    data::atomic::ELEMENTS,
    depth::DualArray,
    error::{ensure_finite, AtmosphereError, AtmosphereResult},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Natural logarithm of the population of the line's ionization stage,
/// rescaled from the chemical equilibrium to the line's own abundance.
pub fn log_line_stage_population(
    line: &LineDescriptor,
    chemistry: &ChemicalState,
    composition: &Composition,
) -> Array1<fln> {
    let abundance_shift =
        LN10 * (line.abundance() - composition.base_abundance(line.element_idx()));
    chemistry
        .log_stage_population(line.element_idx(), line.stage())
        .mapv(|log_population| log_population + abundance_shift)
}

/// Computes the natural logarithm of the number density [1/cm^3] of the lower
/// level of the line from the Boltzmann distribution within its stage,
/// `ln N_l = ln N_stage − χ_l/(kT) + ln g_l − ln U`.
///
/// The partition function is never taken below the ground state statistical
/// weight of the stage.
pub fn level_population(
    line: &LineDescriptor,
    log_stage_population: ArrayView1<fln>,
    temperature: &DualArray,
) -> AtmosphereResult<Array1<fln>> {
    let num_depths = temperature.len();
    if log_stage_population.len() != num_depths {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            log_stage_population.len() as fln,
            "stage population and temperature have inconsistent lengths",
        ));
    }
    let element = &ELEMENTS[line.element_idx()];
    let excitation = line.excitation_energy() * EV_TO_ERG / KBOLTZMANN;
    let log_lower_weight = line.lower_weight().ln();
    let log_min_partition_function = line.stage_weight()?.ln();

    let mut log_population = Array1::zeros(num_depths);
    for depth in 0..num_depths {
        let log_u = log_partition_functions(element, temperature.log_at(depth))[line.stage()]
            .max(log_min_partition_function);
        log_population[depth] = ensure_finite(
            "lower level population",
            log_stage_population[depth] - excitation / temperature.linear_at(depth)
                + log_lower_weight
                - log_u,
            Some(depth),
        )?;
    }
    Ok(log_population)
}

/// Computes the line mass extinction coefficient ln κ_l [cm^2/g] at every
/// grid point and depth, indexed as `[point][depth]`, from the profile φ_ν
/// given in the same layout.
///
/// `κ_l = (π e² f/(m_e c)) (1 − exp(−hc/(λkT))) N_l φ_ν / ρ`, scaled by `10^log10_fudge`.
pub fn line_opacity(
    line: &LineDescriptor,
    grid: &LineGrid,
    profile: &Array2<fln>,
    log_level_population: &Array1<fln>,
    temperature: &DualArray,
    mass_density: &DualArray,
    log10_fudge: fln,
) -> AtmosphereResult<Array2<fln>> {
    let num_depths = temperature.len();
    if profile.dim() != (grid.num_points(), num_depths)
        || log_level_population.len() != num_depths
        || mass_density.len() != num_depths
    {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            num_depths as fln,
            "line profile, populations and structure have inconsistent shapes",
        ));
    }
    let log_prefactor = LN10 * line.log_oscillator_strength() + PI.ln() + 2.0 * *LN_Q_ELECTRON
        - *LN_M_ELECTRON
        - *LN_CLIGHT;
    let photon_temperature = HPLANCK * CLIGHT / (KBOLTZMANN * line.wavelength());
    let log_fudge = LN10 * log10_fudge;

    let mut log_opacity = Array2::zeros(profile.dim());
    for depth in 0..num_depths {
        let log_stimulated_emission =
            fln::ln_1p(-fln::exp(-photon_temperature / temperature.linear_at(depth)));
        let depth_term = log_prefactor + log_stimulated_emission + log_level_population[depth]
            - mass_density.log_at(depth)
            + log_fudge;
        for point in 0..grid.num_points() {
            log_opacity[[point, depth]] = depth_term + profile[[point, depth]].ln();
        }
    }
    Ok(log_opacity)
}
