//! Saha ionization equilibrium of the tracked elements.

use super::fch;
use crate::{
    constants::{EV_TO_ERG, HPLANCK, KBOLTZMANN, LN10, M_ELECTRON, PI},
    data::atomic::{ElementData, NUM_STAGES},
    math::interpolate_clamped,
};
use lazy_static::lazy_static;

lazy_static! {
    /// Constant part of the logarithm of the Saha factor: ln(2 (2 pi me kB/h^2)^3/2)
    static ref LOG_SAHA_FACTOR: fch = fch::ln(2.0)
        + 1.5 * (fch::ln(2.0 * PI) + M_ELECTRON.ln() + KBOLTZMANN.ln() - 2.0 * HPLANCK.ln());

    /// Natural logarithms of the temperatures where atomic partition functions are tabulated.
    static ref PARTITION_FUNCTION_LOG_TEMPERATURES: [fch; 2] =
        [fch::ln(5040.0), fch::ln(10080.0)];
}

/// Natural logarithm of a partition function tabulated as base 10 logarithms at
/// θ = 1 and θ = 0.5, interpolated linearly in ln T and clamped beyond the table.
pub fn log_partition_function(log10_table: &[fch; 2], log_temperature: fch) -> fch {
    interpolate_clamped(
        &PARTITION_FUNCTION_LOG_TEMPERATURES[..],
        &[LN10 * log10_table[0], LN10 * log10_table[1]],
        log_temperature,
    )
}

/// Natural logarithms of the partition functions of all stages of the given element.
pub fn log_partition_functions(element: &ElementData, log_temperature: fch) -> [fch; NUM_STAGES] {
    let mut log_u = [0.0; NUM_STAGES];
    for (stage, value) in log_u.iter_mut().enumerate() {
        *value = log_partition_function(&element.log10_partition_functions[stage], log_temperature);
    }
    log_u
}

/// Computes `ln(N_{j+1}/N_j)` for the consecutive stages I→II, II→III and III→IV.
pub fn log_saha_ratios(
    element: &ElementData,
    temperature: fch,
    log_temperature: fch,
    log_electron_density: fch,
) -> [fch; NUM_STAGES - 1] {
    let log_u = log_partition_functions(element, log_temperature);
    let thermal_energy = KBOLTZMANN * temperature;
    let mut ratios = [0.0; NUM_STAGES - 1];
    for (stage, ratio) in ratios.iter_mut().enumerate() {
        *ratio = *LOG_SAHA_FACTOR - log_electron_density
            - element.ionization_energies[stage] * EV_TO_ERG / thermal_energy
            + 1.5 * log_temperature
            + log_u[stage + 1]
            - log_u[stage];
    }
    ratios
}

/// Ionization and dissociation balance of one element at one depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IonizationBalance {
    /// Natural logarithms of the number densities of stages I-IV.
    pub log_stage_populations: [fch; NUM_STAGES],
    /// Natural logarithm of the total number of particles containing the
    /// element per neutral atom, including the molecular terms.
    pub log_denominator: fch,
}

impl IonizationBalance {
    /// Fraction of the element bound in a molecule with the given inverse Saha term.
    pub fn molecular_fraction(&self, log_inverse_saha: fch) -> fch {
        (log_inverse_saha - self.log_denominator).exp()
    }
}

/// Solves the generalized Saha equation for the four tracked stages of an element.
///
/// `log_molecular_terms` holds `ln(N_AB/N_A,I)` for every molecule the element
/// takes part in, so that ionization and dissociation share one denominator.
pub fn stage_populations(
    element: &ElementData,
    log_element_density: fch,
    temperature: fch,
    log_temperature: fch,
    log_electron_density: fch,
    log_molecular_terms: &[fch],
) -> IonizationBalance {
    let ratios = log_saha_ratios(element, temperature, log_temperature, log_electron_density);

    let mut log_relative = [0.0; NUM_STAGES];
    for stage in 1..NUM_STAGES {
        log_relative[stage] = log_relative[stage - 1] + ratios[stage - 1];
    }

    let log_denominator = log_sum_exp(
        log_relative
            .iter()
            .chain(log_molecular_terms.iter())
            .copied(),
    );

    let mut log_stage_populations = [0.0; NUM_STAGES];
    for stage in 0..NUM_STAGES {
        log_stage_populations[stage] = log_element_density + log_relative[stage] - log_denominator;
    }
    IonizationBalance {
        log_stage_populations,
        log_denominator,
    }
}

/// Computes `ln Σ exp(x)` without overflowing for large arguments.
pub fn log_sum_exp<I: Iterator<Item = fch> + Clone>(values: I) -> fch {
    let max = values.clone().fold(fch::NEG_INFINITY, fch::max);
    if !max.is_finite() {
        return max;
    }
    max + values.map(|value| (value - max).exp()).sum::<fch>().ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, atomic::ELEMENTS};
    use approx::assert_relative_eq;

    #[test]
    fn partition_function_is_clamped_outside_table() {
        let fe = data::element("Fe").unwrap();
        let table = &fe.log10_partition_functions[0];
        assert_relative_eq!(
            log_partition_function(table, fch::ln(3000.0)),
            LN10 * table[0]
        );
        assert_relative_eq!(
            log_partition_function(table, fch::ln(50000.0)),
            LN10 * table[1]
        );
        let mid = log_partition_function(table, fch::ln(5040.0 * fch::sqrt(2.0)));
        assert_relative_eq!(mid, 0.5 * LN10 * (table[0] + table[1]), epsilon = 1e-12);
    }

    #[test]
    fn hydrogen_is_mostly_neutral_in_solar_photosphere() {
        let h = &ELEMENTS[0];
        let temperature: fch = 5800.0;
        let balance = stage_populations(
            h,
            fch::ln(1e17),
            temperature,
            temperature.ln(),
            fch::ln(1e13),
            &[],
        );
        let neutral = balance.log_stage_populations[0].exp();
        let ionized = balance.log_stage_populations[1].exp();
        assert!(ionized / neutral < 1e-2);
        assert!(ionized / neutral > 1e-6);
    }

    #[test]
    fn stage_and_molecular_fractions_sum_to_one() {
        for element in ELEMENTS.iter() {
            for &temperature in &[2500.0, 5800.0, 20000.0, 50000.0] {
                let log_molecular_terms = [-3.0, 1.5];
                let log_density: fch = 10.0;
                let balance = stage_populations(
                    element,
                    log_density,
                    temperature,
                    fch::ln(temperature),
                    fch::ln(1e12),
                    &log_molecular_terms,
                );
                let atomic: fch = balance
                    .log_stage_populations
                    .iter()
                    .map(|&log_n| (log_n - log_density).exp())
                    .sum();
                let molecular: fch = log_molecular_terms
                    .iter()
                    .map(|&term| balance.molecular_fraction(term))
                    .sum();
                assert_relative_eq!(atomic + molecular, 1.0, max_relative = 1e-12);
            }
        }
    }

    #[test]
    fn log_sum_exp_handles_large_arguments() {
        let values = [1000.0, 1000.0];
        assert_relative_eq!(
            log_sum_exp(values.iter().copied()),
            1000.0 + fch::ln(2.0),
            max_relative = 1e-14
        );
    }
}
