//! Flux-constancy temperature correction by Λ-iteration over wavelength bins.
//!
//! The spectrum is split into a handful of broad bins, each with its own gray
//! opacity level relative to the Rosseland mean and its own thermalization
//! parameter ε. For every bin the mean intensity is computed from the binned
//! Planck function with the exponential-integral Λ-operator, and the radiative
//! equilibrium imbalance between absorbed and emitted energy is converted into
//! a temperature change through the binned dB/dT.

use crate::{
    depth::{fdp, DualArray, TauGrid},
    error::{AtmosphereError, AtmosphereResult},
    math::{exponential_integral_e1, exponential_integral_e2, interpolate_clamped},
    radiation::planck::{d_planck_d_temperature, planck},
};
use ndarray::Array1;
use rayon::prelude::*;

/// Effective temperature up to which the bins for cool stars are used [K].
pub const COOL_BIN_TEFF_LIMIT: fdp = 6500.0;
/// Rosseland optical depth below which the mean intensity differs from the Planck function.
pub const THERMALIZATION_DEPTH: fdp = 66.67;
/// Spacing of the wavelength sub-grid used for binning the Planck function, in dex.
pub const PLANCK_BIN_LOG10_STEP: fdp = 0.1;

const MIN_BIN_WAVELENGTH_NM: fdp = 30.0;
const MAX_BIN_WAVELENGTH_NM: fdp = 1e6;

/// Number of fine sub-steps per depth interval for the Λ-operator integration.
const E1_FINENESS: fdp = 3.0;
/// Number of coarse depth intervals the Λ-operator integrates over in each direction.
const E1_RANGE: fdp = 36.0;
/// E₁ at the bottom of the grid must be below this for the Λ-operator to be applied.
const E1_BOTTOM_THRESHOLD: fdp = 1e-14;

/// A wavelength bin with a gray opacity level and thermalization parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GrayBin {
    /// Lower wavelength edge [cm].
    pub lower_wavelength: fdp,
    /// Upper wavelength edge [cm].
    pub upper_wavelength: fdp,
    /// Opacity of the bin relative to the Rosseland mean.
    pub gray_level: fdp,
    /// Thermal photon destruction probability.
    pub epsilon: fdp,
}

const COOL_BIN_EDGES_NM: [fdp; 12] = [
    MIN_BIN_WAVELENGTH_NM,
    91.1,
    158.5,
    364.0,
    820.4,
    1600.0,
    3.0e3,
    1.0e4,
    3.3e4,
    1.0e5,
    3.3e5,
    MAX_BIN_WAVELENGTH_NM,
];
const COOL_GRAY_LEVELS: [fdp; 11] = [
    1000.0, 100.0, 5.0, 1.0, 0.5, 0.1, 3.0, 10.0, 30.0, 100.0, 1000.0,
];
const COOL_EPSILONS: [fdp; 11] = [
    0.50, 0.50, 0.50, 0.99, 0.99, 0.99, 0.99, 0.99, 0.99, 0.99, 0.99,
];

const HOT_BIN_EDGES_NM: [fdp; 6] = [
    MIN_BIN_WAVELENGTH_NM,
    91.1,
    364.0,
    820.4,
    1458.0,
    MAX_BIN_WAVELENGTH_NM,
];
const HOT_GRAY_LEVELS: [fdp; 5] = [100.0, 10.0, 2.0, 1.0, 1.0];
const HOT_EPSILONS: [fdp; 5] = [0.9, 0.9, 0.9, 0.9, 0.9];

/// Returns the wavelength bins appropriate for the given effective temperature.
pub fn gray_bins(teff: fdp) -> Vec<GrayBin> {
    let (edges, levels, epsilons): (&[fdp], &[fdp], &[fdp]) = if teff <= COOL_BIN_TEFF_LIMIT {
        (&COOL_BIN_EDGES_NM, &COOL_GRAY_LEVELS, &COOL_EPSILONS)
    } else {
        (&HOT_BIN_EDGES_NM, &HOT_GRAY_LEVELS, &HOT_EPSILONS)
    };
    levels
        .iter()
        .zip(epsilons.iter())
        .enumerate()
        .map(|(i, (&gray_level, &epsilon))| GrayBin {
            lower_wavelength: edges[i] * crate::constants::NM_TO_CM,
            upper_wavelength: edges[i + 1] * crate::constants::NM_TO_CM,
            gray_level,
            epsilon,
        })
        .collect()
}

/// Integrates B_λ and dB_λ/dT over the given wavelength range [cm] at every depth
/// with the trapezoidal rule on a logarithmically spaced sub-grid.
///
/// Returns the binned Planck function and the binned temperature derivative.
pub fn planck_binner(
    temperature: &DualArray,
    lower_wavelength: fdp,
    upper_wavelength: fdp,
) -> (Array1<fdp>, Array1<fdp>) {
    let log10_lower = lower_wavelength.log10();
    let log10_upper = upper_wavelength.log10();
    let num_points =
        usize::max(2, ((log10_upper - log10_lower) / PLANCK_BIN_LOG10_STEP).ceil() as usize + 1);
    let step = (log10_upper - log10_lower) / ((num_points - 1) as fdp);
    let wavelengths: Vec<fdp> = (0..num_points)
        .map(|i| fdp::powf(10.0, log10_lower + (i as fdp) * step))
        .collect();

    let num_depths = temperature.len();
    let mut planck_bin = Array1::zeros(num_depths);
    let mut derivative_bin = Array1::zeros(num_depths);
    for depth in 0..num_depths {
        let temp = temperature.linear_at(depth);
        let mut planck_sum = 0.0;
        let mut derivative_sum = 0.0;
        let mut last_planck = planck(temp, wavelengths[0]);
        let mut last_derivative = d_planck_d_temperature(temp, wavelengths[0]);
        for i in 1..num_points {
            let delta = wavelengths[i] - wavelengths[i - 1];
            let this_planck = planck(temp, wavelengths[i]);
            let this_derivative = d_planck_d_temperature(temp, wavelengths[i]);
            planck_sum += 0.5 * (last_planck + this_planck) * delta;
            derivative_sum += 0.5 * (last_derivative + this_derivative) * delta;
            last_planck = this_planck;
            last_derivative = this_derivative;
        }
        planck_bin[depth] = planck_sum;
        derivative_bin[depth] = derivative_sum;
    }
    (planck_bin, derivative_bin)
}

/// Computes the mean intensity J at every depth from the given source
/// function values with the Λ-operator `J(τ) = ½ ∫ S(t) E₁(|t − τ|) dt`.
///
/// The optical depths are the Rosseland depths scaled by `gray_level`. The
/// integral is evaluated with the trapezoidal rule on a sub-grid three times
/// finer in ln τ than the depth grid, separately above and below each depth.
/// Below the thermalization depth, or where E₁ has not become negligible by
/// the bottom of the grid, J equals the source function.
pub fn mean_intensity(
    tau: &DualArray,
    source: &Array1<fdp>,
    gray_level: fdp,
) -> AtmosphereResult<Array1<fdp>> {
    let num_depths = tau.len();
    if source.len() != num_depths || num_depths < 2 {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            num_depths as fdp,
            "source function and optical depths must have equal lengths of at least two",
        ));
    }

    let mut scaled_tau = Vec::with_capacity(num_depths);
    scaled_tau.push(tau.linear_at(0) * gray_level);
    for i in 1..num_depths {
        let previous = scaled_tau[i - 1];
        scaled_tau.push(previous + gray_level * (tau.linear_at(i) - tau.linear_at(i - 1)));
    }
    let log_scaled_tau: Vec<fdp> = scaled_tau.iter().map(|t| t.ln()).collect();
    let mut log_source = Vec::with_capacity(num_depths);
    for (depth, &value) in source.iter().enumerate() {
        log_source.push(crate::error::ensure_positive("source function", value, Some(depth))?.ln());
    }

    let top_log_tau = log_scaled_tau[0];
    let bottom_log_tau = log_scaled_tau[num_depths - 1];
    let log_step = (bottom_log_tau - top_log_tau) / (num_depths as fdp) / E1_FINENESS;
    let num_steps = (E1_RANGE * E1_FINENESS) as usize;

    let source_at = |log_t: fdp| interpolate_clamped(&log_scaled_tau, &log_source, log_t).exp();

    let mut jay = source.clone();
    for depth in 0..num_depths {
        if tau.linear_at(depth) > THERMALIZATION_DEPTH {
            continue;
        }
        let this_tau = scaled_tau[depth];
        let this_log_tau = log_scaled_tau[depth];
        if exponential_integral_e1(scaled_tau[num_depths - 1] - this_tau) >= E1_BOTTOM_THRESHOLD {
            continue;
        }

        // Overlying layers
        let mut last_t = (this_log_tau - log_step).exp();
        let mut above = source[depth] * (1.0 - exponential_integral_e2(this_tau - last_t));
        let mut last_integrand =
            exponential_integral_e1(this_tau - last_t) * source_at(this_log_tau - log_step);
        for i in 2..num_steps - 1 {
            let log_t = this_log_tau - (i as fdp) * log_step;
            if log_t <= top_log_tau {
                break;
            }
            let t = log_t.exp();
            let integrand = exponential_integral_e1(this_tau - t) * source_at(log_t);
            above += 0.5 * (last_integrand + integrand) * (last_t - t);
            last_integrand = integrand;
            last_t = t;
        }

        // Underlying layers
        let mut last_t = (this_log_tau + log_step).exp();
        let mut below = source[depth] * (1.0 - exponential_integral_e2(last_t - this_tau));
        let mut last_integrand =
            exponential_integral_e1(last_t - this_tau) * source_at(this_log_tau + log_step);
        for i in 2..num_steps - 1 {
            let log_t = this_log_tau + (i as fdp) * log_step;
            if log_t >= bottom_log_tau {
                break;
            }
            let t = log_t.exp();
            let integrand = exponential_integral_e1(t - this_tau) * source_at(log_t);
            below += 0.5 * (last_integrand + integrand) * (t - last_t);
            last_integrand = integrand;
            last_t = t;
        }

        jay[depth] = 0.5 * (above + below);
    }
    Ok(jay)
}

/// Computes a corrected temperature structure that moves the atmosphere
/// towards radiative equilibrium.
///
/// The correction at each depth is `ΔT = (heat − cool)/Σ κ dB/dT · exp(τ₀ − τ)`,
/// where the heating and cooling terms are summed over the gray bins.
pub fn correct_temperature(
    tau_grid: &TauGrid,
    teff: fdp,
    temperature: &DualArray,
    rosseland_opacity: &DualArray,
) -> AtmosphereResult<DualArray> {
    let num_depths = tau_grid.num_depths();
    if temperature.len() != num_depths || rosseland_opacity.len() != num_depths {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            num_depths as fdp,
            "structure arrays have inconsistent lengths",
        ));
    }
    let tau = tau_grid.tau();

    let bin_terms = gray_bins(teff)
        .into_par_iter()
        .map(|bin| {
            let (planck_bin, derivative_bin) =
                planck_binner(temperature, bin.lower_wavelength, bin.upper_wavelength);
            let jay_bin = mean_intensity(tau, &planck_bin, bin.gray_level)?;
            let kappa = rosseland_opacity.linear() * bin.gray_level;
            let cool = &kappa
                * &(&planck_bin * bin.epsilon + &jay_bin * (1.0 - bin.epsilon));
            let heat = &kappa * &jay_bin;
            let denominator = &kappa * &derivative_bin;
            Ok((cool, heat, denominator))
        })
        .collect::<AtmosphereResult<Vec<_>>>()?;

    let mut cool = Array1::<fdp>::zeros(num_depths);
    let mut heat = Array1::<fdp>::zeros(num_depths);
    let mut denominator = Array1::<fdp>::zeros(num_depths);
    for (bin_cool, bin_heat, bin_denominator) in bin_terms {
        cool += &bin_cool;
        heat += &bin_heat;
        denominator += &bin_denominator;
    }

    let top_tau = tau.linear_at(0);
    let corrected = Array1::from_shape_fn(num_depths, |depth| {
        let imbalance = heat[depth] - cool[depth];
        let delta_temperature = imbalance * fdp::exp(top_tau - tau.linear_at(depth))
            / denominator[depth];
        temperature.linear_at(depth) + delta_temperature
    });
    DualArray::from_linear("temperature", corrected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PI, STEFBOLTZ};
    use approx::assert_relative_eq;

    #[test]
    fn bins_cover_the_spectrum_contiguously() {
        for &teff in &[4000.0, 6500.0, 9000.0] {
            let bins = gray_bins(teff);
            for pair in bins.windows(2) {
                assert_eq!(pair[0].upper_wavelength, pair[1].lower_wavelength);
            }
            assert!(bins.iter().all(|bin| bin.epsilon > 0.0 && bin.epsilon <= 1.0));
        }
        assert_eq!(gray_bins(6500.0).len(), 11);
        assert_eq!(gray_bins(6501.0).len(), 5);
    }

    #[test]
    fn binned_planck_function_sums_to_bolometric() {
        let temperature = DualArray::constant("temperature", 2, 5778.0).unwrap();
        let total: fdp = gray_bins(5778.0)
            .iter()
            .map(|bin| planck_binner(&temperature, bin.lower_wavelength, bin.upper_wavelength).0[0])
            .sum();
        assert_relative_eq!(
            PI * total,
            STEFBOLTZ * fdp::powi(5778.0, 4),
            max_relative = 0.02
        );
    }

    #[test]
    fn mean_intensity_of_constant_source_is_halved_at_surface() {
        let grid = TauGrid::default();
        let source = Array1::from_elem(grid.num_depths(), 1.0);
        let jay = mean_intensity(grid.tau(), &source, 1.0).unwrap();
        assert!(jay[0] > 0.3 && jay[0] < 0.6);
        let unit_depth = grid.index_closest_to(1.0);
        assert!(jay[unit_depth] > 0.85 && jay[unit_depth] < 1.0);
        assert_relative_eq!(jay[grid.num_depths() - 1], 1.0);
    }

    #[test]
    fn isothermal_atmosphere_is_heated_near_the_surface_only_weakly() {
        let grid = TauGrid::default();
        let temperature = DualArray::constant("temperature", grid.num_depths(), 5000.0).unwrap();
        let kappa = DualArray::constant("opacity", grid.num_depths(), 1.0).unwrap();
        let corrected = correct_temperature(&grid, 5000.0, &temperature, &kappa).unwrap();
        let last = grid.num_depths() - 1;
        assert_relative_eq!(corrected.linear_at(last), 5000.0, max_relative = 1e-6);
        assert!(corrected.linear_at(0) < 5000.0);
    }
}
