//! Radiative transfer through a computed atmosphere.

pub mod angles;
pub mod flux;
pub mod formal_solution;
pub mod planck;

use crate::{
    constants::{CM_TO_NM, NM_TO_CM},
    depth::{DualArray, TauGrid},
    error::{AtmosphereError, AtmosphereResult},
    io::Verbosity,
};
use angles::QuadratureAngles;
use formal_solution::{formal_solution, SourceFunction};
use indicatif::ParallelProgressIterator;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rayon::prelude::*;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for radiation quantities.
#[allow(non_camel_case_types)]
pub type frd = f64;

/// Strictly ascending set of wavelengths [cm].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct WavelengthGrid {
    wavelengths: Array1<frd>,
}

impl WavelengthGrid {
    pub const DEFAULT_NUM_WAVELENGTHS: usize = 250;
    pub const DEFAULT_MIN_WAVELENGTH_NM: frd = 300.0;
    pub const DEFAULT_MAX_WAVELENGTH_NM: frd = 1000.0;

    /// Creates a grid of wavelengths spaced uniformly in ln λ, including both
    /// of the given end points [nm].
    pub fn log_uniform(
        num_wavelengths: usize,
        min_wavelength_nm: frd,
        max_wavelength_nm: frd,
    ) -> AtmosphereResult<Self> {
        if num_wavelengths < 2 {
            return Err(AtmosphereError::invalid_parameter(
                "num_wavelengths",
                num_wavelengths as frd,
                "at least two wavelengths are required",
            ));
        }
        if !(min_wavelength_nm > 0.0 && max_wavelength_nm > min_wavelength_nm)
            || !max_wavelength_nm.is_finite()
        {
            return Err(AtmosphereError::invalid_parameter(
                "max_wavelength",
                max_wavelength_nm,
                format!(
                    "must be finite and exceed the positive lower bound {}",
                    min_wavelength_nm
                ),
            ));
        }
        let log_min = (min_wavelength_nm * NM_TO_CM).ln();
        let log_max = (max_wavelength_nm * NM_TO_CM).ln();
        let step = (log_max - log_min) / ((num_wavelengths - 1) as frd);
        Ok(Self {
            wavelengths: Array1::from_shape_fn(num_wavelengths, |i| {
                frd::exp(log_min + (i as frd) * step)
            }),
        })
    }

    /// Wraps the given wavelengths [cm], which must be positive and strictly ascending.
    pub fn from_wavelengths(wavelengths: Array1<frd>) -> AtmosphereResult<Self> {
        if wavelengths.is_empty() {
            return Err(AtmosphereError::invalid_parameter(
                "num_wavelengths",
                0.0,
                "at least one wavelength is required",
            ));
        }
        crate::error::ensure_positive("wavelength", wavelengths[0], None)?;
        for pair in wavelengths.windows(2) {
            if pair[1] <= pair[0] {
                return Err(AtmosphereError::invalid_parameter(
                    "wavelength",
                    pair[1],
                    "wavelengths must be strictly ascending",
                ));
            }
        }
        Ok(Self { wavelengths })
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Wavelengths [cm].
    pub fn wavelengths(&self) -> &Array1<frd> {
        &self.wavelengths
    }

    /// Wavelengths [nm].
    pub fn wavelengths_nm(&self) -> Array1<frd> {
        &self.wavelengths * CM_TO_NM
    }
}

impl Default for WavelengthGrid {
    fn default() -> Self {
        let log_min = (Self::DEFAULT_MIN_WAVELENGTH_NM * NM_TO_CM).ln();
        let log_max = (Self::DEFAULT_MAX_WAVELENGTH_NM * NM_TO_CM).ln();
        let step = (log_max - log_min) / ((Self::DEFAULT_NUM_WAVELENGTHS - 1) as frd);
        Self {
            wavelengths: Array1::from_shape_fn(Self::DEFAULT_NUM_WAVELENGTHS, |i| {
                frd::exp(log_min + (i as frd) * step)
            }),
        }
    }
}

/// Computes the monochromatic optical depth scale from the ratio of the
/// monochromatic to the Rosseland mean opacity.
///
/// The top value is taken equal to the top Rosseland optical depth and the
/// rest follows from trapezoidal integration of `κ_λ/κ_Ros dτ_Ros`.
pub fn monochromatic_tau(
    tau_grid: &TauGrid,
    log_opacity: ArrayView1<frd>,
    rosseland_opacity: &DualArray,
) -> AtmosphereResult<DualArray> {
    let num_depths = tau_grid.num_depths();
    if log_opacity.len() != num_depths || rosseland_opacity.len() != num_depths {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            log_opacity.len() as frd,
            "opacities must be given for every depth",
        ));
    }
    let tau = tau_grid.tau();
    let ratio = |depth: usize| frd::exp(log_opacity[depth] - rosseland_opacity.log_at(depth));

    let mut mono_tau = Array1::zeros(num_depths);
    mono_tau[0] = tau.linear_at(0);
    for depth in 1..num_depths {
        mono_tau[depth] = mono_tau[depth - 1]
            + 0.5 * (ratio(depth) + ratio(depth - 1)) * (tau.linear_at(depth) - tau.linear_at(depth - 1));
    }
    DualArray::from_linear("monochromatic optical depth", mono_tau)
}

/// Computes ln τ_λ for every row of the given opacity table, indexed as
/// `[wavelength][depth]`.
pub fn monochromatic_log_tau_table(
    tau_grid: &TauGrid,
    log_opacity: &Array2<frd>,
    rosseland_opacity: &DualArray,
) -> AtmosphereResult<Array2<frd>> {
    let rows = log_opacity
        .axis_iter(Axis(0))
        .into_par_iter()
        .map(|row| monochromatic_tau(tau_grid, row, rosseland_opacity))
        .collect::<AtmosphereResult<Vec<_>>>()?;
    let mut log_tau = Array2::zeros(log_opacity.dim());
    for (mut row, tau) in log_tau.rows_mut().into_iter().zip(rows.iter()) {
        row.assign(tau.log());
    }
    Ok(log_tau)
}

/// Emergent intensities and fluxes over a set of wavelengths.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Spectrum {
    wavelengths: WavelengthGrid,
    /// Intensities indexed as `[wavelength][angle]`.
    intensity: Array2<frd>,
    flux: DualArray,
}

impl Spectrum {
    /// Assembles a spectrum from intensities indexed as `[wavelength][angle]`
    /// and the corresponding fluxes.
    pub fn from_parts(
        wavelengths: WavelengthGrid,
        intensity: Array2<frd>,
        flux: DualArray,
    ) -> AtmosphereResult<Self> {
        if intensity.nrows() != wavelengths.len() || flux.len() != wavelengths.len() {
            return Err(AtmosphereError::invalid_parameter(
                "num_wavelengths",
                wavelengths.len() as frd,
                "intensities and fluxes must be given for every wavelength",
            ));
        }
        Ok(Self {
            wavelengths,
            intensity,
            flux,
        })
    }

    pub fn wavelengths(&self) -> &WavelengthGrid {
        &self.wavelengths
    }

    pub fn intensity(&self) -> &Array2<frd> {
        &self.intensity
    }

    pub fn flux(&self) -> &DualArray {
        &self.flux
    }

    pub fn num_wavelengths(&self) -> usize {
        self.wavelengths.len()
    }

    /// Index and wavelength [cm] of the maximum of the flux.
    pub fn peak(&self) -> (usize, frd) {
        let idx = self
            .flux
            .linear()
            .iter()
            .enumerate()
            .fold((0, frd::NEG_INFINITY), |(best_idx, best), (idx, &value)| {
                if value > best {
                    (idx, value)
                } else {
                    (best_idx, best)
                }
            })
            .0;
        (idx, self.wavelengths.wavelengths()[idx])
    }
}

/// Computes emergent intensities and fluxes for every wavelength of the given
/// monochromatic opacity table, indexed as `[wavelength][depth]` and holding ln κ_λ.
#[allow(clippy::too_many_arguments)]
pub fn synthesize_spectrum(
    tau_grid: &TauGrid,
    temperature: &DualArray,
    rosseland_opacity: &DualArray,
    wavelengths: &WavelengthGrid,
    log_opacity: &Array2<frd>,
    angles: &QuadratureAngles,
    source: SourceFunction,
    verbosity: &Verbosity,
) -> AtmosphereResult<Spectrum> {
    let num_wavelengths = wavelengths.len();
    if log_opacity.nrows() != num_wavelengths {
        return Err(AtmosphereError::invalid_parameter(
            "num_wavelengths",
            log_opacity.nrows() as frd,
            format!("opacity table must have {} rows", num_wavelengths),
        ));
    }

    let rows = (0..num_wavelengths)
        .into_par_iter()
        .progress_with(verbosity.create_progress_bar(num_wavelengths))
        .map(|idx| {
            let wavelength = wavelengths.wavelengths()[idx];
            let tau = monochromatic_tau(
                tau_grid,
                log_opacity.index_axis(Axis(0), idx),
                rosseland_opacity,
            )
            .map_err(|err| err.at_wavelength(wavelength))?;
            formal_solution(&tau, temperature, angles, wavelength, source)
        })
        .collect::<AtmosphereResult<Vec<_>>>()?;

    let mut intensity = Array2::zeros((num_wavelengths, angles.num_angles()));
    for (mut row, values) in intensity.rows_mut().into_iter().zip(rows.into_iter()) {
        row.assign(&values);
    }
    let flux = flux::integrate_flux(&intensity, angles)?;

    Ok(Spectrum {
        wavelengths: wavelengths.clone(),
        intensity,
        flux,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn log_uniform_grid_includes_end_points() {
        let grid = WavelengthGrid::log_uniform(11, 300.0, 1000.0).unwrap();
        let nm = grid.wavelengths_nm();
        assert_relative_eq!(nm[0], 300.0, max_relative = 1e-12);
        assert_relative_eq!(nm[10], 1000.0, max_relative = 1e-12);
        assert_relative_eq!(nm[1] / nm[0], nm[10] / nm[9], max_relative = 1e-12);
        assert_eq!(WavelengthGrid::default().len(), 250);
        assert!(WavelengthGrid::log_uniform(1, 300.0, 1000.0).is_err());
        assert!(WavelengthGrid::log_uniform(10, 1000.0, 300.0).is_err());
    }

    #[test]
    fn unsorted_wavelengths_are_rejected() {
        assert!(WavelengthGrid::from_wavelengths(Array1::from(vec![1e-5, 2e-5, 2e-5])).is_err());
        assert!(WavelengthGrid::from_wavelengths(Array1::from(vec![1e-5, 2e-5])).is_ok());
    }

    #[test]
    fn monochromatic_tau_scales_with_opacity_ratio() {
        let grid = TauGrid::default();
        let kappa_ros = DualArray::constant("opacity", grid.num_depths(), 0.5).unwrap();
        let log_kappa = Array1::from_elem(grid.num_depths(), (2.0 as frd).ln());
        let tau = monochromatic_tau(&grid, log_kappa.view(), &kappa_ros).unwrap();
        let last = grid.num_depths() - 1;
        assert_relative_eq!(tau.linear_at(0), grid.tau().linear_at(0));
        assert_relative_eq!(
            tau.linear_at(last),
            4.0 * grid.tau().linear_at(last),
            max_relative = 1e-5
        );
    }

    #[test]
    fn log_tau_table_matches_single_rows() {
        let grid = TauGrid::new(12, -4.0, 1.0).unwrap();
        let kappa_ros = DualArray::constant("opacity", 12, 1.0).unwrap();
        let log_kappa = Array2::from_shape_fn((3, 12), |(row, _)| (row as frd + 1.0).ln());
        let table = monochromatic_log_tau_table(&grid, &log_kappa, &kappa_ros).unwrap();
        let single = monochromatic_tau(&grid, log_kappa.row(2), &kappa_ros).unwrap();
        for depth in 0..12 {
            assert_relative_eq!(table[[2, depth]], single.log_at(depth));
        }
    }
}
