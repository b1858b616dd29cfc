//! Equivalent width of an absorption line.

use super::fln;
use crate::{
    constants::{CM_TO_NM, NM_TO_PM},
    error::{AtmosphereError, AtmosphereResult},
    math::{closest_index, interpolate_clamped},
};

/// Fraction of the continuum below which a point belongs to the line.
pub const LINE_DEPTH_THRESHOLD: fln = 0.99;
/// Number of points the line window is widened by on each side.
const WINDOW_PADDING: usize = 2;

/// Divides the given flux by the continuum flux interpolated onto its
/// wavelengths [cm].
pub fn rectify_flux(
    wavelengths: &[fln],
    flux: &[fln],
    continuum_wavelengths: &[fln],
    continuum_flux: &[fln],
) -> AtmosphereResult<Vec<fln>> {
    if wavelengths.len() != flux.len() || continuum_wavelengths.len() != continuum_flux.len() {
        return Err(AtmosphereError::invalid_parameter(
            "num_wavelengths",
            flux.len() as fln,
            "fluxes and wavelengths have inconsistent lengths",
        ));
    }
    wavelengths
        .iter()
        .zip(flux.iter())
        .map(|(&wavelength, &value)| {
            let continuum = interpolate_clamped(continuum_wavelengths, continuum_flux, wavelength);
            if continuum.is_finite() && continuum > 0.0 {
                Ok(value / continuum)
            } else {
                Err(AtmosphereError::numeric_domain("continuum flux", continuum, None)
                    .at_wavelength(wavelength))
            }
        })
        .collect()
}

/// Computes the equivalent width [pm] of the line centered at the given
/// wavelength [cm] from the flux sampled over the line.
///
/// The continuum level is the mean of the end points. The integration window
/// is the contiguous run of points around the center whose flux is below
/// [`LINE_DEPTH_THRESHOLD`] of the continuum, widened by two points on each
/// side. Points closer to the continuum than the threshold contribute nothing.
pub fn equivalent_width(flux: &[fln], wavelengths: &[fln], line_center: fln) -> AtmosphereResult<fln> {
    let num_points = flux.len();
    if wavelengths.len() != num_points || num_points < 3 {
        return Err(AtmosphereError::invalid_parameter(
            "num_points",
            num_points as fln,
            "need at least three flux points matching the wavelengths",
        ));
    }
    let continuum = 0.5 * (flux[0] + flux[num_points - 1]);
    if !(continuum.is_finite() && continuum > 0.0) {
        return Err(AtmosphereError::numeric_domain("continuum flux", continuum, None));
    }
    let is_absorbed = |idx: usize| flux[idx] < LINE_DEPTH_THRESHOLD * continuum;

    let center = closest_index(wavelengths, line_center);
    let mut start = center;
    while start > 0 && is_absorbed(start - 1) {
        start -= 1;
    }
    let mut stop = center;
    while stop + 1 < num_points && is_absorbed(stop + 1) {
        stop += 1;
    }
    let start = start.saturating_sub(WINDOW_PADDING);
    let stop = (stop + WINDOW_PADDING).min(num_points - 1);

    let depth = |idx: usize| {
        if is_absorbed(idx) {
            1.0 - flux[idx] / continuum
        } else {
            0.0
        }
    };
    let width_cm: fln = (start + 1..=stop)
        .map(|idx| 0.5 * (depth(idx - 1) + depth(idx)) * (wavelengths[idx] - wavelengths[idx - 1]))
        .sum();
    Ok(width_cm * CM_TO_NM * NM_TO_PM)
}
