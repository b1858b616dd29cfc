//! Merging of line wavelengths and opacities into a master spectrum.

use super::fln;
use crate::{
    error::{AtmosphereError, AtmosphereResult},
    math::interpolate_clamped,
    radiation::WavelengthGrid,
};
use ndarray::{Array1, Array2};

/// Relative separation below which two wavelengths are considered the same.
const DUPLICATE_TOLERANCE: fln = 1e-12;

/// Combines the master wavelength grid with the given line wavelengths [cm]
/// into one ascending grid without duplicated points.
pub fn merge_wavelengths(
    master: &WavelengthGrid,
    line_wavelengths: &Array1<fln>,
) -> AtmosphereResult<WavelengthGrid> {
    let mut combined: Vec<fln> = master
        .wavelengths()
        .iter()
        .chain(line_wavelengths.iter())
        .copied()
        .collect();
    if let Some(&bad) = combined.iter().find(|wavelength| !wavelength.is_finite()) {
        return Err(AtmosphereError::invalid_parameter(
            "wavelength",
            bad,
            "wavelengths must be finite",
        ));
    }
    combined.sort_by(|a, b| a.total_cmp(b));
    combined.dedup_by(|next, kept| (*next - *kept).abs() <= DUPLICATE_TOLERANCE * kept.abs());
    WavelengthGrid::from_wavelengths(Array1::from(combined))
}

/// Evaluates the total ln κ on the combined wavelength grid, indexed as
/// `[wavelength][depth]`.
///
/// The master opacity is interpolated in wavelength (clamped at the ends) and
/// the line opacity is added in linear space inside the line's wavelength
/// range only.
pub fn merge_opacity(
    master: &WavelengthGrid,
    master_log_opacity: &Array2<fln>,
    line_wavelengths: &Array1<fln>,
    line_log_opacity: &Array2<fln>,
    combined: &WavelengthGrid,
) -> AtmosphereResult<Array2<fln>> {
    let num_depths = master_log_opacity.ncols();
    if master_log_opacity.nrows() != master.len() {
        return Err(AtmosphereError::invalid_parameter(
            "num_wavelengths",
            master_log_opacity.nrows() as fln,
            "master opacity table does not match the master wavelengths",
        ));
    }
    if line_log_opacity.dim() != (line_wavelengths.len(), num_depths) {
        return Err(AtmosphereError::invalid_parameter(
            "num_wavelengths",
            line_log_opacity.nrows() as fln,
            "line opacity table does not match the line wavelengths and depths",
        ));
    }
    let master_wavelengths = master.wavelengths().to_vec();
    let line_lambdas = line_wavelengths.to_vec();
    let (line_min, line_max) = match (line_lambdas.first(), line_lambdas.last()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => (fln::INFINITY, fln::NEG_INFINITY),
    };

    let mut merged = Array2::zeros((combined.len(), num_depths));
    for depth in 0..num_depths {
        let master_column = master_log_opacity.column(depth).to_vec();
        let line_column = line_log_opacity.column(depth).to_vec();
        for (idx, &wavelength) in combined.wavelengths().iter().enumerate() {
            let mut kappa =
                interpolate_clamped(&master_wavelengths, &master_column, wavelength).exp();
            if wavelength >= line_min && wavelength <= line_max {
                kappa += interpolate_clamped(&line_lambdas, &line_column, wavelength).exp();
            }
            merged[[idx, depth]] = kappa.ln();
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn merged_grid_is_sorted_without_duplicates() {
        let master = WavelengthGrid::log_uniform(5, 400.0, 600.0).unwrap();
        let line = Array1::from(vec![
            master.wavelengths()[2],
            499.0e-7,
            501.0e-7,
            master.wavelengths()[2] * (1.0 + 1e-14),
        ]);
        let combined = merge_wavelengths(&master, &line).unwrap();
        assert_eq!(combined.len(), 7);
        assert!(combined.wavelengths().windows(2).into_iter().all(|w| w[1] > w[0]));
    }

    #[test]
    fn line_opacity_is_added_inside_its_range_only() {
        let master = WavelengthGrid::log_uniform(5, 400.0, 600.0).unwrap();
        let master_kappa = Array2::from_elem((5, 2), (1.0 as fln).ln());
        let line_wavelengths = Array1::from(vec![495.0e-7, 500.0e-7, 505.0e-7]);
        let line_kappa = Array2::from_elem((3, 2), (3.0 as fln).ln());
        let combined = merge_wavelengths(&master, &line_wavelengths).unwrap();
        let merged =
            merge_opacity(&master, &master_kappa, &line_wavelengths, &line_kappa, &combined)
                .unwrap();
        for (idx, &wavelength) in combined.wavelengths().iter().enumerate() {
            let expected = if (495.0e-7..=505.0e-7).contains(&wavelength) { 4.0 } else { 1.0 };
            assert_relative_eq!(merged[[idx, 1]].exp(), expected, max_relative = 1e-12);
        }
    }
}
