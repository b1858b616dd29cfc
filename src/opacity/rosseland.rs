//! Rosseland mean opacity.

use super::fop;
use crate::{
    depth::DualArray,
    error::{AtmosphereError, AtmosphereResult},
    math::integrate_trapezoidal,
    radiation::{planck::d_planck_d_temperature, WavelengthGrid},
};
use ndarray::{Array1, Array2};

/// Computes the Rosseland mean `κ_R = ∫ dB/dT dλ / ∫ (1/κ_λ) dB/dT dλ` at
/// every depth from the monochromatic opacity table indexed as
/// `[wavelength][depth]` and holding ln κ_λ.
pub fn rosseland_mean(
    temperature: &DualArray,
    wavelengths: &WavelengthGrid,
    log_opacity: &Array2<fop>,
) -> AtmosphereResult<DualArray> {
    let num_depths = temperature.len();
    if log_opacity.dim() != (wavelengths.len(), num_depths) {
        return Err(AtmosphereError::invalid_parameter(
            "num_wavelengths",
            log_opacity.nrows() as fop,
            "opacity table does not match the wavelength and depth grids",
        ));
    }
    if wavelengths.len() < 2 {
        return Err(AtmosphereError::invalid_parameter(
            "num_wavelengths",
            wavelengths.len() as fop,
            "at least two wavelengths are required for a mean opacity",
        ));
    }
    let lambdas = wavelengths.wavelengths().to_vec();

    let mut mean = Array1::zeros(num_depths);
    for depth in 0..num_depths {
        let temp = temperature.linear_at(depth);
        let derivative: Vec<fop> = lambdas
            .iter()
            .map(|&wavelength| d_planck_d_temperature(temp, wavelength))
            .collect();
        let weighted: Vec<fop> = derivative
            .iter()
            .enumerate()
            .map(|(idx, &value)| value * fop::exp(-log_opacity[[idx, depth]]))
            .collect();
        let numerator = integrate_trapezoidal(&lambdas, &derivative);
        let denominator = integrate_trapezoidal(&lambdas, &weighted);
        mean[depth] = numerator / denominator;
    }
    DualArray::from_linear("Rosseland mean opacity", mean)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_of_gray_opacity_is_the_opacity() {
        let temperature = DualArray::constant("temperature", 3, 6000.0).unwrap();
        let wavelengths = WavelengthGrid::default();
        let log_opacity = Array2::from_elem((wavelengths.len(), 3), (0.3 as fop).ln());
        let mean = rosseland_mean(&temperature, &wavelengths, &log_opacity).unwrap();
        for &value in mean.linear().iter() {
            assert_relative_eq!(value, 0.3, max_relative = 1e-12);
        }
    }

    #[test]
    fn mean_lies_between_extreme_opacities() {
        let temperature = DualArray::constant("temperature", 2, 5000.0).unwrap();
        let wavelengths = WavelengthGrid::default();
        let log_opacity = Array2::from_shape_fn((wavelengths.len(), 2), |(idx, _)| {
            (1.0 + idx as fop).ln()
        });
        let mean = rosseland_mean(&temperature, &wavelengths, &log_opacity).unwrap();
        assert!(mean.linear_at(0) > 1.0 && mean.linear_at(0) < wavelengths.len() as fop);
    }
}
