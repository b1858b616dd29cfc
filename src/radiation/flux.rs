//! Surface flux from emergent intensities.

use super::{angles::QuadratureAngles, frd};
use crate::{
    constants::PI,
    depth::DualArray,
    error::{AtmosphereError, AtmosphereResult},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Computes the surface flux F = 2π Σ w μ I for the intensities of a single wavelength.
pub fn flux_from_intensity(intensity: ArrayView1<frd>, angles: &QuadratureAngles) -> frd {
    2.0 * PI
        * intensity
            .iter()
            .zip(angles.weights().iter())
            .zip(angles.cos_theta().iter())
            .map(|((&intensity, &weight), &cos_theta)| weight * cos_theta * intensity)
            .sum::<frd>()
}

/// Computes the surface flux at each wavelength from intensities indexed as
/// `[wavelength][angle]`.
pub fn integrate_flux(
    intensity: &Array2<frd>,
    angles: &QuadratureAngles,
) -> AtmosphereResult<DualArray> {
    if intensity.ncols() != angles.num_angles() {
        return Err(AtmosphereError::invalid_parameter(
            "num_angles",
            intensity.ncols() as frd,
            format!("intensities must be given for {} angles", angles.num_angles()),
        ));
    }
    let flux: Array1<frd> = intensity
        .rows()
        .into_iter()
        .map(|row| flux_from_intensity(row, angles))
        .collect();
    DualArray::from_linear("flux", flux)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn isotropic_intensity_gives_pi_times_intensity() {
        let angles = QuadratureAngles::default();
        let intensity = Array2::from_elem((3, angles.num_angles()), 2.0);
        let flux = integrate_flux(&intensity, &angles).unwrap();
        for &value in flux.linear().iter() {
            assert_relative_eq!(value, 2.0 * PI, max_relative = 2e-2);
        }
    }

    #[test]
    fn mismatched_angles_are_rejected() {
        let angles = QuadratureAngles::default();
        let intensity = Array2::from_elem((3, 4), 1.0);
        assert!(integrate_flux(&intensity, &angles).is_err());
    }
}
