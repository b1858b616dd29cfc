//! Observables derived from a synthesized spectrum.

use crate::{
    constants::{L_SUN, LN10, LOG_G_SUN, R_SUN, STEFBOLTZ, TEFF_SUN},
    error::{ensure_positive, AtmosphereError, AtmosphereResult},
    math::integrate_trapezoidal,
    radiation::{angles::QuadratureAngles, frd, Spectrum},
};
use ndarray::{Array1, Array2};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Wien's displacement constant [cm K].
pub const WIEN_CONSTANT: frd = 2.897_772_1e-1;

/// Computes the linear limb darkening coefficient at every wavelength from
/// intensities indexed as `[wavelength][angle]`.
///
/// The coefficient is the mean over the inclined directions of
/// `(I(μ)/I(1) − 1)/(μ − 1)`, using the first direction as the disk centre.
pub fn limb_darkening_coefficients(
    intensity: &Array2<frd>,
    angles: &QuadratureAngles,
) -> AtmosphereResult<Array1<frd>> {
    let num_angles = angles.num_angles();
    if intensity.ncols() != num_angles || num_angles < 2 {
        return Err(AtmosphereError::invalid_parameter(
            "num_angles",
            intensity.ncols() as frd,
            "intensities must be given for every quadrature angle",
        ));
    }
    let cos_theta = angles.cos_theta();
    intensity
        .outer_iter()
        .map(|row| {
            let central = ensure_positive("disk centre intensity", row[0], None)?;
            let sum: frd = (1..num_angles)
                .map(|angle| (row[angle] / central - 1.0) / (cos_theta[angle] - 1.0))
                .sum();
            Ok(sum / ((num_angles - 1) as frd))
        })
        .collect::<AtmosphereResult<Vec<_>>>()
        .map(Array1::from)
}

/// Integrates the flux of the spectrum over wavelength [erg/s/cm^2].
pub fn bolometric_flux(spectrum: &Spectrum) -> frd {
    integrate_trapezoidal(
        spectrum.wavelengths().wavelengths().as_slice().unwrap_or(&[]),
        spectrum.flux().linear().as_slice().unwrap_or(&[]),
    )
}

/// Effective temperature [K] corresponding to the bolometric flux of the
/// spectrum, `(F/σ)^(1/4)`.
pub fn recover_teff(spectrum: &Spectrum) -> AtmosphereResult<frd> {
    let flux = ensure_positive("bolometric flux", bolometric_flux(spectrum), None)?;
    Ok((flux / STEFBOLTZ).powf(0.25))
}

/// Wavelength [cm] of the maximum of a black body spectrum at the given temperature.
pub fn wien_peak_wavelength(temperature: frd) -> frd {
    WIEN_CONSTANT / temperature
}

/// Location of the maximum of the spectral energy distribution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SedPeak {
    /// Wavelength of maximum flux [cm].
    pub wavelength: frd,
    /// Black body peak wavelength at the effective temperature [cm].
    pub wien_wavelength: frd,
}

impl SedPeak {
    pub fn new(spectrum: &Spectrum, teff: frd) -> Self {
        Self {
            wavelength: spectrum.peak().1,
            wien_wavelength: wien_peak_wavelength(teff),
        }
    }
}

/// Global stellar quantities in solar units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StellarSummary {
    /// Radius [R_⊙] from mass and surface gravity.
    pub radius: frd,
    /// Bolometric luminosity [L_⊙] from radius and effective temperature.
    pub luminosity: frd,
}

impl StellarSummary {
    /// Derives radius and luminosity from the mass [M_⊙], log10 of the
    /// surface gravity [cgs] and the effective temperature [K].
    pub fn new(mass: frd, log_g: frd, teff: frd) -> AtmosphereResult<Self> {
        ensure_positive("stellar mass", mass, None)?;
        ensure_positive("effective temperature", teff, None)?;
        let radius = frd::exp(0.5 * (mass.ln() + LN10 * (LOG_G_SUN - log_g)));
        let luminosity = radius.powi(2) * (teff / TEFF_SUN).powi(4);
        Ok(Self { radius, luminosity })
    }

    pub fn radius_cm(&self) -> frd {
        self.radius * R_SUN
    }

    pub fn luminosity_erg_per_s(&self) -> frd {
        self.luminosity * L_SUN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        depth::DualArray,
        radiation::{planck::planck, WavelengthGrid},
    };
    use approx::assert_relative_eq;

    #[test]
    fn linear_limb_darkening_is_recovered() {
        let angles = QuadratureAngles::default();
        let coefficient = 0.6;
        let intensity = Array2::from_shape_fn((3, angles.num_angles()), |(_, angle)| {
            1.0 - coefficient * (1.0 - angles.cos_theta()[angle])
        });
        let coefficients = limb_darkening_coefficients(&intensity, &angles).unwrap();
        for &value in coefficients.iter() {
            assert_relative_eq!(value, coefficient, max_relative = 1e-12);
        }
    }

    #[test]
    fn black_body_flux_gives_its_temperature() {
        let teff = 5778.0;
        let wavelengths = WavelengthGrid::log_uniform(2000, 50.0, 100000.0).unwrap();
        let flux = wavelengths
            .wavelengths()
            .mapv(|wavelength| std::f64::consts::PI * planck(teff, wavelength));
        let spectrum = Spectrum::from_parts(
            wavelengths,
            Array2::zeros((2000, 1)),
            DualArray::from_linear("flux", flux).unwrap(),
        )
        .unwrap();
        assert_relative_eq!(recover_teff(&spectrum).unwrap(), teff, max_relative = 1e-3);
        let peak = SedPeak::new(&spectrum, teff);
        assert_relative_eq!(peak.wavelength, peak.wien_wavelength, max_relative = 0.01);
    }

    #[test]
    fn solar_summary_is_unity() {
        let summary = StellarSummary::new(1.0, LOG_G_SUN, TEFF_SUN).unwrap();
        assert_relative_eq!(summary.radius, 1.0);
        assert_relative_eq!(summary.luminosity, 1.0);
        assert_relative_eq!(summary.radius_cm(), R_SUN);
        assert_relative_eq!(summary.luminosity_erg_per_s(), L_SUN);
        let giant = StellarSummary::new(1.0, LOG_G_SUN - 2.0, TEFF_SUN).unwrap();
        assert_relative_eq!(giant.radius, 10.0, max_relative = 1e-12);
        assert_relative_eq!(giant.radius_cm(), 10.0 * R_SUN, max_relative = 1e-12);
        assert_relative_eq!(giant.luminosity_erg_per_s(), 100.0 * L_SUN, max_relative = 1e-12);
        assert!(StellarSummary::new(0.0, 4.0, 5000.0).is_err());
    }
}
