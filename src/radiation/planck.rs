//! Planck function and its temperature derivative.

use super::frd;
use crate::constants::{CLIGHT, HPLANCK, KBOLTZMANN};
use lazy_static::lazy_static;

lazy_static! {
    /// ln(2 h c^2)
    static ref LOG_PLANCK_PREFACTOR: frd = frd::ln(2.0 * HPLANCK * CLIGHT * CLIGHT);
    /// ln(h c/k)
    static ref LOG_PLANCK_EXPONENT_FACTOR: frd = frd::ln(HPLANCK * CLIGHT / KBOLTZMANN);
}

/// Computes ln(e^x - 1) without overflow for large x.
fn log_exp_m1(x: frd) -> frd {
    if x > 50.0 {
        x
    } else {
        x.exp_m1().ln()
    }
}

/// Natural logarithm of the Planck function B_λ(T) [erg/s/cm^2/sr/cm] for a
/// wavelength given in cm.
pub fn log_planck(temperature: frd, wavelength: frd) -> frd {
    let log_wavelength = wavelength.ln();
    let exponent = (*LOG_PLANCK_EXPONENT_FACTOR - log_wavelength - temperature.ln()).exp();
    *LOG_PLANCK_PREFACTOR - 5.0 * log_wavelength - log_exp_m1(exponent)
}

/// Planck function B_λ(T) [erg/s/cm^2/sr/cm] for a wavelength given in cm.
pub fn planck(temperature: frd, wavelength: frd) -> frd {
    log_planck(temperature, wavelength).exp()
}

/// Natural logarithm of the temperature derivative dB_λ/dT for a wavelength given in cm.
pub fn log_d_planck_d_temperature(temperature: frd, wavelength: frd) -> frd {
    let log_wavelength = wavelength.ln();
    let log_temperature = temperature.ln();
    let exponent = (*LOG_PLANCK_EXPONENT_FACTOR - log_wavelength - log_temperature).exp();
    *LOG_PLANCK_PREFACTOR + *LOG_PLANCK_EXPONENT_FACTOR - 6.0 * log_wavelength
        - 2.0 * log_temperature
        + exponent
        - 2.0 * log_exp_m1(exponent)
}

/// Temperature derivative dB_λ/dT for a wavelength given in cm.
pub fn d_planck_d_temperature(temperature: frd, wavelength: frd) -> frd {
    log_d_planck_d_temperature(temperature, wavelength).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PI, STEFBOLTZ};
    use crate::math::integrate_trapezoidal;
    use approx::assert_relative_eq;

    #[test]
    fn planck_integrates_to_stefan_boltzmann() {
        let temperature = 5778.0;
        let n = 4000;
        let (log_min, log_max) = ((1e-6 as frd).ln(), (1e-1 as frd).ln());
        let wavelengths: Vec<frd> = (0..n)
            .map(|i| (log_min + (log_max - log_min) * (i as frd) / ((n - 1) as frd)).exp())
            .collect();
        let values: Vec<frd> = wavelengths
            .iter()
            .map(|&wavelength| planck(temperature, wavelength))
            .collect();
        let integral = integrate_trapezoidal(&wavelengths, &values);
        assert_relative_eq!(
            PI * integral,
            STEFBOLTZ * frd::powi(temperature, 4),
            max_relative = 1e-3
        );
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let wavelength = 5e-5;
        let temperature = 6000.0;
        let dt = 1e-3;
        let numerical = (planck(temperature + dt, wavelength) - planck(temperature - dt, wavelength))
            / (2.0 * dt);
        assert_relative_eq!(
            d_planck_d_temperature(temperature, wavelength),
            numerical,
            max_relative = 1e-6
        );
    }
}
