//! Physical and mathematical constants, in cgs units.
//!
//! Natural logarithms of the constants are provided alongside the constants
//! themselves since most of the atmosphere physics is evaluated in log space.

use lazy_static::lazy_static;

/// Floating-point precision to use for constants.
#[allow(non_camel_case_types)]
pub type fcn = f64;

// Mathematical constants

pub const PI: fcn = std::f64::consts::PI;
/// Natural logarithm of 10.
pub const LN10: fcn = std::f64::consts::LN_10;
/// Natural logarithm of 2.
pub const LN2: fcn = std::f64::consts::LN_2;
/// Base 10 logarithm of e.
pub const LOG10_E: fcn = std::f64::consts::LOG10_E;

// Physical constants

/// Speed of light in vacuum [cm/s].
pub const CLIGHT: fcn = 2.997_924_9e10;
/// Stefan-Boltzmann constant [erg/(cm^2 s K^4)].
pub const STEFBOLTZ: fcn = 5.670_373e-5;
/// Boltzmann constant [erg/K].
pub const KBOLTZMANN: fcn = 1.380_648_8e-16;
/// Planck constant [erg s].
pub const HPLANCK: fcn = 6.626_069_57e-27;
/// Electron charge [esu].
pub const Q_ELECTRON: fcn = 4.803_204_25e-10;
/// Electron mass [g].
pub const M_ELECTRON: fcn = 9.109_382_91e-28;
/// Gravitational constant [cm^3/(g s^2)].
pub const GCONST: fcn = 6.674e-8;
/// Atomic mass unit [g].
pub const AMU: fcn = 1.660_538_92e-24;
/// Ionization energy of a hydrogen atom [eV].
pub const XI_H: fcn = 13.598_433;
/// Rydberg constant for hydrogen [1/nm].
pub const RYDBERG_H: fcn = 1.0968e-2;

// Solar reference values

/// Solar radius [cm].
pub const R_SUN: fcn = 6.955e10;
/// Solar mass [g].
pub const M_SUN: fcn = 1.9891e33;
/// Solar luminosity [erg/s].
pub const L_SUN: fcn = 3.846e33;
/// Solar effective temperature [K].
pub const TEFF_SUN: fcn = 5778.0;
/// Base 10 logarithm of solar surface gravity [cm/s^2].
pub const LOG_G_SUN: fcn = 4.44;

// Unit conversion factors

/// Conversion factor from electron volts to ergs.
pub const EV_TO_ERG: fcn = 1.602_176_565e-12;
/// Conversion factor from nanometers to centimeters.
pub const NM_TO_CM: fcn = 1e-7;
/// Conversion factor from centimeters to nanometers.
pub const CM_TO_NM: fcn = 1e7;
/// Conversion factor from nanometers to Ångström.
pub const NM_TO_ANGSTROM: fcn = 10.0;
/// Conversion factor from kilometers to centimeters.
pub const KM_TO_CM: fcn = 1e5;
/// Conversion factor from nanometers to picometers.
pub const NM_TO_PM: fcn = 1e3;

lazy_static! {
    pub static ref LN_CLIGHT: fcn = CLIGHT.ln();
    pub static ref LN_STEFBOLTZ: fcn = STEFBOLTZ.ln();
    pub static ref LN_KBOLTZMANN: fcn = KBOLTZMANN.ln();
    pub static ref LN_HPLANCK: fcn = HPLANCK.ln();
    pub static ref LN_Q_ELECTRON: fcn = Q_ELECTRON.ln();
    pub static ref LN_M_ELECTRON: fcn = M_ELECTRON.ln();
    pub static ref LN_AMU: fcn = AMU.ln();
    pub static ref LN_EV_TO_ERG: fcn = EV_TO_ERG.ln();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_constants_match_constants() {
        assert!((LN_KBOLTZMANN.exp() / KBOLTZMANN - 1.0).abs() < 1e-14);
        assert!((LN_HPLANCK.exp() / HPLANCK - 1.0).abs() < 1e-14);
        assert!((LN_AMU.exp() / AMU - 1.0).abs() < 1e-14);
    }
}
