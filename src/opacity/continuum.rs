//! Analytic fits for the continuous absorption and scattering processes.
//!
//! Every function returns the extinction per unit volume [1/cm] of a single
//! process, and zero outside the temperature and wavelength window where its
//! fit is valid.

use super::{fop, metals, rayleigh, LocalAbsorbers};
use crate::constants::{CLIGHT, CM_TO_NM, EV_TO_ERG, HPLANCK, KBOLTZMANN, LOG10_E, RYDBERG_H, XI_H};

/// Hydrogenic cross-section constant for wavelengths in Å [cm^2/Å^3].
const HYDROGENIC_CROSS_SECTION: fop = 1.0449e-26;
/// Highest principal quantum number included in the H I bound-free sum.
const MAX_HYDROGEN_LEVEL: u32 = 10;
/// Thomson cross-section [cm^2].
const THOMSON_CROSS_SECTION: fop = 0.6648e-24;
/// Excitation energy of the lowest excited level of He I [eV].
const HELIUM_EXCITATION_ENERGY: fop = 10.92;

const H_MINUS_BF_COEFFICIENTS: [fop; 7] = [
    1.99654,
    -1.18267e-5,
    2.64243e-6,
    -4.40524e-10,
    3.23992e-14,
    -1.39568e-18,
    2.78701e-23,
];

const H_MINUS_FF_COEFFICIENTS: [[fop; 5]; 3] = [
    [-2.2763, -1.6850, 0.76661, -0.053346, 0.0],
    [15.2827, -9.2846, 1.99381, -0.142631, 0.0],
    [-197.789, 190.266, -67.9775, 10.6913, -0.625151],
];

const H2_PLUS_CROSS_SECTION_COEFFICIENTS: [fop; 4] = [-1040.54, 1345.71, -547.628, 71.9684];
const H2_PLUS_ENERGY_COEFFICIENTS: [fop; 4] = [-54.0532, 32.713, -6.6699, 0.4574];

const HE_MINUS_FF_COEFFICIENTS: [[fop; 5]; 4] = [
    [9.66736, -71.76242, 105.29576, -56.49259, 10.69206],
    [-10.50614, 48.28802, -70.43363, 37.80099, -7.15445],
    [2.74020, -10.62144, 15.50518, -8.33845, 1.57960],
    [-0.19923, 0.77485, -1.13200, 0.60994, -0.11564],
];

/// Evaluates the polynomial with the given coefficients (lowest order first).
fn polynomial(coefficients: &[fop], x: fop) -> fop {
    coefficients.iter().rev().fold(0.0, |sum, &c| sum * x + c)
}

/// Wavelength dependent quantities shared by the continuum processes.
#[derive(Clone, Copy, Debug)]
pub struct SpectralPoint {
    /// Wavelength [cm].
    pub wavelength: fop,
    /// Wavelength [nm].
    pub wavelength_nm: fop,
    /// Wavelength [Å].
    pub wavelength_angstrom: fop,
    /// Photon energy [eV].
    pub photon_energy: fop,
}

impl SpectralPoint {
    pub fn new(wavelength: fop) -> Self {
        let wavelength_nm = wavelength * CM_TO_NM;
        Self {
            wavelength,
            wavelength_nm,
            wavelength_angstrom: 10.0 * wavelength_nm,
            photon_energy: HPLANCK * CLIGHT / (wavelength * EV_TO_ERG),
        }
    }

    /// The Gaunt factor correction scale 0.3456/(λR)^(1/3).
    fn gaunt_scale(&self) -> fop {
        0.3456 / (self.wavelength_nm * RYDBERG_H).cbrt()
    }
}

/// Correction factor 1 − 10^(−θ χ_λ) for stimulated emission.
pub fn stimulated_emission_factor(theta: fop, point: &SpectralPoint) -> fop {
    1.0 - fop::powf(10.0, -theta * point.photon_energy)
}

/// H I bound-free cross-section per neutral hydrogen atom, summed over the
/// levels whose ionization edge lies redward of the wavelength.
fn hydrogen_bound_free_per_atom(theta: fop, point: &SpectralPoint) -> fop {
    let gaunt_scale = point.gaunt_scale();
    let level_energy_unit = HPLANCK * CLIGHT * RYDBERG_H * 1e7 / EV_TO_ERG;
    let mut sum = 0.0;
    for n in 1..=MAX_HYDROGEN_LEVEL {
        let n_squared = (n * n) as fop;
        if n_squared / RYDBERG_H < point.wavelength_nm {
            continue;
        }
        let gaunt = 1.0 - gaunt_scale * (point.wavelength_nm * RYDBERG_H / n_squared - 0.5);
        let level_energy = XI_H - level_energy_unit / n_squared;
        sum += gaunt / (n_squared * (n as fop)) * fop::powf(10.0, -theta * level_energy);
    }
    HYDROGENIC_CROSS_SECTION * point.wavelength_angstrom.powi(3) * sum
}

/// H I free-free cross-section per neutral hydrogen atom.
fn hydrogen_free_free_per_atom(theta: fop, point: &SpectralPoint) -> fop {
    let gaunt = 1.0 + point.gaunt_scale() * (LOG10_E / (point.photon_energy * theta) + 0.5);
    HYDROGENIC_CROSS_SECTION
        * point.wavelength_angstrom.powi(3)
        * gaunt
        * (LOG10_E / (2.0 * XI_H))
        / theta
        * fop::powf(10.0, -theta * XI_H)
}

pub fn hydrogen_bound_free(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    hydrogen_bound_free_per_atom(absorbers.theta, point)
        * stimulated_emission_factor(absorbers.theta, point)
        * absorbers.neutral_hydrogen
}

pub fn hydrogen_free_free(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    hydrogen_free_free_per_atom(absorbers.theta, point)
        * stimulated_emission_factor(absorbers.theta, point)
        * absorbers.neutral_hydrogen
}

/// H⁻ bound-free, valid for 2500 K < T < 10000 K and 225 nm < λ < 1500 nm.
pub fn h_minus_bound_free(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    if !(absorbers.temperature > 2500.0 && absorbers.temperature < 10000.0)
        || !(point.wavelength_nm > 225.0 && point.wavelength_nm < 1500.0)
    {
        return 0.0;
    }
    let theta = absorbers.theta;
    let cross_section = polynomial(&H_MINUS_BF_COEFFICIENTS, point.wavelength_angstrom) * 1e-18;
    4.158e-10
        * cross_section
        * absorbers.electron_pressure
        * theta.powf(2.5)
        * fop::powf(10.0, 0.754 * theta)
        * stimulated_emission_factor(theta, point)
        * absorbers.neutral_hydrogen
}

/// H⁻ free-free, valid for 2500 K < T < 10000 K and 260 nm < λ < 11390 nm.
pub fn h_minus_free_free(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    if !(absorbers.temperature > 2500.0 && absorbers.temperature < 10000.0)
        || !(point.wavelength_nm > 260.0 && point.wavelength_nm < 11390.0)
    {
        return 0.0;
    }
    let log_wavelength = point.wavelength_angstrom.log10();
    let log_theta = absorbers.theta.log10();
    let f = H_MINUS_FF_COEFFICIENTS.map(|coefficients| polynomial(&coefficients, log_wavelength));
    let exponent = f[0] + f[1] * log_theta + f[2] * log_theta * log_theta;
    1e-26 * absorbers.electron_pressure * fop::powf(10.0, exponent) * absorbers.neutral_hydrogen
}

/// H₂⁺ bound-free and free-free, valid for T < 4000 K and 380 nm < λ < 2500 nm.
pub fn h2_plus(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    if !(absorbers.temperature < 4000.0)
        || !(point.wavelength_nm > 380.0 && point.wavelength_nm < 2500.0)
    {
        return 0.0;
    }
    let log_wavelength = point.wavelength_angstrom.log10();
    let cross_section = polynomial(&H2_PLUS_CROSS_SECTION_COEFFICIENTS, log_wavelength);
    if cross_section <= 0.0 {
        return 0.0;
    }
    let energy = polynomial(&H2_PLUS_ENERGY_COEFFICIENTS, log_wavelength);
    2.51e-42
        * cross_section
        * fop::powf(10.0, -energy * absorbers.theta)
        * absorbers.ionized_hydrogen
        * stimulated_emission_factor(absorbers.theta, point)
        * absorbers.neutral_hydrogen
}

/// He I bound-free and free-free as hydrogenic absorption from the first
/// excited level, valid for T > 10000 K and λ > 22.8 nm.
pub fn helium(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    if !(absorbers.temperature > 10000.0) || !(point.wavelength_nm > 22.8) {
        return 0.0;
    }
    let theta = absorbers.theta;
    let excitation =
        4.0 * fop::exp(-HELIUM_EXCITATION_ENERGY * EV_TO_ERG / (KBOLTZMANN * absorbers.temperature));
    let per_atom = (hydrogen_bound_free_per_atom(theta, point)
        + hydrogen_free_free_per_atom(theta, point))
        * stimulated_emission_factor(theta, point);
    excitation * per_atom * absorbers.neutral_helium
}

/// He⁻ free-free, valid for 0.5 < θ < 2 and 500 nm < λ < 15000 nm.
pub fn he_minus_free_free(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    let theta = absorbers.theta;
    if !(theta > 0.5 && theta < 2.0)
        || !(point.wavelength_nm > 500.0 && point.wavelength_nm < 15000.0)
    {
        return 0.0;
    }
    let log_wavelength = point.wavelength_angstrom.log10();
    let c = HE_MINUS_FF_COEFFICIENTS.map(|coefficients| polynomial(&coefficients, theta));
    let log_cross_section = polynomial(&c, log_wavelength);
    1e-26 * fop::powf(10.0, log_cross_section) * absorbers.electron_pressure * absorbers.neutral_helium
}

/// Thomson scattering by free electrons.
pub fn electron_scattering(absorbers: &LocalAbsorbers) -> fop {
    THOMSON_CROSS_SECTION * absorbers.electron_density
}

/// Sums the extinction of all continuum processes [1/cm].
pub fn total_extinction(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    hydrogen_bound_free(absorbers, point)
        + hydrogen_free_free(absorbers, point)
        + h_minus_bound_free(absorbers, point)
        + h_minus_free_free(absorbers, point)
        + h2_plus(absorbers, point)
        + helium(absorbers, point)
        + he_minus_free_free(absorbers, point)
        + electron_scattering(absorbers)
        + rayleigh::total_rayleigh_scattering(absorbers, point)
        + metals::metal_bound_free(absorbers, point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opacity::metals::MetalAbsorbers;
    use approx::assert_relative_eq;

    fn solar_photosphere() -> LocalAbsorbers {
        LocalAbsorbers::new(6000.0, 1e13, 1e17, 1e13, 1e16, 1e12)
    }

    #[test]
    fn polynomial_evaluates_lowest_order_first() {
        assert_relative_eq!(polynomial(&[1.0, 2.0, 3.0], 2.0), 17.0);
    }

    #[test]
    fn processes_vanish_outside_their_windows() {
        let mut absorbers = solar_photosphere();
        let red = SpectralPoint::new(2000e-7);
        assert_eq!(h_minus_bound_free(&absorbers, &red), 0.0);
        assert_eq!(h2_plus(&absorbers, &red), 0.0);
        assert_eq!(helium(&absorbers, &red), 0.0);
        absorbers = LocalAbsorbers::new(12000.0, 1e14, 1e16, 1e14, 1e16, 1e10);
        let visible = SpectralPoint::new(500e-7);
        assert_eq!(h_minus_bound_free(&absorbers, &visible), 0.0);
        assert_eq!(h_minus_free_free(&absorbers, &visible), 0.0);
        assert!(helium(&absorbers, &visible) > 0.0);
    }

    #[test]
    fn h_minus_dominates_solar_visible_continuum() {
        let absorbers = solar_photosphere();
        let point = SpectralPoint::new(500e-7);
        let h_minus = h_minus_bound_free(&absorbers, &point);
        assert!(h_minus > hydrogen_bound_free(&absorbers, &point));
        assert!(h_minus > electron_scattering(&absorbers));
        assert!(h_minus > h_minus_free_free(&absorbers, &point));
    }

    #[test]
    fn balmer_jump_is_present() {
        let absorbers = LocalAbsorbers::new(9000.0, 1e14, 1e15, 1e14, 1e14, 1e8);
        let blue = SpectralPoint::new(360e-7);
        let red = SpectralPoint::new(370e-7);
        assert!(hydrogen_bound_free(&absorbers, &blue) > 2.0 * hydrogen_bound_free(&absorbers, &red));
    }

    #[test]
    fn total_extinction_is_positive() {
        let absorbers = solar_photosphere();
        for &wavelength_nm in &[300.0, 656.3, 1000.0, 5000.0] {
            assert!(total_extinction(&absorbers, &SpectralPoint::new(wavelength_nm * 1e-7)) > 0.0);
        }
    }

    #[test]
    fn metals_raise_only_the_ultraviolet_extinction() {
        let bare = solar_photosphere();
        let metallic = bare.with_metals(MetalAbsorbers {
            neutral_carbon: 3e12,
            neutral_magnesium: 3e11,
            ionized_magnesium: 3e12,
            neutral_aluminium: 3e9,
            neutral_silicon: 3e11,
            ionized_silicon: 3e12,
            neutral_iron: 1e10,
        });
        let ultraviolet = SpectralPoint::new(300e-7);
        let infrared = SpectralPoint::new(1500e-7);
        assert!(total_extinction(&metallic, &ultraviolet) > total_extinction(&bare, &ultraviolet));
        assert_eq!(
            total_extinction(&metallic, &infrared),
            total_extinction(&bare, &infrared)
        );
    }
}
