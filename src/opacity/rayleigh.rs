//! Rayleigh scattering by neutral hydrogen, neutral helium and molecular hydrogen.
//!
//! The cross-sections are fits in the wavelength [Å], with the frequency
//! capped below the ionization limit of the scatterer.

use super::{continuum::SpectralPoint, fop, LocalAbsorbers};
use crate::constants::CLIGHT;

/// Speed of light in Å/s.
const CLIGHT_ANGSTROM: fop = 2.997925e18;
/// Frequency cap for H I and H₂ [Hz].
const HYDROGEN_FREQUENCY_LIMIT: fop = 2.463e15;
/// Frequency cap for He I [Hz].
const HELIUM_FREQUENCY_LIMIT: fop = 5.15e15;

/// Squared wavelength [Å^2] corresponding to the given frequency cap.
fn capped_squared_wavelength(point: &SpectralPoint, frequency_limit: fop) -> fop {
    let frequency = CLIGHT / point.wavelength;
    let wavelength = CLIGHT_ANGSTROM / frequency.min(frequency_limit);
    wavelength * wavelength
}

pub fn hydrogen_rayleigh_cross_section(point: &SpectralPoint) -> fop {
    let ww = capped_squared_wavelength(point, HYDROGEN_FREQUENCY_LIMIT);
    (5.799e-13 + 1.422e-6 / ww + 2.784 / (ww * ww)) / (ww * ww)
}

pub fn helium_rayleigh_cross_section(point: &SpectralPoint) -> fop {
    let ww = capped_squared_wavelength(point, HELIUM_FREQUENCY_LIMIT);
    5.484e-14 / ww / ww * fop::powi(1.0 + (2.44e5 + 5.94e10 / (ww - 2.90e5)) / ww, 2)
}

pub fn molecular_hydrogen_rayleigh_cross_section(point: &SpectralPoint) -> fop {
    let ww = capped_squared_wavelength(point, HYDROGEN_FREQUENCY_LIMIT);
    (8.14e-13 + 1.28e-6 / ww + 1.61 / (ww * ww)) / (ww * ww)
}

/// Sums the Rayleigh extinction [1/cm] of the ground-state scatterers.
pub fn total_rayleigh_scattering(absorbers: &LocalAbsorbers, point: &SpectralPoint) -> fop {
    hydrogen_rayleigh_cross_section(point) * 2.0 * absorbers.ground_state_hydrogen
        + helium_rayleigh_cross_section(point) * absorbers.ground_state_helium
        + molecular_hydrogen_rayleigh_cross_section(point) * absorbers.molecular_hydrogen
}
