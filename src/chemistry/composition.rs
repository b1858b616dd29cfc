//! Elemental abundances and total elemental number densities.

use super::fch;
use crate::{
    constants::KBOLTZMANN,
    data::{
        self,
        atomic::{ELEMENTS, NUM_ELEMENTS},
    },
    error::{ensure_finite, AtmosphereError, AtmosphereResult},
};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Atomic number above which elements are scaled with the metallicity.
const LAST_UNSCALED_ATOMIC_NUMBER: u32 = 2;

/// Relative abundances of the tracked elements.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Composition {
    /// Abundances on the A12 scale before metallicity scaling.
    abundances: Vec<fch>,
    /// Linear scale factor applied to the abundances of all metals.
    metallicity_scale: fch,
}

impl Composition {
    /// Solar composition scaled with the given linear metallicity factor.
    pub fn solar(metallicity_scale: fch) -> AtmosphereResult<Self> {
        if !(metallicity_scale.is_finite() && metallicity_scale > 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "metallicity_scale",
                metallicity_scale,
                "metallicity scale must be positive",
            ));
        }
        Ok(Self {
            abundances: ELEMENTS
                .iter()
                .map(|element| element.solar_abundance)
                .collect(),
            metallicity_scale,
        })
    }

    /// Overrides the unscaled A12 abundance of the element with the given symbol.
    pub fn set_abundance(&mut self, symbol: &str, abundance: fch) -> AtmosphereResult<()> {
        let idx = data::element_index(symbol)?;
        ensure_finite("abundance", abundance, None)?;
        self.abundances[idx] = abundance;
        Ok(())
    }

    pub fn metallicity_scale(&self) -> fch {
        self.metallicity_scale
    }

    /// A12 abundance of the element with the given table index, including metallicity scaling.
    pub fn abundance(&self, element_idx: usize) -> fch {
        let scaling = if ELEMENTS[element_idx].atomic_number > LAST_UNSCALED_ATOMIC_NUMBER {
            self.metallicity_scale.log10()
        } else {
            0.0
        };
        self.abundances[element_idx] + scaling
    }

    /// A12 abundance of the element with the given table index, excluding metallicity scaling.
    pub fn base_abundance(&self, element_idx: usize) -> fch {
        self.abundances[element_idx]
    }

    /// Natural logarithm of the number of atoms of the given element per hydrogen atom.
    pub fn log_relative_abundance(&self, element_idx: usize) -> fch {
        crate::constants::LN10 * (self.abundance(element_idx) - 12.0)
    }

    /// Number of atoms of all elements per hydrogen atom.
    pub fn total_relative_abundance(&self) -> fch {
        (0..NUM_ELEMENTS)
            .map(|idx| self.log_relative_abundance(idx).exp())
            .sum()
    }

    /// A12 abundance of helium.
    pub fn helium_abundance(&self) -> fch {
        self.abundance(1)
    }

    /// Natural logarithm of the total hydrogen number density at one depth,
    /// `N_H = (P_gas - P_e)/(k T A_tot)`.
    ///
    /// Electron pressures exceeding half the gas pressure are clamped to half,
    /// which is signalled by the returned flag.
    pub fn log_hydrogen_density(
        &self,
        log_temperature: fch,
        gas_pressure: fch,
        log_gas_pressure: fch,
        electron_pressure: fch,
    ) -> (fch, bool) {
        let clamped = electron_pressure > 0.5 * gas_pressure;
        let electron_pressure = electron_pressure.min(0.5 * gas_pressure);
        let log_density = log_gas_pressure + (1.0 - electron_pressure / gas_pressure).ln()
            - KBOLTZMANN.ln()
            - log_temperature
            - self.total_relative_abundance().ln();
        (log_density, clamped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn metallicity_only_scales_metals() {
        let solar = Composition::solar(1.0).unwrap();
        let poor = Composition::solar(0.1).unwrap();
        assert_relative_eq!(poor.abundance(0), solar.abundance(0));
        assert_relative_eq!(poor.abundance(1), solar.abundance(1));
        let fe = data::element_index("Fe").unwrap();
        assert_relative_eq!(poor.abundance(fe), solar.abundance(fe) - 1.0, epsilon = 1e-12);
        assert!(Composition::solar(0.0).is_err());
    }

    #[test]
    fn hydrogen_density_partitions_heavy_particle_pressure() {
        let composition = Composition::solar(1.0).unwrap();
        let log_temperature = fch::ln(6000.0);
        let total_particles = |log_hydrogen_density: fch| {
            (0..NUM_ELEMENTS)
                .map(|idx| (composition.log_relative_abundance(idx) + log_hydrogen_density).exp())
                .sum::<fch>()
        };

        let (log_density, clamped) =
            composition.log_hydrogen_density(log_temperature, 1e4, fch::ln(1e4), 1.0);
        assert!(!clamped);
        assert_relative_eq!(
            total_particles(log_density) * KBOLTZMANN * 6000.0,
            1e4 - 1.0,
            max_relative = 1e-10
        );
    }

    #[test]
    fn excessive_electron_pressure_is_clamped_and_flagged() {
        let composition = Composition::solar(1.0).unwrap();
        let log_temperature = fch::ln(6000.0);
        let (clamped_density, clamped) =
            composition.log_hydrogen_density(log_temperature, 1e5, fch::ln(1e5), 0.8e5);
        assert!(clamped);
        let (half_density, at_limit) =
            composition.log_hydrogen_density(log_temperature, 1e5, fch::ln(1e5), 0.5e5);
        assert!(!at_limit);
        assert_relative_eq!(clamped_density, half_density, max_relative = 1e-12);
    }
}
