//! Atomic data describing a single bound-bound transition.

use super::fln;
use crate::{
    constants::{CM_TO_NM, NM_TO_CM},
    data::{self, atomic::ELEMENTS},
    error::{AtmosphereError, AtmosphereResult},
};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Constant of the oscillator strength to Einstein A conversion for
/// wavelengths in nanometres [nm^2/s].
const EINSTEIN_A_CONSTANT: fln = 6.67e13;

/// Immutable description of a spectral line.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineDescriptor {
    name: String,
    title: String,
    element_idx: usize,
    stage: usize,
    wavelength: fln,
    abundance: fln,
    log_oscillator_strength: fln,
    excitation_energy: fln,
    lower_weight: fln,
    upper_weight: Option<fln>,
    stage_weights: [fln; 2],
    collisional_enhancement: fln,
    atomic_mass: fln,
    einstein_a: Option<fln>,
}

impl LineDescriptor {
    /// Creates a new line of the given species (e.g. `NaI`) at the given rest
    /// wavelength [nm].
    ///
    /// The abundance and atomic mass default to the tabulated solar values,
    /// all statistical weights to one and the collisional enhancement to zero.
    pub fn new(
        name: &str,
        species_label: &str,
        wavelength_nm: fln,
        log_oscillator_strength: fln,
        excitation_energy: fln,
    ) -> AtmosphereResult<Self> {
        let (element_idx, stage) = data::parse_species_label(species_label)?;
        if !(wavelength_nm.is_finite() && wavelength_nm > 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "wavelength",
                wavelength_nm,
                "line wavelength must be positive",
            ));
        }
        if !log_oscillator_strength.is_finite() {
            return Err(AtmosphereError::invalid_parameter(
                "log_oscillator_strength",
                log_oscillator_strength,
                "oscillator strength must be finite",
            ));
        }
        if !(excitation_energy.is_finite() && excitation_energy >= 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "excitation_energy",
                excitation_energy,
                "excitation energy must be non-negative",
            ));
        }
        let element = &ELEMENTS[element_idx];
        Ok(Self {
            name: name.to_string(),
            title: name.to_string(),
            element_idx,
            stage,
            wavelength: wavelength_nm * NM_TO_CM,
            abundance: element.solar_abundance,
            log_oscillator_strength,
            excitation_energy,
            lower_weight: 1.0,
            upper_weight: None,
            stage_weights: [1.0, 1.0],
            collisional_enhancement: 0.0,
            atomic_mass: element.mass,
            einstein_a: None,
        })
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    /// Sets the A12 abundance of the absorbing element.
    pub fn with_abundance(mut self, abundance: fln) -> Self {
        self.abundance = abundance;
        self
    }

    pub fn with_lower_weight(mut self, lower_weight: fln) -> Self {
        self.lower_weight = lower_weight;
        self
    }

    pub fn with_upper_weight(mut self, upper_weight: fln) -> Self {
        self.upper_weight = Some(upper_weight);
        self
    }

    /// Sets the ground state statistical weights of stages I and II.
    pub fn with_stage_weights(mut self, stage_weights: [fln; 2]) -> Self {
        self.stage_weights = stage_weights;
        self
    }

    /// Sets the log10 enhancement of the collisional damping over the solar
    /// reference value.
    pub fn with_collisional_enhancement(mut self, enhancement: fln) -> Self {
        self.collisional_enhancement = enhancement;
        self
    }

    /// Sets the mass of the absorber [amu].
    pub fn with_atomic_mass(mut self, atomic_mass: fln) -> Self {
        self.atomic_mass = atomic_mass;
        self
    }

    /// Sets the Einstein A coefficient [1/s] explicitly.
    pub fn with_einstein_a(mut self, einstein_a: fln) -> Self {
        self.einstein_a = Some(einstein_a);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn element_idx(&self) -> usize {
        self.element_idx
    }

    pub fn element_symbol(&self) -> &'static str {
        ELEMENTS[self.element_idx].symbol
    }

    /// Zero-based ionization stage.
    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn species_label(&self) -> String {
        data::species_label(self.element_symbol(), self.stage)
    }

    pub fn is_neutral_hydrogen(&self) -> bool {
        self.element_idx == 0 && self.stage == 0
    }

    /// Rest wavelength [cm].
    pub fn wavelength(&self) -> fln {
        self.wavelength
    }

    pub fn wavelength_nm(&self) -> fln {
        self.wavelength * CM_TO_NM
    }

    pub fn abundance(&self) -> fln {
        self.abundance
    }

    pub fn log_oscillator_strength(&self) -> fln {
        self.log_oscillator_strength
    }

    /// Excitation energy of the lower level above the ground state of its stage [eV].
    pub fn excitation_energy(&self) -> fln {
        self.excitation_energy
    }

    pub fn lower_weight(&self) -> fln {
        self.lower_weight
    }

    /// Upper level statistical weight, equal to the lower one unless given.
    pub fn upper_weight(&self) -> fln {
        self.upper_weight.unwrap_or(self.lower_weight)
    }

    /// Ground state statistical weight of the line's ionization stage. Only
    /// stages I and II carry weights.
    pub fn stage_weight(&self) -> AtmosphereResult<fln> {
        self.stage_weights
            .get(self.stage)
            .copied()
            .ok_or_else(|| AtmosphereError::lookup_miss("stage weight", self.species_label()))
    }

    pub fn collisional_enhancement(&self) -> fln {
        self.collisional_enhancement
    }

    /// Mass of the absorber [amu].
    pub fn atomic_mass(&self) -> fln {
        self.atomic_mass
    }

    /// Einstein A coefficient [1/s] for spontaneous emission, derived from the
    /// oscillator strength unless given explicitly.
    pub fn einstein_a(&self) -> fln {
        self.einstein_a.unwrap_or_else(|| {
            EINSTEIN_A_CONSTANT * (self.lower_weight / self.upper_weight())
                * fln::powf(10.0, self.log_oscillator_strength)
                / self.wavelength_nm().powi(2)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn species_is_resolved_from_label() {
        let line = LineDescriptor::new("NaI_5889", "NaI", 588.995, -0.193, 0.0).unwrap();
        assert_eq!(line.element_symbol(), "Na");
        assert_eq!(line.stage(), 0);
        assert_eq!(line.species_label(), "NaI");
        assert_relative_eq!(line.wavelength(), 588.995e-7);
        assert!(LineDescriptor::new("X", "XxI", 500.0, 0.0, 0.0).is_err());
        assert!(LineDescriptor::new("X", "NaI", -1.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn einstein_a_follows_oscillator_strength_unless_given() {
        let line = LineDescriptor::new("test", "CaI", 500.0, 0.0, 0.0).unwrap();
        assert_relative_eq!(line.einstein_a(), 6.67e13 / 2.5e5, max_relative = 1e-12);
        let weighted = line.clone().with_lower_weight(2.0).with_upper_weight(4.0);
        assert_relative_eq!(weighted.einstein_a(), 0.5 * 6.67e13 / 2.5e5, max_relative = 1e-12);
        assert_relative_eq!(line.with_einstein_a(1e8).einstein_a(), 1e8);
    }

    #[test]
    fn stage_weights_exist_only_for_the_two_lowest_stages() {
        let ionized = LineDescriptor::new("test", "CaII", 393.366, -0.166, 0.0)
            .unwrap()
            .with_stage_weights([1.0, 2.0]);
        assert_relative_eq!(ionized.stage_weight().unwrap(), 2.0);
        let doubly_ionized = LineDescriptor::new("test", "FeIII", 500.0, 0.0, 0.0).unwrap();
        assert!(matches!(
            doubly_ionized.stage_weight(),
            Err(AtmosphereError::LookupMiss { .. })
        ));
    }
}
