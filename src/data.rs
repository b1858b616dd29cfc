//! Reference data tables and the lookup services built on them.
//!
//! Atomic species are labelled by element symbol followed by the ionization
//! stage as a roman numeral, e.g. `FeI` or `CaII`. Lookups of unknown labels
//! fail with [`AtmosphereError::LookupMiss`] rather than falling back to
//! placeholder values.

pub mod atomic;
pub mod hjerting;
pub mod molecular;
pub mod reference_models;

use crate::error::{AtmosphereError, AtmosphereResult};
use atomic::{ElementData, ELEMENTS, NUM_STAGES};
use lazy_static::lazy_static;
use molecular::{MoleculeData, MOLECULES};
use regex::Regex;

lazy_static! {
    static ref SPECIES_LABEL_REGEX: Regex = Regex::new(r"^([A-Z][a-z]?)([IVX]+)$").unwrap();
}

/// Returns the index of the element with the given symbol in the element table.
pub fn element_index(symbol: &str) -> AtmosphereResult<usize> {
    ELEMENTS
        .iter()
        .position(|element| element.symbol == symbol)
        .ok_or_else(|| AtmosphereError::lookup_miss("element", symbol))
}

/// Returns the reference data for the element with the given symbol.
pub fn element(symbol: &str) -> AtmosphereResult<&'static ElementData> {
    element_index(symbol).map(|idx| &ELEMENTS[idx])
}

/// Returns the index of the molecule with the given label in the molecule table.
pub fn molecule_index(label: &str) -> AtmosphereResult<usize> {
    MOLECULES
        .iter()
        .position(|molecule| molecule.label == label)
        .ok_or_else(|| AtmosphereError::lookup_miss("molecule", label))
}

/// Returns the reference data for the molecule with the given label.
pub fn molecule(label: &str) -> AtmosphereResult<&'static MoleculeData> {
    molecule_index(label).map(|idx| &MOLECULES[idx])
}

/// Splits a species label like `FeII` into its element table index and
/// zero-based ionization stage.
pub fn parse_species_label(label: &str) -> AtmosphereResult<(usize, usize)> {
    let groups = SPECIES_LABEL_REGEX
        .captures(label)
        .ok_or_else(|| AtmosphereError::lookup_miss("species", label))?;
    let element_idx = element_index(&groups[1])
        .map_err(|_| AtmosphereError::lookup_miss("species", label))?;
    let stage = match roman::from(&groups[2]) {
        Some(stage) if stage >= 1 && (stage as usize) <= NUM_STAGES => stage as usize - 1,
        _ => return Err(AtmosphereError::lookup_miss("species", label)),
    };
    Ok((element_idx, stage))
}

/// Formats the label of the given zero-based ionization stage of an element.
pub fn species_label(symbol: &str, stage: usize) -> String {
    format!(
        "{}{}",
        symbol,
        roman::to((stage + 1) as i32).unwrap_or_default()
    )
}

/// Ionization energy of the given species [eV].
pub fn ionization_energy(label: &str) -> AtmosphereResult<f64> {
    let (element_idx, stage) = parse_species_label(label)?;
    Ok(ELEMENTS[element_idx].ionization_energies[stage])
}

/// Base 10 logarithms of the partition function of the given species at
/// θ = 5040/T = 1 and θ = 0.5.
pub fn partition_function(label: &str) -> AtmosphereResult<[f64; 2]> {
    let (element_idx, stage) = parse_species_label(label)?;
    Ok(ELEMENTS[element_idx].log10_partition_functions[stage])
}

/// Atomic mass of the given element [amu].
pub fn atomic_mass(symbol: &str) -> AtmosphereResult<f64> {
    element(symbol).map(|element| element.mass)
}

/// Dissociation energy of the given molecule [eV].
pub fn dissociation_energy(label: &str) -> AtmosphereResult<f64> {
    molecule(label).map(|molecule| molecule.dissociation_energy)
}

/// Partition function of the given molecule at the tabulated temperatures.
pub fn molecular_partition_function(label: &str) -> AtmosphereResult<[f64; 5]> {
    molecule(label).map(|molecule| molecule.partition_functions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_label_parsing_works() {
        let (fe, stage) = parse_species_label("FeII").unwrap();
        assert_eq!(ELEMENTS[fe].symbol, "Fe");
        assert_eq!(stage, 1);
        assert_eq!(parse_species_label("HI").unwrap(), (0, 0));
        assert_eq!(species_label("Ca", 1), "CaII");
        assert!(parse_species_label("FeV").is_err());
        assert!(parse_species_label("Xx").is_err());
        assert!(parse_species_label("Uuo").is_err());
    }

    #[test]
    fn lookups_return_tabulated_values() {
        assert_eq!(ionization_energy("NaI").unwrap(), 5.1390767);
        assert_eq!(partition_function("FeI").unwrap(), [1.43, 1.74]);
        assert_eq!(partition_function("CoII").unwrap(), [1.46, 1.66]);
        assert_eq!(atomic_mass("Fe").unwrap(), 55.845);
        assert_eq!(dissociation_energy("CO").unwrap(), 11.092);
        assert_eq!(molecular_partition_function("H2").unwrap()[0], 8.83429e-1);
    }

    #[test]
    fn missing_labels_are_reported() {
        assert_eq!(
            ionization_energy("UI"),
            Err(AtmosphereError::lookup_miss("species", "UI"))
        );
        assert_eq!(
            dissociation_energy("ZrO"),
            Err(AtmosphereError::lookup_miss("molecule", "ZrO"))
        );
        assert!(atomic_mass("Q").is_err());
    }

    #[test]
    fn element_table_is_consistent() {
        for element in ELEMENTS.iter() {
            assert!(element.mass > 0.0);
            for &energy in element.ionization_energies.iter() {
                assert!(energy > 0.0);
            }
        }
        for molecule in MOLECULES.iter() {
            for symbol in molecule.constituents.iter() {
                assert!(element_index(symbol).is_ok());
            }
        }
    }
}
