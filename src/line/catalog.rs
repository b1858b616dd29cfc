//! Built-in list of strong lines in the visible spectrum.

use super::{descriptor::LineDescriptor, fln};
use crate::error::{AtmosphereError, AtmosphereResult};
use lazy_static::lazy_static;

/// Atomic data for one catalog entry.
struct CatalogEntry {
    name: &'static str,
    title: &'static str,
    species: &'static str,
    wavelength_nm: fln,
    abundance: fln,
    log_oscillator_strength: fln,
    einstein_a: fln,
    excitation_energy: fln,
    lower_weight: fln,
    stage_weights: [fln; 2],
    collisional_enhancement: fln,
    atomic_mass: fln,
}

#[rustfmt::skip]
static ENTRIES: [CatalogEntry; 14] = [
    CatalogEntry { name: "CaII_3933", title: "Ca II K", species: "CaII", wavelength_nm: 393.366, abundance: 6.34, log_oscillator_strength: -0.166, einstein_a: 1.47e8, excitation_energy: 0.01, lower_weight: 2.0, stage_weights: [1.0, 2.0], collisional_enhancement: 0.5, atomic_mass: 40.078 },
    CatalogEntry { name: "CaII_3968", title: "Ca II H", species: "CaII", wavelength_nm: 396.847, abundance: 6.34, log_oscillator_strength: -0.482, einstein_a: 1.4e8, excitation_energy: 0.01, lower_weight: 2.0, stage_weights: [1.0, 2.0], collisional_enhancement: 0.5, atomic_mass: 40.078 },
    CatalogEntry { name: "FeI_4045", title: "Fe I 404.6", species: "FeI", wavelength_nm: 404.581, abundance: 7.50, log_oscillator_strength: -0.674, einstein_a: 8.62e7, excitation_energy: 1.485, lower_weight: 9.0, stage_weights: [1.0, 1.0], collisional_enhancement: 0.0, atomic_mass: 55.845 },
    CatalogEntry { name: "HI_4101", title: "H I δ", species: "HI", wavelength_nm: 410.174, abundance: 12.0, log_oscillator_strength: -1.655, einstein_a: 9.7320e5, excitation_energy: 10.2, lower_weight: 8.0, stage_weights: [2.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 1.0 },
    CatalogEntry { name: "CaI_4226", title: "Ca I 422.7", species: "CaI", wavelength_nm: 422.673, abundance: 6.34, log_oscillator_strength: 0.243, einstein_a: 2.18e8, excitation_energy: 0.0, lower_weight: 1.0, stage_weights: [1.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 40.078 },
    CatalogEntry { name: "FeI_4271", title: "Fe I 427.2", species: "FeI", wavelength_nm: 427.176, abundance: 7.50, log_oscillator_strength: -1.118, einstein_a: 2.28e7, excitation_energy: 1.485, lower_weight: 9.0, stage_weights: [1.0, 1.0], collisional_enhancement: 0.0, atomic_mass: 55.845 },
    CatalogEntry { name: "HI_4340", title: "H I γ", species: "HI", wavelength_nm: 434.047, abundance: 12.0, log_oscillator_strength: -1.350, einstein_a: 2.5304e6, excitation_energy: 10.2, lower_weight: 8.0, stage_weights: [2.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 1.0 },
    CatalogEntry { name: "HeI_4387", title: "He I 438.8", species: "HeI", wavelength_nm: 438.793, abundance: 10.93, log_oscillator_strength: -1.364, einstein_a: 8.9889e6, excitation_energy: 21.218, lower_weight: 3.0, stage_weights: [1.0, 1.0], collisional_enhancement: 0.0, atomic_mass: 4.003 },
    CatalogEntry { name: "HeI_4471", title: "He I 447.1", species: "HeI", wavelength_nm: 447.147, abundance: 10.93, log_oscillator_strength: -0.986, einstein_a: 2.4579e7, excitation_energy: 20.964, lower_weight: 5.0, stage_weights: [1.0, 1.0], collisional_enhancement: 0.0, atomic_mass: 4.003 },
    CatalogEntry { name: "HI_4861", title: "H I β", species: "HI", wavelength_nm: 486.128, abundance: 12.0, log_oscillator_strength: -0.914, einstein_a: 9.6683e6, excitation_energy: 10.2, lower_weight: 8.0, stage_weights: [2.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 1.0 },
    CatalogEntry { name: "MgI_5183", title: "Mg I b1", species: "MgI", wavelength_nm: 518.360, abundance: 7.60, log_oscillator_strength: -0.867, einstein_a: 5.61e7, excitation_energy: 2.717, lower_weight: 5.0, stage_weights: [1.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 24.305 },
    CatalogEntry { name: "NaI_5889", title: "Na I D2", species: "NaI", wavelength_nm: 588.995, abundance: 6.24, log_oscillator_strength: -0.193, einstein_a: 6.16e7, excitation_energy: 0.0, lower_weight: 2.0, stage_weights: [2.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 22.990 },
    CatalogEntry { name: "NaI_5895", title: "Na I D1", species: "NaI", wavelength_nm: 589.592, abundance: 6.24, log_oscillator_strength: -0.495, einstein_a: 6.14e7, excitation_energy: 0.0, lower_weight: 2.0, stage_weights: [2.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 22.990 },
    CatalogEntry { name: "HI_6562", title: "H I α", species: "HI", wavelength_nm: 656.282, abundance: 12.0, log_oscillator_strength: -0.193, einstein_a: 6.4651e7, excitation_energy: 10.1988357, lower_weight: 8.0, stage_weights: [2.0, 1.0], collisional_enhancement: 1.0, atomic_mass: 1.0 },
];

lazy_static! {
    /// Catalog lines in order of increasing wavelength.
    pub static ref LINE_CATALOG: Vec<LineDescriptor> = ENTRIES
        .iter()
        .map(|entry| {
            LineDescriptor::new(
                entry.name,
                entry.species,
                entry.wavelength_nm,
                entry.log_oscillator_strength,
                entry.excitation_energy,
            )
            .map(|line| {
                line.with_title(entry.title)
                    .with_abundance(entry.abundance)
                    .with_lower_weight(entry.lower_weight)
                    .with_stage_weights(entry.stage_weights)
                    .with_collisional_enhancement(entry.collisional_enhancement)
                    .with_einstein_a(entry.einstein_a)
                    .with_atomic_mass(entry.atomic_mass)
            })
            .unwrap()
        })
        .collect();
}

/// Names of all catalog lines.
pub fn catalog_line_names() -> Vec<&'static str> {
    ENTRIES.iter().map(|entry| entry.name).collect()
}

/// Looks up the catalog line with the given name, e.g. `NaI_5895`.
pub fn catalog_line(name: &str) -> AtmosphereResult<&'static LineDescriptor> {
    LINE_CATALOG
        .iter()
        .find(|line| line.name() == name)
        .ok_or_else(|| AtmosphereError::lookup_miss("line catalog", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered_and_resolvable() {
        assert_eq!(LINE_CATALOG.len(), 14);
        assert!(LINE_CATALOG
            .windows(2)
            .all(|pair| pair[1].wavelength() > pair[0].wavelength()));
        let d1 = catalog_line("NaI_5895").unwrap();
        assert_eq!(d1.species_label(), "NaI");
        assert_eq!(d1.title(), "Na I D1");
        assert!(catalog_line("NaI_5000").is_err());
        assert_eq!(catalog_line_names().len(), 14);
    }
}
