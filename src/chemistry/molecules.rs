//! Dissociation equilibrium of the tracked diatomic molecules.

use super::fch;
use crate::{
    constants::{AMU, EV_TO_ERG, HPLANCK, KBOLTZMANN, PI},
    data::{
        self,
        atomic::NUM_ELEMENTS,
        molecular::{MoleculeData, MOLECULES, PARTITION_FUNCTION_TEMPERATURES},
    },
    error::AtmosphereResult,
    math::interpolate_clamped,
};
use lazy_static::lazy_static;

lazy_static! {
    /// Mass-independent part of the logarithm of the molecular Saha factor: ln((2 pi kB/h^2)^3/2)
    static ref LOG_MOLECULAR_SAHA_FACTOR: fch =
        1.5 * (fch::ln(2.0 * PI) + KBOLTZMANN.ln() - 2.0 * HPLANCK.ln());
}

/// A molecule with its constituents resolved to element table indices.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedMolecule {
    pub label: &'static str,
    pub first_element: usize,
    pub second_element: usize,
    /// Zero-based ionization stage of the second constituent.
    pub partner_stage: usize,
    /// Natural logarithm of the reduced mass [g].
    pub log_reduced_mass: fch,
    /// Dissociation energy [eV].
    pub dissociation_energy: fch,
    log_partition_functions: [fch; 5],
}

/// Membership of an element in a molecule, seen from the element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coupling {
    /// Index of the molecule in the network.
    pub molecule: usize,
    /// Element table index of the other constituent.
    pub partner_element: usize,
    /// Ionization stage of the other constituent.
    pub partner_stage: usize,
}

/// The tracked molecules and the elements they couple, resolved once into index maps.
#[derive(Clone, Debug, PartialEq)]
pub struct MoleculeNetwork {
    molecules: Vec<ResolvedMolecule>,
    couplings: Vec<Vec<Coupling>>,
}

impl MoleculeNetwork {
    /// Resolves the full built-in molecule table.
    pub fn new() -> AtmosphereResult<Self> {
        Self::from_molecules(MOLECULES.iter())
    }

    /// Resolves the given molecules against the element table.
    pub fn from_molecules<'a, I>(molecules: I) -> AtmosphereResult<Self>
    where
        I: IntoIterator<Item = &'a MoleculeData>,
    {
        let molecules = molecules
            .into_iter()
            .map(resolve_molecule)
            .collect::<AtmosphereResult<Vec<_>>>()?;

        let mut couplings = vec![Vec::new(); NUM_ELEMENTS];
        for (idx, molecule) in molecules.iter().enumerate() {
            couplings[molecule.first_element].push(Coupling {
                molecule: idx,
                partner_element: molecule.second_element,
                partner_stage: molecule.partner_stage,
            });
            if molecule.second_element != molecule.first_element {
                couplings[molecule.second_element].push(Coupling {
                    molecule: idx,
                    partner_element: molecule.first_element,
                    partner_stage: 0,
                });
            }
        }
        Ok(Self {
            molecules,
            couplings,
        })
    }

    /// A network without molecules, reducing the chemistry to pure ionization.
    pub fn empty() -> Self {
        Self {
            molecules: Vec::new(),
            couplings: vec![Vec::new(); NUM_ELEMENTS],
        }
    }

    pub fn num_molecules(&self) -> usize {
        self.molecules.len()
    }

    pub fn molecules(&self) -> &[ResolvedMolecule] {
        &self.molecules
    }

    pub fn molecule(&self, idx: usize) -> &ResolvedMolecule {
        &self.molecules[idx]
    }

    /// Molecules the element with the given table index takes part in.
    pub fn couplings_for(&self, element_idx: usize) -> &[Coupling] {
        &self.couplings[element_idx]
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.molecules
            .iter()
            .position(|molecule| molecule.label == label)
    }
}

impl ResolvedMolecule {
    /// Natural logarithm of the partition function, interpolated linearly in T
    /// and clamped to the tabulated temperature range.
    pub fn log_partition_function(&self, temperature: fch) -> fch {
        interpolate_clamped(
            &PARTITION_FUNCTION_TEMPERATURES[..],
            &self.log_partition_functions[..],
            temperature,
        )
    }

    /// Computes `ln(N_AB/N_A)` from the molecular Saha equation, given the
    /// population of the other constituent B and the partition functions of
    /// the two constituents.
    pub fn log_inverse_saha(
        &self,
        temperature: fch,
        log_temperature: fch,
        log_partner_population: fch,
        log_partition_function_a: fch,
        log_partition_function_b: fch,
    ) -> fch {
        let log_saha = *LOG_MOLECULAR_SAHA_FACTOR + 1.5 * self.log_reduced_mass
            - log_partner_population
            - self.dissociation_energy * EV_TO_ERG / (KBOLTZMANN * temperature)
            + 1.5 * log_temperature
            + log_partition_function_a
            + log_partition_function_b
            - self.log_partition_function(temperature);
        -log_saha
    }
}

/// Computes the natural logarithm of the number density of a molecule from the
/// total density of its first constituent and that constituent's balance.
///
/// `log_denominator` is `ln(N_A,total/N_A,I)` including all molecular terms of A.
pub fn molecular_population(
    log_first_element_density: fch,
    log_inverse_saha: fch,
    log_denominator: fch,
) -> fch {
    log_first_element_density + log_inverse_saha - log_denominator
}

fn resolve_molecule(molecule: &MoleculeData) -> AtmosphereResult<ResolvedMolecule> {
    let first_element = data::element_index(molecule.constituents[0])?;
    let second_element = data::element_index(molecule.constituents[1])?;
    let first_mass = data::atomic::ELEMENTS[first_element].mass;
    let second_mass = data::atomic::ELEMENTS[second_element].mass;
    let reduced_mass = AMU * first_mass * second_mass / (first_mass + second_mass);

    let mut log_partition_functions = [0.0; 5];
    for (log_q, &q) in log_partition_functions
        .iter_mut()
        .zip(molecule.partition_functions.iter())
    {
        *log_q = crate::error::ensure_positive("molecular partition function", q, None)?.ln();
    }

    Ok(ResolvedMolecule {
        label: molecule.label,
        first_element,
        second_element,
        partner_stage: molecule.partner_stage,
        log_reduced_mass: reduced_mass.ln(),
        dissociation_energy: molecule.dissociation_energy,
        log_partition_functions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn network_couples_both_constituents() {
        let network = MoleculeNetwork::new().unwrap();
        assert_eq!(network.num_molecules(), MOLECULES.len());

        let c = data::element_index("C").unwrap();
        let o = data::element_index("O").unwrap();
        let co = network.index_of("CO").unwrap();
        assert!(network
            .couplings_for(c)
            .iter()
            .any(|coupling| coupling.molecule == co && coupling.partner_element == o));
        assert!(network
            .couplings_for(o)
            .iter()
            .any(|coupling| coupling.molecule == co && coupling.partner_element == c));

        let h2 = network.index_of("H2").unwrap();
        assert_eq!(
            network
                .couplings_for(0)
                .iter()
                .filter(|coupling| coupling.molecule == h2)
                .count(),
            1
        );
        let h2_plus = network.index_of("H2+").unwrap();
        let coupling = network
            .couplings_for(0)
            .iter()
            .find(|coupling| coupling.molecule == h2_plus)
            .unwrap();
        assert_eq!(coupling.partner_stage, 1);
    }

    #[test]
    fn molecular_partition_function_is_interpolated_in_temperature() {
        let network = MoleculeNetwork::new().unwrap();
        let co = network.molecule(network.index_of("CO").unwrap());
        assert_relative_eq!(co.log_partition_function(3000.0), fch::ln(1.71706e3));
        assert_relative_eq!(co.log_partition_function(50.0), fch::ln(4.73391e1));
        assert_relative_eq!(co.log_partition_function(20000.0), fch::ln(1.50689e4));
    }

    #[test]
    fn molecules_dissociate_when_hot() {
        let network = MoleculeNetwork::new().unwrap();
        let co = network.molecule(network.index_of("CO").unwrap());
        let log_partner = fch::ln(1e13);
        let cool = co.log_inverse_saha(3000.0, fch::ln(3000.0), log_partner, 0.0, 0.0);
        let hot = co.log_inverse_saha(9000.0, fch::ln(9000.0), log_partner, 0.0, 0.0);
        assert!(cool > hot);
    }
}
