//! Equation of state: ionization, dissociation and mass density of the gas.

pub mod composition;
pub mod density;
pub mod ionization;
pub mod molecules;

use crate::{
    constants::KBOLTZMANN,
    data::{
        self,
        atomic::{ELEMENTS, NUM_ELEMENTS, NUM_STAGES},
    },
    depth::DualArray,
    error::{ensure_finite, AtmosphereError, AtmosphereResult},
};
use composition::Composition;
use ionization::{log_partition_functions, stage_populations, IonizationBalance};
use molecules::{molecular_population, MoleculeNetwork};
use ndarray::{Array1, Array2, Array3, ArrayView1};
use rayon::prelude::*;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for chemistry calculations.
#[allow(non_camel_case_types)]
pub type fch = f64;

/// Elements with atomic number up to this value contribute electrons.
pub const MAX_DONOR_ATOMIC_NUMBER: u32 = 28;

/// Populations of all tracked species throughout the atmosphere.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ChemicalState {
    /// ln N_z, indexed as `[element][depth]`.
    log_element_densities: Array2<fch>,
    /// ln N_z,j, indexed as `[element][stage][depth]`.
    log_stage_populations: Array3<fch>,
    /// ln N_AB, indexed as `[molecule][depth]`.
    log_molecule_populations: Array2<fch>,
    molecule_labels: Vec<String>,
    electron_density: DualArray,
    mass_density: DualArray,
    mean_molecular_weight: DualArray,
    /// Depths where the electron pressure had to be clamped to half the gas pressure.
    clamped_electron_pressure_depths: Vec<usize>,
}

impl ChemicalState {
    pub fn num_depths(&self) -> usize {
        self.electron_density.len()
    }

    pub fn log_element_densities(&self) -> &Array2<fch> {
        &self.log_element_densities
    }

    pub fn log_element_density(&self, element_idx: usize) -> ArrayView1<fch> {
        self.log_element_densities.row(element_idx)
    }

    pub fn log_stage_populations(&self) -> &Array3<fch> {
        &self.log_stage_populations
    }

    /// ln N of the given zero-based stage of the element with the given table index.
    pub fn log_stage_population(&self, element_idx: usize, stage: usize) -> ArrayView1<fch> {
        self.log_stage_populations
            .slice(ndarray::s![element_idx, stage, ..])
    }

    /// ln N of the species with the given label, e.g. `NaI`.
    pub fn log_species_population(&self, label: &str) -> AtmosphereResult<ArrayView1<fch>> {
        let (element_idx, stage) = data::parse_species_label(label)?;
        Ok(self.log_stage_population(element_idx, stage))
    }

    /// ln N of the molecule with the given label, e.g. `CO`.
    pub fn log_molecule_population(&self, label: &str) -> AtmosphereResult<ArrayView1<fch>> {
        let idx = self
            .molecule_labels
            .iter()
            .position(|molecule| molecule == label)
            .ok_or_else(|| AtmosphereError::lookup_miss("molecule", label))?;
        Ok(self.log_molecule_populations.row(idx))
    }

    pub fn electron_density(&self) -> &DualArray {
        &self.electron_density
    }

    pub fn mass_density(&self) -> &DualArray {
        &self.mass_density
    }

    pub fn mean_molecular_weight(&self) -> &DualArray {
        &self.mean_molecular_weight
    }

    pub fn clamped_electron_pressure_depths(&self) -> &[usize] {
        &self.clamped_electron_pressure_depths
    }
}

/// Solved chemistry at a single depth.
#[derive(Clone, Debug)]
struct DepthChemistry {
    log_element_densities: [fch; NUM_ELEMENTS],
    log_stage_populations: [[fch; NUM_STAGES]; NUM_ELEMENTS],
    log_molecule_populations: Vec<fch>,
    log_electron_density: fch,
    electron_pressure_clamped: bool,
}

/// Solver for the joint ionization and dissociation equilibrium.
#[derive(Clone, Debug)]
pub struct ChemistrySolver {
    composition: Composition,
    network: MoleculeNetwork,
    num_electron_iterations: usize,
}

impl ChemistrySolver {
    pub const DEFAULT_NUM_ELECTRON_ITERATIONS: usize = 3;

    pub fn new(
        composition: Composition,
        network: MoleculeNetwork,
        num_electron_iterations: usize,
    ) -> AtmosphereResult<Self> {
        if num_electron_iterations == 0 {
            return Err(AtmosphereError::invalid_parameter(
                "num_electron_iterations",
                0.0,
                "at least one electron density iteration is required",
            ));
        }
        Ok(Self {
            composition,
            network,
            num_electron_iterations,
        })
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn network(&self) -> &MoleculeNetwork {
        &self.network
    }

    /// Solves for the populations of all species at every depth, given the
    /// temperature, gas pressure and an initial electron density estimate.
    ///
    /// The electron density is iterated towards the number of electrons
    /// donated by the elements up to nickel. Each update takes the geometric
    /// mean of the previous and the donated density. The returned electron
    /// density is the donated density of the final stage populations.
    pub fn solve(
        &self,
        temperature: &DualArray,
        gas_pressure: &DualArray,
        electron_density_guess: &DualArray,
    ) -> AtmosphereResult<ChemicalState> {
        let num_depths = temperature.len();
        if gas_pressure.len() != num_depths || electron_density_guess.len() != num_depths {
            return Err(AtmosphereError::invalid_parameter(
                "num_depths",
                num_depths as fch,
                "structure arrays have inconsistent lengths",
            ));
        }

        let depths = (0..num_depths)
            .into_par_iter()
            .map(|depth| {
                self.solve_depth(
                    depth,
                    temperature.linear_at(depth),
                    temperature.log_at(depth),
                    gas_pressure.linear_at(depth),
                    gas_pressure.log_at(depth),
                    electron_density_guess.log_at(depth),
                )
            })
            .collect::<AtmosphereResult<Vec<_>>>()?;

        let num_molecules = self.network.num_molecules();
        let log_element_densities = Array2::from_shape_fn((NUM_ELEMENTS, num_depths), |(e, d)| {
            depths[d].log_element_densities[e]
        });
        let log_stage_populations =
            Array3::from_shape_fn((NUM_ELEMENTS, NUM_STAGES, num_depths), |(e, s, d)| {
                depths[d].log_stage_populations[e][s]
            });
        let log_molecule_populations = Array2::from_shape_fn((num_molecules, num_depths), |(m, d)| {
            depths[d].log_molecule_populations[m]
        });
        let electron_density = DualArray::from_log(
            "electron density",
            Array1::from_shape_fn(num_depths, |d| depths[d].log_electron_density),
        )?;
        let mass_density = density::mass_density_from_populations(&log_element_densities)?;
        let mean_molecular_weight = density::mean_molecular_weight(
            &mass_density,
            &log_element_densities,
            &log_molecule_populations,
            &electron_density,
        )?;

        Ok(ChemicalState {
            log_element_densities,
            log_stage_populations,
            log_molecule_populations,
            molecule_labels: self
                .network
                .molecules()
                .iter()
                .map(|molecule| molecule.label.to_string())
                .collect(),
            electron_density,
            mass_density,
            mean_molecular_weight,
            clamped_electron_pressure_depths: (0..num_depths)
                .filter(|&depth| depths[depth].electron_pressure_clamped)
                .collect(),
        })
    }

    fn solve_depth(
        &self,
        depth: usize,
        temperature: fch,
        log_temperature: fch,
        gas_pressure: fch,
        log_gas_pressure: fch,
        log_electron_density_guess: fch,
    ) -> AtmosphereResult<DepthChemistry> {
        let log_k = KBOLTZMANN.ln();

        let mut log_partition_function_table = [[0.0; NUM_STAGES]; NUM_ELEMENTS];
        for (element, log_u) in ELEMENTS.iter().zip(log_partition_function_table.iter_mut()) {
            *log_u = log_partition_functions(element, log_temperature);
        }

        let element_densities_for =
            |log_electron_density: fch| -> AtmosphereResult<([fch; NUM_ELEMENTS], bool)> {
                let (log_hydrogen_density, clamped) = self.composition.log_hydrogen_density(
                    log_temperature,
                    gas_pressure,
                    log_gas_pressure,
                    (log_electron_density + log_k + log_temperature).exp(),
                );
                ensure_finite("hydrogen density", log_hydrogen_density, Some(depth))?;
                let mut log_densities = [0.0; NUM_ELEMENTS];
                for (idx, log_density) in log_densities.iter_mut().enumerate() {
                    *log_density = self.composition.log_relative_abundance(idx) + log_hydrogen_density;
                }
                Ok((log_densities, clamped))
            };

        let mut log_electron_density = log_electron_density_guess;

        // Atomic-only populations seed the molecular partner densities
        let (mut log_element_densities, _) = element_densities_for(log_electron_density)?;
        let mut balances: Vec<IonizationBalance> = ELEMENTS
            .iter()
            .enumerate()
            .map(|(idx, element)| {
                stage_populations(
                    element,
                    log_element_densities[idx],
                    temperature,
                    log_temperature,
                    log_electron_density,
                    &[],
                )
            })
            .collect();
        let mut log_molecule_populations = vec![fch::NEG_INFINITY; self.network.num_molecules()];
        let mut log_donated_electron_density = log_electron_density;
        let mut electron_pressure_clamped = false;

        for _ in 0..self.num_electron_iterations {
            let (densities, clamped) = element_densities_for(log_electron_density)?;
            log_element_densities = densities;
            electron_pressure_clamped |= clamped;

            let previous = balances;
            balances = ELEMENTS
                .iter()
                .enumerate()
                .map(|(idx, element)| {
                    let log_molecular_terms: Vec<fch> = self
                        .network
                        .couplings_for(idx)
                        .iter()
                        .map(|coupling| {
                            self.network.molecule(coupling.molecule).log_inverse_saha(
                                temperature,
                                log_temperature,
                                previous[coupling.partner_element].log_stage_populations
                                    [coupling.partner_stage],
                                log_partition_function_table[idx][0],
                                log_partition_function_table[coupling.partner_element]
                                    [coupling.partner_stage],
                            )
                        })
                        .collect();
                    stage_populations(
                        element,
                        log_element_densities[idx],
                        temperature,
                        log_temperature,
                        log_electron_density,
                        &log_molecular_terms,
                    )
                })
                .collect();

            for (idx, molecule) in self.network.molecules().iter().enumerate() {
                let first = molecule.first_element;
                let second = molecule.second_element;
                let log_inverse_saha = molecule.log_inverse_saha(
                    temperature,
                    log_temperature,
                    previous[second].log_stage_populations[molecule.partner_stage],
                    log_partition_function_table[first][0],
                    log_partition_function_table[second][molecule.partner_stage],
                );
                log_molecule_populations[idx] = molecular_population(
                    log_element_densities[first],
                    log_inverse_saha,
                    balances[first].log_denominator,
                );
            }

            log_donated_electron_density = donated_log_electron_density(&balances);
            ensure_finite("electron density", log_donated_electron_density, Some(depth))?;
            log_electron_density = 0.5 * (log_electron_density + log_donated_electron_density);
        }

        let mut log_stage_populations = [[0.0; NUM_STAGES]; NUM_ELEMENTS];
        for (populations, balance) in log_stage_populations.iter_mut().zip(balances.iter()) {
            *populations = balance.log_stage_populations;
        }
        Ok(DepthChemistry {
            log_element_densities,
            log_stage_populations,
            log_molecule_populations,
            log_electron_density: log_donated_electron_density,
            electron_pressure_clamped,
        })
    }
}

/// Natural logarithm of `Σ_z (N_II + 2 N_III)` over the donor elements.
fn donated_log_electron_density(balances: &[IonizationBalance]) -> fch {
    let donated: fch = ELEMENTS
        .iter()
        .zip(balances.iter())
        .filter(|(element, _)| element.atomic_number <= MAX_DONOR_ATOMIC_NUMBER)
        .map(|(_, balance)| {
            balance.log_stage_populations[1].exp() + 2.0 * balance.log_stage_populations[2].exp()
        })
        .sum();
    donated.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn solar_solver() -> ChemistrySolver {
        ChemistrySolver::new(
            Composition::solar(1.0).unwrap(),
            MoleculeNetwork::new().unwrap(),
            ChemistrySolver::DEFAULT_NUM_ELECTRON_ITERATIONS,
        )
        .unwrap()
    }

    fn photospheric_state(temperatures: Vec<fch>, pressures: Vec<fch>) -> ChemicalState {
        let temperature = DualArray::from_linear("temperature", Array1::from(temperatures)).unwrap();
        let gas_pressure = DualArray::from_linear("gas pressure", Array1::from(pressures)).unwrap();
        let guess = DualArray::from_log(
            "electron density",
            gas_pressure.log() - temperature.log() - KBOLTZMANN.ln() - fch::ln(1e4),
        )
        .unwrap();
        solar_solver().solve(&temperature, &gas_pressure, &guess).unwrap()
    }

    #[test]
    fn electron_density_equals_donated_electrons() {
        let state = photospheric_state(vec![3500.0, 5800.0, 9000.0], vec![1e3, 1e5, 1e6]);
        for depth in 0..state.num_depths() {
            let donated: fch = ELEMENTS
                .iter()
                .enumerate()
                .filter(|(_, element)| element.atomic_number <= MAX_DONOR_ATOMIC_NUMBER)
                .map(|(idx, _)| {
                    state.log_stage_population(idx, 1)[depth].exp()
                        + 2.0 * state.log_stage_population(idx, 2)[depth].exp()
                })
                .sum();
            assert_relative_eq!(
                state.electron_density().linear_at(depth),
                donated,
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn atoms_are_conserved_without_molecules() {
        let solver = ChemistrySolver::new(
            Composition::solar(1.0).unwrap(),
            MoleculeNetwork::empty(),
            2,
        )
        .unwrap();
        let temperature = DualArray::constant("temperature", 1, 7000.0).unwrap();
        let gas_pressure = DualArray::constant("gas pressure", 1, 1e4).unwrap();
        let guess = DualArray::constant("electron density", 1, 1e12).unwrap();
        let state = solver.solve(&temperature, &gas_pressure, &guess).unwrap();
        for element_idx in 0..NUM_ELEMENTS {
            let total: fch = (0..NUM_STAGES)
                .map(|stage| state.log_stage_population(element_idx, stage)[0].exp())
                .sum();
            assert_relative_eq!(
                total,
                state.log_element_density(element_idx)[0].exp(),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn molecules_form_in_cool_gas() {
        let state = photospheric_state(vec![3000.0, 8000.0], vec![1e5, 1e5]);
        let co = state.log_molecule_population("CO").unwrap();
        assert!(co[0] > co[1]);
        assert!(state.log_molecule_population("XY").is_err());
    }

    #[test]
    fn hydrogen_molecules_raise_mean_molecular_weight_in_cool_gas() {
        let temperature = DualArray::constant("temperature", 1, 3000.0).unwrap();
        let gas_pressure = DualArray::constant("gas pressure", 1, 1e5).unwrap();
        let guess = DualArray::constant("electron density", 1, 1e10).unwrap();
        let atomic = ChemistrySolver::new(
            Composition::solar(1.0).unwrap(),
            MoleculeNetwork::empty(),
            ChemistrySolver::DEFAULT_NUM_ELECTRON_ITERATIONS,
        )
        .unwrap()
        .solve(&temperature, &gas_pressure, &guess)
        .unwrap();
        let molecular = solar_solver()
            .solve(&temperature, &gas_pressure, &guess)
            .unwrap();
        assert!(molecular.log_molecule_population("H2").unwrap()[0].exp() > 1e15);
        assert!(
            molecular.mean_molecular_weight().linear_at(0)
                > atomic.mean_molecular_weight().linear_at(0)
        );
    }

    #[test]
    fn sodium_is_mostly_ionized_in_solar_photosphere() {
        let state = photospheric_state(vec![5800.0], vec![1e5]);
        let neutral = state.log_species_population("NaI").unwrap()[0];
        let ionized = state.log_species_population("NaII").unwrap()[0];
        assert!(ionized > neutral);
        assert!(state.mean_molecular_weight().linear_at(0) > 1.0);
    }

    #[test]
    fn excessive_electron_density_guess_is_flagged() {
        let solver = ChemistrySolver::new(
            Composition::solar(1.0).unwrap(),
            MoleculeNetwork::empty(),
            1,
        )
        .unwrap();
        let temperature = DualArray::constant("temperature", 2, 6000.0).unwrap();
        let gas_pressure = DualArray::constant("gas pressure", 2, 1e4).unwrap();
        let guess =
            DualArray::from_linear("electron density", Array1::from(vec![1e20, 1e12])).unwrap();
        let state = solver.solve(&temperature, &gas_pressure, &guess).unwrap();
        assert_eq!(state.clamped_electron_pressure_depths(), &[0]);
        let state = photospheric_state(vec![5800.0], vec![1e5]);
        assert!(state.clamped_electron_pressure_depths().is_empty());
    }

    #[test]
    fn zero_electron_iterations_are_rejected() {
        assert!(ChemistrySolver::new(
            Composition::solar(1.0).unwrap(),
            MoleculeNetwork::empty(),
            0
        )
        .is_err());
    }
}
