//! Continuous opacity of the atmospheric gas.

pub mod continuum;
pub mod metals;
pub mod rayleigh;
pub mod rosseland;

use crate::{
    chemistry::{ionization::log_partition_functions, ChemicalState},
    constants::{KBOLTZMANN, LN10},
    data::atomic::ELEMENTS,
    depth::DualArray,
    error::{ensure_positive, AtmosphereError, AtmosphereResult},
    radiation::WavelengthGrid,
};
use continuum::{total_extinction, SpectralPoint};
use metals::MetalAbsorbers;
use ndarray::Array2;
use rayon::prelude::*;

pub use rosseland::rosseland_mean;

/// Floating-point precision to use for opacities.
#[allow(non_camel_case_types)]
pub type fop = f64;

const HYDROGEN_IDX: usize = 0;
const HELIUM_IDX: usize = 1;

/// Number densities [1/cm^3] of the continuum absorbers at a single depth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalAbsorbers {
    pub temperature: fop,
    /// θ = 5040/T.
    pub theta: fop,
    pub electron_density: fop,
    /// P_e = N_e k T [dyn/cm^2].
    pub electron_pressure: fop,
    pub neutral_hydrogen: fop,
    pub ionized_hydrogen: fop,
    pub neutral_helium: fop,
    pub ground_state_hydrogen: fop,
    pub ground_state_helium: fop,
    pub molecular_hydrogen: fop,
    pub metals: MetalAbsorbers,
}

impl LocalAbsorbers {
    /// Collects the absorbers, deriving ground-state populations from the
    /// partition functions of H I and He I.
    pub fn new(
        temperature: fop,
        electron_density: fop,
        neutral_hydrogen: fop,
        ionized_hydrogen: fop,
        neutral_helium: fop,
        molecular_hydrogen: fop,
    ) -> Self {
        let log_temperature = temperature.ln();
        let log_u_hydrogen = log_partition_functions(&ELEMENTS[HYDROGEN_IDX], log_temperature)[0];
        let log_u_helium = log_partition_functions(&ELEMENTS[HELIUM_IDX], log_temperature)[0];
        Self {
            temperature,
            theta: 5040.0 / temperature,
            electron_density,
            electron_pressure: electron_density * KBOLTZMANN * temperature,
            neutral_hydrogen,
            ionized_hydrogen,
            neutral_helium,
            ground_state_hydrogen: neutral_hydrogen * (-log_u_hydrogen).exp(),
            ground_state_helium: neutral_helium * (-log_u_helium).exp(),
            molecular_hydrogen,
            metals: MetalAbsorbers::default(),
        }
    }

    pub fn with_metals(mut self, metals: MetalAbsorbers) -> Self {
        self.metals = metals;
        self
    }
}

/// Continuum absorbers at every depth of the atmosphere.
#[derive(Clone, Debug, PartialEq)]
pub struct AbsorberPopulations {
    depths: Vec<LocalAbsorbers>,
}

impl AbsorberPopulations {
    /// Extracts the absorber populations from the given chemical equilibrium.
    ///
    /// Molecular hydrogen is taken to be absent if the molecule network does
    /// not include it.
    pub fn from_chemistry(
        chemistry: &ChemicalState,
        temperature: &DualArray,
    ) -> AtmosphereResult<Self> {
        let num_depths = chemistry.num_depths();
        if temperature.len() != num_depths {
            return Err(AtmosphereError::invalid_parameter(
                "num_depths",
                temperature.len() as fop,
                "temperature and chemical state have inconsistent lengths",
            ));
        }
        let neutral_hydrogen = chemistry.log_stage_population(HYDROGEN_IDX, 0);
        let ionized_hydrogen = chemistry.log_stage_population(HYDROGEN_IDX, 1);
        let neutral_helium = chemistry.log_stage_population(HELIUM_IDX, 0);
        let molecular_hydrogen = chemistry.log_molecule_population("H2").ok();
        let log_stage_populations = chemistry.log_stage_populations();

        let depths = (0..num_depths)
            .map(|depth| {
                let metals = MetalAbsorbers::from_stage_densities(
                    temperature.log_at(depth),
                    |element_idx, stage| log_stage_populations[[element_idx, stage, depth]].exp(),
                );
                LocalAbsorbers::new(
                    temperature.linear_at(depth),
                    chemistry.electron_density().linear_at(depth),
                    neutral_hydrogen[depth].exp(),
                    ionized_hydrogen[depth].exp(),
                    neutral_helium[depth].exp(),
                    molecular_hydrogen
                        .as_ref()
                        .map_or(0.0, |populations| populations[depth].exp()),
                )
                .with_metals(metals)
            })
            .collect();
        Ok(Self { depths })
    }

    pub fn from_depths(depths: Vec<LocalAbsorbers>) -> Self {
        Self { depths }
    }

    pub fn num_depths(&self) -> usize {
        self.depths.len()
    }

    pub fn at(&self, depth: usize) -> &LocalAbsorbers {
        &self.depths[depth]
    }
}

/// Computes the continuum mass extinction coefficient ln κ_λ [cm^2/g] for
/// every wavelength and depth, indexed as `[wavelength][depth]`.
///
/// The total is scaled by `10^log10_fudge`.
pub fn continuum_opacity(
    mass_density: &DualArray,
    wavelengths: &WavelengthGrid,
    populations: &AbsorberPopulations,
    log10_fudge: fop,
) -> AtmosphereResult<Array2<fop>> {
    let num_depths = mass_density.len();
    if populations.num_depths() != num_depths {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            populations.num_depths() as fop,
            "absorber populations and mass density have inconsistent lengths",
        ));
    }
    let log_fudge = LN10 * log10_fudge;

    let rows = wavelengths
        .wavelengths()
        .to_vec()
        .into_par_iter()
        .map(|wavelength| {
            let point = SpectralPoint::new(wavelength);
            (0..num_depths)
                .map(|depth| {
                    let extinction = total_extinction(populations.at(depth), &point);
                    ensure_positive("continuum extinction", extinction, Some(depth))
                        .map_err(|err| err.at_wavelength(wavelength))?;
                    Ok(extinction.ln() - mass_density.log_at(depth) + log_fudge)
                })
                .collect::<AtmosphereResult<Vec<_>>>()
        })
        .collect::<AtmosphereResult<Vec<_>>>()?;

    Ok(Array2::from_shape_fn(
        (wavelengths.len(), num_depths),
        |(idx, depth)| rows[idx][depth],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn populations(num_depths: usize) -> AbsorberPopulations {
        AbsorberPopulations::from_depths(
            (0..num_depths)
                .map(|depth| {
                    LocalAbsorbers::new(
                        4500.0 + 500.0 * depth as fop,
                        1e12 * (depth + 1) as fop,
                        1e16,
                        1e12,
                        1e15,
                        1e11,
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn fudge_factor_scales_opacity() {
        let rho = DualArray::constant("mass density", 4, 1e-8).unwrap();
        let wavelengths = WavelengthGrid::log_uniform(20, 300.0, 1000.0).unwrap();
        let base = continuum_opacity(&rho, &wavelengths, &populations(4), 0.0).unwrap();
        let scaled = continuum_opacity(&rho, &wavelengths, &populations(4), 0.5).unwrap();
        assert_eq!(base.dim(), (20, 4));
        for (b, s) in base.iter().zip(scaled.iter()) {
            assert_relative_eq!(s - b, 0.5 * LN10, max_relative = 1e-12);
        }
    }

    #[test]
    fn rosseland_mean_is_bounded_by_monochromatic_opacities() {
        let rho = DualArray::constant("mass density", 4, 1e-8).unwrap();
        let temperature = DualArray::from_linear(
            "temperature",
            ndarray::Array1::from_shape_fn(4, |depth| 4500.0 + 500.0 * depth as fop),
        )
        .unwrap();
        let wavelengths = WavelengthGrid::default();
        let log_kappa = continuum_opacity(&rho, &wavelengths, &populations(4), 0.0).unwrap();
        let kappa_ros = rosseland_mean(&temperature, &wavelengths, &log_kappa).unwrap();
        for depth in 0..4 {
            let column = log_kappa.column(depth);
            let min = column.iter().cloned().fold(fop::INFINITY, fop::min);
            let max = column.iter().cloned().fold(fop::NEG_INFINITY, fop::max);
            assert!(kappa_ros.log_at(depth) >= min - 1e-12);
            assert!(kappa_ros.log_at(depth) <= max + 1e-12);
        }
    }

    #[test]
    fn ground_state_populations_follow_partition_functions() {
        let absorbers = LocalAbsorbers::new(5000.0, 1e12, 2e16, 1e12, 1e15, 0.0);
        assert!(absorbers.ground_state_hydrogen <= absorbers.neutral_hydrogen);
        assert_relative_eq!(absorbers.ground_state_hydrogen, 1e16, max_relative = 0.05);
        assert_relative_eq!(absorbers.electron_pressure, 1e12 * KBOLTZMANN * 5000.0);
    }
}
