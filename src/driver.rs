//! Outer self-consistency loop computing the atmospheric structure.

pub mod config;
pub mod synthesis;

use crate::{
    chemistry::{
        composition::Composition,
        density::{analytic_mean_molecular_weight, mass_density_from_pressure},
        molecules::MoleculeNetwork,
        ChemicalState, ChemistrySolver,
    },
    convection::convective_temperature,
    depth::{fdp, DualArray, TauGrid},
    depth_scale::geometric_depths,
    error::{AtmosphereError, AtmosphereResult},
    hydrostatics::HydrostaticSolver,
    io::Verbosity,
    opacity::{continuum_opacity, rosseland_mean, AbsorberPopulations},
    radiation::WavelengthGrid,
    reference::{interpolate_reference, ReferenceOptions},
    temperature_correction::correct_temperature,
};
use ndarray::{Array1, Array2};
use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

pub use config::{AtmosphereConfig, IterationControl, SpectrumConfig, StellarParameters};
pub use synthesis::{synthesize, DetailedLineSpectrum, SynthesisResult};

/// Stages the structure computation passes through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverStage {
    Bootstrap,
    Chemistry,
    Opacity,
    Hydrostatic,
    DepthScale,
    TemperatureCorrection,
    Synthesis,
}

impl fmt::Display for DriverStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Bootstrap => "bootstrap",
                Self::Chemistry => "chemistry",
                Self::Opacity => "opacity",
                Self::Hydrostatic => "hydrostatic equilibrium",
                Self::DepthScale => "depth scale",
                Self::TemperatureCorrection => "temperature correction",
                Self::Synthesis => "synthesis",
            }
        )
    }
}

/// Converged atmospheric structure on the optical depth grid.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AtmosphereStructure {
    pub stellar: StellarParameters,
    pub tau_grid: TauGrid,
    pub temperature: DualArray,
    pub gas_pressure: DualArray,
    pub radiation_pressure: DualArray,
    pub electron_density: DualArray,
    pub mass_density: DualArray,
    pub mean_molecular_weight: DualArray,
    pub rosseland_opacity: DualArray,
    /// Geometric depth below the top of the grid [cm].
    pub depths: Array1<fdp>,
    /// Wavelengths of the Rosseland mean opacity table.
    pub opacity_wavelengths: WavelengthGrid,
    /// Continuum ln κ_λ indexed as `[wavelength][depth]`.
    pub log_opacity: Array2<fdp>,
    pub log10_continuum_fudge: fdp,
    pub composition: Composition,
    pub chemistry: ChemicalState,
    /// Total number of structure passes performed.
    pub num_passes: usize,
    /// Maximum relative change of gas pressure and electron density in the last pass.
    pub residual: fdp,
}

/// Mass density used for converting extinction into opacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DensitySource {
    /// Ideal gas law with the analytic mean molecular weight. Used for the
    /// first pass, whose pressures still come from the reference model.
    IdealGas,
    /// Sum over the element populations of the solved chemistry.
    Populations,
}

/// Quantities produced by one chemistry, opacity and hydrostatic pass.
struct PassState {
    temperature: DualArray,
    gas_pressure: DualArray,
    radiation_pressure: DualArray,
    electron_density: DualArray,
    chemistry: ChemicalState,
    log_opacity: Array2<fdp>,
    rosseland_opacity: DualArray,
    num_passes: usize,
    residual: fdp,
}

/// Solver for the structure of a plane-parallel LTE atmosphere.
pub struct AtmosphereSolver {
    stellar: StellarParameters,
    config: AtmosphereConfig,
    tau_grid: TauGrid,
    opacity_wavelengths: WavelengthGrid,
    chemistry: ChemistrySolver,
    hydrostatics: Box<dyn HydrostaticSolver + Send + Sync>,
}

impl AtmosphereSolver {
    pub fn new(stellar: StellarParameters, config: AtmosphereConfig) -> AtmosphereResult<Self> {
        stellar.validate()?;
        config.validate()?;
        let tau_grid = config.tau_grid()?;
        let opacity_wavelengths = config.opacity_wavelengths()?;
        let composition = Composition::solar(stellar.metallicity_scale())?;
        let network = if config.include_molecules {
            MoleculeNetwork::new()?
        } else {
            MoleculeNetwork::empty()
        };
        let chemistry = ChemistrySolver::new(composition, network, config.num_electron_iterations)?;
        let hydrostatics = config.hydrostatics.solver(config.surface_total_pressure)?;
        Ok(Self {
            stellar,
            config,
            tau_grid,
            opacity_wavelengths,
            chemistry,
            hydrostatics,
        })
    }

    pub fn stellar(&self) -> &StellarParameters {
        &self.stellar
    }

    pub fn config(&self) -> &AtmosphereConfig {
        &self.config
    }

    pub fn tau_grid(&self) -> &TauGrid {
        &self.tau_grid
    }

    /// Computes the atmospheric structure.
    pub fn solve(&self, verbosity: &Verbosity) -> AtmosphereResult<AtmosphereStructure> {
        if let IterationControl::FixedPasses(num_passes) = self.config.iteration {
            if verbosity.print_messages() {
                eprintln!(
                    "Warning: running {} fixed structure pass{} without a convergence check",
                    num_passes,
                    if num_passes == 1 { "" } else { "es" }
                );
            }
        }

        report_stage(verbosity, DriverStage::Bootstrap);
        let guess = interpolate_reference(
            self.stellar.teff,
            self.stellar.log_g,
            self.stellar.metallicity_scale(),
            self.chemistry.composition().helium_abundance(),
            &self.tau_grid,
            ReferenceOptions {
                legacy_hot_electron_pressure: self.config.legacy_hot_electron_pressure,
            },
        )?;

        let mut state = self.run_passes(
            guess.temperature,
            guess.gas_pressure,
            guess.electron_density,
            0,
            verbosity,
        )?;

        if self.config.adjusts_temperature() {
            for round in 0..self.config.num_temperature_adjustments {
                report_stage(verbosity, DriverStage::TemperatureCorrection);
                if verbosity.print_messages() {
                    println!(
                        "Temperature adjustment {}/{}",
                        round + 1,
                        self.config.num_temperature_adjustments
                    );
                }
                let temperature = self.adjust_temperature(&state)?;
                state = self.run_passes(
                    temperature,
                    state.gas_pressure,
                    state.electron_density,
                    state.num_passes,
                    verbosity,
                )?;
            }
        }

        report_stage(verbosity, DriverStage::DepthScale);
        let depths = geometric_depths(
            &self.tau_grid,
            &state.rosseland_opacity,
            state.chemistry.mass_density(),
        )?;

        if verbosity.print_messages() {
            println!(
                "Structure computed in {} pass{} (relative change {:.3e})",
                state.num_passes,
                if state.num_passes == 1 { "" } else { "es" },
                state.residual
            );
        }

        Ok(AtmosphereStructure {
            stellar: self.stellar,
            tau_grid: self.tau_grid.clone(),
            temperature: state.temperature,
            gas_pressure: state.gas_pressure,
            radiation_pressure: state.radiation_pressure,
            electron_density: state.electron_density,
            mass_density: state.chemistry.mass_density().clone(),
            mean_molecular_weight: state.chemistry.mean_molecular_weight().clone(),
            rosseland_opacity: state.rosseland_opacity,
            depths,
            opacity_wavelengths: self.opacity_wavelengths.clone(),
            log_opacity: state.log_opacity,
            log10_continuum_fudge: self.config.log10_continuum_fudge,
            composition: self.chemistry.composition().clone(),
            chemistry: state.chemistry,
            num_passes: state.num_passes,
            residual: state.residual,
        })
    }

    /// Solves the chemistry and computes the continuum and Rosseland mean
    /// opacities for the given temperature, gas pressure and electron density.
    fn evaluate_opacity(
        &self,
        temperature: &DualArray,
        gas_pressure: &DualArray,
        electron_density: &DualArray,
        density_source: DensitySource,
    ) -> AtmosphereResult<(ChemicalState, Array2<fdp>, DualArray)> {
        let chemistry = self
            .chemistry
            .solve(temperature, gas_pressure, electron_density)?;
        let ideal_gas_density;
        let mass_density = match density_source {
            DensitySource::IdealGas => {
                let mean_molecular_weight = analytic_mean_molecular_weight(temperature)?;
                ideal_gas_density =
                    mass_density_from_pressure(gas_pressure, temperature, &mean_molecular_weight)?;
                &ideal_gas_density
            }
            DensitySource::Populations => chemistry.mass_density(),
        };
        let populations = AbsorberPopulations::from_chemistry(&chemistry, temperature)?;
        let log_opacity = continuum_opacity(
            mass_density,
            &self.opacity_wavelengths,
            &populations,
            self.config.log10_continuum_fudge,
        )?;
        let rosseland_opacity = rosseland_mean(temperature, &self.opacity_wavelengths, &log_opacity)?;
        Ok((chemistry, log_opacity, rosseland_opacity))
    }

    /// Runs structure passes at fixed temperature until the iteration control
    /// is satisfied, then evaluates the chemistry and opacities once more at
    /// the final pressures.
    fn run_passes(
        &self,
        temperature: DualArray,
        mut gas_pressure: DualArray,
        mut electron_density: DualArray,
        completed_passes: usize,
        verbosity: &Verbosity,
    ) -> AtmosphereResult<PassState> {
        let gravity = self.stellar.surface_gravity();
        let max_passes = self.config.iteration.max_passes();
        let mut radiation_pressure = None;
        let mut residual = fdp::INFINITY;
        let mut num_passes = 0;

        while num_passes < max_passes {
            num_passes += 1;
            report_stage(verbosity, DriverStage::Chemistry);
            report_stage(verbosity, DriverStage::Opacity);
            let density_source = if completed_passes + num_passes == 1 {
                DensitySource::IdealGas
            } else {
                DensitySource::Populations
            };
            let (chemistry, _, rosseland_opacity) = self.evaluate_opacity(
                &temperature,
                &gas_pressure,
                &electron_density,
                density_source,
            )?;

            report_stage(verbosity, DriverStage::Hydrostatic);
            let pressures = self.hydrostatics.solve(
                &self.tau_grid,
                gravity,
                &temperature,
                &rosseland_opacity,
                &gas_pressure,
            )?;

            residual = fdp::max(
                pressures.gas_pressure.max_relative_change(&gas_pressure),
                chemistry.electron_density().max_relative_change(&electron_density),
            );
            if !residual.is_finite() {
                return Err(AtmosphereError::numeric_domain(
                    "structure residual",
                    residual,
                    None,
                ));
            }
            if verbosity.print_messages() {
                println!(
                    "Pass {}: maximum relative change {:.3e}",
                    completed_passes + num_passes,
                    residual
                );
            }

            gas_pressure = pressures.gas_pressure;
            radiation_pressure = Some(pressures.radiation_pressure);
            electron_density = chemistry.electron_density().clone();

            if let IterationControl::Converge { tolerance, .. } = self.config.iteration {
                if residual < tolerance {
                    break;
                }
            }
        }

        if let IterationControl::Converge { tolerance, .. } = self.config.iteration {
            if residual >= tolerance {
                return Err(AtmosphereError::ConvergenceNotReached {
                    iterations: num_passes,
                    residual,
                    tolerance,
                });
            }
        }

        let radiation_pressure = radiation_pressure.ok_or_else(|| {
            AtmosphereError::invalid_parameter("max_passes", 0.0, "no structure pass was run")
        })?;
        let (chemistry, log_opacity, rosseland_opacity) = self.evaluate_opacity(
            &temperature,
            &gas_pressure,
            &electron_density,
            DensitySource::Populations,
        )?;
        warn_if_electron_pressure_clamped(verbosity, &chemistry);
        let electron_density = chemistry.electron_density().clone();

        Ok(PassState {
            temperature,
            gas_pressure,
            radiation_pressure,
            electron_density,
            chemistry,
            log_opacity,
            rosseland_opacity,
            num_passes: completed_passes + num_passes,
            residual,
        })
    }

    /// Applies the enabled temperature adjustments to the given structure.
    fn adjust_temperature(&self, state: &PassState) -> AtmosphereResult<DualArray> {
        let mut temperature = state.temperature.clone();
        if self.config.temperature_correction {
            temperature = correct_temperature(
                &self.tau_grid,
                self.stellar.teff,
                &temperature,
                &state.rosseland_opacity,
            )?;
        }
        if self.config.convection {
            temperature = convective_temperature(
                &self.tau_grid,
                self.stellar.teff,
                self.stellar.log_g,
                &temperature,
                &state.gas_pressure,
                state.chemistry.mass_density(),
                &state.rosseland_opacity,
                state.chemistry.mean_molecular_weight(),
            )?;
        }
        Ok(temperature)
    }
}

fn report_stage(verbosity: &Verbosity, stage: DriverStage) {
    if verbosity.show_progress() {
        println!("Stage: {}", stage);
    }
}

fn warn_if_electron_pressure_clamped(verbosity: &Verbosity, chemistry: &ChemicalState) {
    let depths = chemistry.clamped_electron_pressure_depths();
    if verbosity.print_messages() && !depths.is_empty() {
        eprintln!(
            "Warning: electron pressure clamped to half the gas pressure at {} depth{} (first at index {})",
            depths.len(),
            if depths.len() == 1 { "" } else { "s" },
            depths[0]
        );
    }
}

/// Computes the atmospheric structure for the given stellar parameters.
pub fn compute_atmosphere(
    stellar: StellarParameters,
    config: AtmosphereConfig,
    verbosity: &Verbosity,
) -> AtmosphereResult<AtmosphereStructure> {
    AtmosphereSolver::new(stellar, config)?.solve(verbosity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrostatics::HydrostaticStrategy;
    use approx::assert_abs_diff_eq;

    fn small_config() -> AtmosphereConfig {
        AtmosphereConfig {
            num_depths: 24,
            num_opacity_wavelengths: 60,
            ..AtmosphereConfig::default()
        }
    }

    #[test]
    fn solar_structure_converges() {
        let config = AtmosphereConfig {
            iteration: IterationControl::Converge {
                tolerance: 1e-2,
                max_passes: 200,
            },
            ..small_config()
        };
        let structure =
            compute_atmosphere(StellarParameters::default(), config, &Verbosity::Quiet).unwrap();
        assert!(structure.residual < 1e-2);
        assert!(structure.num_passes > 1);
        let num_depths = structure.tau_grid.num_depths();
        for depth in 1..num_depths {
            assert!(structure.gas_pressure.linear_at(depth) > structure.gas_pressure.linear_at(depth - 1));
            assert!(structure.depths[depth] > structure.depths[depth - 1]);
        }
        for depth in 0..num_depths {
            let total = structure.gas_pressure.linear_at(depth)
                + structure.radiation_pressure.linear_at(depth);
            assert!(structure.radiation_pressure.linear_at(depth) <= 0.5 * total);
        }
    }

    #[test]
    fn legacy_mode_runs_a_single_pass() {
        let config = AtmosphereConfig {
            iteration: IterationControl::legacy(),
            hydrostatics: HydrostaticStrategy::Euler,
            ..small_config()
        };
        let structure =
            compute_atmosphere(StellarParameters::default(), config, &Verbosity::Quiet).unwrap();
        assert_eq!(structure.num_passes, 1);
    }

    #[test]
    fn capped_iteration_reports_non_convergence() {
        let config = AtmosphereConfig {
            iteration: IterationControl::Converge {
                tolerance: 1e-14,
                max_passes: 2,
            },
            ..small_config()
        };
        match compute_atmosphere(StellarParameters::default(), config, &Verbosity::Quiet) {
            Err(AtmosphereError::ConvergenceNotReached { iterations, .. }) => {
                assert_eq!(iterations, 2)
            }
            other => panic!("expected non-convergence, got {:?}", other.map(|s| s.residual)),
        }
    }

    #[test]
    fn first_pass_converts_opacity_with_ideal_gas_density() {
        let solver = AtmosphereSolver::new(StellarParameters::default(), small_config()).unwrap();
        let guess = interpolate_reference(
            5778.0,
            4.44,
            1.0,
            solver.chemistry.composition().helium_abundance(),
            solver.tau_grid(),
            ReferenceOptions::default(),
        )
        .unwrap();
        let evaluate = |source| {
            solver
                .evaluate_opacity(
                    &guess.temperature,
                    &guess.gas_pressure,
                    &guess.electron_density,
                    source,
                )
                .unwrap()
        };
        let (chemistry, populations_opacity, _) = evaluate(DensitySource::Populations);
        let (_, ideal_gas_opacity, _) = evaluate(DensitySource::IdealGas);
        let mean_molecular_weight = analytic_mean_molecular_weight(&guess.temperature).unwrap();
        let ideal_gas_density = mass_density_from_pressure(
            &guess.gas_pressure,
            &guess.temperature,
            &mean_molecular_weight,
        )
        .unwrap();
        for depth in 0..solver.tau_grid().num_depths() {
            let expected = chemistry.mass_density().log_at(depth) - ideal_gas_density.log_at(depth);
            assert_abs_diff_eq!(
                ideal_gas_opacity[[0, depth]] - populations_opacity[[0, depth]],
                expected,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn invalid_stellar_parameters_are_rejected() {
        let stellar = StellarParameters::new(1000.0, 4.44, 0.0);
        assert!(matches!(
            AtmosphereSolver::new(stellar, small_config()),
            Err(AtmosphereError::InvalidParameter { .. })
        ));
    }
}
