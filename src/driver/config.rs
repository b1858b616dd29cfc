//! Configuration of atmosphere and spectrum computations.

use crate::{
    chemistry::ChemistrySolver,
    constants::{LN10, LOG_G_SUN, TEFF_SUN},
    depth::{fdp, TauGrid},
    error::{AtmosphereError, AtmosphereResult},
    hydrostatics::{HydrostaticStrategy, IntegralForm},
    line::{catalog, grid::LineGrid, LineDescriptor, ProfileKind},
    radiation::{formal_solution::SourceFunction, WavelengthGrid},
};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Global parameters of the star.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct StellarParameters {
    /// Effective temperature [K].
    pub teff: fdp,
    /// Base 10 logarithm of the surface gravity [cgs].
    pub log_g: fdp,
    /// Base 10 logarithm of the metallicity relative to solar.
    pub log_z: fdp,
    /// Mass [M_⊙].
    pub mass: fdp,
    /// Microturbulent speed [km/s].
    pub microturbulence: fdp,
}

impl StellarParameters {
    pub const DEFAULT_TEFF: fdp = TEFF_SUN;
    pub const DEFAULT_LOG_G: fdp = LOG_G_SUN;
    pub const DEFAULT_LOG_Z: fdp = 0.0;
    pub const DEFAULT_MASS: fdp = 1.0;
    pub const DEFAULT_MICROTURBULENCE: fdp = 1.0;

    pub const MIN_TEFF: fdp = 3000.0;
    pub const MAX_TEFF: fdp = 50000.0;
    pub const MIN_LOG_G: fdp = 0.0;
    pub const MAX_LOG_G: fdp = 7.0;

    pub fn new(teff: fdp, log_g: fdp, log_z: fdp) -> Self {
        Self {
            teff,
            log_g,
            log_z,
            ..Self::default()
        }
    }

    /// Linear metallicity scale factor.
    pub fn metallicity_scale(&self) -> fdp {
        fdp::exp(LN10 * self.log_z)
    }

    /// Surface gravity [cm/s^2].
    pub fn surface_gravity(&self) -> fdp {
        fdp::exp(LN10 * self.log_g)
    }

    pub fn validate(&self) -> AtmosphereResult<()> {
        if !(self.teff.is_finite() && self.teff >= Self::MIN_TEFF && self.teff <= Self::MAX_TEFF) {
            return Err(AtmosphereError::invalid_parameter(
                "teff",
                self.teff,
                format!(
                    "effective temperature must be in [{}, {}] K",
                    Self::MIN_TEFF,
                    Self::MAX_TEFF
                ),
            ));
        }
        if !(self.log_g.is_finite() && self.log_g >= Self::MIN_LOG_G && self.log_g <= Self::MAX_LOG_G)
        {
            return Err(AtmosphereError::invalid_parameter(
                "log_g",
                self.log_g,
                format!(
                    "log surface gravity must be in [{}, {}]",
                    Self::MIN_LOG_G,
                    Self::MAX_LOG_G
                ),
            ));
        }
        if !self.log_z.is_finite() {
            return Err(AtmosphereError::invalid_parameter(
                "log_z",
                self.log_z,
                "metallicity must be finite",
            ));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "mass",
                self.mass,
                "stellar mass must be positive",
            ));
        }
        if !(self.microturbulence.is_finite() && self.microturbulence >= 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "microturbulence",
                self.microturbulence,
                "microturbulence must be non-negative",
            ));
        }
        Ok(())
    }
}

impl Default for StellarParameters {
    fn default() -> Self {
        Self {
            teff: Self::DEFAULT_TEFF,
            log_g: Self::DEFAULT_LOG_G,
            log_z: Self::DEFAULT_LOG_Z,
            mass: Self::DEFAULT_MASS,
            microturbulence: Self::DEFAULT_MICROTURBULENCE,
        }
    }
}

/// How the outer structure iteration is terminated.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum IterationControl {
    /// Iterate until the maximum relative change of gas pressure and
    /// electron density drops below the tolerance, failing after the cap.
    Converge {
        tolerance: fdp,
        max_passes: usize,
    },
    /// Run a fixed number of passes without checking convergence.
    FixedPasses(usize),
}

impl IterationControl {
    pub const DEFAULT_TOLERANCE: fdp = 1e-3;
    pub const DEFAULT_MAX_PASSES: usize = 50;
    pub const LEGACY_NUM_PASSES: usize = 1;

    pub fn legacy() -> Self {
        Self::FixedPasses(Self::LEGACY_NUM_PASSES)
    }

    pub fn max_passes(&self) -> usize {
        match self {
            Self::Converge { max_passes, .. } => *max_passes,
            Self::FixedPasses(num_passes) => *num_passes,
        }
    }
}

impl Default for IterationControl {
    fn default() -> Self {
        Self::Converge {
            tolerance: Self::DEFAULT_TOLERANCE,
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }
}

/// Configuration parameters for computing the atmospheric structure.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AtmosphereConfig {
    pub num_depths: usize,
    pub log10_min_tau: fdp,
    pub log10_max_tau: fdp,
    pub iteration: IterationControl,
    pub hydrostatics: HydrostaticStrategy,
    /// Total pressure at the top of the grid [dyn/cm^2].
    pub surface_total_pressure: fdp,
    /// Number of electron density iterations per chemistry pass.
    pub num_electron_iterations: usize,
    /// Include diatomic molecules in the chemical equilibrium.
    pub include_molecules: bool,
    /// Base 10 logarithm of the scale factor for the continuum opacity.
    pub log10_continuum_fudge: fdp,
    /// Number of wavelengths for the Rosseland mean opacity. The grid has to
    /// cover the flux maximum and the ultraviolet where metals dominate.
    pub num_opacity_wavelengths: usize,
    pub min_opacity_wavelength_nm: fdp,
    pub max_opacity_wavelength_nm: fdp,
    pub temperature_correction: bool,
    pub convection: bool,
    /// Number of temperature adjustments followed by renewed structure passes.
    pub num_temperature_adjustments: usize,
    /// Scale the hot reference electron pressure with gravity alone.
    pub legacy_hot_electron_pressure: bool,
}

impl AtmosphereConfig {
    pub const DEFAULT_NUM_DEPTHS: usize = TauGrid::DEFAULT_NUM_DEPTHS;
    pub const DEFAULT_LOG10_MIN_TAU: fdp = TauGrid::DEFAULT_LOG10_MIN_TAU;
    pub const DEFAULT_LOG10_MAX_TAU: fdp = TauGrid::DEFAULT_LOG10_MAX_TAU;
    pub const DEFAULT_SURFACE_TOTAL_PRESSURE: fdp = IntegralForm::DEFAULT_SURFACE_TOTAL_PRESSURE;
    pub const DEFAULT_NUM_ELECTRON_ITERATIONS: usize =
        ChemistrySolver::DEFAULT_NUM_ELECTRON_ITERATIONS;
    pub const DEFAULT_INCLUDE_MOLECULES: bool = true;
    pub const DEFAULT_LOG10_CONTINUUM_FUDGE: fdp = 0.0;
    pub const DEFAULT_NUM_OPACITY_WAVELENGTHS: usize = 200;
    pub const DEFAULT_MIN_OPACITY_WAVELENGTH_NM: fdp = 100.0;
    pub const DEFAULT_MAX_OPACITY_WAVELENGTH_NM: fdp = 20000.0;
    pub const DEFAULT_TEMPERATURE_CORRECTION: bool = false;
    pub const DEFAULT_CONVECTION: bool = false;
    pub const DEFAULT_NUM_TEMPERATURE_ADJUSTMENTS: usize = 3;
    pub const DEFAULT_LEGACY_HOT_ELECTRON_PRESSURE: bool = false;

    pub fn tau_grid(&self) -> AtmosphereResult<TauGrid> {
        TauGrid::new(self.num_depths, self.log10_min_tau, self.log10_max_tau)
    }

    pub fn opacity_wavelengths(&self) -> AtmosphereResult<WavelengthGrid> {
        WavelengthGrid::log_uniform(
            self.num_opacity_wavelengths,
            self.min_opacity_wavelength_nm,
            self.max_opacity_wavelength_nm,
        )
    }

    /// Whether the temperature structure is adjusted after the initial passes.
    pub fn adjusts_temperature(&self) -> bool {
        (self.temperature_correction || self.convection) && self.num_temperature_adjustments > 0
    }

    pub fn validate(&self) -> AtmosphereResult<()> {
        self.tau_grid()?;
        self.opacity_wavelengths()?;
        match self.iteration {
            IterationControl::Converge {
                tolerance,
                max_passes,
            } => {
                if !(tolerance.is_finite() && tolerance > 0.0) {
                    return Err(AtmosphereError::invalid_parameter(
                        "tolerance",
                        tolerance,
                        "convergence tolerance must be positive",
                    ));
                }
                if max_passes == 0 {
                    return Err(AtmosphereError::invalid_parameter(
                        "max_passes",
                        0.0,
                        "at least one pass is required",
                    ));
                }
            }
            IterationControl::FixedPasses(0) => {
                return Err(AtmosphereError::invalid_parameter(
                    "num_passes",
                    0.0,
                    "at least one pass is required",
                ));
            }
            IterationControl::FixedPasses(_) => {}
        }
        if !(self.surface_total_pressure.is_finite() && self.surface_total_pressure > 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "surface_total_pressure",
                self.surface_total_pressure,
                "surface pressure must be positive",
            ));
        }
        if self.num_electron_iterations == 0 {
            return Err(AtmosphereError::invalid_parameter(
                "num_electron_iterations",
                0.0,
                "at least one electron density iteration is required",
            ));
        }
        if !self.log10_continuum_fudge.is_finite() {
            return Err(AtmosphereError::invalid_parameter(
                "log10_continuum_fudge",
                self.log10_continuum_fudge,
                "opacity scale must be finite",
            ));
        }
        Ok(())
    }
}

impl Default for AtmosphereConfig {
    fn default() -> Self {
        Self {
            num_depths: Self::DEFAULT_NUM_DEPTHS,
            log10_min_tau: Self::DEFAULT_LOG10_MIN_TAU,
            log10_max_tau: Self::DEFAULT_LOG10_MAX_TAU,
            iteration: IterationControl::default(),
            hydrostatics: HydrostaticStrategy::default(),
            surface_total_pressure: Self::DEFAULT_SURFACE_TOTAL_PRESSURE,
            num_electron_iterations: Self::DEFAULT_NUM_ELECTRON_ITERATIONS,
            include_molecules: Self::DEFAULT_INCLUDE_MOLECULES,
            log10_continuum_fudge: Self::DEFAULT_LOG10_CONTINUUM_FUDGE,
            num_opacity_wavelengths: Self::DEFAULT_NUM_OPACITY_WAVELENGTHS,
            min_opacity_wavelength_nm: Self::DEFAULT_MIN_OPACITY_WAVELENGTH_NM,
            max_opacity_wavelength_nm: Self::DEFAULT_MAX_OPACITY_WAVELENGTH_NM,
            temperature_correction: Self::DEFAULT_TEMPERATURE_CORRECTION,
            convection: Self::DEFAULT_CONVECTION,
            num_temperature_adjustments: Self::DEFAULT_NUM_TEMPERATURE_ADJUSTMENTS,
            legacy_hot_electron_pressure: Self::DEFAULT_LEGACY_HOT_ELECTRON_PRESSURE,
        }
    }
}

/// Configuration parameters for synthesizing the emergent spectrum.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct SpectrumConfig {
    pub num_wavelengths: usize,
    pub min_wavelength_nm: fdp,
    pub max_wavelength_nm: fdp,
    /// Catalog lines merged into the master spectrum.
    pub catalog_lines: Vec<String>,
    /// Line synthesized at high resolution, with its equivalent width.
    pub detailed_line: Option<LineDescriptor>,
    /// Core and wing points per side for the detailed line.
    pub num_core: usize,
    pub num_wing: usize,
    /// Core and wing points per side for the catalog lines.
    pub num_catalog_core: usize,
    pub num_catalog_wing: usize,
    pub profile: ProfileKind,
    /// Source function for the detailed line.
    pub line_source: SourceFunction,
    /// Base 10 logarithm of the scale factor for line opacities.
    pub log10_line_fudge: fdp,
    /// Wavelength grid for recovering the effective temperature.
    pub num_bolometric_wavelengths: usize,
    pub min_bolometric_wavelength_nm: fdp,
    pub max_bolometric_wavelength_nm: fdp,
}

impl SpectrumConfig {
    pub const DEFAULT_NUM_WAVELENGTHS: usize = WavelengthGrid::DEFAULT_NUM_WAVELENGTHS;
    pub const DEFAULT_MIN_WAVELENGTH_NM: fdp = WavelengthGrid::DEFAULT_MIN_WAVELENGTH_NM;
    pub const DEFAULT_MAX_WAVELENGTH_NM: fdp = WavelengthGrid::DEFAULT_MAX_WAVELENGTH_NM;
    pub const DEFAULT_DETAILED_LINE: &'static str = "NaI_5895";
    pub const DEFAULT_NUM_CORE: usize = LineGrid::DEFAULT_NUM_CORE;
    pub const DEFAULT_NUM_WING: usize = LineGrid::DEFAULT_NUM_WING;
    pub const DEFAULT_NUM_CATALOG_CORE: usize = 5;
    pub const DEFAULT_NUM_CATALOG_WING: usize = 10;
    pub const DEFAULT_LOG10_LINE_FUDGE: fdp = 0.0;
    pub const DEFAULT_NUM_BOLOMETRIC_WAVELENGTHS: usize = 300;
    pub const DEFAULT_MIN_BOLOMETRIC_WAVELENGTH_NM: fdp = 100.0;
    pub const DEFAULT_MAX_BOLOMETRIC_WAVELENGTH_NM: fdp = 20000.0;

    pub fn wavelengths(&self) -> AtmosphereResult<WavelengthGrid> {
        WavelengthGrid::log_uniform(
            self.num_wavelengths,
            self.min_wavelength_nm,
            self.max_wavelength_nm,
        )
    }

    pub fn bolometric_wavelengths(&self) -> AtmosphereResult<WavelengthGrid> {
        WavelengthGrid::log_uniform(
            self.num_bolometric_wavelengths,
            self.min_bolometric_wavelength_nm,
            self.max_bolometric_wavelength_nm,
        )
    }

    /// Resolves the names of the catalog lines to merge.
    pub fn resolve_catalog_lines(&self) -> AtmosphereResult<Vec<&'static LineDescriptor>> {
        self.catalog_lines
            .iter()
            .map(|name| catalog::catalog_line(name))
            .collect()
    }

    pub fn validate(&self) -> AtmosphereResult<()> {
        self.wavelengths()?;
        self.bolometric_wavelengths()?;
        self.resolve_catalog_lines()?;
        if self.num_core < 2 || self.num_catalog_core < 2 {
            return Err(AtmosphereError::invalid_parameter(
                "num_core",
                self.num_core.min(self.num_catalog_core) as fdp,
                "line cores need at least two points",
            ));
        }
        if let SourceFunction::Scattering { epsilon } = self.line_source {
            if !(epsilon > 0.0 && epsilon <= 1.0) {
                return Err(AtmosphereError::invalid_parameter(
                    "epsilon",
                    epsilon,
                    "thermalization parameter must be in (0, 1]",
                ));
            }
        }
        if !self.log10_line_fudge.is_finite() {
            return Err(AtmosphereError::invalid_parameter(
                "log10_line_fudge",
                self.log10_line_fudge,
                "opacity scale must be finite",
            ));
        }
        Ok(())
    }
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            num_wavelengths: Self::DEFAULT_NUM_WAVELENGTHS,
            min_wavelength_nm: Self::DEFAULT_MIN_WAVELENGTH_NM,
            max_wavelength_nm: Self::DEFAULT_MAX_WAVELENGTH_NM,
            catalog_lines: catalog::catalog_line_names()
                .into_iter()
                .map(String::from)
                .collect(),
            detailed_line: catalog::catalog_line(Self::DEFAULT_DETAILED_LINE)
                .ok()
                .cloned(),
            num_core: Self::DEFAULT_NUM_CORE,
            num_wing: Self::DEFAULT_NUM_WING,
            num_catalog_core: Self::DEFAULT_NUM_CATALOG_CORE,
            num_catalog_wing: Self::DEFAULT_NUM_CATALOG_WING,
            profile: ProfileKind::default(),
            line_source: SourceFunction::default(),
            log10_line_fudge: Self::DEFAULT_LOG10_LINE_FUDGE,
            num_bolometric_wavelengths: Self::DEFAULT_NUM_BOLOMETRIC_WAVELENGTHS,
            min_bolometric_wavelength_nm: Self::DEFAULT_MIN_BOLOMETRIC_WAVELENGTH_NM,
            max_bolometric_wavelength_nm: Self::DEFAULT_MAX_BOLOMETRIC_WAVELENGTH_NM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(StellarParameters::default().validate().is_ok());
        assert!(AtmosphereConfig::default().validate().is_ok());
        assert!(SpectrumConfig::default().validate().is_ok());
        assert!(!AtmosphereConfig::default().adjusts_temperature());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(StellarParameters::new(2000.0, 4.0, 0.0).validate().is_err());
        assert!(StellarParameters::new(5000.0, 8.0, 0.0).validate().is_err());
        let config = AtmosphereConfig {
            iteration: IterationControl::FixedPasses(0),
            ..AtmosphereConfig::default()
        };
        assert!(config.validate().is_err());
        let spectrum = SpectrumConfig {
            catalog_lines: vec!["XxI_1234".to_string()],
            ..SpectrumConfig::default()
        };
        assert!(spectrum.validate().is_err());
    }

    #[test]
    fn rosseland_grid_spans_the_bolometric_range() {
        let opacity = AtmosphereConfig::default().opacity_wavelengths().unwrap();
        let bolometric = SpectrumConfig::default().bolometric_wavelengths().unwrap();
        let opacity_nm = opacity.wavelengths_nm();
        let bolometric_nm = bolometric.wavelengths_nm();
        assert!(opacity_nm[0] <= bolometric_nm[0] * (1.0 + 1e-9));
        assert!(
            opacity_nm[opacity.len() - 1] >= bolometric_nm[bolometric.len() - 1] * (1.0 - 1e-9)
        );
    }
}
