//! Spectral line engine.

pub mod catalog;
pub mod descriptor;
pub mod equivalent_width;
pub mod grid;
pub mod merge;
pub mod opacity;
pub mod profile;

use crate::{
    chemistry::{composition::Composition, ChemicalState},
    depth::DualArray,
    error::AtmosphereResult,
    radiation::WavelengthGrid,
};
use ndarray::{Array1, Array2};

pub use crate::radiation::monochromatic_tau;
pub use descriptor::LineDescriptor;
pub use equivalent_width::equivalent_width;
pub use grid::LineGrid;
pub use merge::{merge_opacity, merge_wavelengths};
pub use opacity::{level_population, line_opacity};
pub use profile::{BroadeningReference, ProfileKind};

/// Floating-point precision to use for line quantities.
#[allow(non_camel_case_types)]
pub type fln = f64;

/// Structure quantities the line opacity depends on.
#[derive(Clone, Copy, Debug)]
pub struct LineAtmosphere<'a> {
    pub temperature: &'a DualArray,
    pub gas_pressure: &'a DualArray,
    pub mass_density: &'a DualArray,
    pub chemistry: &'a ChemicalState,
    pub composition: &'a Composition,
}

/// Extinction of a single line over its own wavelength grid.
#[derive(Clone, Debug, PartialEq)]
pub struct LineOpacity {
    grid: LineGrid,
    /// ln κ_l indexed as `[point][depth]`.
    log_opacity: Array2<fln>,
}

impl LineOpacity {
    /// Evaluates the opacity of the given line on the given grid.
    pub fn compute(
        line: &LineDescriptor,
        grid: LineGrid,
        kind: ProfileKind,
        atmosphere: &LineAtmosphere,
        reference: &BroadeningReference,
        log10_fudge: fln,
    ) -> AtmosphereResult<Self> {
        let profile = profile::line_profile(
            line,
            &grid,
            kind,
            atmosphere.temperature,
            atmosphere.gas_pressure,
            reference,
        )?;
        let log_stage_population =
            opacity::log_line_stage_population(line, atmosphere.chemistry, atmosphere.composition);
        let log_level_population =
            level_population(line, log_stage_population.view(), atmosphere.temperature)?;
        let log_opacity = line_opacity(
            line,
            &grid,
            &profile,
            &log_level_population,
            atmosphere.temperature,
            atmosphere.mass_density,
            log10_fudge,
        )?;
        Ok(Self { grid, log_opacity })
    }

    pub fn grid(&self) -> &LineGrid {
        &self.grid
    }

    pub fn log_opacity(&self) -> &Array2<fln> {
        &self.log_opacity
    }

    /// Absolute wavelengths of the line grid [cm].
    pub fn wavelengths(&self) -> Array1<fln> {
        self.grid.wavelengths()
    }

    /// Adds the line to the given master wavelength grid and opacity table,
    /// returning the combined grid and table.
    pub fn add_to(
        &self,
        master: &WavelengthGrid,
        master_log_opacity: &Array2<fln>,
    ) -> AtmosphereResult<(WavelengthGrid, Array2<fln>)> {
        let line_wavelengths = self.wavelengths();
        let combined = merge_wavelengths(master, &line_wavelengths)?;
        let merged = merge_opacity(
            master,
            master_log_opacity,
            &line_wavelengths,
            &self.log_opacity,
            &combined,
        )?;
        Ok((combined, merged))
    }

    /// Total ln κ on the line's own grid: the line opacity plus the given
    /// master opacity interpolated onto the line wavelengths.
    pub fn total_on_line_grid(
        &self,
        master: &WavelengthGrid,
        master_log_opacity: &Array2<fln>,
    ) -> AtmosphereResult<(WavelengthGrid, Array2<fln>)> {
        let line_wavelengths = self.wavelengths();
        let line_grid = WavelengthGrid::from_wavelengths(line_wavelengths.clone())?;
        let total = merge_opacity(
            master,
            master_log_opacity,
            &line_wavelengths,
            &self.log_opacity,
            &line_grid,
        )?;
        Ok((line_grid, total))
    }
}
