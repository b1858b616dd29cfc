//! Wavelength sampling of a line profile.

use super::{descriptor::LineDescriptor, fln};
use crate::{
    constants::{AMU, CLIGHT, KBOLTZMANN, KM_TO_CM},
    error::{AtmosphereError, AtmosphereResult},
};
use ndarray::Array1;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Largest offset of the line core [Doppler widths].
pub const MAX_CORE_V: fln = 3.5;
/// Offset of the innermost wing point [Doppler widths].
pub const MIN_WING_V: fln = MAX_CORE_V + 1.5;
/// Span of the wing points in ln v.
pub const WING_LOG_SPAN: fln = 9.0;
/// Span of the wing points in ln v for H I lines in hot stars.
pub const HOT_HYDROGEN_WING_LOG_SPAN: fln = 12.0;
/// Effective temperature from which H I lines get extended wings [K].
pub const HOT_HYDROGEN_TEFF: fln = 7000.0;

/// Symmetric, non-uniform set of wavelength offsets around a line center.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineGrid {
    center: fln,
    doppler_width: fln,
    /// Offsets from the line center [cm].
    offsets: Array1<fln>,
    /// Offsets in Doppler widths.
    doppler_units: Array1<fln>,
}

impl LineGrid {
    pub const DEFAULT_NUM_CORE: usize = 5;
    pub const DEFAULT_NUM_WING: usize = 15;

    /// Samples the given line with `num_core` points uniform in Doppler units
    /// out to [`MAX_CORE_V`] and `num_wing` points uniform in ln v beyond, on
    /// each side of the center. The result has `2(num_core + num_wing) − 1`
    /// points.
    ///
    /// The Doppler width combines the thermal speed at the effective
    /// temperature with the microturbulent speed [km/s].
    pub fn new(
        line: &LineDescriptor,
        teff: fln,
        microturbulence: fln,
        num_core: usize,
        num_wing: usize,
    ) -> AtmosphereResult<Self> {
        if num_core < 2 {
            return Err(AtmosphereError::invalid_parameter(
                "num_core",
                num_core as fln,
                "line core needs at least two points",
            ));
        }
        if !(teff.is_finite() && teff > 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "teff",
                teff,
                "effective temperature must be positive",
            ));
        }
        if !(microturbulence.is_finite() && microturbulence >= 0.0) {
            return Err(AtmosphereError::invalid_parameter(
                "microturbulence",
                microturbulence,
                "microturbulence must be non-negative",
            ));
        }
        let center = line.wavelength();
        let turbulent_speed = microturbulence * KM_TO_CM;
        let thermal_speed_squared = 2.0 * KBOLTZMANN * teff / (line.atomic_mass() * AMU);
        let doppler_width =
            center * fln::sqrt(thermal_speed_squared + turbulent_speed.powi(2)) / CLIGHT;

        let wing_log_span = if line.is_neutral_hydrogen() && teff >= HOT_HYDROGEN_TEFF {
            HOT_HYDROGEN_WING_LOG_SPAN
        } else {
            WING_LOG_SPAN
        };
        let num_half = num_core + num_wing;
        // The wing step spreads the span over the whole half grid
        let wing_log_step = wing_log_span / ((num_half - 1) as fln);
        let min_wing_log_v = MIN_WING_V.ln();

        let half: Vec<fln> = (0..num_half)
            .map(|idx| {
                if idx < num_core {
                    (idx as fln) * MAX_CORE_V / ((num_core - 1) as fln)
                } else {
                    fln::exp(min_wing_log_v + ((idx - num_core) as fln) * wing_log_step)
                }
            })
            .collect();

        let doppler_units: Array1<fln> = half[1..]
            .iter()
            .rev()
            .map(|&v| -v)
            .chain(half.iter().copied())
            .collect();
        let offsets = doppler_units.mapv(|v| v * doppler_width);

        if center + offsets[0] <= 0.0 {
            return Err(AtmosphereError::invalid_parameter(
                "num_wing",
                num_wing as fln,
                format!(
                    "line wings of {} extend to non-positive wavelengths",
                    line.name()
                ),
            ));
        }
        Ok(Self {
            center,
            doppler_width,
            offsets,
            doppler_units,
        })
    }

    pub fn num_points(&self) -> usize {
        self.offsets.len()
    }

    /// Rest wavelength of the line [cm].
    pub fn center(&self) -> fln {
        self.center
    }

    /// Doppler width [cm].
    pub fn doppler_width(&self) -> fln {
        self.doppler_width
    }

    pub fn offsets(&self) -> &Array1<fln> {
        &self.offsets
    }

    pub fn doppler_units(&self) -> &Array1<fln> {
        &self.doppler_units
    }

    /// Absolute wavelengths of the grid points [cm].
    pub fn wavelengths(&self) -> Array1<fln> {
        self.offsets.mapv(|offset| self.center + offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sodium() -> LineDescriptor {
        LineDescriptor::new("NaI_5895", "NaI", 589.592, -0.495, 0.0).unwrap()
    }

    #[test]
    fn grid_is_symmetric_and_ascending() {
        let grid = LineGrid::new(&sodium(), 5778.0, 1.0, 5, 15).unwrap();
        assert_eq!(grid.num_points(), 39);
        let n = grid.num_points();
        assert_relative_eq!(grid.doppler_units()[n / 2], 0.0);
        for idx in 0..n {
            assert_relative_eq!(
                grid.offsets()[idx],
                -grid.offsets()[n - 1 - idx],
                max_relative = 1e-12
            );
        }
        assert!(grid.wavelengths().windows(2).into_iter().all(|w| w[1] > w[0]));
        assert_relative_eq!(grid.doppler_units()[n / 2 + 4], MAX_CORE_V);
        assert_relative_eq!(grid.doppler_units()[n / 2 + 5], MIN_WING_V);
    }

    #[test]
    fn doppler_width_includes_microturbulence() {
        let line = sodium();
        let thermal = LineGrid::new(&line, 5778.0, 0.0, 5, 15).unwrap();
        let turbulent = LineGrid::new(&line, 5778.0, 2.0, 5, 15).unwrap();
        let speed = (2.0 * KBOLTZMANN * 5778.0 / (line.atomic_mass() * AMU)).sqrt();
        assert_relative_eq!(
            thermal.doppler_width(),
            line.wavelength() * speed / CLIGHT,
            max_relative = 1e-12
        );
        assert!(turbulent.doppler_width() > thermal.doppler_width());
    }

    #[test]
    fn hot_hydrogen_lines_get_wider_wings() {
        let alpha = LineDescriptor::new("HI_6562", "HI", 656.282, -0.193, 10.2).unwrap();
        let cool = LineGrid::new(&alpha, 6000.0, 1.0, 5, 10).unwrap();
        let hot = LineGrid::new(&alpha, 8000.0, 1.0, 5, 10).unwrap();
        let last = cool.num_points() - 1;
        assert!(hot.doppler_units()[last] > cool.doppler_units()[last]);
        assert!(LineGrid::new(&alpha, 6000.0, 1.0, 1, 10).is_err());
    }
}
