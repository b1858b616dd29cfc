//! Absorption profiles of spectral lines.

use super::{descriptor::LineDescriptor, fln, grid::LineGrid};
use crate::{
    constants::{CLIGHT, LN10, PI},
    data::hjerting::{HJERTING_COMPONENTS, MAX_HJERTING_V},
    depth::DualArray,
    error::{ensure_positive, AtmosphereError, AtmosphereResult},
    math::{integrate_trapezoidal, interpolate_clamped},
    reference::ReferenceModel,
};
use lazy_static::lazy_static;
use ndarray::Array2;
use std::{fmt, str::FromStr};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Natural logarithm of the collisional damping constant of the solar
/// photosphere at unit optical depth [1/s].
pub const LOG_SOLAR_COLLISIONAL_DAMPING: fln = 9.0 * LN10;
/// Exponent of the temperature dependence of the collisional damping.
pub const DAMPING_TEMPERATURE_EXPONENT: fln = 0.7;
/// Half-width of the Gaussian core of the Gauss-Lorentz profile [Doppler widths].
pub const GAUSS_LORENTZ_CORE_V: fln = 2.0;

lazy_static! {
    /// Columns of the Hjerting table: v followed by H0 to H4.
    static ref HJERTING_COLUMNS: [Vec<fln>; 6] = {
        let column = |idx: usize| HJERTING_COMPONENTS.iter().map(|row| row[idx]).collect();
        [column(0), column(1), column(2), column(3), column(4), column(5)]
    };
}

/// Functional form used for the line absorption profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum ProfileKind {
    /// Voigt function from the Hjerting expansion in the damping parameter.
    Voigt,
    /// Gaussian core with Lorentzian wings added beyond two Doppler widths.
    GaussLorentz,
}

impl ProfileKind {
    pub const NAMES: [&'static str; 2] = ["voigt", "gauss-lorentz"];

    /// Evaluates the profile shape at the given damping parameter and offset
    /// in Doppler widths, normalized so that its integral over v is √π for
    /// small damping.
    pub fn shape(&self, damping: fln, v: fln) -> fln {
        match self {
            Self::Voigt => hjerting_function(damping, v),
            Self::GaussLorentz => gauss_lorentz_function(damping, v),
        }
    }
}

impl Default for ProfileKind {
    fn default() -> Self {
        Self::Voigt
    }
}

impl FromStr for ProfileKind {
    type Err = AtmosphereError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "voigt" => Ok(Self::Voigt),
            "gauss-lorentz" => Ok(Self::GaussLorentz),
            _ => Err(AtmosphereError::lookup_miss("line profile", s)),
        }
    }
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voigt => write!(f, "voigt"),
            Self::GaussLorentz => write!(f, "gauss-lorentz"),
        }
    }
}

/// Temperature and gas pressure the collisional damping is scaled from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BroadeningReference {
    pub log_temperature: fln,
    pub log_gas_pressure: fln,
}

impl BroadeningReference {
    /// Conditions of the solar reference model at unit Rosseland optical depth.
    pub fn solar() -> Self {
        let (log_temperature, log_gas_pressure) = ReferenceModel::sun().log_conditions_at(1.0);
        Self {
            log_temperature,
            log_gas_pressure,
        }
    }

    /// Computes the total damping constant γ = γ_col + A [1/s] for the given line
    /// at the given local temperature and gas pressure.
    pub fn damping_constant(
        &self,
        line: &LineDescriptor,
        log_temperature: fln,
        log_gas_pressure: fln,
    ) -> fln {
        let log_collisional = log_gas_pressure - self.log_gas_pressure
            + DAMPING_TEMPERATURE_EXPONENT * (self.log_temperature - log_temperature)
            + LOG_SOLAR_COLLISIONAL_DAMPING
            + LN10 * line.collisional_enhancement();
        log_collisional.exp() + line.einstein_a()
    }
}

impl Default for BroadeningReference {
    fn default() -> Self {
        Self::solar()
    }
}

/// Evaluates the Voigt function H(a, v) from its expansion to fourth order in
/// the damping parameter, using tabulated coefficients for |v| ≤ 12 and their
/// asymptotic forms beyond.
pub fn hjerting_function(damping: fln, v: fln) -> fln {
    let v = v.abs();
    let components = if v <= MAX_HJERTING_V {
        let columns = &*HJERTING_COLUMNS;
        [
            interpolate_clamped(&columns[0], &columns[1], v),
            interpolate_clamped(&columns[0], &columns[2], v),
            interpolate_clamped(&columns[0], &columns[3], v),
            interpolate_clamped(&columns[0], &columns[4], v),
            interpolate_clamped(&columns[0], &columns[5], v),
        ]
    } else {
        let v2 = v * v;
        let v4 = v2 * v2;
        [0.0, 0.56419 / v2 + 0.846 / v4, 0.0, -0.56 / v4, 0.0]
    };
    components
        .iter()
        .rev()
        .fold(0.0, |sum, &component| sum * damping + component)
}

/// Gaussian core, with a Lorentzian wing `a/(√π v²)` added beyond
/// [`GAUSS_LORENTZ_CORE_V`].
pub fn gauss_lorentz_function(damping: fln, v: fln) -> fln {
    let core = fln::exp(-v * v);
    if v.abs() <= GAUSS_LORENTZ_CORE_V {
        core
    } else {
        core + damping / (PI.sqrt() * v * v)
    }
}

/// Computes the absorption profile φ_ν [s] of the given line at every grid
/// point and depth, indexed as `[point][depth]`.
///
/// The profile at each depth is renormalized to unit area in frequency over
/// the grid. Negative values of the truncated Hjerting expansion are floored
/// at the smallest positive number.
pub fn line_profile(
    line: &LineDescriptor,
    grid: &LineGrid,
    kind: ProfileKind,
    temperature: &DualArray,
    gas_pressure: &DualArray,
    reference: &BroadeningReference,
) -> AtmosphereResult<Array2<fln>> {
    let num_depths = temperature.len();
    if gas_pressure.len() != num_depths {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            gas_pressure.len() as fln,
            "temperature and gas pressure have inconsistent lengths",
        ));
    }
    let center = grid.center();
    let doppler_width = grid.doppler_width();
    let offsets = grid.offsets().to_vec();
    let frequency_jacobian: Vec<fln> = offsets
        .iter()
        .map(|&offset| CLIGHT / (center + offset).powi(2))
        .collect();
    let scale = center.powi(2) / (PI.sqrt() * doppler_width * CLIGHT);

    let mut profile = Array2::zeros((grid.num_points(), num_depths));
    for depth in 0..num_depths {
        let gamma = reference.damping_constant(
            line,
            temperature.log_at(depth),
            gas_pressure.log_at(depth),
        );
        let damping = center.powi(2) * gamma / (4.0 * PI * CLIGHT * doppler_width);
        let values: Vec<fln> = grid
            .doppler_units()
            .iter()
            .map(|&v| scale * kind.shape(damping, v).max(0.0))
            .collect();
        let weighted: Vec<fln> = values
            .iter()
            .zip(frequency_jacobian.iter())
            .map(|(value, jacobian)| value * jacobian)
            .collect();
        let area = ensure_positive(
            "line profile area",
            integrate_trapezoidal(&offsets, &weighted),
            Some(depth),
        )?;
        for (point, value) in values.iter().enumerate() {
            profile[[point, depth]] = (value / area).max(fln::MIN_POSITIVE);
        }
    }
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hjerting_function_reduces_to_gaussian_without_damping() {
        assert_relative_eq!(hjerting_function(0.0, 0.0), 1.0);
        assert_relative_eq!(hjerting_function(0.0, 1.0), (-1.0 as fln).exp(), max_relative = 1e-5);
        assert_relative_eq!(hjerting_function(0.0, -1.0), hjerting_function(0.0, 1.0));
        assert_relative_eq!(gauss_lorentz_function(0.0, 1.5), (-2.25 as fln).exp());
    }

    #[test]
    fn damping_raises_the_far_wings() {
        let v = 20.0;
        assert!(hjerting_function(0.01, v) > hjerting_function(0.001, v));
        assert_relative_eq!(
            hjerting_function(0.01, v),
            0.01 / (PI.sqrt() * v * v),
            max_relative = 0.05
        );
        assert_relative_eq!(
            gauss_lorentz_function(0.01, v),
            0.01 / (PI.sqrt() * v * v),
            max_relative = 1e-6
        );
    }

    #[test]
    fn profile_has_unit_area_in_frequency() {
        let line = LineDescriptor::new("NaI_5889", "NaI", 588.995, -0.193, 0.0)
            .unwrap()
            .with_collisional_enhancement(1.0);
        let grid = LineGrid::new(&line, 5778.0, 1.0, 5, 15).unwrap();
        let temperature = DualArray::constant("temperature", 3, 5800.0).unwrap();
        let gas_pressure = DualArray::constant("gas pressure", 3, 1e5).unwrap();
        for kind in [ProfileKind::Voigt, ProfileKind::GaussLorentz] {
            let profile = line_profile(
                &line,
                &grid,
                kind,
                &temperature,
                &gas_pressure,
                &BroadeningReference::solar(),
            )
            .unwrap();
            let offsets = grid.offsets().to_vec();
            let weighted: Vec<fln> = offsets
                .iter()
                .enumerate()
                .map(|(point, &offset)| {
                    profile[[point, 0]] * CLIGHT / (grid.center() + offset).powi(2)
                })
                .collect();
            assert_relative_eq!(
                integrate_trapezoidal(&offsets, &weighted),
                1.0,
                max_relative = 1e-10
            );
            let center = grid.num_points() / 2;
            assert!(profile[[center, 0]] > profile[[center + 3, 0]]);
            assert!(profile.iter().all(|&value| value > 0.0));
        }
    }

    #[test]
    fn collisional_damping_scales_with_pressure() {
        let line = LineDescriptor::new("CaI_4226", "CaI", 422.673, 0.243, 0.0)
            .unwrap()
            .with_einstein_a(0.0);
        let reference = BroadeningReference::solar();
        let low = reference.damping_constant(&line, reference.log_temperature, reference.log_gas_pressure);
        let high = reference.damping_constant(
            &line,
            reference.log_temperature,
            reference.log_gas_pressure + LN10,
        );
        assert_relative_eq!(low, 1e9, max_relative = 1e-12);
        assert_relative_eq!(high, 1e10, max_relative = 1e-12);
        assert!("lorentz".parse::<ProfileKind>().is_err());
        assert_eq!("gauss-lorentz".parse::<ProfileKind>().unwrap(), ProfileKind::GaussLorentz);
    }
}
