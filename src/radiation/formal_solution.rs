//! Formal solution of the transfer equation for the emergent intensity.

use super::{angles::QuadratureAngles, frd, planck::planck};
use crate::{
    depth::DualArray,
    error::{AtmosphereError, AtmosphereResult},
    temperature_correction::mean_intensity,
};
use ndarray::Array1;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// The source function to use in the formal solution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum SourceFunction {
    /// Pure thermal emission, S = B.
    Thermal,
    /// Coherent isotropic scattering with thermal destruction probability ε,
    /// S = (1 − ε) J + ε B.
    Scattering { epsilon: frd },
}

impl SourceFunction {
    pub const DEFAULT_LINE_EPSILON: frd = 0.01;

    /// Computes the source function at every depth of the given monochromatic
    /// optical depth scale.
    pub fn evaluate(
        &self,
        tau: &DualArray,
        temperature: &DualArray,
        wavelength: frd,
    ) -> AtmosphereResult<Array1<frd>> {
        let planck_values = Array1::from_shape_fn(temperature.len(), |depth| {
            planck(temperature.linear_at(depth), wavelength)
        });
        match *self {
            Self::Thermal => Ok(planck_values),
            Self::Scattering { epsilon } => {
                if !(epsilon > 0.0 && epsilon <= 1.0) {
                    return Err(AtmosphereError::invalid_parameter(
                        "epsilon",
                        epsilon,
                        "must be in (0, 1]",
                    ));
                }
                let jay = mean_intensity(tau, &planck_values, 1.0)
                    .map_err(|err| err.at_wavelength(wavelength))?;
                Ok(&jay * (1.0 - epsilon) + &planck_values * epsilon)
            }
        }
    }
}

impl Default for SourceFunction {
    fn default() -> Self {
        Self::Thermal
    }
}

/// Computes the intensity emerging in direction μ from the given source
/// function tabulated on the given optical depths.
///
/// The interior is integrated with the trapezoidal rule in τ. The layer above
/// the first grid point is treated as having the source function of the first
/// point, and everything below the last point as a semi-infinite slab with the
/// source function of the last point.
pub fn emergent_intensity(tau: &DualArray, source: &Array1<frd>, cos_theta: frd) -> frd {
    let num_depths = tau.len();
    let weight_at = |depth: usize| (-tau.linear_at(depth) / cos_theta).exp();

    let mut intensity = source[0] * (1.0 - weight_at(0));
    let mut last_integrand = source[0] * weight_at(0) / cos_theta;
    for depth in 1..num_depths {
        let integrand = source[depth] * weight_at(depth) / cos_theta;
        intensity += 0.5
            * (last_integrand + integrand)
            * (tau.linear_at(depth) - tau.linear_at(depth - 1));
        last_integrand = integrand;
    }
    intensity + source[num_depths - 1] * weight_at(num_depths - 1)
}

/// Computes the emergent intensity at the given wavelength [cm] for every
/// quadrature direction.
///
/// `tau` is the monochromatic optical depth scale at the wavelength.
pub fn formal_solution(
    tau: &DualArray,
    temperature: &DualArray,
    angles: &QuadratureAngles,
    wavelength: frd,
    source: SourceFunction,
) -> AtmosphereResult<Array1<frd>> {
    if tau.len() != temperature.len() || tau.len() < 2 {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            tau.len() as frd,
            "optical depths and temperatures must have equal lengths of at least two",
        ));
    }
    let source_values = source.evaluate(tau, temperature, wavelength)?;
    let intensity = angles
        .cos_theta()
        .mapv(|cos_theta| emergent_intensity(tau, &source_values, cos_theta));
    for &value in intensity.iter() {
        crate::error::ensure_finite("intensity", value, None)
            .map_err(|err| err.at_wavelength(wavelength))?;
    }
    Ok(intensity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{constants::TEFF_SUN, depth::TauGrid};
    use approx::assert_relative_eq;

    #[test]
    fn linear_source_gives_eddington_barbier_intensity() {
        let grid = TauGrid::default();
        let source = grid.tau().linear().mapv(|tau| 2.0 + 3.0 * tau);
        for &cos_theta in &[1.0, 0.5, 0.2] {
            assert_relative_eq!(
                emergent_intensity(grid.tau(), &source, cos_theta),
                2.0 + 3.0 * cos_theta,
                max_relative = 3e-2
            );
        }
    }

    #[test]
    fn intensity_at_disk_centre_is_close_to_planck_at_unit_depth() {
        let grid = TauGrid::default();
        let temperature = DualArray::from_linear(
            "temperature",
            grid.tau()
                .linear()
                .mapv(|tau| TEFF_SUN * (0.75 * (tau + 2.0 / 3.0)).powf(0.25)),
        )
        .unwrap();
        let angles = QuadratureAngles::default();
        let wavelength = 5e-5;
        let intensity = formal_solution(
            grid.tau(),
            &temperature,
            &angles,
            wavelength,
            SourceFunction::Thermal,
        )
        .unwrap();
        let unit_depth = grid.index_closest_to(1.0);
        assert_relative_eq!(
            intensity[0],
            planck(temperature.linear_at(unit_depth), wavelength),
            max_relative = 0.15
        );
        assert!(intensity.windows(2).into_iter().all(|w| w[1] <= w[0]));
        assert!(intensity.iter().all(|&i| i > 0.0));
    }

    #[test]
    fn scattering_lowers_the_emergent_intensity() {
        let grid = TauGrid::default();
        let temperature = DualArray::constant("temperature", grid.num_depths(), 6000.0).unwrap();
        let angles = QuadratureAngles::default();
        let thermal =
            formal_solution(grid.tau(), &temperature, &angles, 5e-5, SourceFunction::Thermal)
                .unwrap();
        let scattering = formal_solution(
            grid.tau(),
            &temperature,
            &angles,
            5e-5,
            SourceFunction::Scattering {
                epsilon: SourceFunction::DEFAULT_LINE_EPSILON,
            },
        )
        .unwrap();
        assert!(scattering[0] < thermal[0]);
        assert!(scattering[0] > 0.0);
    }

    #[test]
    fn invalid_epsilon_is_rejected() {
        let grid = TauGrid::default();
        let temperature = DualArray::constant("temperature", grid.num_depths(), 6000.0).unwrap();
        assert!(formal_solution(
            grid.tau(),
            &temperature,
            &QuadratureAngles::default(),
            5e-5,
            SourceFunction::Scattering { epsilon: 0.0 }
        )
        .is_err());
    }
}
