//! Geometric depth scale.

use crate::{
    depth::{fdp, DualArray, TauGrid},
    error::{AtmosphereError, AtmosphereResult},
};
use ndarray::Array1;

/// Geometric depth assigned to the top of the grid [cm].
pub const TOP_DEPTH: fdp = 1e-19;

/// Computes the geometric depth [cm] below the top of the grid by integrating
/// `dz = dτ/(κ ρ)` in ln τ with the trapezoidal rule.
pub fn geometric_depths(
    tau_grid: &TauGrid,
    rosseland_opacity: &DualArray,
    mass_density: &DualArray,
) -> AtmosphereResult<Array1<fdp>> {
    let num_depths = tau_grid.num_depths();
    if rosseland_opacity.len() != num_depths || mass_density.len() != num_depths {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            num_depths as fdp,
            "opacity and mass density do not match the optical depth grid",
        ));
    }
    let tau = tau_grid.tau();
    let integrand = |depth: usize| {
        fdp::exp(tau.log_at(depth) - rosseland_opacity.log_at(depth) - mass_density.log_at(depth))
    };

    let mut depths = Array1::zeros(num_depths);
    depths[0] = TOP_DEPTH;
    let mut last_integrand = integrand(0);
    for depth in 1..num_depths {
        let this_integrand = integrand(depth);
        depths[depth] = depths[depth - 1]
            + 0.5 * (last_integrand + this_integrand) * (tau.log_at(depth) - tau.log_at(depth - 1));
        last_integrand = this_integrand;
    }
    for (depth, &z) in depths.iter().enumerate() {
        crate::error::ensure_finite("geometric depth", z, Some(depth))?;
    }
    Ok(depths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn constant_opacity_and_density_give_linear_depths() {
        let grid = TauGrid::default();
        let kappa = DualArray::constant("opacity", grid.num_depths(), 0.5).unwrap();
        let rho = DualArray::constant("mass density", grid.num_depths(), 1e-7).unwrap();
        let depths = geometric_depths(&grid, &kappa, &rho).unwrap();
        assert!(depths.windows(2).into_iter().all(|w| w[1] > w[0]));
        let last = grid.num_depths() - 1;
        assert_relative_eq!(
            depths[last],
            grid.tau().linear_at(last) / (0.5 * 1e-7),
            max_relative = 0.05
        );
    }
}
