//! Mixing-length temperature gradient in convectively unstable layers.

use crate::{
    constants::{AMU, KBOLTZMANN, LN10, LOG_G_SUN, STEFBOLTZ, TEFF_SUN},
    depth::{fdp, DualArray, TauGrid},
    error::{ensure_positive, AtmosphereError, AtmosphereResult},
};

/// Adiabatic exponent of an ideal monatomic gas.
pub const ADIABATIC_GAMMA: fdp = 5.0 / 3.0;
/// Solar mixing length in pressure scale heights.
pub const SOLAR_MIXING_LENGTH: fdp = 1.0;
/// Solar factor for the squared convective velocity.
pub const SOLAR_BETA: fdp = 0.5;

/// Mixing-length parameters scaled to a given star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MixingLength {
    pub mixing_length: fdp,
    pub beta: fdp,
}

impl MixingLength {
    /// Scales the solar parameters by (Teff/Teff_⊙)⁴ for stars cooler than the
    /// Sun and by (log g_⊙/log g)² for all stars.
    pub fn for_star(teff: fdp, log_g: fdp) -> AtmosphereResult<Self> {
        ensure_positive("effective temperature", teff, None)?;
        ensure_positive("log surface gravity", log_g, None)?;
        let teff_scale = if teff < TEFF_SUN {
            (teff / TEFF_SUN).powi(4)
        } else {
            1.0
        };
        let gravity_scale = (LOG_G_SUN / log_g).powi(2);
        Ok(Self {
            mixing_length: SOLAR_MIXING_LENGTH * teff_scale * gravity_scale,
            beta: SOLAR_BETA * teff_scale * gravity_scale,
        })
    }
}

/// Finds the depth index of the top of the convection zone.
///
/// Layers are scanned from the bottom up and the deepest layer satisfying the
/// Schwarzschild criterion `d ln T/d ln P < (γ − 1)/γ + d ln μ/d ln P` marks
/// the boundary. Returns the bottom index if no layer is stable.
pub fn convective_boundary(
    temperature: &DualArray,
    gas_pressure: &DualArray,
    mean_molecular_weight: &DualArray,
) -> usize {
    let num_depths = temperature.len();
    let adiabatic_gradient = (ADIABATIC_GAMMA - 1.0) / ADIABATIC_GAMMA;
    for depth in (1..num_depths.saturating_sub(1)).rev() {
        let delta_log_pressure = gas_pressure.log_at(depth + 1) - gas_pressure.log_at(depth - 1);
        let delta_log_temperature = temperature.log_at(depth + 1) - temperature.log_at(depth - 1);
        let delta_log_mu =
            mean_molecular_weight.log_at(depth + 1) - mean_molecular_weight.log_at(depth - 1);
        if delta_log_temperature / delta_log_pressure
            < adiabatic_gradient + delta_log_mu / delta_log_pressure
        {
            return depth;
        }
    }
    num_depths.saturating_sub(1)
}

/// Replaces the temperature below the convective boundary with the
/// super-adiabatic mixing-length gradient, integrated in ln τ.
#[allow(clippy::too_many_arguments)]
pub fn convective_temperature(
    tau_grid: &TauGrid,
    teff: fdp,
    log_g: fdp,
    temperature: &DualArray,
    gas_pressure: &DualArray,
    mass_density: &DualArray,
    rosseland_opacity: &DualArray,
    mean_molecular_weight: &DualArray,
) -> AtmosphereResult<DualArray> {
    let num_depths = tau_grid.num_depths();
    if [temperature, gas_pressure, mass_density, rosseland_opacity, mean_molecular_weight]
        .iter()
        .any(|array| array.len() != num_depths)
    {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            num_depths as fdp,
            "structure arrays do not match the optical depth grid",
        ));
    }
    let parameters = MixingLength::for_star(teff, log_g)?;
    let tau = tau_grid.tau();
    let gravity = fdp::exp(LN10 * log_g);
    let surface_flux = STEFBOLTZ * teff.powi(4);
    let adiabatic_gradient = (ADIABATIC_GAMMA - 1.0) / ADIABATIC_GAMMA;

    let boundary = convective_boundary(temperature, gas_pressure, mean_molecular_weight);

    let mut new_temperature = temperature.linear().clone();
    let mut last_temperature = temperature.linear_at(boundary);
    let mut last_log_tau = tau.log_at(boundary);
    for depth in boundary..num_depths {
        let rho = mass_density.linear_at(depth);
        let kappa = rosseland_opacity.linear_at(depth);
        let factor = mean_molecular_weight.linear_at(depth) * AMU / KBOLTZMANN;
        let heat_capacity = 2.5 / factor;

        let adiabatic = tau.linear_at(depth) * adiabatic_gradient * factor * gravity / (rho * kappa);
        let superadiabatic_excess = fdp::powf(
            surface_flux / (rho * heat_capacity * parameters.mixing_length.powi(2))
                * factor.powi(2)
                * (gravity / last_temperature).powf(1.5)
                / parameters.beta.sqrt(),
            2.0 / 3.0,
        );
        let excess = tau.linear_at(depth) * superadiabatic_excess / (rho * kappa);

        let next_temperature =
            last_temperature + (adiabatic + excess) * (tau.log_at(depth) - last_log_tau);
        new_temperature[depth] = next_temperature;
        last_temperature = next_temperature;
        last_log_tau = tau.log_at(depth);
    }
    DualArray::from_linear("temperature", new_temperature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mixing_length_is_solar_for_the_sun() {
        let parameters = MixingLength::for_star(TEFF_SUN, LOG_G_SUN).unwrap();
        assert_relative_eq!(parameters.mixing_length, 1.0);
        assert_relative_eq!(parameters.beta, 0.5);
        let cool = MixingLength::for_star(0.5 * TEFF_SUN, LOG_G_SUN).unwrap();
        assert_relative_eq!(cool.mixing_length, 1.0 / 16.0);
        assert!(MixingLength::for_star(5000.0, 0.0).is_err());
    }

    #[test]
    fn steep_temperature_gradient_is_unstable() {
        let grid = TauGrid::default();
        // T ∝ P^0.5 everywhere exceeds the adiabatic gradient of 0.4
        let gas_pressure = DualArray::from_linear(
            "gas pressure",
            grid.tau().linear().mapv(|tau| 1e4 * tau + 1.0),
        )
        .unwrap();
        let temperature =
            DualArray::from_linear("temperature", gas_pressure.linear().mapv(|p| 100.0 * p.sqrt()))
                .unwrap();
        let mu = DualArray::constant("mean molecular weight", grid.num_depths(), 1.3).unwrap();
        assert_eq!(
            convective_boundary(&temperature, &gas_pressure, &mu),
            grid.num_depths() - 1
        );

        // Isothermal layers are stable
        let isothermal = DualArray::constant("temperature", grid.num_depths(), 5000.0).unwrap();
        assert_eq!(
            convective_boundary(&isothermal, &gas_pressure, &mu),
            grid.num_depths() - 2
        );
    }

    #[test]
    fn temperature_above_the_boundary_is_unchanged() {
        let grid = TauGrid::default();
        let n = grid.num_depths();
        let temperature = DualArray::from_linear(
            "temperature",
            grid.tau()
                .linear()
                .mapv(|tau| 5778.0 * (0.75 * (tau + 2.0 / 3.0)).powf(0.25)),
        )
        .unwrap();
        let gas_pressure = DualArray::from_linear(
            "gas pressure",
            grid.tau().linear().mapv(|tau| 2.75e4 * tau + 1.0),
        )
        .unwrap();
        let rho = DualArray::constant("mass density", n, 1e-7).unwrap();
        let kappa = DualArray::constant("opacity", n, 1.0).unwrap();
        let mu = DualArray::constant("mean molecular weight", n, 1.3).unwrap();
        let boundary = convective_boundary(&temperature, &gas_pressure, &mu);
        let convective = convective_temperature(
            &grid, 5778.0, 4.44, &temperature, &gas_pressure, &rho, &kappa, &mu,
        )
        .unwrap();
        for depth in 0..=boundary {
            assert_relative_eq!(convective.linear_at(depth), temperature.linear_at(depth));
        }
        for depth in boundary + 1..n {
            assert!(convective.linear_at(depth) > convective.linear_at(depth - 1));
        }
    }
}
