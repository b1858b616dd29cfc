//! Hydrostatic equilibrium on the Rosseland optical depth scale.

use crate::{
    constants::{CLIGHT, STEFBOLTZ},
    depth::{fdp, DualArray, TauGrid},
    error::{ensure_positive, AtmosphereError, AtmosphereResult},
};
use ndarray::Array1;
use std::{fmt, str::FromStr};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Largest fraction of the total pressure that radiation may supply.
pub const MAX_RADIATION_PRESSURE_FRACTION: fdp = 0.5;

/// LTE radiation pressure `(4σ/3c) T⁴` [dyn/cm^2].
pub fn radiation_pressure_at(temperature: fdp) -> fdp {
    4.0 * STEFBOLTZ / (3.0 * CLIGHT) * temperature.powi(4)
}

/// LTE radiation pressure at every depth.
pub fn radiation_pressure(temperature: &DualArray) -> AtmosphereResult<DualArray> {
    DualArray::from_linear(
        "radiation pressure",
        temperature.linear().mapv(radiation_pressure_at),
    )
}

/// Splits a total pressure into gas and radiation pressure, with the
/// radiation share capped at [`MAX_RADIATION_PRESSURE_FRACTION`].
fn split_total_pressure(total_pressure: fdp, radiation_pressure: fdp) -> (fdp, fdp) {
    let fraction = fdp::min(
        radiation_pressure / total_pressure,
        MAX_RADIATION_PRESSURE_FRACTION,
    );
    let gas_pressure = total_pressure * (1.0 - fraction);
    (gas_pressure, total_pressure - gas_pressure)
}

/// Gas and radiation pressure in hydrostatic equilibrium.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct HydrostaticPressures {
    pub gas_pressure: DualArray,
    /// Radiation pressure, as limited by the cap on its share of the total.
    pub radiation_pressure: DualArray,
}

impl HydrostaticPressures {
    /// Splits the total pressures depth by depth.
    ///
    /// Where the total pressure grows inwards, radiation also supplies at most
    /// [`MAX_RADIATION_PRESSURE_FRACTION`] of each increment, so the gas
    /// pressure keeps increasing even where `T⁴` outgrows the total.
    fn from_totals(total_pressure: &Array1<fdp>, temperature: &DualArray) -> AtmosphereResult<Self> {
        let num_depths = total_pressure.len();
        let mut gas_pressure = Array1::zeros(num_depths);
        let mut radiation_pressure = Array1::zeros(num_depths);
        for depth in 0..num_depths {
            let total = ensure_positive("total pressure", total_pressure[depth], Some(depth))?;
            let (mut gas, _) =
                split_total_pressure(total, radiation_pressure_at(temperature.linear_at(depth)));
            if depth > 0 && total > total_pressure[depth - 1] {
                let min_gas = gas_pressure[depth - 1]
                    + (1.0 - MAX_RADIATION_PRESSURE_FRACTION) * (total - total_pressure[depth - 1]);
                gas = fdp::max(gas, min_gas);
            }
            gas_pressure[depth] = gas;
            radiation_pressure[depth] = total - gas;
        }
        Ok(Self {
            gas_pressure: DualArray::from_linear("gas pressure", gas_pressure)?,
            radiation_pressure: DualArray::from_linear("radiation pressure", radiation_pressure)?,
        })
    }
}

/// Defines the properties of a method for integrating the equation of
/// hydrostatic equilibrium `dP/dτ = g/κ`.
pub trait HydrostaticSolver {
    /// Name of the method.
    fn name(&self) -> &'static str;

    /// Computes gas and radiation pressure on the given optical depth grid.
    ///
    /// # Parameters
    ///
    /// - `tau_grid`: Rosseland optical depths.
    /// - `surface_gravity`: Gravitational acceleration [cm/s^2].
    /// - `temperature`: Temperature at each depth [K].
    /// - `rosseland_opacity`: Rosseland mean opacity at each depth [cm^2/g].
    /// - `previous_gas_pressure`: Gas pressure from the previous pass [dyn/cm^2].
    fn solve(
        &self,
        tau_grid: &TauGrid,
        surface_gravity: fdp,
        temperature: &DualArray,
        rosseland_opacity: &DualArray,
        previous_gas_pressure: &DualArray,
    ) -> AtmosphereResult<HydrostaticPressures>;
}

fn check_inputs(
    tau_grid: &TauGrid,
    surface_gravity: fdp,
    arrays: &[&DualArray],
) -> AtmosphereResult<()> {
    ensure_positive("surface gravity", surface_gravity, None)?;
    let num_depths = tau_grid.num_depths();
    if arrays.iter().any(|array| array.len() != num_depths) {
        return Err(AtmosphereError::invalid_parameter(
            "num_depths",
            num_depths as fdp,
            "structure arrays do not match the optical depth grid",
        ));
    }
    Ok(())
}

/// Integrates `d(P^(3/2))/d ln τ = 1.5 g τ P^(1/2)/κ` with the trapezoidal
/// rule, evaluating P^(1/2) in the integrand from the previous pass.
#[derive(Clone, Debug, PartialEq)]
pub struct IntegralForm {
    surface_total_pressure: fdp,
}

impl IntegralForm {
    pub const DEFAULT_SURFACE_TOTAL_PRESSURE: fdp = 1e-4;

    pub fn new(surface_total_pressure: fdp) -> AtmosphereResult<Self> {
        ensure_positive("surface pressure", surface_total_pressure, None)?;
        Ok(Self {
            surface_total_pressure,
        })
    }
}

impl Default for IntegralForm {
    fn default() -> Self {
        Self {
            surface_total_pressure: Self::DEFAULT_SURFACE_TOTAL_PRESSURE,
        }
    }
}

impl HydrostaticSolver for IntegralForm {
    fn name(&self) -> &'static str {
        "integral form"
    }

    fn solve(
        &self,
        tau_grid: &TauGrid,
        surface_gravity: fdp,
        temperature: &DualArray,
        rosseland_opacity: &DualArray,
        previous_gas_pressure: &DualArray,
    ) -> AtmosphereResult<HydrostaticPressures> {
        check_inputs(
            tau_grid,
            surface_gravity,
            &[temperature, rosseland_opacity, previous_gas_pressure],
        )?;
        let num_depths = tau_grid.num_depths();
        let tau = tau_grid.tau();

        let integrand = |depth: usize| {
            let previous_total = previous_gas_pressure.linear_at(depth)
                + radiation_pressure_at(temperature.linear_at(depth));
            fdp::exp(
                tau.log_at(depth) + 0.5 * previous_total.ln() - rosseland_opacity.log_at(depth),
            )
        };

        let mut total_pressure = Array1::zeros(num_depths);
        total_pressure[0] = self.surface_total_pressure;
        let mut sum = (2.0 / 3.0) * self.surface_total_pressure.powf(1.5) / surface_gravity;
        let mut last_integrand = integrand(0);
        for depth in 1..num_depths {
            let this_integrand = integrand(depth);
            sum += 0.5 * (last_integrand + this_integrand) * (tau.log_at(depth) - tau.log_at(depth - 1));
            total_pressure[depth] = (1.5 * surface_gravity * sum).powf(2.0 / 3.0);
            last_integrand = this_integrand;
        }
        HydrostaticPressures::from_totals(&total_pressure, temperature)
    }
}

/// Steps `dP/d ln τ = g τ/κ` with the Euler method.
#[derive(Clone, Debug, PartialEq)]
pub struct Euler {
    surface_total_pressure: fdp,
}

impl Euler {
    pub const DEFAULT_SURFACE_TOTAL_PRESSURE: fdp = 1e-4;

    pub fn new(surface_total_pressure: fdp) -> AtmosphereResult<Self> {
        ensure_positive("surface pressure", surface_total_pressure, None)?;
        Ok(Self {
            surface_total_pressure,
        })
    }
}

impl Default for Euler {
    fn default() -> Self {
        Self {
            surface_total_pressure: Self::DEFAULT_SURFACE_TOTAL_PRESSURE,
        }
    }
}

impl HydrostaticSolver for Euler {
    fn name(&self) -> &'static str {
        "Euler"
    }

    fn solve(
        &self,
        tau_grid: &TauGrid,
        surface_gravity: fdp,
        temperature: &DualArray,
        rosseland_opacity: &DualArray,
        previous_gas_pressure: &DualArray,
    ) -> AtmosphereResult<HydrostaticPressures> {
        check_inputs(
            tau_grid,
            surface_gravity,
            &[temperature, rosseland_opacity, previous_gas_pressure],
        )?;
        let num_depths = tau_grid.num_depths();
        let tau = tau_grid.tau();

        let mut total_pressure = Array1::zeros(num_depths);
        total_pressure[0] = self.surface_total_pressure;
        for depth in 1..num_depths {
            let derivative =
                tau.linear_at(depth) * surface_gravity / rosseland_opacity.linear_at(depth);
            total_pressure[depth] = total_pressure[depth - 1]
                + derivative * (tau.log_at(depth) - tau.log_at(depth - 1));
        }
        HydrostaticPressures::from_totals(&total_pressure, temperature)
    }
}

/// Selectable hydrostatic integration methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum HydrostaticStrategy {
    IntegralForm,
    Euler,
}

impl HydrostaticStrategy {
    pub const NAMES: [&'static str; 2] = ["integral", "euler"];

    /// Creates the solver for this strategy with the given surface total pressure.
    pub fn solver(&self, surface_total_pressure: fdp) -> AtmosphereResult<Box<dyn HydrostaticSolver + Send + Sync>> {
        Ok(match self {
            Self::IntegralForm => Box::new(IntegralForm::new(surface_total_pressure)?),
            Self::Euler => Box::new(Euler::new(surface_total_pressure)?),
        })
    }
}

impl Default for HydrostaticStrategy {
    fn default() -> Self {
        Self::IntegralForm
    }
}

impl FromStr for HydrostaticStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "integral" => Ok(Self::IntegralForm),
            "euler" => Ok(Self::Euler),
            other => Err(format!("Invalid hydrostatic strategy: {}", other)),
        }
    }
}

impl fmt::Display for HydrostaticStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntegralForm => write!(f, "integral"),
            Self::Euler => write!(f, "euler"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn gray_inputs(grid: &TauGrid, gravity: fdp, teff: fdp) -> (DualArray, DualArray, DualArray) {
        let temperature = DualArray::from_linear(
            "temperature",
            grid.tau()
                .linear()
                .mapv(|tau| teff * (0.75 * (tau + 2.0 / 3.0)).powf(0.25)),
        )
        .unwrap();
        let kappa = DualArray::constant("opacity", grid.num_depths(), 1.0).unwrap();
        let previous = DualArray::from_linear(
            "gas pressure",
            grid.tau().linear().mapv(|tau| gravity * tau),
        )
        .unwrap();
        (temperature, kappa, previous)
    }

    fn is_non_decreasing(array: &DualArray) -> bool {
        array.linear().windows(2).into_iter().all(|w| w[1] >= w[0])
    }

    #[test]
    fn integral_form_reproduces_gray_pressure_at_depth() {
        let grid = TauGrid::default();
        let gravity = 2.75e4;
        let (temperature, kappa, previous) = gray_inputs(&grid, gravity, 5000.0);
        let pressures = IntegralForm::default()
            .solve(&grid, gravity, &temperature, &kappa, &previous)
            .unwrap();
        let last = grid.num_depths() - 1;
        assert_relative_eq!(
            pressures.gas_pressure.linear_at(last),
            gravity * grid.tau().linear_at(last),
            max_relative = 0.05
        );
        assert!(is_non_decreasing(&pressures.gas_pressure));
    }

    #[test]
    fn euler_overestimates_but_stays_monotonic() {
        let grid = TauGrid::default();
        let gravity = 2.75e4;
        let (temperature, kappa, previous) = gray_inputs(&grid, gravity, 5000.0);
        let pressures = Euler::default()
            .solve(&grid, gravity, &temperature, &kappa, &previous)
            .unwrap();
        let last = grid.num_depths() - 1;
        let exact = gravity * grid.tau().linear_at(last);
        assert!(pressures.gas_pressure.linear_at(last) > exact);
        assert!(pressures.gas_pressure.linear_at(last) < 1.3 * exact);
        assert!(is_non_decreasing(&pressures.gas_pressure));
    }

    #[test]
    fn radiation_never_exceeds_half_the_total_pressure() {
        let grid = TauGrid::default();
        let gravity = 10.0;
        let (temperature, kappa, previous) = gray_inputs(&grid, gravity, 40000.0);
        for solver in [HydrostaticStrategy::IntegralForm, HydrostaticStrategy::Euler] {
            let pressures = solver
                .solver(1e-4)
                .unwrap()
                .solve(&grid, gravity, &temperature, &kappa, &previous)
                .unwrap();
            for depth in 0..grid.num_depths() {
                let gas = pressures.gas_pressure.linear_at(depth);
                let radiation = pressures.radiation_pressure.linear_at(depth);
                assert!(radiation <= 0.5 * (gas + radiation) * (1.0 + 1e-12));
            }
        }
    }

    #[test]
    fn gas_pressure_increases_where_radiation_outgrows_the_total() {
        let total = Array1::from(vec![20.0, 22.0, 40.0]);
        let temperature = DualArray::from_linear(
            "temperature",
            Array1::from(vec![5300.0, 7950.0, 8000.0]),
        )
        .unwrap();
        let pressures = HydrostaticPressures::from_totals(&total, &temperature).unwrap();
        let unconstrained_gas = total[1] - radiation_pressure_at(7950.0);
        assert!(unconstrained_gas < pressures.gas_pressure.linear_at(0));
        for depth in 1..total.len() {
            assert!(
                pressures.gas_pressure.linear_at(depth)
                    > pressures.gas_pressure.linear_at(depth - 1)
            );
        }
        for depth in 0..total.len() {
            let gas = pressures.gas_pressure.linear_at(depth);
            let radiation = pressures.radiation_pressure.linear_at(depth);
            assert!(radiation > 0.0);
            assert!(radiation <= 0.5 * total[depth] * (1.0 + 1e-12));
            assert_relative_eq!(gas + radiation, total[depth], max_relative = 1e-12);
        }
    }

    #[test]
    fn radiation_pressure_follows_stefan_boltzmann() {
        assert_relative_eq!(
            radiation_pressure_at(10000.0),
            4.0 * STEFBOLTZ * 1e16 / (3.0 * CLIGHT)
        );
    }

    #[test]
    fn strategies_parse_from_names() {
        for name in HydrostaticStrategy::NAMES {
            let strategy: HydrostaticStrategy = name.parse().unwrap();
            assert_eq!(strategy.to_string(), name);
        }
        assert!("rk4".parse::<HydrostaticStrategy>().is_err());
    }
}
