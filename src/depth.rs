//! Depth-indexed quantities and the Rosseland optical depth grid.

use crate::error::{ensure_finite, ensure_positive, AtmosphereError, AtmosphereResult};
use ndarray::Array1;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Floating-point precision to use for depth-indexed quantities.
#[allow(non_camel_case_types)]
pub type fdp = f64;

/// A positive physical quantity stored both linearly and as its natural logarithm.
///
/// The two representations are only ever updated together, so
/// `linear[i] == exp(log[i])` holds after every mutation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DualArray {
    linear: Array1<fdp>,
    log: Array1<fdp>,
}

impl DualArray {
    /// Creates a dual array of the given length filled with the given positive value.
    pub fn constant(
        quantity: &'static str,
        len: usize,
        value: fdp,
    ) -> AtmosphereResult<Self> {
        ensure_positive(quantity, value, None)?;
        Ok(Self {
            linear: Array1::from_elem(len, value),
            log: Array1::from_elem(len, value.ln()),
        })
    }

    /// Creates a dual array from linear values, which must all be finite and positive.
    pub fn from_linear(quantity: &'static str, linear: Array1<fdp>) -> AtmosphereResult<Self> {
        for (idx, &value) in linear.iter().enumerate() {
            ensure_positive(quantity, value, Some(idx))?;
        }
        let log = linear.mapv(fdp::ln);
        Ok(Self { linear, log })
    }

    /// Creates a dual array from natural logarithms, which must all be finite.
    pub fn from_log(quantity: &'static str, log: Array1<fdp>) -> AtmosphereResult<Self> {
        for (idx, &value) in log.iter().enumerate() {
            ensure_finite(quantity, value, Some(idx))?;
        }
        let linear = log.mapv(fdp::exp);
        for (idx, &value) in linear.iter().enumerate() {
            ensure_positive(quantity, value, Some(idx))?;
        }
        Ok(Self { linear, log })
    }

    pub fn len(&self) -> usize {
        self.linear.len()
    }

    pub fn is_empty(&self) -> bool {
        self.linear.is_empty()
    }

    pub fn linear(&self) -> &Array1<fdp> {
        &self.linear
    }

    pub fn log(&self) -> &Array1<fdp> {
        &self.log
    }

    pub fn linear_at(&self, idx: usize) -> fdp {
        self.linear[idx]
    }

    pub fn log_at(&self, idx: usize) -> fdp {
        self.log[idx]
    }

    /// Sets the value at the given index from a linear value.
    pub fn set_linear(
        &mut self,
        quantity: &'static str,
        idx: usize,
        value: fdp,
    ) -> AtmosphereResult<()> {
        ensure_positive(quantity, value, Some(idx))?;
        self.linear[idx] = value;
        self.log[idx] = value.ln();
        Ok(())
    }

    /// Sets the value at the given index from a natural logarithm.
    pub fn set_log(
        &mut self,
        quantity: &'static str,
        idx: usize,
        log_value: fdp,
    ) -> AtmosphereResult<()> {
        ensure_finite(quantity, log_value, Some(idx))?;
        let value = log_value.exp();
        ensure_positive(quantity, value, Some(idx))?;
        self.linear[idx] = value;
        self.log[idx] = log_value;
        Ok(())
    }

    /// Returns the maximum relative difference between the linear values of
    /// this and the given array.
    pub fn max_relative_change(&self, previous: &Self) -> fdp {
        self.linear
            .iter()
            .zip(previous.linear.iter())
            .map(|(&new, &old)| ((new - old) / old).abs())
            .fold(0.0, fdp::max)
    }
}

/// Grid of Rosseland optical depths, uniformly spaced in ln τ.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct TauGrid {
    tau: DualArray,
    log_tau_step: fdp,
}

impl TauGrid {
    pub const DEFAULT_NUM_DEPTHS: usize = 48;
    pub const DEFAULT_LOG10_MIN_TAU: fdp = -6.0;
    pub const DEFAULT_LOG10_MAX_TAU: fdp = 2.0;

    /// Creates a new grid of optical depths spanning the given base 10 logarithmic range.
    pub fn new(
        num_depths: usize,
        log10_min_tau: fdp,
        log10_max_tau: fdp,
    ) -> AtmosphereResult<Self> {
        if num_depths < 2 {
            return Err(AtmosphereError::invalid_parameter(
                "num_depths",
                num_depths as fdp,
                "at least two depth points are required",
            ));
        }
        if !(log10_min_tau.is_finite() && log10_max_tau.is_finite())
            || log10_max_tau <= log10_min_tau
        {
            return Err(AtmosphereError::invalid_parameter(
                "log10_max_tau",
                log10_max_tau,
                format!("must be finite and exceed the lower bound {}", log10_min_tau),
            ));
        }
        let ln10 = crate::constants::LN10;
        let log_tau_step = (log10_max_tau - log10_min_tau) * ln10 / ((num_depths - 1) as fdp);
        let log_tau = Array1::from_shape_fn(num_depths, |i| {
            log10_min_tau * ln10 + (i as fdp) * log_tau_step
        });
        Ok(Self {
            tau: DualArray::from_log("optical depth", log_tau)?,
            log_tau_step,
        })
    }

    pub fn num_depths(&self) -> usize {
        self.tau.len()
    }

    pub fn tau(&self) -> &DualArray {
        &self.tau
    }

    /// Uniform spacing of the grid in ln τ.
    pub fn log_tau_step(&self) -> fdp {
        self.log_tau_step
    }

    /// Index of the depth point whose optical depth is closest to the given value.
    pub fn index_closest_to(&self, tau: fdp) -> usize {
        crate::math::closest_index(
            self.tau.log().as_slice().unwrap_or(&[]),
            tau.ln(),
        )
    }
}

impl Default for TauGrid {
    fn default() -> Self {
        let ln10 = crate::constants::LN10;
        let num_depths = Self::DEFAULT_NUM_DEPTHS;
        let log_tau_step = (Self::DEFAULT_LOG10_MAX_TAU - Self::DEFAULT_LOG10_MIN_TAU) * ln10
            / ((num_depths - 1) as fdp);
        let log = Array1::from_shape_fn(num_depths, |i| {
            Self::DEFAULT_LOG10_MIN_TAU * ln10 + (i as fdp) * log_tau_step
        });
        let linear = log.mapv(fdp::exp);
        Self {
            tau: DualArray { linear, log },
            log_tau_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn tau_grid_is_strictly_increasing() {
        for &num_depths in &[2, 3, 48, 100] {
            let grid = TauGrid::new(num_depths, -6.0, 2.0).unwrap();
            assert_eq!(grid.num_depths(), num_depths);
            let tau = grid.tau().linear();
            for i in 1..num_depths {
                assert!(tau[i] > tau[i - 1]);
            }
            assert_relative_eq!(tau[0], 1e-6, max_relative = 1e-12);
            assert_relative_eq!(tau[num_depths - 1], 1e2, max_relative = 1e-12);
        }
    }

    #[test]
    fn default_tau_grid_equals_constructed_grid() {
        assert_eq!(
            TauGrid::default(),
            TauGrid::new(48, -6.0, 2.0).unwrap()
        );
    }

    #[test]
    fn tau_grid_rejects_too_few_points() {
        assert!(matches!(
            TauGrid::new(1, -6.0, 2.0),
            Err(AtmosphereError::InvalidParameter { .. })
        ));
        assert!(TauGrid::new(10, 2.0, -6.0).is_err());
    }

    #[test]
    fn dual_array_stays_consistent() {
        let mut array = DualArray::constant("temperature", 4, 5000.0).unwrap();
        array.set_linear("temperature", 1, 6000.0).unwrap();
        array.set_log("temperature", 2, 9.0).unwrap();
        for i in 0..array.len() {
            assert_relative_eq!(array.linear_at(i), array.log_at(i).exp(), max_relative = 1e-14);
        }
        assert!(array.set_linear("temperature", 0, -1.0).is_err());
        assert!(array.set_log("temperature", 0, f64::NAN).is_err());
        assert!(DualArray::from_linear("pressure", Array1::from(vec![1.0, 0.0])).is_err());
    }

    #[test]
    fn index_closest_to_unity_is_found() {
        let grid = TauGrid::default();
        let idx = grid.index_closest_to(1.0);
        assert_relative_eq!(grid.tau().linear_at(idx), 1.0, max_relative = 0.25);
    }
}
