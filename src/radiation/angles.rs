//! Angular quadrature for intensities emerging from the surface.

use super::frd;
use crate::constants::PI;
use ndarray::Array1;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Non-negative abscissae of the 21-point Gauss-Legendre rule on [-1, 1],
/// interpreted as fractions of a right angle.
const GAUSS_LEGENDRE_21_ABSCISSAE: [frd; 11] = [
    0.0000000000000000,
    0.1455618541608951,
    0.2880213168024011,
    0.4243421202074388,
    0.5516188358872198,
    0.6671388041974123,
    0.7684399634756779,
    0.8533633645833173,
    0.9200993341504008,
    0.9672268385663063,
    0.9937521706203895,
];

const GAUSS_LEGENDRE_21_WEIGHTS: [frd; 11] = [
    0.1460811336496904,
    0.1445244039899700,
    0.1398873947910731,
    0.1322689386333375,
    0.1218314160537285,
    0.1087972991671484,
    0.0934444234560339,
    0.0761001136283793,
    0.0571344254268572,
    0.0369537897708525,
    0.0160172282577743,
];

/// Directions μ = cos θ, from disk centre to limb, with weights for integrating over μ on [0, 1].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct QuadratureAngles {
    cos_theta: Array1<frd>,
    weights: Array1<frd>,
}

impl QuadratureAngles {
    /// The positive half of the 21-point Gauss-Legendre rule, mapped to
    /// μ = cos(x π/2). The weights include the Jacobian dμ/dx so that
    /// `Σ w f(μ)` approximates the integral of f over μ.
    pub fn gauss_legendre() -> Self {
        let cos_theta = Array1::from_shape_fn(GAUSS_LEGENDRE_21_ABSCISSAE.len(), |i| {
            frd::cos(0.5 * PI * GAUSS_LEGENDRE_21_ABSCISSAE[i])
        });
        let weights = Array1::from_shape_fn(GAUSS_LEGENDRE_21_WEIGHTS.len(), |i| {
            GAUSS_LEGENDRE_21_WEIGHTS[i] * 0.5 * PI * frd::sin(0.5 * PI * GAUSS_LEGENDRE_21_ABSCISSAE[i])
        });
        Self { cos_theta, weights }
    }

    pub fn num_angles(&self) -> usize {
        self.cos_theta.len()
    }

    pub fn cos_theta(&self) -> &Array1<frd> {
        &self.cos_theta
    }

    pub fn weights(&self) -> &Array1<frd> {
        &self.weights
    }
}

impl Default for QuadratureAngles {
    fn default() -> Self {
        Self::gauss_legendre()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn quadrature_integrates_low_order_moments() {
        let angles = QuadratureAngles::gauss_legendre();
        assert_eq!(angles.num_angles(), 11);
        assert_abs_diff_eq!(angles.cos_theta()[0], 1.0);
        let zeroth: frd = angles.weights().sum();
        let first: frd = angles
            .weights()
            .iter()
            .zip(angles.cos_theta().iter())
            .map(|(w, mu)| w * mu)
            .sum();
        assert_abs_diff_eq!(zeroth, 1.0, epsilon = 1e-2);
        assert_abs_diff_eq!(first, 0.5, epsilon = 1e-2);
    }
}
