//! Math utilities.

use num::Float;

/// Floating-point precision to use for integration.
#[allow(non_camel_case_types)]
pub type fin = f64;

/// Euler-Mascheroni constant.
const EULER_GAMMA: fin = 0.577_215_665;

/// Returns the index of the first element of the ascending coordinate array
/// that is not smaller than the given coordinate, clamped to the valid upper
/// bracket indices `1..coords.len()`.
pub fn search_upper_bracket<F: Float>(coords: &[F], coord: F) -> usize {
    assert!(coords.len() >= 2, "Need at least two coordinates");
    let idx = coords.partition_point(|&c| c < coord);
    idx.clamp(1, coords.len() - 1)
}

/// Linearly interpolates the given values at the given coordinate.
///
/// The coordinates must be ascending. Outside the coordinate range the value
/// at the nearest end is returned.
pub fn interpolate_clamped<F: Float>(coords: &[F], values: &[F], coord: F) -> F {
    assert_eq!(
        coords.len(),
        values.len(),
        "Number of coordinates and values differ"
    );
    let n = coords.len();
    if n == 1 || coord <= coords[0] {
        return values[0];
    }
    if coord >= coords[n - 1] {
        return values[n - 1];
    }
    let upper = search_upper_bracket(coords, coord);
    let lower = upper - 1;
    let span = coords[upper] - coords[lower];
    if span <= F::zero() {
        return values[upper];
    }
    let weight = (coord - coords[lower]) / span;
    values[lower] + weight * (values[upper] - values[lower])
}

/// Linearly interpolates the given values at the given coordinate, extrapolating
/// linearly from the nearest interval when the coordinate is out of range.
pub fn interpolate_extrapolated<F: Float>(coords: &[F], values: &[F], coord: F) -> F {
    assert_eq!(
        coords.len(),
        values.len(),
        "Number of coordinates and values differ"
    );
    let upper = search_upper_bracket(coords, coord);
    let lower = upper - 1;
    let weight = (coord - coords[lower]) / (coords[upper] - coords[lower]);
    values[lower] + weight * (values[upper] - values[lower])
}

/// Integrates the tabulated function with the trapezoidal rule over its full
/// (possibly non-uniform) coordinate range.
pub fn integrate_trapezoidal<F: Float>(coords: &[F], values: &[F]) -> F {
    assert_eq!(
        coords.len(),
        values.len(),
        "Number of coordinates and values differ"
    );
    let half = F::from(0.5).unwrap();
    coords
        .windows(2)
        .zip(values.windows(2))
        .fold(F::zero(), |sum, (c, v)| {
            sum + half * (v[0] + v[1]) * (c[1] - c[0])
        })
}

/// Returns the index of the coordinate closest to the given one.
pub fn closest_index<F: Float>(coords: &[F], coord: F) -> usize {
    coords
        .iter()
        .enumerate()
        .fold((0, F::infinity()), |(best_idx, best_dist), (idx, &c)| {
            let dist = (c - coord).abs();
            if dist < best_dist {
                (idx, dist)
            } else {
                (best_idx, best_dist)
            }
        })
        .0
}

/// Evaluates the first exponential integral E1(x).
///
/// Uses a truncated series for |x| <= 3 and the leading asymptotic term otherwise.
/// Arguments are taken in absolute value and floored at 1e-6 to avoid the
/// logarithmic singularity at zero.
pub fn exponential_integral_e1(x: fin) -> fin {
    const NUM_TERMS: i32 = 11;
    const MIN_ARGUMENT: fin = 1e-6;

    let x = x.abs().max(MIN_ARGUMENT);

    if x > 3.0 {
        return (-x).exp() / x;
    }
    let mut term = 1.0;
    let mut factorial = 1.0;
    let mut sum = 0.0;
    for k in 1..=NUM_TERMS {
        let k = k as fin;
        term *= -x;
        factorial *= k;
        sum += term / (k * factorial);
    }
    -EULER_GAMMA - x.ln() - sum
}

/// Evaluates the second exponential integral E2(x) = e^(-x) - x E1(x) for x >= 0.
pub fn exponential_integral_e2(x: fin) -> fin {
    let x = x.abs();
    (-x).exp() - x * exponential_integral_e1(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn clamped_interpolation_works() {
        let coords = [0.0, 1.0, 3.0];
        let values = [1.0, 3.0, 7.0];
        assert_relative_eq!(interpolate_clamped(&coords, &values, 0.5), 2.0);
        assert_relative_eq!(interpolate_clamped(&coords, &values, 2.0), 5.0);
        assert_relative_eq!(interpolate_clamped(&coords, &values, -4.0), 1.0);
        assert_relative_eq!(interpolate_clamped(&coords, &values, 10.0), 7.0);
        for (&c, &v) in coords.iter().zip(values.iter()) {
            assert_relative_eq!(interpolate_clamped(&coords, &values, c), v);
        }
    }

    #[test]
    fn extrapolated_interpolation_works() {
        let coords = [0.0, 1.0, 2.0];
        let values = [0.0, 2.0, 4.0];
        assert_relative_eq!(interpolate_extrapolated(&coords, &values, 3.0), 6.0);
        assert_relative_eq!(interpolate_extrapolated(&coords, &values, -1.0), -2.0);
    }

    #[test]
    fn trapezoidal_integration_is_exact_for_lines() {
        let coords = [0.0, 0.5, 2.0, 3.0];
        let values: Vec<_> = coords.iter().map(|x| 2.0 * x + 1.0).collect();
        assert_relative_eq!(integrate_trapezoidal(&coords, &values), 12.0, epsilon = 1e-12);
    }

    #[test]
    fn exponential_integral_matches_reference_values() {
        assert_relative_eq!(exponential_integral_e1(0.1), 1.822_923_958, max_relative = 1e-6);
        assert_relative_eq!(exponential_integral_e1(1.0), 0.219_383_934, max_relative = 1e-6);
        assert_relative_eq!(exponential_integral_e1(-1.0), 0.219_383_934, max_relative = 1e-6);
        assert_relative_eq!(exponential_integral_e1(2.0), 0.048_900_511, max_relative = 1e-4);
        assert!(exponential_integral_e1(10.0) < 1e-5);
    }

    #[test]
    fn second_exponential_integral_is_consistent() {
        assert_relative_eq!(exponential_integral_e2(0.0), 1.0);
        assert_relative_eq!(exponential_integral_e2(1.0), 0.148_495_506, max_relative = 1e-6);
    }

    #[test]
    fn closest_index_works() {
        assert_eq!(closest_index(&[0.1, 0.5, 1.2, 3.0], 1.0), 2);
    }
}
