//! Savitzky-Golay-style local polynomial smoothing.
//!
//! For each index `i` we fit a polynomial of the configured order to the
//! values in a centered window around `i` (by least squares) and replace the
//! value with the polynomial evaluated at the window center. Interior windows
//! are symmetric; windows near the boundary are truncated rather than padded,
//! so the output always has the same length as the input.
//!
//! Numerical notes:
//! - The local abscissa is the *offset from the center* (`j - i`), which keeps
//!   the Vandermonde columns small and well scaled, and makes the smoothed
//!   value simply the fitted intercept.

use nalgebra::{DMatrix, DVector};

use crate::error::EstimateError;
use crate::math::solve_least_squares;

/// Smooth `values` with a window of `window` points and polynomial `order`.
///
/// Requirements (violations return `InvalidWindow`):
/// - `window` is odd and non-zero
/// - `window <= values.len()`
/// - `order < window`
pub fn smooth(values: &[f64], window: usize, order: usize) -> Result<Vec<f64>, EstimateError> {
    if window == 0 || window % 2 == 0 {
        return Err(EstimateError::InvalidWindow(format!(
            "window length must be odd, got {window}"
        )));
    }
    if window > values.len() {
        return Err(EstimateError::InvalidWindow(format!(
            "window length {window} exceeds series length {}",
            values.len()
        )));
    }
    if order >= window {
        return Err(EstimateError::InvalidWindow(format!(
            "polynomial order {order} must be smaller than window length {window}"
        )));
    }

    let n = values.len();
    let half = window / 2;
    let p = order + 1;

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(half);
        let hi = (i + half).min(n - 1);
        let m = hi - lo + 1;

        // Vandermonde design in the offset `j - i`; column 0 is the constant
        // term, so `beta[0]` is the fitted value at the center.
        let mut x = DMatrix::<f64>::zeros(m, p);
        let mut y = DVector::<f64>::zeros(m);
        for (row, j) in (lo..=hi).enumerate() {
            let dx = j as f64 - i as f64;
            let mut pow = 1.0;
            for col in 0..p {
                x[(row, col)] = pow;
                pow *= dx;
            }
            y[row] = values[j];
        }

        let beta = solve_least_squares(&x, &y).ok_or_else(|| {
            EstimateError::InvalidWindow(format!(
                "local polynomial fit is ill-conditioned at index {i}"
            ))
        })?;
        out.push(beta[0]);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_length_matches_input() {
        let values: Vec<f64> = (0..12).map(|i| (i as f64 * 0.7).sin().abs()).collect();
        let smoothed = smooth(&values, 5, 2).unwrap();
        assert_eq!(smoothed.len(), values.len());
    }

    #[test]
    fn constant_signal_is_unchanged() {
        let values = vec![0.2; 9];
        let smoothed = smooth(&values, 5, 2).unwrap();
        for v in smoothed {
            assert!((v - 0.2).abs() < 1e-12);
        }
    }

    #[test]
    fn quadratic_signal_is_reproduced_exactly() {
        // A quadratic lies inside the order-2 model space, so the filter must
        // reproduce it exactly, including at the truncated edge windows.
        let values: Vec<f64> = (0..10)
            .map(|i| {
                let x = i as f64;
                0.05 + 0.01 * x + 0.002 * x * x
            })
            .collect();
        let smoothed = smooth(&values, 5, 2).unwrap();
        for (s, v) in smoothed.iter().zip(values.iter()) {
            assert!((s - v).abs() < 1e-9, "expected {v}, got {s}");
        }
    }

    #[test]
    fn smoothing_reduces_alternating_noise() {
        // A noisy ramp: smoothing should pull interior points toward the ramp.
        let values: Vec<f64> = (0..15)
            .map(|i| 0.1 * i as f64 + if i % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        let smoothed = smooth(&values, 5, 2).unwrap();
        let raw_dev: f64 = (2..13).map(|i| (values[i] - 0.1 * i as f64).abs()).sum();
        let smooth_dev: f64 = (2..13).map(|i| (smoothed[i] - 0.1 * i as f64).abs()).sum();
        assert!(smooth_dev < raw_dev);
    }

    #[test]
    fn even_window_is_rejected() {
        let err = smooth(&[0.0; 10], 4, 2).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidWindow(_)));
    }

    #[test]
    fn window_longer_than_series_is_rejected() {
        let err = smooth(&[0.0; 3], 5, 2).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidWindow(_)));
    }

    #[test]
    fn order_not_below_window_is_rejected() {
        let err = smooth(&[0.0; 10], 5, 5).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidWindow(_)));
    }

    #[test]
    fn window_equal_to_series_length_is_allowed() {
        let values = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let smoothed = smooth(&values, 5, 2).unwrap();
        assert_eq!(smoothed.len(), 5);
    }
}
