//! Two-parameter logistic growth model.
//!
//! `f(day) = 1 / (1 + ((1/x0) - 1) * exp(-r * day))`
//!
//! Parameterization notes:
//! - `x0` is the fraction at day 0 (`f(0) = x0` exactly), so it is
//!   probability-like and must stay in `(0, 1)`.
//! - `r` is the daily growth rate of the marker's odds; `r = 0` is a flat
//!   curve and `r > 0` is monotone non-decreasing in `day`.
//! - For large `r * day` the exponential underflows to 0 and the curve
//!   saturates cleanly at 1; no special-casing needed.

/// Predict the marker fraction on `day`.
pub fn predict(day: f64, x0: f64, r: f64) -> f64 {
    let a = 1.0 / x0 - 1.0;
    1.0 / (1.0 + a * (-r * day).exp())
}

/// Partial derivatives `(df/dx0, df/dr)` at `day`.
///
/// With `A = 1/x0 - 1`, `E = exp(-r * day)` and `D = 1 + A*E`:
///
/// - `df/dx0 = E / (x0^2 * D^2)`
/// - `df/dr  = A * day * E / D^2`
pub fn partials(day: f64, x0: f64, r: f64) -> (f64, f64) {
    let e = (-r * day).exp();
    let a = 1.0 / x0 - 1.0;
    let d = 1.0 + a * e;
    let d2 = d * d;
    (e / (x0 * x0 * d2), a * day * e / d2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_at_day_zero_reproduces_x0() {
        for &x0 in &[1e-4, 0.001, 0.05, 0.5, 0.9] {
            for &r in &[0.0, 0.01, 0.1, 1.0] {
                let f0 = predict(0.0, x0, r);
                assert!((f0 - x0).abs() < 1e-12, "f(0)={f0} for x0={x0}, r={r}");
            }
        }
    }

    #[test]
    fn predict_is_monotone_for_positive_rate() {
        let (x0, r) = (0.01, 0.08);
        let mut prev = predict(0.0, x0, r);
        for day in 1..400 {
            let y = predict(day as f64, x0, r);
            assert!(y >= prev, "not monotone at day {day}");
            prev = y;
        }
    }

    #[test]
    fn predict_is_flat_for_zero_rate() {
        for day in 0..50 {
            let y = predict(day as f64, 0.3, 0.0);
            assert!((y - 0.3).abs() < 1e-12);
        }
    }

    #[test]
    fn predict_saturates_at_one() {
        let y = predict(10_000.0, 0.001, 0.1);
        assert!((y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn partials_match_finite_differences() {
        let (x0, r) = (0.02, 0.09);
        let h = 1e-7;
        for &day in &[0.0, 1.0, 5.0, 30.0, 120.0] {
            let (dx0, dr) = partials(day, x0, r);
            let fd_x0 = (predict(day, x0 + h, r) - predict(day, x0 - h, r)) / (2.0 * h);
            let fd_r = (predict(day, x0, r + h) - predict(day, x0, r - h)) / (2.0 * h);
            assert!((dx0 - fd_x0).abs() < 1e-4, "df/dx0 at day {day}: {dx0} vs {fd_x0}");
            assert!((dr - fd_r).abs() < 1e-4, "df/dr at day {day}: {dr} vs {fd_r}");
        }
    }
}
