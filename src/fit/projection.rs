//! Projection of the fitted curve over a fixed horizon.
//!
//! For each day from the series start we evaluate three curves:
//!
//! - central: `f(day; x0, r)`
//! - lower:   `f(day; x0, max(0, r - r_stderr))`
//! - upper:   `f(day; x0, r + r_stderr)`
//!
//! Flooring the lower rate at 0 keeps the lower bound a flat (non-growing)
//! curve instead of a non-monotonic artifact when the stderr exceeds `r`.

use chrono::{Days, NaiveDate};

use crate::domain::{LogisticFit, Projection, ProjectionPoint};
use crate::error::EstimateError;
use crate::models::predict;

/// Evaluate the fitted model over `horizon` days starting at `start_date`.
pub fn project(
    fit: &LogisticFit,
    start_date: NaiveDate,
    horizon: usize,
) -> Result<Projection, EstimateError> {
    let r_lower = (fit.r - fit.r_stderr).max(0.0);
    let r_upper = fit.r + fit.r_stderr;

    let mut points = Vec::with_capacity(horizon);
    for day_index in 0..horizon {
        let date = start_date
            .checked_add_days(Days::new(day_index as u64))
            .ok_or_else(|| {
                EstimateError::MalformedInput("projection date out of range".to_string())
            })?;
        let day = day_index as f64;
        points.push(ProjectionPoint {
            date,
            day_index,
            central_fraction: predict(day, fit.x0, fit.r),
            lower_fraction: predict(day, fit.x0, r_lower),
            upper_fraction: predict(day, fit.x0, r_upper),
        });
    }

    Ok(Projection { start_date, points })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 12, 1).unwrap()
    }

    fn fit(x0: f64, r: f64, r_stderr: f64) -> LogisticFit {
        LogisticFit {
            x0,
            r,
            x0_stderr: 0.0,
            r_stderr,
        }
    }

    #[test]
    fn horizon_length_and_indices() {
        let p = project(&fit(0.01, 0.1, 0.01), start(), 300).unwrap();
        assert_eq!(p.points.len(), 300);
        assert_eq!(p.points[0].day_index, 0);
        assert_eq!(p.points[299].day_index, 299);
        assert_eq!(p.points[0].date, start());
        assert_eq!(
            p.points[299].date,
            start().checked_add_days(Days::new(299)).unwrap()
        );
    }

    #[test]
    fn central_curve_starts_at_x0_and_is_monotone() {
        let p = project(&fit(0.02, 0.08, 0.01), start(), 200).unwrap();
        assert!((p.points[0].central_fraction - 0.02).abs() < 1e-12);
        for w in p.points.windows(2) {
            assert!(w[1].central_fraction >= w[0].central_fraction);
        }
    }

    #[test]
    fn lower_rate_is_floored_at_zero() {
        // stderr larger than r: the lower curve must be flat at x0, never a
        // negative-growth curve.
        let p = project(&fit(0.05, 0.02, 0.1), start(), 50).unwrap();
        for pt in &p.points {
            assert!((pt.lower_fraction - 0.05).abs() < 1e-12);
        }
    }

    #[test]
    fn bounds_bracket_the_central_curve() {
        let p = project(&fit(0.01, 0.07, 0.015), start(), 150).unwrap();
        for pt in &p.points {
            assert!(pt.lower_fraction <= pt.central_fraction + 1e-12);
            assert!(pt.central_fraction <= pt.upper_fraction + 1e-12);
        }
    }

    #[test]
    fn zero_horizon_yields_empty_projection() {
        let p = project(&fit(0.01, 0.1, 0.01), start(), 0).unwrap();
        assert!(p.points.is_empty());
    }
}
