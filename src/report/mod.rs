//! Derived headline estimates and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{FitResult, Projection, ProjectionPoint, SummaryEstimate};

/// Derive the summary estimates from a fit and its projection.
///
/// A crossing date is the earliest projected day whose fraction reaches 0.5;
/// it is `None` when the curve stays below 0.5 for the whole horizon. That is
/// an expected outcome (e.g. a flat series below 50%), not an error.
pub fn summarize(fit: &FitResult, projection: &Projection, serial_interval: f64) -> SummaryEstimate {
    let r = fit.model.r;
    let r_stderr = fit.model.r_stderr;

    SummaryEstimate {
        crossing_date_central: crossing_date(&projection.points, |p| p.central_fraction),
        crossing_date_lower: crossing_date(&projection.points, |p| p.lower_fraction),
        crossing_date_upper: crossing_date(&projection.points, |p| p.upper_fraction),
        growth_rate: r,
        growth_rate_lower: r - r_stderr,
        growth_rate_upper: r + r_stderr,
        doubling_time: std::f64::consts::LN_2 / r,
        transmission_increase_factor: serial_interval * r,
    }
}

fn crossing_date(
    points: &[ProjectionPoint],
    fraction: impl Fn(&ProjectionPoint) -> f64,
) -> Option<chrono::NaiveDate> {
    points.iter().find(|p| fraction(p) >= 0.5).map(|p| p.date)
}
