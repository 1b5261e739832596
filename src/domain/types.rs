//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during smoothing/fitting
//! - exported to CSV/JSON
//! - reloaded later for plotting or comparisons
//!
//! All records are immutable value types: each pipeline stage produces one and
//! the next stage consumes it read-only.

use std::path::PathBuf;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::EstimateError;

/// Default Savitzky-Golay window length (days). Must stay odd.
pub const DEFAULT_WINDOW: usize = 5;
/// Default Savitzky-Golay polynomial order.
pub const DEFAULT_POLY_ORDER: usize = 2;
/// Default projection horizon in days, counted from the series start.
pub const DEFAULT_HORIZON: usize = 300;
/// Default initial guess for the logistic `x0` parameter.
pub const DEFAULT_X0_INIT: f64 = 0.001;
/// Default initial guess for the daily growth rate `r`.
pub const DEFAULT_R_INIT: f64 = 0.008;
/// Default optimizer iteration budget.
pub const DEFAULT_MAX_ITERS: usize = 100;
/// Mean time (days) between successive infections in a transmission chain.
///
/// External epidemiological parameter; converts a daily growth rate into a
/// per-generation transmission-advantage multiplier.
pub const DEFAULT_SERIAL_INTERVAL: f64 = 5.5;

/// A single day's SGTF report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    /// 0-based offset from the series start date.
    pub day_index: usize,
    /// Samples flagged as likely S-gene target failures.
    pub marker_positive: u64,
    /// Total samples tested that day. Always > 0.
    pub total_tested: u64,
}

impl Observation {
    /// Daily SGTF fraction, in `[0, 1]`.
    pub fn observed_fraction(&self) -> f64 {
        self.marker_positive as f64 / self.total_tested as f64
    }
}

/// A contiguous, date-ordered sequence of daily observations.
///
/// Invariants (enforced by the constructors, assumed everywhere else):
/// - at least one observation
/// - exactly one observation per calendar day, ascending, no gaps
/// - `day_index` equals the offset from the first date
/// - `0 < total_tested` and `marker_positive <= total_tested` per day
#[derive(Debug, Clone)]
pub struct Series {
    observations: Vec<Observation>,
}

impl Series {
    /// Build a series from pre-sorted observations, validating the invariants.
    pub fn new(observations: Vec<Observation>) -> Result<Self, EstimateError> {
        let Some(first) = observations.first() else {
            return Err(EstimateError::MalformedInput(
                "series contains no observations".to_string(),
            ));
        };
        let start = first.date;

        for (i, obs) in observations.iter().enumerate() {
            if obs.total_tested == 0 {
                return Err(EstimateError::MalformedInput(format!(
                    "zero total_tested on {}",
                    obs.date
                )));
            }
            if obs.marker_positive > obs.total_tested {
                return Err(EstimateError::MalformedInput(format!(
                    "marker_positive {} exceeds total_tested {} on {}",
                    obs.marker_positive, obs.total_tested, obs.date
                )));
            }
            let expected = start
                .checked_add_days(Days::new(i as u64))
                .ok_or_else(|| {
                    EstimateError::MalformedInput("series date out of range".to_string())
                })?;
            if obs.date != expected {
                return Err(EstimateError::MalformedInput(format!(
                    "series is not contiguous: expected {} at position {i}, got {}",
                    expected, obs.date
                )));
            }
            if obs.day_index != i {
                return Err(EstimateError::MalformedInput(format!(
                    "day_index {} does not match position {i}",
                    obs.day_index
                )));
            }
        }

        Ok(Self { observations })
    }

    /// Build a contiguous series starting at `start` from daily
    /// `(marker_positive, total_tested)` counts.
    pub fn from_daily_counts(
        start: NaiveDate,
        counts: &[(u64, u64)],
    ) -> Result<Self, EstimateError> {
        let observations = counts
            .iter()
            .enumerate()
            .map(|(i, &(marker_positive, total_tested))| {
                let date = start.checked_add_days(Days::new(i as u64)).ok_or_else(|| {
                    EstimateError::MalformedInput("series date out of range".to_string())
                })?;
                Ok(Observation {
                    date,
                    day_index: i,
                    marker_positive,
                    total_tested,
                })
            })
            .collect::<Result<Vec<_>, EstimateError>>()?;
        Self::new(observations)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.observations[0].date
    }

    /// Raw daily fractions, one per observation.
    pub fn observed_fractions(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(Observation::observed_fraction)
            .collect()
    }

    /// Day indices as floats, ready for the fit design.
    pub fn day_indices(&self) -> Vec<f64> {
        (0..self.observations.len()).map(|i| i as f64).collect()
    }
}

/// The smoothed daily fraction, same length as the series it was built from.
#[derive(Debug, Clone)]
pub struct SmoothedSeries {
    pub fractions: Vec<f64>,
}

/// Fitted logistic growth parameters with standard errors.
///
/// The model is `f(day) = 1 / (1 + ((1/x0) - 1) * exp(-r * day))`, so
/// `f(0) = x0` and `r` is the daily growth rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LogisticFit {
    pub x0: f64,
    pub r: f64,
    pub x0_stderr: f64,
    pub r_stderr: f64,
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
    /// Levenberg-Marquardt iterations actually used.
    pub iterations: usize,
}

/// Fit output: parameters + quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitResult {
    pub model: LogisticFit,
    pub quality: FitQuality,
}

/// One projected day: the fitted curve and its ± one-stderr bounds on `r`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub day_index: usize,
    pub central_fraction: f64,
    pub lower_fraction: f64,
    pub upper_fraction: f64,
}

/// The full projected horizon, anchored at the series start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    pub start_date: NaiveDate,
    pub points: Vec<ProjectionPoint>,
}

/// Derived headline numbers for the run.
///
/// Crossing dates are `None` when the corresponding curve never reaches 50%
/// within the projection horizon; callers must handle the absent case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryEstimate {
    pub crossing_date_central: Option<NaiveDate>,
    pub crossing_date_lower: Option<NaiveDate>,
    pub crossing_date_upper: Option<NaiveDate>,
    pub growth_rate: f64,
    pub growth_rate_lower: f64,
    pub growth_rate_upper: f64,
    /// `ln(2) / r` — days for the marker-positive odds to double.
    pub doubling_time: f64,
    /// `serial_interval * r` — per-generation transmission advantage.
    pub transmission_increase_factor: f64,
}

/// A saved fit file (JSON).
///
/// The portable representation of a run: fitted parameters, headline
/// estimates, and the projected grid, reloadable for plotting or comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub start_date: NaiveDate,
    pub serial_interval: f64,
    pub fit: FitResult,
    pub summary: SummaryEstimate,
    pub projection: Projection,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct EstimateConfig {
    pub csv_path: PathBuf,

    pub window: usize,
    pub poly_order: usize,

    pub horizon: usize,
    pub x0_init: f64,
    pub r_init: f64,
    pub max_iters: usize,
    pub serial_interval: f64,

    pub export_series: Option<PathBuf>,
    pub export_projection: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
    pub export_fit: Option<PathBuf>,
}
