//! Shared "estimate pipeline" logic used by both CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! ingest -> smooth -> fit -> project -> summarize
//!
//! The subcommands can then focus on presentation (full report vs summary).

use crate::domain::{
    EstimateConfig, FitResult, Projection, Series, SmoothedSeries, SummaryEstimate,
};
use crate::error::EstimateError;
use crate::fit::{FitOptions, fit_logistic, project};
use crate::io::ingest::load_series;
use crate::math::smooth;
use crate::report::summarize;

/// All computed outputs of a single `sgtf estimate` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub series: Series,
    pub smoothed: SmoothedSeries,
    pub fit: FitResult,
    pub projection: Projection,
    pub summary: SummaryEstimate,
}

/// Execute the full estimate pipeline and return the computed outputs.
pub fn run_estimate(config: &EstimateConfig) -> Result<RunOutput, EstimateError> {
    let series = load_series(&config.csv_path)?;
    run_estimate_with_series(config, series)
}

/// Execute the pipeline on an already-loaded series.
///
/// This is the entry point for callers that obtain their series elsewhere
/// (tests, or an upstream data-retrieval step).
pub fn run_estimate_with_series(
    config: &EstimateConfig,
    series: Series,
) -> Result<RunOutput, EstimateError> {
    let smoothed = SmoothedSeries {
        fractions: smooth(&series.observed_fractions(), config.window, config.poly_order)?,
    };

    let fit = fit_logistic(
        &series.day_indices(),
        &smoothed.fractions,
        &FitOptions {
            x0_init: config.x0_init,
            r_init: config.r_init,
            max_iters: config.max_iters,
        },
    )?;

    let projection = project(&fit.model, series.start_date(), config.horizon)?;
    let summary = summarize(&fit, &projection, config.serial_interval);

    Ok(RunOutput {
        series,
        smoothed,
        fit,
        projection,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn config() -> EstimateConfig {
        EstimateConfig {
            csv_path: "tests.csv".into(),
            window: 5,
            poly_order: 2,
            horizon: 300,
            x0_init: 0.001,
            r_init: 0.008,
            max_iters: 100,
            serial_interval: 5.5,
            export_series: None,
            export_projection: None,
            export_summary: None,
            export_fit: None,
        }
    }

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 12, 1).unwrap()
    }

    #[test]
    fn rising_scenario_produces_growing_projection_and_finite_doubling_time() {
        // 10 days, 100 tests/day, marker positives 1,1,2,3,5,8,12,18,25,33.
        let counts: Vec<(u64, u64)> = [1u64, 1, 2, 3, 5, 8, 12, 18, 25, 33]
            .iter()
            .map(|&c| (c, 100u64))
            .collect();
        let series = Series::from_daily_counts(start(), &counts).unwrap();
        let run = run_estimate_with_series(&config(), series).unwrap();

        assert!(run.fit.model.r > 0.0);
        assert!(run.summary.doubling_time.is_finite());
        assert_eq!(run.projection.points.len(), 300);
        for w in run.projection.points.windows(2) {
            assert!(w[1].central_fraction >= w[0].central_fraction);
        }
        assert!(run.summary.crossing_date_central.is_some());
    }

    #[test]
    fn flat_series_below_half_never_crosses() {
        // Constant 20% positivity: r ≈ 0 and no 50% crossing.
        let counts: Vec<(u64, u64)> = std::iter::repeat((20u64, 100u64)).take(14).collect();
        let series = Series::from_daily_counts(start(), &counts).unwrap();
        let run = run_estimate_with_series(&config(), series).unwrap();

        assert!(run.fit.model.r.abs() < 1e-3);
        assert!(run.summary.crossing_date_central.is_none());
    }

    #[test]
    fn pipeline_is_idempotent_on_identical_input() {
        let counts: Vec<(u64, u64)> = [2u64, 3, 4, 6, 9, 13, 19, 27]
            .iter()
            .map(|&c| (c, 200u64))
            .collect();
        let series = Series::from_daily_counts(start(), &counts).unwrap();
        let a = run_estimate_with_series(&config(), series.clone()).unwrap();
        let b = run_estimate_with_series(&config(), series).unwrap();

        assert_eq!(a.fit.model.x0.to_bits(), b.fit.model.x0.to_bits());
        assert_eq!(a.fit.model.r.to_bits(), b.fit.model.r.to_bits());
        assert_eq!(a.summary.crossing_date_central, b.summary.crossing_date_central);
    }

    #[test]
    fn smoothed_series_keeps_the_input_length() {
        let counts: Vec<(u64, u64)> = (0..9).map(|i| (i + 1, 100u64)).collect();
        let series = Series::from_daily_counts(start(), &counts).unwrap();
        let run = run_estimate_with_series(&config(), series).unwrap();
        assert_eq!(run.smoothed.fractions.len(), run.series.len());
    }

    #[test]
    fn window_longer_than_series_fails_with_invalid_window() {
        let series = Series::from_daily_counts(start(), &[(1, 100), (2, 100), (3, 100)]).unwrap();
        let err = run_estimate_with_series(&config(), series).unwrap_err();
        assert!(matches!(err, EstimateError::InvalidWindow(_)));
    }
}
