//! Export the three result tables to CSV.
//!
//! The tables mirror the public dashboard's flat files:
//!
//! 1. series: raw counts + observed/smoothed fractions per day
//! 2. projection: central/lower/upper fitted fractions per projected day
//! 3. summary: the `date` and `growth_rate` rows with bounds and derived
//!    columns (derived columns only on the `growth_rate` row)
//!
//! Rendering is split from writing so the formats are testable without
//! touching the filesystem.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::domain::{Projection, Series, SmoothedSeries, SummaryEstimate};
use crate::error::EstimateError;

/// Write the series table.
pub fn write_series_csv(
    path: &Path,
    series: &Series,
    smoothed: &SmoothedSeries,
) -> Result<(), EstimateError> {
    write_file(path, &render_series_csv(series, smoothed))
}

/// Write the projection table.
pub fn write_projection_csv(path: &Path, projection: &Projection) -> Result<(), EstimateError> {
    write_file(path, &render_projection_csv(projection))
}

/// Write the summary table.
pub fn write_summary_csv(path: &Path, summary: &SummaryEstimate) -> Result<(), EstimateError> {
    write_file(path, &render_summary_csv(summary))
}

pub fn render_series_csv(series: &Series, smoothed: &SmoothedSeries) -> String {
    let mut out = String::from(
        "date,marker_positive,total_tested,observed_fraction,smoothed_fraction,day_index\n",
    );
    for (obs, s) in series.observations().iter().zip(smoothed.fractions.iter()) {
        let _ = writeln!(
            out,
            "{},{},{},{:.6},{:.6},{}",
            obs.date,
            obs.marker_positive,
            obs.total_tested,
            obs.observed_fraction(),
            s,
            obs.day_index,
        );
    }
    out
}

pub fn render_projection_csv(projection: &Projection) -> String {
    let mut out = String::from("date,day_index,central_fraction,lower_fraction,upper_fraction\n");
    for p in &projection.points {
        let _ = writeln!(
            out,
            "{},{},{:.6},{:.6},{:.6}",
            p.date, p.day_index, p.central_fraction, p.lower_fraction, p.upper_fraction,
        );
    }
    out
}

pub fn render_summary_csv(summary: &SummaryEstimate) -> String {
    let mut out = String::from("metric,estimate,lower,upper,doubling_time,transmission_increase\n");
    let _ = writeln!(
        out,
        "date,{},{},{},,",
        fmt_opt_date(summary.crossing_date_central),
        fmt_opt_date(summary.crossing_date_lower),
        fmt_opt_date(summary.crossing_date_upper),
    );
    let _ = writeln!(
        out,
        "growth_rate,{},{},{},{},{}",
        fmt_f64(summary.growth_rate),
        fmt_f64(summary.growth_rate_lower),
        fmt_f64(summary.growth_rate_upper),
        fmt_f64(summary.doubling_time),
        fmt_f64(summary.transmission_increase_factor),
    );
    out
}

fn write_file(path: &Path, contents: &str) -> Result<(), EstimateError> {
    fs::write(path, contents)
        .map_err(|e| EstimateError::Io(format!("failed to write '{}': {e}", path.display())))
}

/// Absent crossing dates are exported as empty fields, not sentinel strings.
fn fmt_opt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Non-finite values (e.g. doubling time of a flat fit) export as empty fields.
fn fmt_f64(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.6}")
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(crossing: Option<NaiveDate>) -> SummaryEstimate {
        SummaryEstimate {
            crossing_date_central: crossing,
            crossing_date_lower: None,
            crossing_date_upper: crossing,
            growth_rate: 0.1,
            growth_rate_lower: 0.08,
            growth_rate_upper: 0.12,
            doubling_time: std::f64::consts::LN_2 / 0.1,
            transmission_increase_factor: 0.55,
        }
    }

    #[test]
    fn series_table_has_one_row_per_day() {
        let series = Series::from_daily_counts(
            NaiveDate::from_ymd_opt(2021, 12, 1).unwrap(),
            &[(1, 100), (2, 100), (4, 100)],
        )
        .unwrap();
        let smoothed = SmoothedSeries {
            fractions: vec![0.01, 0.02, 0.04],
        };
        let csv = render_series_csv(&series, &smoothed);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "date,marker_positive,total_tested,observed_fraction,smoothed_fraction,day_index"
        );
        assert_eq!(lines[1], "2021-12-01,1,100,0.010000,0.010000,0");
    }

    #[test]
    fn projection_table_round_trips_the_points() {
        use crate::domain::ProjectionPoint;
        let start = NaiveDate::from_ymd_opt(2021, 12, 1).unwrap();
        let projection = Projection {
            start_date: start,
            points: vec![ProjectionPoint {
                date: start,
                day_index: 0,
                central_fraction: 0.01,
                lower_fraction: 0.005,
                upper_fraction: 0.02,
            }],
        };
        let csv = render_projection_csv(&projection);
        assert!(csv.contains("2021-12-01,0,0.010000,0.005000,0.020000"));
    }

    #[test]
    fn summary_table_puts_derived_columns_on_growth_rate_row_only() {
        let date = NaiveDate::from_ymd_opt(2022, 1, 15).unwrap();
        let csv = render_summary_csv(&summary(Some(date)));
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("date,2022-01-15,,2022-01-15,,"));
        assert!(lines[2].starts_with("growth_rate,0.100000,0.080000,0.120000,6.931472,0.550000"));
    }

    #[test]
    fn missing_crossing_dates_export_as_empty_fields() {
        let csv = render_summary_csv(&summary(None));
        assert!(csv.lines().nth(1).unwrap().starts_with("date,,,,,"));
    }

    #[test]
    fn non_finite_doubling_time_exports_as_empty_field() {
        let mut s = summary(None);
        s.growth_rate = 0.0;
        s.doubling_time = f64::INFINITY;
        let csv = render_summary_csv(&s);
        let row = csv.lines().nth(2).unwrap();
        assert!(row.starts_with("growth_rate,0.000000,"));
        assert!(row.contains(",,"));
    }
}
