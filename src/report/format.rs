//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::domain::{EstimateConfig, FitResult, Series, SummaryEstimate};

/// Format the full run summary (dataset stats + fit diagnostics + estimates).
pub fn format_run_summary(
    series: &Series,
    fit: &FitResult,
    summary: &SummaryEstimate,
    config: &EstimateConfig,
) -> String {
    let mut out = String::new();

    let fractions = series.observed_fractions();
    let f_min = fractions.iter().copied().fold(f64::INFINITY, f64::min);
    let f_max = fractions.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    out.push_str("=== sgtf - SGTF logistic growth estimate ===\n");
    out.push_str(&format!(
        "Series: n={} | {} .. {}\n",
        series.len(),
        series.start_date(),
        series.observations()[series.len() - 1].date,
    ));
    out.push_str(&format!("Observed fraction: [{f_min:.4}, {f_max:.4}]\n"));
    out.push_str(&format!(
        "Smoothing: window={} order={} | Horizon: {} days\n",
        config.window, config.poly_order, config.horizon,
    ));

    out.push_str("\nFit diagnostics:\n");
    out.push_str(&format!(
        "- x0 = {:.6e} (stderr {:.3e})\n",
        fit.model.x0, fit.model.x0_stderr
    ));
    out.push_str(&format!(
        "- r  = {:.6} /day (stderr {:.6})\n",
        fit.model.r, fit.model.r_stderr
    ));
    out.push_str(&format!(
        "- SSE={:.6e} RMSE={:.6e} n={} iters={}\n",
        fit.quality.sse, fit.quality.rmse, fit.quality.n, fit.quality.iterations
    ));

    out.push_str(&format!("\n{}", format_summary(summary)));
    out
}

/// Format the headline estimates only (used by `sgtf summary`).
pub fn format_summary(summary: &SummaryEstimate) -> String {
    let mut out = String::new();
    out.push_str("Estimates:\n");
    out.push_str(&format!(
        "- 50% crossing: {} (lower {}, upper {})\n",
        fmt_opt_date(summary.crossing_date_central),
        fmt_opt_date(summary.crossing_date_lower),
        fmt_opt_date(summary.crossing_date_upper),
    ));
    out.push_str(&format!(
        "- growth rate: {:.6} /day [{:.6}, {:.6}]\n",
        summary.growth_rate, summary.growth_rate_lower, summary.growth_rate_upper,
    ));
    out.push_str(&format!(
        "- doubling time: {} days\n",
        fmt_days(summary.doubling_time)
    ));
    out.push_str(&format!(
        "- transmission increase: {:.3}x per generation\n",
        summary.transmission_increase_factor
    ));
    out
}

fn fmt_opt_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.to_string(),
        None => "n/a (beyond horizon)".to_string(),
    }
}

fn fmt_days(v: f64) -> String {
    if v.is_finite() {
        format!("{v:.1}")
    } else {
        "n/a".to_string()
    }
}
