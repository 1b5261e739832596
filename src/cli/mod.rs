//! Command-line parsing for the SGTF growth estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    DEFAULT_HORIZON, DEFAULT_MAX_ITERS, DEFAULT_POLY_ORDER, DEFAULT_R_INIT,
    DEFAULT_SERIAL_INTERVAL, DEFAULT_WINDOW, DEFAULT_X0_INIT,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sgtf", version, about = "SGTF logistic growth-rate estimator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline, print the report, and write requested exports.
    Estimate(EstimateArgs),
    /// Print the headline estimates only (useful for scripting).
    Summary(EstimateArgs),
}

/// Common options for estimating.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    /// Input CSV with date, marker-positive and total-tested columns.
    pub input: PathBuf,

    /// Savitzky-Golay window length in days (odd).
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Savitzky-Golay polynomial order (must be < window).
    #[arg(long, default_value_t = DEFAULT_POLY_ORDER)]
    pub order: usize,

    /// Projection horizon in days from the series start.
    #[arg(long, default_value_t = DEFAULT_HORIZON)]
    pub horizon: usize,

    /// Initial guess for the logistic x0 parameter (in (0,1)).
    #[arg(long = "x0-init", default_value_t = DEFAULT_X0_INIT)]
    pub x0_init: f64,

    /// Initial guess for the daily growth rate r.
    #[arg(long = "r-init", default_value_t = DEFAULT_R_INIT)]
    pub r_init: f64,

    /// Optimizer iteration budget.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERS)]
    pub max_iters: usize,

    /// Serial interval in days (converts r into a per-generation multiplier).
    #[arg(long, default_value_t = DEFAULT_SERIAL_INTERVAL)]
    pub serial_interval: f64,

    /// Export the raw/smoothed series table to CSV.
    #[arg(long)]
    pub export_series: Option<PathBuf>,

    /// Export the projection table to CSV.
    #[arg(long)]
    pub export_projection: Option<PathBuf>,

    /// Export the summary table to CSV.
    #[arg(long)]
    pub export_summary: Option<PathBuf>,

    /// Export the fit (params + summary + projected grid) to JSON.
    #[arg(long)]
    pub export_fit: Option<PathBuf>,
}
