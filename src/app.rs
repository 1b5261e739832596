//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs the estimate pipeline
//! - prints the report
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, EstimateArgs};
use crate::domain::EstimateConfig;
use crate::error::EstimateError;

pub mod pipeline;

/// Entry point for the `sgtf` binary.
pub fn run() -> Result<(), EstimateError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Estimate(args) => handle_estimate(args, OutputMode::Full),
        Command::Summary(args) => handle_estimate(args, OutputMode::SummaryOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    SummaryOnly,
}

fn handle_estimate(args: EstimateArgs, mode: OutputMode) -> Result<(), EstimateError> {
    let config = estimate_config_from_args(&args);
    let run = pipeline::run_estimate(&config)?;

    match mode {
        OutputMode::Full => {
            println!(
                "{}",
                crate::report::format_run_summary(&run.series, &run.fit, &run.summary, &config)
            );
        }
        OutputMode::SummaryOnly => {
            println!("{}", crate::report::format_summary(&run.summary));
        }
    }

    if let Some(path) = &config.export_series {
        crate::io::export::write_series_csv(path, &run.series, &run.smoothed)?;
    }
    if let Some(path) = &config.export_projection {
        crate::io::export::write_projection_csv(path, &run.projection)?;
    }
    if let Some(path) = &config.export_summary {
        crate::io::export::write_summary_csv(path, &run.summary)?;
    }
    if let Some(path) = &config.export_fit {
        let record =
            crate::io::fit_file::build_fit_file(&run.fit, &run.summary, &run.projection, &config);
        crate::io::fit_file::write_fit_json(path, &record)?;
    }

    Ok(())
}

pub fn estimate_config_from_args(args: &EstimateArgs) -> EstimateConfig {
    EstimateConfig {
        csv_path: args.input.clone(),
        window: args.window,
        poly_order: args.order,
        horizon: args.horizon,
        x0_init: args.x0_init,
        r_init: args.r_init,
        max_iters: args.max_iters,
        serial_interval: args.serial_interval,
        export_series: args.export_series.clone(),
        export_projection: args.export_projection.clone(),
        export_summary: args.export_summary.clone(),
        export_fit: args.export_fit.clone(),
    }
}
