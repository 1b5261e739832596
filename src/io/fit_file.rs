//! Read/write fit JSON files.
//!
//! Fit JSON is the "portable" representation of a run:
//! - fitted parameters + standard errors + quality
//! - headline summary estimates
//! - the projected grid for quick plotting
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{EstimateConfig, FitFile, FitResult, Projection, SummaryEstimate};
use crate::error::EstimateError;

/// Assemble the portable fit record for a completed run.
pub fn build_fit_file(
    fit: &FitResult,
    summary: &SummaryEstimate,
    projection: &Projection,
    config: &EstimateConfig,
) -> FitFile {
    FitFile {
        tool: "sgtf".to_string(),
        start_date: projection.start_date,
        serial_interval: config.serial_interval,
        fit: fit.clone(),
        summary: summary.clone(),
        projection: projection.clone(),
    }
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, fit_file: &FitFile) -> Result<(), EstimateError> {
    let file = File::create(path).map_err(|e| {
        EstimateError::Io(format!("failed to create fit JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, fit_file)
        .map_err(|e| EstimateError::Io(format!("failed to write fit JSON: {e}")))?;
    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, EstimateError> {
    let file = File::open(path).map_err(|e| {
        EstimateError::Io(format!("failed to open fit JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file)
        .map_err(|e| EstimateError::Io(format!("invalid fit JSON: {e}")))
}
