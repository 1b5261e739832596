//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated input series (`Observation`, `Series`)
//! - the smoothed signal (`SmoothedSeries`)
//! - fit outputs (`LogisticFit`, `FitQuality`, `FitResult`)
//! - projection and summary records (`ProjectionPoint`, `SummaryEstimate`)

pub mod types;

pub use types::*;
