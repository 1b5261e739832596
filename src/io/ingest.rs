//! CSV ingest and validation.
//!
//! This module turns a daily SGTF report CSV into a validated `Series` that is
//! safe to smooth and fit.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Row-level validation** with 1-based CSV line numbers in every message
//! - **Deterministic behavior**: rows are sorted by date, and the result must
//!   be contiguous — the loader verifies the one-row-per-day assumption
//!   instead of silently using row position as the day index
//! - **Separation of concerns**: no smoothing or fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;

use crate::domain::{Observation, Series};
use crate::error::EstimateError;

/// Accepted header names for the date column, in priority order.
const DATE_ALIASES: [&str; 2] = ["date", "collection date"];
/// Accepted header names for the marker-positive count column.
const POSITIVE_ALIASES: [&str; 3] = ["sgtf_likely", "marker_positive", "positive"];
/// Accepted header names for the total-tested count column.
const TOTAL_ALIASES: [&str; 3] = ["total_positive", "total_tested", "total"];

/// Load and validate a series from a CSV file.
pub fn load_series(path: &Path) -> Result<Series, EstimateError> {
    let file = File::open(path).map_err(|e| {
        EstimateError::Io(format!("failed to open CSV '{}': {e}", path.display()))
    })?;
    read_series(file)
}

/// Load and validate a series from any reader (used directly by tests).
pub fn read_series<R: Read>(reader: R) -> Result<Series, EstimateError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| EstimateError::MalformedInput(format!("failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let date_idx = resolve_column(&header_map, &DATE_ALIASES)?;
    let positive_idx = resolve_column(&header_map, &POSITIVE_ALIASES)?;
    let total_idx = resolve_column(&header_map, &TOTAL_ALIASES)?;

    let mut rows: Vec<(NaiveDate, u64, u64)> = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header row, and CSV lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| {
            EstimateError::MalformedInput(format!("line {line}: CSV parse error: {e}"))
        })?;

        let date = parse_date(get_field(&record, date_idx, "date", line)?)
            .map_err(|e| EstimateError::MalformedInput(format!("line {line}: {e}")))?;
        let positive = parse_count(get_field(&record, positive_idx, "marker-positive", line)?)
            .map_err(|e| EstimateError::MalformedInput(format!("line {line}: {e}")))?;
        let total = parse_count(get_field(&record, total_idx, "total-tested", line)?)
            .map_err(|e| EstimateError::MalformedInput(format!("line {line}: {e}")))?;

        if total == 0 {
            return Err(EstimateError::MalformedInput(format!(
                "line {line}: total tested count is zero on {date}"
            )));
        }
        if positive > total {
            return Err(EstimateError::MalformedInput(format!(
                "line {line}: marker-positive {positive} exceeds total tested {total} on {date}"
            )));
        }

        rows.push((date, positive, total));
    }

    rows.sort_by_key(|&(date, _, _)| date);
    for pair in rows.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(EstimateError::MalformedInput(format!(
                "duplicate date {} in input",
                pair[0].0
            )));
        }
    }

    let observations = rows
        .into_iter()
        .enumerate()
        .map(|(day_index, (date, marker_positive, total_tested))| Observation {
            date,
            day_index,
            marker_positive,
            total_tested,
        })
        .collect();

    // Series::new re-checks contiguity; a gap between sorted dates surfaces
    // here as a malformed-input error.
    Series::new(observations)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn resolve_column(
    header_map: &HashMap<String, usize>,
    aliases: &[&str],
) -> Result<usize, EstimateError> {
    aliases
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| {
            EstimateError::MalformedInput(format!(
                "missing required column (one of: {})",
                aliases.join(", ")
            ))
        })
}

fn get_field<'a>(
    record: &'a StringRecord,
    idx: usize,
    name: &str,
    line: usize,
) -> Result<&'a str, EstimateError> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            EstimateError::MalformedInput(format!("line {line}: missing `{name}` value"))
        })
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are the recommended format, but public surveillance exports
    // also show up with slashes or US ordering. Formats are tried in a fixed
    // order to keep parsing deterministic.
    const FMTS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "invalid date '{s}' (expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY)"
    ))
}

fn parse_count(s: &str) -> Result<u64, String> {
    s.parse::<u64>()
        .map_err(|_| format!("invalid count '{s}' (expected a non-negative integer)"))
}
