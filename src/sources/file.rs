//! File-backed data sources.
//!
//! Production backend: the observed load history arrives as a CSV export
//! from the grid operator, the demand model and seasonal baseline as JSON
//! files written by the offline trainers.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::models::{LoadSeries, SeasonalBaselineTable};

use super::config::PathSettings;
use super::error::{SourceError, SourceResult};
use super::model::{DemandModel, SeasonalProfileModel};
use super::{BaselineSource, HistorySource, ModelSource};

/// Timestamp formats accepted in the history CSV. Rows that match none of
/// these are skipped, mirroring the lenient ingest of the trainer.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

/// File-backed implementation of all data source traits.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    history_path: PathBuf,
    model_path: PathBuf,
    baseline_path: PathBuf,
}

impl FileDataSource {
    pub fn new(paths: &PathSettings) -> Self {
        Self {
            history_path: paths.history.clone(),
            model_path: paths.model.clone(),
            baseline_path: paths.baseline.clone(),
        }
    }

    pub fn with_paths(
        history_path: impl Into<PathBuf>,
        model_path: impl Into<PathBuf>,
        baseline_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            history_path: history_path.into(),
            model_path: model_path.into(),
            baseline_path: baseline_path.into(),
        }
    }
}

impl HistorySource for FileDataSource {
    fn load_history(&self) -> SourceResult<LoadSeries> {
        parse_history_csv(&self.history_path)
    }
}

impl ModelSource for FileDataSource {
    fn load_model(&self) -> SourceResult<Box<dyn DemandModel>> {
        if !self.model_path.exists() {
            return Err(SourceError::unavailable(&self.model_path));
        }
        let content = fs::read_to_string(&self.model_path)
            .map_err(|e| SourceError::io(&self.model_path, e))?;
        let model: SeasonalProfileModel = serde_json::from_str(&content)
            .map_err(|e| SourceError::parse(&self.model_path, e))?;
        Ok(Box::new(model))
    }
}

impl BaselineSource for FileDataSource {
    fn load_baseline(&self) -> SourceResult<SeasonalBaselineTable> {
        if !self.baseline_path.exists() {
            return Err(SourceError::unavailable(&self.baseline_path));
        }
        let content = fs::read_to_string(&self.baseline_path)
            .map_err(|e| SourceError::io(&self.baseline_path, e))?;
        serde_json::from_str(&content).map_err(|e| SourceError::parse(&self.baseline_path, e))
    }
}

/// Parse the hourly load CSV into a cleaned [`LoadSeries`].
///
/// Grid operator exports carry banner rows above the real header, so the
/// header row is detected by content within the first few rows: it must
/// name a date/time column and a load/MW column. Unparseable data rows are
/// skipped rather than failing the whole file.
pub fn parse_history_csv(path: &Path) -> SourceResult<LoadSeries> {
    if !path.exists() {
        return Err(SourceError::unavailable(path));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SourceError::io(path, e))?;

    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .map_err(|e| SourceError::parse(path, e))?;

    let header_idx = detect_header(&rows).ok_or_else(|| {
        SourceError::parse(path, "could not detect date/load columns in the first rows")
    })?;

    let header = &rows[header_idx];
    let date_col = find_column(header, &["date", "time"]);
    let load_col = find_column(header, &["load", "mw"]);
    let (date_col, load_col) = match (date_col, load_col) {
        (Some(d), Some(l)) => (d, l),
        _ => return Err(SourceError::parse(path, "could not detect date/load columns")),
    };

    let mut raw = Vec::new();
    for row in rows.iter().skip(header_idx + 1) {
        let (Some(ds_field), Some(load_field)) = (row.get(date_col), row.get(load_col)) else {
            continue;
        };
        let Some(ds) = parse_timestamp(ds_field.trim()) else {
            continue;
        };
        let Ok(load) = load_field.trim().parse::<f64>() else {
            continue;
        };
        raw.push((ds, load));
    }

    let series = LoadSeries::from_raw(raw);
    if series.is_empty() {
        return Err(SourceError::parse(path, "history file contains no usable rows"));
    }
    Ok(series)
}

/// Locate the header row among the first five rows of the file.
fn detect_header(rows: &[csv::StringRecord]) -> Option<usize> {
    rows.iter().take(5).position(|row| {
        let has_date = find_column(row, &["date", "time"]).is_some();
        let has_load = find_column(row, &["load", "mw"]).is_some();
        has_date && has_load
    })
}

/// Find the first column whose normalized name contains any needle.
fn find_column(header: &csv::StringRecord, needles: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        let name = cell.trim().to_lowercase();
        needles.iter().any(|needle| name.contains(needle))
    })
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}
