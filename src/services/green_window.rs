//! Best-window selection and the persisted classification artifacts.
//!
//! The "best window" is the longest contiguous run of green hours in the
//! classified forecast. When the day has no green hours at all, the three
//! cleanest dirty hours stand in, ranked by carbon intensity.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{HourlyForecastRecord, WindowType};
use crate::sources::{ArtifactStore, SourceResult, CLASSIFICATION_FILE, GREEN_WINDOW_FILE};

/// Number of fallback hours offered when no green run exists.
pub const FALLBACK_HOURS: usize = 3;

/// The selected best window with its classification rows.
#[derive(Debug, Clone)]
pub struct BestWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub avg_carbon_intensity: f64,
    pub length_hours: usize,
    pub window_type: WindowType,
    pub rows: Vec<HourlyForecastRecord>,
}

/// Select the best window from classified records.
///
/// Adjacency is positional: hours next to each other in the record set
/// count as contiguous. Ties between equally long green runs resolve to
/// the earliest; the dirty fallback ranks by ascending carbon intensity
/// with ties keeping original order. Returns `None` only for an empty
/// record set.
pub fn select_best_window(records: &[HourlyForecastRecord]) -> Option<BestWindow> {
    if records.is_empty() {
        return None;
    }

    let (indices, window_type) = match longest_green_run(records) {
        Some(run) => (run, WindowType::GreenWindow),
        None => (cleanest_dirty_hours(records), WindowType::DirtyWindow),
    };

    let rows: Vec<HourlyForecastRecord> = indices.iter().map(|&i| records[i].clone()).collect();
    let avg_carbon_intensity =
        rows.iter().map(|r| r.carbon_intensity).sum::<f64>() / rows.len() as f64;

    Some(BestWindow {
        start: rows[0].ds,
        end: rows[rows.len() - 1].ds,
        avg_carbon_intensity,
        length_hours: rows.len(),
        window_type,
        rows,
    })
}

/// Indices of the longest run of consecutive green positions, earliest on
/// ties; `None` when no hour is green.
fn longest_green_run(records: &[HourlyForecastRecord]) -> Option<Vec<usize>> {
    let mut best: Option<(usize, usize)> = None; // (start, len)
    let mut current: Option<(usize, usize)> = None;

    for (i, record) in records.iter().enumerate() {
        if record.is_green() {
            current = match current {
                Some((start, len)) => Some((start, len + 1)),
                None => Some((i, 1)),
            };
            if let Some((start, len)) = current {
                // Strictly greater keeps the earliest run on ties.
                if best.map_or(true, |(_, best_len)| len > best_len) {
                    best = Some((start, len));
                }
            }
        } else {
            current = None;
        }
    }

    best.map(|(start, len)| (start..start + len).collect())
}

/// Indices of the [`FALLBACK_HOURS`] lowest-carbon hours, reordered
/// chronologically for the artifact rows.
fn cleanest_dirty_hours(records: &[HourlyForecastRecord]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    indices.sort_by(|&a, &b| {
        records[a]
            .carbon_intensity
            .total_cmp(&records[b].carbon_intensity)
    });
    indices.truncate(FALLBACK_HOURS);
    indices.sort_unstable();
    indices
}

// =========================================================
// Persisted artifact shapes
// =========================================================

/// One hour inside a persisted artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactRow {
    pub ds: NaiveDateTime,
    pub forecast_load_mw: f64,
    pub renewable_baseload_mw: f64,
    pub fossil_fuel_mw: f64,
    pub carbon_intensity_gco2_per_kwh: f64,
    pub window_type: WindowType,
}

impl From<&HourlyForecastRecord> for ArtifactRow {
    fn from(record: &HourlyForecastRecord) -> Self {
        Self {
            ds: record.ds,
            forecast_load_mw: record.forecast_load_mw,
            renewable_baseload_mw: record.renewable_baseload_mw,
            fossil_fuel_mw: record.fossil_fuel_mw,
            carbon_intensity_gco2_per_kwh: record.carbon_intensity,
            window_type: record.window_type_or_dirty(),
        }
    }
}

/// Persisted best-window artifact (`aura_green_window.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenWindowArtifact {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub avg_carbon_intensity_gco2_per_kwh: f64,
    pub length_hours: usize,
    pub baseline_threshold: f64,
    pub window_type: WindowType,
    pub rows: Vec<ArtifactRow>,
}

/// Forecast period summary shared by the classification artifact and the
/// prediction responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub baseline_threshold: f64,
    pub current_month: u32,
}

/// One hour inside the complete classification artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyClassification {
    pub timestamp: NaiveDateTime,
    pub hour: u32,
    pub forecast_load_mw: f64,
    pub renewable_baseload_mw: f64,
    pub fossil_fuel_mw: f64,
    pub carbon_intensity_gco2_per_kwh: f64,
    pub window_type: WindowType,
}

/// Persisted complete classification artifact
/// (`complete_window_classification.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteClassification {
    pub forecast_period: ForecastPeriod,
    pub hourly_classifications: Vec<HourlyClassification>,
}

/// Build the best-window artifact.
pub fn build_green_window_artifact(best: &BestWindow, baseline_threshold: f64) -> GreenWindowArtifact {
    GreenWindowArtifact {
        start: best.start,
        end: best.end,
        avg_carbon_intensity_gco2_per_kwh: best.avg_carbon_intensity,
        length_hours: best.length_hours,
        baseline_threshold,
        window_type: best.window_type,
        rows: best.rows.iter().map(ArtifactRow::from).collect(),
    }
}

/// Build the complete classification artifact over all 24 hours.
pub fn build_complete_classification(
    records: &[HourlyForecastRecord],
    baseline_threshold: f64,
    current_month: u32,
) -> CompleteClassification {
    let hourly_classifications = records
        .iter()
        .map(|r| HourlyClassification {
            timestamp: r.ds,
            hour: r.hour,
            forecast_load_mw: r.forecast_load_mw,
            renewable_baseload_mw: r.renewable_baseload_mw,
            fossil_fuel_mw: r.fossil_fuel_mw,
            carbon_intensity_gco2_per_kwh: r.carbon_intensity,
            window_type: r.window_type_or_dirty(),
        })
        .collect();

    CompleteClassification {
        forecast_period: ForecastPeriod {
            start: records[0].ds,
            end: records[records.len() - 1].ds,
            baseline_threshold,
            current_month,
        },
        hourly_classifications,
    }
}

/// Compute both artifacts from classified records and persist them.
pub fn compute_and_persist(
    records: &[HourlyForecastRecord],
    baseline_threshold: f64,
    current_month: u32,
    store: &ArtifactStore,
) -> SourceResult<(GreenWindowArtifact, CompleteClassification)> {
    let best = select_best_window(records).ok_or_else(|| {
        crate::sources::SourceError::configuration("cannot select a window from empty records")
    })?;

    let green_window = build_green_window_artifact(&best, baseline_threshold);
    let classification = build_complete_classification(records, baseline_threshold, current_month);

    store.write_json(GREEN_WINDOW_FILE, &green_window)?;
    store.write_json(CLASSIFICATION_FILE, &classification)?;

    Ok((green_window, classification))
}

#[cfg(test)]
#[path = "green_window_tests.rs"]
mod green_window_tests;
