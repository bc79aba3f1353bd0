//! Range-constrained window optimization.
//!
//! Filters the classified forecast to a caller-supplied time-of-day range
//! (overnight ranges wrap past midnight), then picks the cleanest green
//! hours up to the requested count. A range with no green supply falls
//! back to the least-carbon hours of the filtered set regardless of label;
//! this range-local fallback is distinct from the whole-forecast fallback
//! in the best-window selector.

use serde::{Deserialize, Serialize};

use crate::models::HourlyForecastRecord;

use super::savings::AppliancePowerTable;

/// Reason attached to the range-local fallback.
pub const RANGE_FALLBACK_REASON: &str = "No green windows found in the specified time range";

/// Reason attached to the whole-day fallback.
pub const DAY_FALLBACK_REASON: &str = "No green windows found for today";

/// Number of fallback windows offered by the unfiltered day query.
pub const DAY_FALLBACK_WINDOWS: usize = 3;

/// Optimizer defaults, injected rather than global.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Appliances assumed when the request names none.
    pub default_appliances: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            default_appliances: vec!["washer".to_string(), "dryer".to_string()],
        }
    }
}

/// A validated range query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeQuery {
    /// Range start, minutes since midnight
    pub start_minutes: u32,
    /// Range end, minutes since midnight; at or before the start means the
    /// range wraps overnight
    pub end_minutes: u32,
    /// Number of windows requested (validated upstream to 1-10)
    pub number_of_windows: usize,
    /// Appliances to schedule; `None` applies the configured defaults
    pub appliances: Option<Vec<String>>,
}

/// Error from the range-constrained optimizer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    /// The time range intersects no forecast hours. A reported condition,
    /// not a crash; the HTTP layer maps it to a 400.
    #[error("No data available for the specified time range")]
    EmptyRange,
}

/// One selected window with its scheduling payload.
#[derive(Debug, Clone)]
pub struct SelectedWindow {
    pub record: HourlyForecastRecord,
    pub appliances: Vec<String>,
    pub energy_savings_kg: f64,
}

/// Result of a range-constrained optimization.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub windows: Vec<SelectedWindow>,
    pub total_carbon_savings: f64,
    pub green_count: usize,
    pub dirty_count: usize,
    pub fallback_reason: Option<&'static str>,
}

impl OptimizeOutcome {
    pub fn fallback_available(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Keep the records whose minute-of-day falls inside the range.
///
/// `end <= start` is an overnight range: keep an hour when it is at or
/// after the start **or** at or before the end.
pub fn filter_by_range(
    records: &[HourlyForecastRecord],
    start_minutes: u32,
    end_minutes: u32,
) -> Vec<&HourlyForecastRecord> {
    records
        .iter()
        .filter(|r| {
            if end_minutes <= start_minutes {
                r.time_minutes >= start_minutes || r.time_minutes <= end_minutes
            } else {
                r.time_minutes >= start_minutes && r.time_minutes <= end_minutes
            }
        })
        .collect()
}

/// Select the best windows inside a time range.
pub fn optimize_windows(
    records: &[HourlyForecastRecord],
    query: &RangeQuery,
    powers: &AppliancePowerTable,
    config: &OptimizerConfig,
) -> Result<OptimizeOutcome, OptimizeError> {
    let filtered = filter_by_range(records, query.start_minutes, query.end_minutes);
    if filtered.is_empty() {
        return Err(OptimizeError::EmptyRange);
    }

    let appliances = query
        .appliances
        .clone()
        .unwrap_or_else(|| config.default_appliances.clone());

    let mut green: Vec<&HourlyForecastRecord> =
        filtered.iter().copied().filter(|r| r.is_green()).collect();

    let (selected, fallback_reason) = if !green.is_empty() {
        green.sort_by(|a, b| a.carbon_intensity.total_cmp(&b.carbon_intensity));
        green.truncate(query.number_of_windows);
        (green, None)
    } else {
        // Range-local fallback: cleanest hours of the filtered set,
        // regardless of label.
        let mut all = filtered;
        all.sort_by(|a, b| a.carbon_intensity.total_cmp(&b.carbon_intensity));
        all.truncate(query.number_of_windows);
        (all, Some(RANGE_FALLBACK_REASON))
    };

    let windows: Vec<SelectedWindow> = selected
        .into_iter()
        .map(|record| SelectedWindow {
            record: record.clone(),
            appliances: appliances.clone(),
            energy_savings_kg: powers.savings_kg(record.carbon_intensity, &appliances, 1.0),
        })
        .collect();

    let total_carbon_savings = windows.iter().map(|w| w.energy_savings_kg).sum();
    let green_count = windows.iter().filter(|w| w.record.is_green()).count();
    let dirty_count = windows.len() - green_count;

    Ok(OptimizeOutcome {
        windows,
        total_carbon_savings,
        green_count,
        dirty_count,
        fallback_reason,
    })
}

/// Result of the unfiltered whole-day query.
#[derive(Debug, Clone)]
pub struct DayWindowsOutcome {
    pub windows: Vec<HourlyForecastRecord>,
    pub fallback_reason: Option<&'static str>,
}

impl DayWindowsOutcome {
    pub fn fallback_available(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// All green hours of the day in chronological order, or the
/// [`DAY_FALLBACK_WINDOWS`] least-carbon hours when none are green.
pub fn find_day_windows(records: &[HourlyForecastRecord]) -> DayWindowsOutcome {
    let green: Vec<HourlyForecastRecord> =
        records.iter().filter(|r| r.is_green()).cloned().collect();

    if !green.is_empty() {
        return DayWindowsOutcome {
            windows: green,
            fallback_reason: None,
        };
    }

    let mut all: Vec<&HourlyForecastRecord> = records.iter().collect();
    all.sort_by(|a, b| a.carbon_intensity.total_cmp(&b.carbon_intensity));
    all.truncate(DAY_FALLBACK_WINDOWS);

    DayWindowsOutcome {
        windows: all.into_iter().cloned().collect(),
        fallback_reason: Some(DAY_FALLBACK_REASON),
    }
}

#[cfg(test)]
#[path = "optimizer_tests.rs"]
mod optimizer_tests;
