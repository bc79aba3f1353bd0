//! Unfiltered green-window response types and assembly.

use serde::{Deserialize, Serialize};

use crate::models::HourlyForecastRecord;
use crate::services::optimizer::DayWindowsOutcome;
use crate::services::savings::renewable_percentage;

use super::helpers::{round1, window_bounds};

/// A one-hour window offered to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenWindowDto {
    pub start_time: String,
    pub end_time: String,
    pub carbon_intensity: f64,
    pub renewable_percentage: f64,
    pub window_type: crate::models::WindowType,
}

impl From<&HourlyForecastRecord> for GreenWindowDto {
    fn from(record: &HourlyForecastRecord) -> Self {
        let (start_time, end_time) = window_bounds(record);
        Self {
            start_time,
            end_time,
            carbon_intensity: round1(record.carbon_intensity),
            renewable_percentage: round1(renewable_percentage(
                record.forecast_load_mw,
                record.renewable_baseload_mw,
            )),
            window_type: record.window_type_or_dirty(),
        }
    }
}

/// Payload of the find-green-windows endpoint.
///
/// The green path and the fallback path expose different keys, mirroring
/// the external contract: `green_windows`/`total_green_windows` when green
/// hours exist, `fallback_windows`/`total_fallback_windows` plus
/// `fallback_reason` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GreenWindowsData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green_windows: Option<Vec<GreenWindowDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_green_windows: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_windows: Option<Vec<GreenWindowDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fallback_windows: Option<usize>,
    pub baseline_threshold: f64,
    pub fallback_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Assemble the payload and user-facing message from the day query result.
pub fn build_green_windows(
    outcome: &DayWindowsOutcome,
    baseline_threshold: f64,
) -> (GreenWindowsData, String) {
    let windows: Vec<GreenWindowDto> = outcome.windows.iter().map(GreenWindowDto::from).collect();
    let count = windows.len();

    match outcome.fallback_reason {
        None => (
            GreenWindowsData {
                green_windows: Some(windows),
                total_green_windows: Some(count),
                fallback_windows: None,
                total_fallback_windows: None,
                baseline_threshold,
                fallback_available: false,
                fallback_reason: None,
            },
            format!("Found {} green windows available", count),
        ),
        Some(reason) => (
            GreenWindowsData {
                green_windows: None,
                total_green_windows: None,
                fallback_windows: Some(windows),
                total_fallback_windows: Some(count),
                baseline_threshold,
                fallback_available: true,
                fallback_reason: Some(reason.to_string()),
            },
            format!(
                "No green windows found. Here are the {} least carbon intensive windows available.",
                count
            ),
        ),
    }
}
