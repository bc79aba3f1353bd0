//! Range-constrained optimization response types and assembly.

use serde::{Deserialize, Serialize};

use crate::models::WindowType;
use crate::services::optimizer::{OptimizeOutcome, SelectedWindow};
use crate::services::savings::renewable_percentage;

use super::helpers::{round1, window_bounds, WindowBreakdown};

/// A selected window with its scheduling payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalWindowDto {
    pub start_time: String,
    pub end_time: String,
    pub carbon_intensity: f64,
    pub renewable_percentage: f64,
    pub window_type: WindowType,
    pub appliances: Vec<String>,
    pub energy_savings_kg: f64,
}

impl From<&SelectedWindow> for OptimalWindowDto {
    fn from(window: &SelectedWindow) -> Self {
        let record = &window.record;
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
            appliances: window.appliances.clone(),
            energy_savings_kg: round1(window.energy_savings_kg),
        }
    }
}

/// Payload of the optimize-windows endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeData {
    pub optimal_windows: Vec<OptimalWindowDto>,
    pub total_carbon_savings: f64,
    pub time_range_used: String,
    pub baseline_threshold: f64,
    pub window_breakdown: WindowBreakdown,
    pub fallback_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Assemble the payload and user-facing message from an optimizer outcome.
pub fn build_optimize_response(
    outcome: &OptimizeOutcome,
    start_time: &str,
    end_time: &str,
    baseline_threshold: f64,
) -> (OptimizeData, String) {
    let optimal_windows: Vec<OptimalWindowDto> =
        outcome.windows.iter().map(OptimalWindowDto::from).collect();
    let count = optimal_windows.len();

    let message = match outcome.fallback_reason {
        None => format!("Found {} green windows in the specified time range", count),
        Some(_) => format!(
            "No green windows found. Showing {} least carbon intensive windows instead.",
            count
        ),
    };

    let data = OptimizeData {
        optimal_windows,
        total_carbon_savings: round1(outcome.total_carbon_savings),
        time_range_used: format!("{} - {}", start_time, end_time),
        baseline_threshold,
        window_breakdown: WindowBreakdown {
            green_windows: outcome.green_count,
            dirty_windows: outcome.dirty_count,
        },
        fallback_available: outcome.fallback_available(),
        fallback_reason: outcome.fallback_reason.map(|r| r.to_string()),
    };

    (data, message)
}
