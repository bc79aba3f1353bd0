//! Demand prediction response types and assembly.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{HourlyForecastRecord, WindowType};
use crate::services::green_window::ForecastPeriod;

use super::helpers::round2;

/// One hour of the prediction response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecastEntry {
    pub timestamp: NaiveDateTime,
    pub hour: u32,
    pub demand_mw: f64,
    pub renewable_baseload_mw: f64,
    pub fossil_fuel_mw: f64,
    pub carbon_intensity_gco2_per_kwh: f64,
    pub window_type: WindowType,
}

/// Aggregate statistics over the 24-hour forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub total_hours: usize,
    pub avg_demand_mw: f64,
    pub avg_carbon_intensity: f64,
    pub green_windows: usize,
    pub dirty_windows: usize,
}

/// Payload of the predict-demand endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictDemandData {
    pub forecast_period: ForecastPeriod,
    pub hourly_forecast: Vec<HourlyForecastEntry>,
    pub summary: ForecastSummary,
}

/// Assemble the prediction payload from classified records.
pub fn build_predict_demand(
    records: &[HourlyForecastRecord],
    baseline_threshold: f64,
    current_month: u32,
) -> PredictDemandData {
    let hourly_forecast: Vec<HourlyForecastEntry> = records
        .iter()
        .map(|r| HourlyForecastEntry {
            timestamp: r.ds,
            hour: r.hour,
            demand_mw: round2(r.forecast_load_mw),
            renewable_baseload_mw: round2(r.renewable_baseload_mw),
            fossil_fuel_mw: round2(r.fossil_fuel_mw),
            carbon_intensity_gco2_per_kwh: round2(r.carbon_intensity),
            window_type: r.window_type_or_dirty(),
        })
        .collect();

    let total_hours = hourly_forecast.len();
    let avg_demand_mw =
        records.iter().map(|r| r.forecast_load_mw).sum::<f64>() / total_hours.max(1) as f64;
    let avg_carbon_intensity =
        records.iter().map(|r| r.carbon_intensity).sum::<f64>() / total_hours.max(1) as f64;
    let green_windows = hourly_forecast
        .iter()
        .filter(|h| h.window_type.is_green())
        .count();

    PredictDemandData {
        forecast_period: ForecastPeriod {
            start: records[0].ds,
            end: records[records.len() - 1].ds,
            baseline_threshold,
            current_month,
        },
        summary: ForecastSummary {
            total_hours,
            avg_demand_mw: round2(avg_demand_mw),
            avg_carbon_intensity: round2(avg_carbon_intensity),
            green_windows,
            dirty_windows: total_hours - green_windows,
        },
        hourly_forecast,
    }
}

/// Response message for a successful prediction.
pub fn predict_demand_message() -> String {
    "Successfully predicted 24-hour demand with carbon intensity".to_string()
}
