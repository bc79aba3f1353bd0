//! Batch computation and artifact read response types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::WindowType;
use crate::services::green_window::{
    ArtifactRow, CompleteClassification, ForecastPeriod, GreenWindowArtifact, HourlyClassification,
};

use super::helpers::round2;

/// The computed best window as exposed by the compute endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputedGreenWindow {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub average_carbon_intensity: f64,
    pub duration_hours: usize,
    pub baseline_threshold: f64,
    pub window_type: WindowType,
    pub hourly_data: Vec<ArtifactRow>,
}

/// Payload of the compute-green-window endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeGreenWindowData {
    pub green_window: ComputedGreenWindow,
    pub complete_forecast: CompleteClassification,
    pub computation_timestamp: NaiveDateTime,
    pub status: String,
}

/// Assemble the compute response from freshly persisted artifacts.
pub fn build_compute_response(
    artifact: GreenWindowArtifact,
    classification: CompleteClassification,
    computation_timestamp: NaiveDateTime,
) -> (ComputeGreenWindowData, String) {
    let message = format!(
        "Successfully computed green window for {} hours",
        artifact.length_hours
    );

    let data = ComputeGreenWindowData {
        green_window: ComputedGreenWindow {
            start_time: artifact.start,
            end_time: artifact.end,
            average_carbon_intensity: artifact.avg_carbon_intensity_gco2_per_kwh,
            duration_hours: artifact.length_hours,
            baseline_threshold: artifact.baseline_threshold,
            window_type: artifact.window_type,
            hourly_data: artifact.rows,
        },
        complete_forecast: classification,
        computation_timestamp,
        status: "computed".to_string(),
    };

    (data, message)
}

/// Aggregates over the stored 24-hour classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub total_hours: usize,
    pub green_windows: usize,
    pub dirty_windows: usize,
    pub avg_carbon_intensity: f64,
    pub min_carbon_intensity: f64,
    pub max_carbon_intensity: f64,
}

/// Payload of the forecast-24h read endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast24hData {
    pub forecast_period: ForecastPeriod,
    pub hourly_data: Vec<HourlyClassification>,
    pub summary: ClassificationSummary,
}

/// Assemble the read response from the persisted classification artifact.
pub fn build_forecast_24h(classification: CompleteClassification) -> (Forecast24hData, String) {
    let entries = &classification.hourly_classifications;
    let total_hours = entries.len();
    let green_windows = entries
        .iter()
        .filter(|h| h.window_type.is_green())
        .count();
    let dirty_windows = entries
        .iter()
        .filter(|h| h.window_type == WindowType::DirtyWindow)
        .count();

    let intensities = || entries.iter().map(|h| h.carbon_intensity_gco2_per_kwh);
    let avg_carbon_intensity = intensities().sum::<f64>() / total_hours.max(1) as f64;
    let min_carbon_intensity = intensities().fold(f64::INFINITY, f64::min);
    let max_carbon_intensity = intensities().fold(f64::NEG_INFINITY, f64::max);

    let message = format!(
        "Retrieved 24-hour forecast with {} green windows and {} dirty windows",
        green_windows, dirty_windows
    );

    let data = Forecast24hData {
        forecast_period: classification.forecast_period.clone(),
        hourly_data: classification.hourly_classifications,
        summary: ClassificationSummary {
            total_hours,
            green_windows,
            dirty_windows,
            avg_carbon_intensity: round2(avg_carbon_intensity),
            min_carbon_intensity,
            max_carbon_intensity,
        },
    };

    (data, message)
}
