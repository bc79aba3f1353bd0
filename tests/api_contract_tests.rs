//! Wire-contract tests for the API payloads.
//!
//! The JSON field names of the window and task records are consumed by the
//! frontend and by downstream tooling; these tests pin the exact key sets
//! so accidental renames fail loudly.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde_json::Value;

use aura_rust::models::HourlyForecastRecord;
use aura_rust::routes::compute::{build_compute_response, build_forecast_24h};
use aura_rust::routes::green_windows::build_green_windows;
use aura_rust::routes::optimize::build_optimize_response;
use aura_rust::routes::predict::build_predict_demand;
use aura_rust::routes::schedule::build_schedule_response;
use aura_rust::services::classify::classify_records;
use aura_rust::services::green_window::{
    build_complete_classification, build_green_window_artifact, select_best_window,
};
use aura_rust::services::optimizer::{find_day_windows, optimize_windows, OptimizerConfig, RangeQuery};
use aura_rust::services::savings::AppliancePowerTable;
use aura_rust::services::scheduling::{validate_schedule, PlacementRequest, UserPreferences};

fn start_ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 20)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// 24 classified records with a green morning and dirty remainder.
fn sample_records() -> Vec<HourlyForecastRecord> {
    let mut records: Vec<HourlyForecastRecord> = (0..24)
        .map(|h| {
            let renewable = if (6..=11).contains(&h) { 700.0 } else { 200.0 };
            HourlyForecastRecord::new(
                start_ts() + TimeDelta::hours(h as i64),
                1000.0,
                renewable,
                700.0,
            )
        })
        .collect();
    classify_records(&mut records, 300.0);
    records
}

fn all_dirty_records() -> Vec<HourlyForecastRecord> {
    let mut records: Vec<HourlyForecastRecord> = (0..24)
        .map(|h| {
            HourlyForecastRecord::new(start_ts() + TimeDelta::hours(h as i64), 1000.0, 100.0, 700.0)
        })
        .collect();
    classify_records(&mut records, 300.0);
    records
}

fn assert_keys(value: &Value, keys: &[&str]) {
    let object = value.as_object().expect("expected a JSON object");
    let mut actual: Vec<&str> = object.keys().map(String::as_str).collect();
    actual.sort_unstable();
    let mut expected = keys.to_vec();
    expected.sort_unstable();
    assert_eq!(actual, expected);
}

#[test]
fn test_predict_demand_contract() {
    let data = build_predict_demand(&sample_records(), 300.0, 5);
    let value = serde_json::to_value(&data).unwrap();

    assert_keys(&value, &["forecast_period", "hourly_forecast", "summary"]);
    assert_keys(
        &value["forecast_period"],
        &["start", "end", "baseline_threshold", "current_month"],
    );
    assert_keys(
        &value["hourly_forecast"][0],
        &[
            "timestamp",
            "hour",
            "demand_mw",
            "renewable_baseload_mw",
            "fossil_fuel_mw",
            "carbon_intensity_gco2_per_kwh",
            "window_type",
        ],
    );
    assert_keys(
        &value["summary"],
        &[
            "total_hours",
            "avg_demand_mw",
            "avg_carbon_intensity",
            "green_windows",
            "dirty_windows",
        ],
    );
    assert_eq!(value["summary"]["total_hours"], 24);
    assert_eq!(value["summary"]["green_windows"], 6);
    assert_eq!(value["summary"]["dirty_windows"], 18);
}

#[test]
fn test_green_windows_contract_green_path() {
    let outcome = find_day_windows(&sample_records());
    let (data, message) = build_green_windows(&outcome, 300.0);
    let value = serde_json::to_value(&data).unwrap();

    assert_keys(
        &value,
        &[
            "green_windows",
            "total_green_windows",
            "baseline_threshold",
            "fallback_available",
        ],
    );
    assert_eq!(value["fallback_available"], false);
    assert_eq!(value["total_green_windows"], 6);
    assert_keys(
        &value["green_windows"][0],
        &[
            "start_time",
            "end_time",
            "carbon_intensity",
            "renewable_percentage",
            "window_type",
        ],
    );
    assert_eq!(value["green_windows"][0]["start_time"], "06:00");
    assert_eq!(value["green_windows"][0]["end_time"], "07:00");
    assert_eq!(value["green_windows"][0]["window_type"], "green_window");
    assert_eq!(message, "Found 6 green windows available");
}

#[test]
fn test_green_windows_contract_fallback_path() {
    let outcome = find_day_windows(&all_dirty_records());
    let (data, _) = build_green_windows(&outcome, 300.0);
    let value = serde_json::to_value(&data).unwrap();

    assert_keys(
        &value,
        &[
            "fallback_windows",
            "total_fallback_windows",
            "baseline_threshold",
            "fallback_available",
            "fallback_reason",
        ],
    );
    assert_eq!(value["fallback_available"], true);
    assert_eq!(value["total_fallback_windows"], 3);
    assert_eq!(
        value["fallback_reason"],
        "No green windows found for today"
    );
    assert_eq!(value["fallback_windows"][0]["window_type"], "dirty_window");
}

#[test]
fn test_optimize_contract() {
    let query = RangeQuery {
        start_minutes: 6 * 60,
        end_minutes: 12 * 60,
        number_of_windows: 2,
        appliances: None,
    };
    let outcome = optimize_windows(
        &sample_records(),
        &query,
        &AppliancePowerTable::default(),
        &OptimizerConfig::default(),
    )
    .unwrap();
    let (data, _) = build_optimize_response(&outcome, "06:00", "12:00", 300.0);
    let value = serde_json::to_value(&data).unwrap();

    assert_keys(
        &value,
        &[
            "optimal_windows",
            "total_carbon_savings",
            "time_range_used",
            "baseline_threshold",
            "window_breakdown",
            "fallback_available",
        ],
    );
    assert_keys(
        &value["optimal_windows"][0],
        &[
            "start_time",
            "end_time",
            "carbon_intensity",
            "renewable_percentage",
            "window_type",
            "appliances",
            "energy_savings_kg",
        ],
    );
    assert_keys(&value["window_breakdown"], &["green_windows", "dirty_windows"]);
    assert_eq!(value["time_range_used"], "06:00 - 12:00");
    assert_eq!(value["window_breakdown"]["green_windows"], 2);
    assert_eq!(value["window_breakdown"]["dirty_windows"], 0);
    assert_eq!(value["fallback_available"], false);
    assert_eq!(
        value["optimal_windows"][0]["appliances"],
        serde_json::json!(["washer", "dryer"])
    );
}

#[test]
fn test_optimize_contract_fallback() {
    let query = RangeQuery {
        start_minutes: 0,
        end_minutes: 4 * 60,
        number_of_windows: 2,
        appliances: None,
    };
    let outcome = optimize_windows(
        &sample_records(),
        &query,
        &AppliancePowerTable::default(),
        &OptimizerConfig::default(),
    )
    .unwrap();
    let (data, _) = build_optimize_response(&outcome, "00:00", "04:00", 300.0);
    let value = serde_json::to_value(&data).unwrap();

    assert_eq!(value["fallback_available"], true);
    assert_eq!(
        value["fallback_reason"],
        "No green windows found in the specified time range"
    );
    assert_eq!(value["window_breakdown"]["green_windows"], 0);
    assert_eq!(value["window_breakdown"]["dirty_windows"], 2);
}

#[test]
fn test_schedule_contract() {
    let placements = vec![PlacementRequest {
        appliance: "washer".to_string(),
        start_minutes: 7 * 60,
        end_minutes: 8 * 60,
        duration_minutes: 60,
    }];
    let prefs = UserPreferences {
        allow_overnight: false,
        max_carbon_intensity: 500.0,
    };
    let report = validate_schedule(
        &sample_records(),
        &placements,
        &prefs,
        &AppliancePowerTable::default(),
    );
    let (data, _) = build_schedule_response(&report, 300.0);
    let value = serde_json::to_value(&data).unwrap();

    assert_keys(
        &value,
        &[
            "scheduled_tasks",
            "total_carbon_savings",
            "confirmation_id",
            "baseline_threshold",
            "window_breakdown",
        ],
    );
    assert_keys(
        &value["scheduled_tasks"][0],
        &[
            "appliance",
            "scheduled_start",
            "scheduled_end",
            "duration_minutes",
            "estimated_savings_kg",
            "carbon_intensity",
            "window_type",
        ],
    );
    assert_eq!(value["scheduled_tasks"][0]["scheduled_start"], "07:00");
}

#[test]
fn test_artifact_contract() {
    let records = sample_records();
    let best = select_best_window(&records).unwrap();
    let artifact = build_green_window_artifact(&best, 300.0);
    let value = serde_json::to_value(&artifact).unwrap();

    assert_keys(
        &value,
        &[
            "start",
            "end",
            "avg_carbon_intensity_gco2_per_kwh",
            "length_hours",
            "baseline_threshold",
            "window_type",
            "rows",
        ],
    );
    assert_keys(
        &value["rows"][0],
        &[
            "ds",
            "forecast_load_mw",
            "renewable_baseload_mw",
            "fossil_fuel_mw",
            "carbon_intensity_gco2_per_kwh",
            "window_type",
        ],
    );
}

#[test]
fn test_compute_and_forecast_24h_contract() {
    let records = sample_records();
    let best = select_best_window(&records).unwrap();
    let artifact = build_green_window_artifact(&best, 300.0);
    let classification = build_complete_classification(&records, 300.0, 5);

    let (data, message) =
        build_compute_response(artifact, classification.clone(), start_ts());
    let value = serde_json::to_value(&data).unwrap();
    assert_keys(
        &value,
        &[
            "green_window",
            "complete_forecast",
            "computation_timestamp",
            "status",
        ],
    );
    assert_keys(
        &value["green_window"],
        &[
            "start_time",
            "end_time",
            "average_carbon_intensity",
            "duration_hours",
            "baseline_threshold",
            "window_type",
            "hourly_data",
        ],
    );
    assert_eq!(value["status"], "computed");
    assert_eq!(message, "Successfully computed green window for 6 hours");

    let (data, _) = build_forecast_24h(classification);
    let value = serde_json::to_value(&data).unwrap();
    assert_keys(&value, &["forecast_period", "hourly_data", "summary"]);
    assert_keys(
        &value["summary"],
        &[
            "total_hours",
            "green_windows",
            "dirty_windows",
            "avg_carbon_intensity",
            "min_carbon_intensity",
            "max_carbon_intensity",
        ],
    );
    assert_keys(
        &value["hourly_data"][0],
        &[
            "timestamp",
            "hour",
            "forecast_load_mw",
            "renewable_baseload_mw",
            "fossil_fuel_mw",
            "carbon_intensity_gco2_per_kwh",
            "window_type",
        ],
    );
}
