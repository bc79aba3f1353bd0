//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Forecast generation and the carbon
//! pipeline are CPU- and file-bound, so they run in `spawn_blocking`.

use axum::{extract::State, Json};
use chrono::{Datelike, Local};

use super::dto::{
    ApiDataResponse, ApiResponse, HealthResponse, OptimizeRequest, ScheduleAppliancesRequest,
};
use super::error::AppError;
use super::state::{AppState, EngineConfig};
use crate::models::HourlyForecastRecord;
use crate::routes::compute::{build_compute_response, build_forecast_24h};
use crate::routes::green_windows::build_green_windows;
use crate::routes::optimize::build_optimize_response;
use crate::routes::predict::{build_predict_demand, predict_demand_message};
use crate::routes::ranges::available_time_ranges;
use crate::routes::schedule::build_schedule_response;
use crate::services::classify::{baseline_threshold, classify_records};
use crate::services::forecast::{generate_forecast, ForecastError};
use crate::services::green_window::{compute_and_persist, CompleteClassification};
use crate::services::optimizer::{find_day_windows, optimize_windows};
use crate::services::scheduling::validate_schedule;
use crate::sources::{FullDataSource, CLASSIFICATION_FILE};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Generate and classify the 24-hour forecast.
///
/// Returns the classified records, the threshold used, and the current
/// month the threshold was read for. Blocking; call from `spawn_blocking`.
fn classified_forecast(
    sources: &dyn FullDataSource,
    engine: &EngineConfig,
) -> Result<(Vec<HourlyForecastRecord>, f64, u32), AppError> {
    let set = generate_forecast(sources, &engine.carbon)?;
    let baseline = sources.load_baseline().map_err(ForecastError::from)?;

    let now = Local::now().naive_local();
    let threshold = baseline_threshold(&baseline, now);

    let mut records = set.into_records();
    classify_records(&mut records, threshold);
    Ok((records, threshold, now.month()))
}

async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /
///
/// Health check endpoint to verify the service is running.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "AURA Energy Optimization API".to_string(),
        status: "running".to_string(),
    })
}

// =============================================================================
// Forecast Endpoints
// =============================================================================

/// GET /api/predict-demand
///
/// Predict the next 24 hours of demand with carbon intensity. Serves the
/// cached payload when it is still inside the freshness window.
pub async fn predict_demand(
    State(state): State<AppState>,
) -> HandlerResult<ApiResponse<crate::api::PredictDemandData>> {
    if let Some(cached) = state.cache.get() {
        return Ok(Json(ApiResponse::ok(cached, predict_demand_message())));
    }

    let sources = state.sources.clone();
    let engine = state.engine.clone();
    let data = run_blocking(move || {
        let (records, threshold, month) = classified_forecast(sources.as_ref(), &engine)?;
        Ok(build_predict_demand(&records, threshold, month))
    })
    .await?;

    state.cache.store(data.clone());
    Ok(Json(ApiResponse::ok(data, predict_demand_message())))
}

/// GET /api/find-green-windows
///
/// List today's green windows, or the least carbon intensive hours when
/// none qualify.
pub async fn find_green_windows(
    State(state): State<AppState>,
) -> HandlerResult<ApiResponse<crate::api::GreenWindowsData>> {
    let sources = state.sources.clone();
    let engine = state.engine.clone();

    let (data, message) = run_blocking(move || {
        let (records, threshold, _) = classified_forecast(sources.as_ref(), &engine)?;
        let outcome = find_day_windows(&records);
        Ok(build_green_windows(&outcome, threshold))
    })
    .await?;

    Ok(Json(ApiResponse::ok(data, message)))
}

/// POST /api/optimize-windows
///
/// Select the best windows inside a caller-supplied time range.
pub async fn optimize_windows_handler(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> HandlerResult<ApiResponse<crate::api::OptimizeData>> {
    let query = request.to_query()?;
    let sources = state.sources.clone();
    let engine = state.engine.clone();

    let (data, message) = run_blocking(move || {
        let (records, threshold, _) = classified_forecast(sources.as_ref(), &engine)?;
        let outcome = optimize_windows(&records, &query, &engine.powers, &engine.optimizer)?;
        Ok(build_optimize_response(
            &outcome,
            &request.start_time,
            &request.end_time,
            threshold,
        ))
    })
    .await?;

    Ok(Json(ApiResponse::ok(data, message)))
}

/// GET /api/available-time-ranges
///
/// Predefined time range suggestions.
pub async fn get_available_time_ranges(
) -> Json<ApiDataResponse<crate::api::AvailableTimeRangesData>> {
    Json(ApiDataResponse::ok(available_time_ranges()))
}

/// POST /api/schedule-appliances
///
/// Validate and commit a batch of appliance placements. Partial acceptance
/// is normal; rejected items only show up as reduced counts.
pub async fn schedule_appliances(
    State(state): State<AppState>,
    Json(request): Json<ScheduleAppliancesRequest>,
) -> HandlerResult<ApiResponse<crate::api::ScheduleData>> {
    let placements = request.to_placements()?;
    let prefs: crate::services::scheduling::UserPreferences = (&request.user_preferences).into();
    let sources = state.sources.clone();
    let engine = state.engine.clone();

    let (data, message) = run_blocking(move || {
        let (records, threshold, _) = classified_forecast(sources.as_ref(), &engine)?;
        let report = validate_schedule(&records, &placements, &prefs, &engine.powers);
        Ok(build_schedule_response(&report, threshold))
    })
    .await?;

    Ok(Json(ApiResponse::ok(data, message)))
}

// =============================================================================
// Batch Computation Path
// =============================================================================

/// POST /api/compute-green-window
///
/// Run the green-window computation, persist both artifacts, and return
/// the computed window.
pub async fn compute_green_window(
    State(state): State<AppState>,
) -> HandlerResult<ApiResponse<crate::api::ComputeGreenWindowData>> {
    let sources = state.sources.clone();
    let engine = state.engine.clone();
    let store = state.artifacts.clone();

    let (data, message) = run_blocking(move || {
        let (records, threshold, month) = classified_forecast(sources.as_ref(), &engine)?;
        let (artifact, classification) = compute_and_persist(&records, threshold, month, &store)?;
        Ok(build_compute_response(
            artifact,
            classification,
            Local::now().naive_local(),
        ))
    })
    .await?;

    Ok(Json(ApiResponse::ok(data, message)))
}

/// GET /api/forecast-24h
///
/// Serve the latest persisted 24-hour classification without recomputing.
pub async fn get_forecast_24h(
    State(state): State<AppState>,
) -> HandlerResult<ApiResponse<crate::api::Forecast24hData>> {
    let store = state.artifacts.clone();

    let (data, message) = run_blocking(move || {
        if !store.exists(CLASSIFICATION_FILE) {
            return Err(AppError::NotFound(
                "24-hour forecast data not available. Please run /api/compute-green-window first."
                    .to_string(),
            ));
        }
        let classification: CompleteClassification = store.read_json(CLASSIFICATION_FILE)?;
        Ok(build_forecast_24h(classification))
    })
    .await?;

    Ok(Json(ApiResponse::ok(data, message)))
}

/// GET /api/seasonal-baseline
///
/// Serve the monthly renewable baseline table.
pub async fn get_seasonal_baseline(
    State(state): State<AppState>,
) -> HandlerResult<ApiDataResponse<crate::api::SeasonalBaselineTable>> {
    let sources = state.sources.clone();

    let baseline = run_blocking(move || Ok(sources.load_baseline()?)).await?;
    Ok(Json(ApiDataResponse::ok(baseline)))
}
