//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/predict-demand", get(handlers::predict_demand))
        .route("/find-green-windows", get(handlers::find_green_windows))
        .route("/optimize-windows", post(handlers::optimize_windows_handler))
        .route("/available-time-ranges", get(handlers::get_available_time_ranges))
        .route("/schedule-appliances", post(handlers::schedule_appliances))
        .route("/compute-green-window", post(handlers::compute_green_window))
        .route("/forecast-24h", get(handlers::get_forecast_24h))
        .route("/seasonal-baseline", get(handlers::get_seasonal_baseline));

    Router::new()
        .route("/", get(handlers::health_check))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{AuraConfig, SourceFactory};

    #[cfg(feature = "local-source")]
    #[test]
    fn test_router_creation() {
        let sources = SourceFactory::create_local();
        let state = AppState::new(sources, &AuraConfig::default());
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
