//! Axum-based HTTP server for the AURA REST API.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use dto::{ApiDataResponse, ApiResponse};
pub use error::AppError;
pub use router::create_router;
pub use state::{AppState, EngineConfig, ForecastCache};
