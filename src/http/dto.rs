//! Data Transfer Objects for the HTTP API.
//!
//! Request DTOs carry their own validation so malformed time strings and
//! out-of-range window counts are rejected before they reach the core
//! algorithms. Response payloads live in the routes module; everything
//! here wraps them in the `{success, data, message}` envelope the frontend
//! expects.

use serde::{Deserialize, Serialize};

use crate::models::time::time_to_minutes;
use crate::services::optimizer::RangeQuery;
use crate::services::scheduling::{PlacementRequest, UserPreferences};

use super::error::AppError;

/// Bounds for the requested number of windows.
const MIN_WINDOWS: usize = 1;
const MAX_WINDOWS: usize = 10;

/// Generic response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// Response envelope without a message, used by the read-only lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiDataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiDataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
}

/// Request body for the optimize-windows endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub start_time: String,
    pub end_time: String,
    pub number_of_windows: usize,
    #[serde(default)]
    pub appliances: Option<Vec<String>>,
}

impl OptimizeRequest {
    /// Validate the request into a core range query.
    pub fn to_query(&self) -> Result<RangeQuery, AppError> {
        let start_minutes = time_to_minutes(&self.start_time)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        let end_minutes =
            time_to_minutes(&self.end_time).map_err(|e| AppError::BadRequest(e.to_string()))?;

        if !(MIN_WINDOWS..=MAX_WINDOWS).contains(&self.number_of_windows) {
            return Err(AppError::BadRequest(format!(
                "number_of_windows must be between {} and {}",
                MIN_WINDOWS, MAX_WINDOWS
            )));
        }

        Ok(RangeQuery {
            start_minutes,
            end_minutes,
            number_of_windows: self.number_of_windows,
            appliances: self.appliances.clone(),
        })
    }
}

/// One proposed appliance placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceScheduleDto {
    pub appliance: String,
    pub window_start: String,
    pub window_end: String,
    pub duration_minutes: u32,
}

/// User constraints for the whole batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferencesDto {
    pub allow_overnight: bool,
    pub max_carbon_intensity: f64,
}

impl From<&UserPreferencesDto> for UserPreferences {
    fn from(dto: &UserPreferencesDto) -> Self {
        Self {
            allow_overnight: dto.allow_overnight,
            max_carbon_intensity: dto.max_carbon_intensity,
        }
    }
}

/// Request body for the schedule-appliances endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAppliancesRequest {
    pub schedule: Vec<ApplianceScheduleDto>,
    pub user_preferences: UserPreferencesDto,
}

impl ScheduleAppliancesRequest {
    /// Validate every placement's time strings into core requests.
    pub fn to_placements(&self) -> Result<Vec<PlacementRequest>, AppError> {
        self.schedule
            .iter()
            .map(|item| {
                let start_minutes = time_to_minutes(&item.window_start)
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let end_minutes = time_to_minutes(&item.window_end)
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                Ok(PlacementRequest {
                    appliance: item.appliance.clone(),
                    start_minutes,
                    end_minutes,
                    duration_minutes: item.duration_minutes,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: &str, end: &str, n: usize) -> OptimizeRequest {
        OptimizeRequest {
            start_time: start.to_string(),
            end_time: end.to_string(),
            number_of_windows: n,
            appliances: None,
        }
    }

    #[test]
    fn test_optimize_request_valid() {
        let query = request("18:00", "08:00", 3).to_query().unwrap();
        assert_eq!(query.start_minutes, 1080);
        assert_eq!(query.end_minutes, 480);
        assert_eq!(query.number_of_windows, 3);
    }

    #[test]
    fn test_optimize_request_rejects_bad_time() {
        assert!(request("25:00", "08:00", 3).to_query().is_err());
        assert!(request("18:00", "8pm", 3).to_query().is_err());
    }

    #[test]
    fn test_optimize_request_rejects_window_count() {
        assert!(request("06:00", "12:00", 0).to_query().is_err());
        assert!(request("06:00", "12:00", 11).to_query().is_err());
        assert!(request("06:00", "12:00", 10).to_query().is_ok());
    }

    #[test]
    fn test_schedule_request_time_validation() {
        let request = ScheduleAppliancesRequest {
            schedule: vec![ApplianceScheduleDto {
                appliance: "washer".to_string(),
                window_start: "14:00".to_string(),
                window_end: "15:00".to_string(),
                duration_minutes: 60,
            }],
            user_preferences: UserPreferencesDto {
                allow_overnight: false,
                max_carbon_intensity: 500.0,
            },
        };
        let placements = request.to_placements().unwrap();
        assert_eq!(placements[0].start_minutes, 840);
    }
}
