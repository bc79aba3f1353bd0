//! Batch validation and commitment of appliance placements.
//!
//! Scheduling is best-effort: each proposed placement is accepted or
//! rejected on its own, a rejection never aborts the batch, and partial
//! acceptance is the normal outcome rather than an error. Accepted items
//! snapshot the carbon intensity and window label of their start hour at
//! validation time.

use log::debug;
use uuid::Uuid;

use crate::models::{minutes_to_time, HourlyForecastRecord, WindowType};

use super::savings::AppliancePowerTable;

/// A proposed appliance placement, already schema-validated upstream.
#[derive(Debug, Clone)]
pub struct PlacementRequest {
    pub appliance: String,
    /// Window start, minutes since midnight
    pub start_minutes: u32,
    /// Window end, minutes since midnight
    pub end_minutes: u32,
    pub duration_minutes: u32,
}

/// User constraints applied to every placement in the batch.
#[derive(Debug, Clone)]
pub struct UserPreferences {
    pub allow_overnight: bool,
    pub max_carbon_intensity: f64,
}

/// A committed placement with its validation-time snapshot.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub appliance: String,
    pub scheduled_start: String,
    pub scheduled_end: String,
    pub duration_minutes: u32,
    pub estimated_savings_kg: f64,
    /// Carbon intensity at the scheduled start hour, at validation time
    pub carbon_intensity: f64,
    /// Window label at the scheduled start hour, at validation time
    pub window_type: WindowType,
}

/// Why a placement was skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RejectReason {
    #[error("window crosses midnight and overnight runs are not allowed")]
    OvernightNotAllowed,
    #[error("no forecast hour starts at the requested time")]
    NoForecastHour,
    #[error("carbon intensity {carbon_intensity} exceeds the limit {limit}")]
    CarbonAboveLimit { carbon_intensity: f64, limit: f64 },
}

/// A skipped placement with its reason, kept for logging and reporting.
#[derive(Debug, Clone)]
pub struct RejectedPlacement {
    /// Position of the placement in the submitted batch
    pub index: usize,
    pub appliance: String,
    pub reason: RejectReason,
}

/// Outcome of validating one batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// Opaque confirmation identifier shared by the batch
    pub confirmation_id: String,
    pub tasks: Vec<ScheduledTask>,
    pub rejected: Vec<RejectedPlacement>,
    pub total_savings_kg: f64,
    pub green_count: usize,
    pub dirty_count: usize,
}

/// Validate a batch of placements against the classified forecast and the
/// user's constraints.
pub fn validate_schedule(
    records: &[HourlyForecastRecord],
    placements: &[PlacementRequest],
    prefs: &UserPreferences,
    powers: &AppliancePowerTable,
) -> BatchReport {
    let confirmation_id = new_confirmation_id();
    let mut tasks = Vec::new();
    let mut rejected = Vec::new();

    for (index, placement) in placements.iter().enumerate() {
        match validate_placement(records, placement, prefs, powers) {
            Ok(task) => tasks.push(task),
            Err(reason) => {
                debug!(
                    "skipping placement {} ({}): {}",
                    index, placement.appliance, reason
                );
                rejected.push(RejectedPlacement {
                    index,
                    appliance: placement.appliance.clone(),
                    reason,
                });
            }
        }
    }

    let total_savings_kg = tasks.iter().map(|t| t.estimated_savings_kg).sum();
    let green_count = tasks.iter().filter(|t| t.window_type.is_green()).count();
    let dirty_count = tasks.len() - green_count;

    BatchReport {
        confirmation_id,
        tasks,
        rejected,
        total_savings_kg,
        green_count,
        dirty_count,
    }
}

fn validate_placement(
    records: &[HourlyForecastRecord],
    placement: &PlacementRequest,
    prefs: &UserPreferences,
    powers: &AppliancePowerTable,
) -> Result<ScheduledTask, RejectReason> {
    if !prefs.allow_overnight && placement.end_minutes < placement.start_minutes {
        return Err(RejectReason::OvernightNotAllowed);
    }

    let record = records
        .iter()
        .find(|r| r.time_minutes == placement.start_minutes)
        .ok_or(RejectReason::NoForecastHour)?;

    // NaN carbon intensity compares false and passes the limit check,
    // matching the classification-side treatment of undefined values.
    if record.carbon_intensity > prefs.max_carbon_intensity {
        return Err(RejectReason::CarbonAboveLimit {
            carbon_intensity: record.carbon_intensity,
            limit: prefs.max_carbon_intensity,
        });
    }

    let duration_hours = placement.duration_minutes as f64 / 60.0;
    let appliances = vec![placement.appliance.clone()];
    let estimated_savings_kg =
        powers.savings_kg(record.carbon_intensity, &appliances, duration_hours);

    Ok(ScheduledTask {
        appliance: placement.appliance.clone(),
        scheduled_start: minutes_to_time(placement.start_minutes),
        scheduled_end: minutes_to_time(placement.end_minutes),
        duration_minutes: placement.duration_minutes,
        estimated_savings_kg,
        carbon_intensity: record.carbon_intensity,
        window_type: record.window_type_or_dirty(),
    })
}

/// Opaque batch confirmation identifier, unique per call.
fn new_confirmation_id() -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("sched_{}", &uuid[..8])
}

#[cfg(test)]
#[path = "scheduling_tests.rs"]
mod scheduling_tests;
