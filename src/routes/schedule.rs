//! Appliance scheduling response types and assembly.

use serde::{Deserialize, Serialize};

use crate::models::WindowType;
use crate::services::scheduling::{BatchReport, ScheduledTask};

use super::helpers::{round1, round2, WindowBreakdown};

/// A committed appliance placement as returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledTaskDto {
    pub appliance: String,
    pub scheduled_start: String,
    pub scheduled_end: String,
    pub duration_minutes: u32,
    pub estimated_savings_kg: f64,
    pub carbon_intensity: f64,
    pub window_type: WindowType,
}

impl From<&ScheduledTask> for ScheduledTaskDto {
    fn from(task: &ScheduledTask) -> Self {
        Self {
            appliance: task.appliance.clone(),
            scheduled_start: task.scheduled_start.clone(),
            scheduled_end: task.scheduled_end.clone(),
            duration_minutes: task.duration_minutes,
            estimated_savings_kg: round2(task.estimated_savings_kg),
            carbon_intensity: round1(task.carbon_intensity),
            window_type: task.window_type,
        }
    }
}

/// Payload of the schedule-appliances endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleData {
    pub scheduled_tasks: Vec<ScheduledTaskDto>,
    pub total_carbon_savings: f64,
    pub confirmation_id: String,
    pub baseline_threshold: f64,
    pub window_breakdown: WindowBreakdown,
}

/// Assemble the payload and user-facing message from a batch report.
pub fn build_schedule_response(report: &BatchReport, baseline_threshold: f64) -> (ScheduleData, String) {
    let message = format!(
        "Successfully scheduled {} appliances ({} in green windows, {} in dirty windows)",
        report.tasks.len(),
        report.green_count,
        report.dirty_count
    );

    let data = ScheduleData {
        scheduled_tasks: report.tasks.iter().map(ScheduledTaskDto::from).collect(),
        total_carbon_savings: round2(report.total_savings_kg),
        confirmation_id: report.confirmation_id.clone(),
        baseline_threshold,
        window_breakdown: WindowBreakdown {
            green_windows: report.green_count,
            dirty_windows: report.dirty_count,
        },
    };

    (data, message)
}
