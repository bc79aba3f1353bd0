//! Predefined time range suggestions.

use serde::{Deserialize, Serialize};

/// A labelled time-of-day range the frontend can offer as a preset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRange {
    pub label: String,
    pub start: String,
    pub end: String,
}

impl TimeRange {
    fn new(label: &str, start: &str, end: &str) -> Self {
        Self {
            label: label.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }
}

/// Payload of the available-time-ranges endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTimeRangesData {
    pub time_ranges: Vec<TimeRange>,
}

/// The preset ranges offered to the frontend. An end at or before the
/// start marks an overnight range.
pub fn available_time_ranges() -> AvailableTimeRangesData {
    AvailableTimeRangesData {
        time_ranges: vec![
            TimeRange::new("Evening (6PM-12AM)", "18:00", "00:00"),
            TimeRange::new("Overnight (10PM-8AM)", "22:00", "08:00"),
            TimeRange::new("Morning (6AM-12PM)", "06:00", "12:00"),
            TimeRange::new("Afternoon (12PM-6PM)", "12:00", "18:00"),
            TimeRange::new("All Day (12AM-12AM)", "00:00", "00:00"),
        ],
    }
}
