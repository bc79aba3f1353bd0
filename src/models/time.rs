//! Minute-of-day time handling.
//!
//! Window boundaries travel through the API as `"HH:MM"` strings and are
//! filtered internally as minutes since midnight (0..=1439), independent of
//! calendar date. Overnight ranges are expressed by an end time at or before
//! the start time and handled by the optimizer, not here.

use serde::{Deserialize, Serialize};

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Error parsing an `"HH:MM"` time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[error("invalid time string '{input}': expected HH:MM with hours 0-23 and minutes 00-59")]
pub struct TimeParseError {
    pub input: String,
}

impl TimeParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }
}

/// Convert an `"HH:MM"` string to minutes since midnight.
///
/// Accepts one- or two-digit hours (0-23) and exactly two-digit minutes
/// (00-59), matching the upstream request schema.
pub fn time_to_minutes(time_str: &str) -> Result<u32, TimeParseError> {
    let (hours_part, minutes_part) = time_str
        .split_once(':')
        .ok_or_else(|| TimeParseError::new(time_str))?;

    if hours_part.is_empty() || hours_part.len() > 2 || minutes_part.len() != 2 {
        return Err(TimeParseError::new(time_str));
    }

    let hours: u32 = hours_part
        .parse()
        .map_err(|_| TimeParseError::new(time_str))?;
    let minutes: u32 = minutes_part
        .parse()
        .map_err(|_| TimeParseError::new(time_str))?;

    if hours > 23 || minutes > 59 {
        return Err(TimeParseError::new(time_str));
    }

    Ok(hours * 60 + minutes)
}

/// Convert minutes since midnight to an `"HH:MM"` string.
///
/// Values past midnight wrap around, so `1440` formats as `"00:00"`.
pub fn minutes_to_time(minutes: u32) -> String {
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;
    format!("{:02}:{:02}", hours, mins)
}
