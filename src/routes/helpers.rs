//! Shared helpers for response assembly.

use serde::{Deserialize, Serialize};

use crate::models::{minutes_to_time, HourlyForecastRecord};
use crate::models::time::MINUTES_PER_DAY;

/// Round to one decimal place for presentation fields.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimal places for presentation fields.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Start/end time strings for a one-hour window beginning at the record's
/// minute of day; the end wraps past midnight.
pub fn window_bounds(record: &HourlyForecastRecord) -> (String, String) {
    let start = minutes_to_time(record.time_minutes);
    let end = minutes_to_time((record.time_minutes + 60) % MINUTES_PER_DAY);
    (start, end)
}

/// Green/dirty counts among returned windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowBreakdown {
    pub green_windows: usize,
    pub dirty_windows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_rounding() {
        assert_eq!(round1(123.456), 123.5);
        assert_eq!(round2(123.456), 123.46);
        assert_eq!(round1(0.04), 0.0);
    }

    #[test]
    fn test_window_bounds_wrap() {
        let record = HourlyForecastRecord::new(
            NaiveDate::from_ymd_opt(2024, 4, 2)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap(),
            500.0,
            100.0,
            700.0,
        );
        let (start, end) = window_bounds(&record);
        assert_eq!(start, "23:00");
        assert_eq!(end, "00:00");
    }
}
