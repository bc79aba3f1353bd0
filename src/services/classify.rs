//! Green/dirty window classification.
//!
//! Each forecast hour is labelled against the baseline threshold for the
//! month classification runs in ("now"), not the month of the forecast
//! hour. This reflects the present operating season even when the forecast
//! crosses midnight into a new month.
//!
//! # Threshold units
//!
//! The threshold is the current month's renewable baseload **in MW**, read
//! straight from the seasonal table, and is compared directly against a
//! carbon intensity in gCO2/kWh. The unit mismatch is a long-standing
//! modeling shortcut that downstream consumers depend on, so it is kept
//! as-is; see `test_threshold_is_raw_baseline_megawatts`, which pins the
//! behavior so any future unit correction is a visible change.

use chrono::{Datelike, NaiveDateTime};

use crate::models::{HourlyForecastRecord, SeasonalBaselineTable, WindowType};

/// Baseline threshold for the month containing `now`.
pub fn baseline_threshold(baseline: &SeasonalBaselineTable, now: NaiveDateTime) -> f64 {
    baseline.lookup(now.month())
}

/// Label every record green or dirty against the threshold.
///
/// Green iff `carbon_intensity < threshold`; a NaN carbon intensity
/// compares false and therefore classifies as dirty.
pub fn classify_records(records: &mut [HourlyForecastRecord], threshold: f64) {
    for record in records {
        record.window_type = Some(if record.carbon_intensity < threshold {
            WindowType::GreenWindow
        } else {
            WindowType::DirtyWindow
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::forecast::{build_forecast_records, CarbonConfig};
    use chrono::NaiveDate;

    fn ts(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn record(ds: NaiveDateTime, load: f64, renewable: f64) -> HourlyForecastRecord {
        HourlyForecastRecord::new(ds, load, renewable, 700.0)
    }

    #[test]
    fn test_green_iff_below_threshold() {
        let mut records = vec![
            record(ts(3, 1, 0), 1000.0, 800.0), // ci = 140
            record(ts(3, 1, 1), 1000.0, 500.0), // ci = 350
            record(ts(3, 1, 2), 1000.0, 100.0), // ci = 630
        ];
        classify_records(&mut records, 350.0);

        assert_eq!(records[0].window_type, Some(WindowType::GreenWindow));
        // Exactly at the threshold is not green.
        assert_eq!(records[1].window_type, Some(WindowType::DirtyWindow));
        assert_eq!(records[2].window_type, Some(WindowType::DirtyWindow));
    }

    #[test]
    fn test_classification_matches_predicate_for_all_hours() {
        let baseline = SeasonalBaselineTable::new((1..=12).map(|m| (m, 150.0)).collect());
        let values: Vec<f64> = (0..24).map(|h| 300.0 + (h as f64) * 40.0).collect();
        let mut records =
            build_forecast_records(ts(5, 10, 0), &values, &baseline, &CarbonConfig::default());
        let threshold = baseline_threshold(&baseline, ts(5, 10, 12));
        classify_records(&mut records, threshold);

        for r in &records {
            let expected_green = r.carbon_intensity < threshold;
            assert_eq!(r.is_green(), expected_green, "hour {}", r.hour);
        }
    }

    #[test]
    fn test_nan_carbon_intensity_classifies_dirty() {
        let mut records = vec![record(ts(3, 1, 0), 0.0, 50.0)];
        assert!(records[0].carbon_intensity.is_nan());
        classify_records(&mut records, 500.0);
        assert_eq!(records[0].window_type, Some(WindowType::DirtyWindow));
    }

    #[test]
    fn test_threshold_uses_current_month_not_forecast_month() {
        let mut months = std::collections::BTreeMap::new();
        months.insert(6, 111.0);
        months.insert(7, 222.0);
        let baseline = SeasonalBaselineTable::new(months);

        // Classification runs in June even if the forecast reaches into July.
        assert_eq!(baseline_threshold(&baseline, ts(6, 30, 23)), 111.0);
        assert_eq!(baseline_threshold(&baseline, ts(7, 1, 0)), 222.0);
    }

    /// Pins the inherited unit mismatch: the threshold is the month's
    /// renewable baseload in MW used directly as a gCO2/kWh bound. If this
    /// test breaks because the units were corrected, that correction must
    /// be a deliberate, coordinated change to the external contract.
    #[test]
    fn test_threshold_is_raw_baseline_megawatts() {
        let baseline = SeasonalBaselineTable::new((1..=12).map(|m| (m, 180.5)).collect());
        let threshold = baseline_threshold(&baseline, ts(2, 10, 8));
        assert_eq!(threshold, 180.5);

        // ci = (1000 - 800) * 700 / 1000 = 140 gCO2/kWh < 180.5 "MW"
        let mut records = vec![record(ts(2, 10, 8), 1000.0, 800.0)];
        classify_records(&mut records, threshold);
        assert_eq!(records[0].window_type, Some(WindowType::GreenWindow));
    }

    #[test]
    fn test_missing_month_threshold_is_zero() {
        let baseline = SeasonalBaselineTable::default();
        let threshold = baseline_threshold(&baseline, ts(8, 1, 0));
        assert_eq!(threshold, 0.0);

        // Nothing can be strictly below a zero threshold.
        let mut records = vec![record(ts(8, 1, 0), 1000.0, 2000.0)];
        classify_records(&mut records, threshold);
        assert_eq!(records[0].window_type, Some(WindowType::DirtyWindow));
    }
}
