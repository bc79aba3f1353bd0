//! Forecast record and baseline table domain types.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of hourly steps in one forecast set.
pub const FORECAST_HOURS: usize = 24;

/// Classification of a forecast hour against the monthly baseline threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowType {
    GreenWindow,
    DirtyWindow,
}

impl WindowType {
    /// Wire representation, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowType::GreenWindow => "green_window",
            WindowType::DirtyWindow => "dirty_window",
        }
    }

    pub fn is_green(&self) -> bool {
        matches!(self, WindowType::GreenWindow)
    }
}

impl std::fmt::Display for WindowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hour of the demand forecast with derived carbon figures.
///
/// `carbon_intensity` is NaN when the forecast load is not positive; NaN
/// compares false against any threshold, so such hours always classify as
/// dirty, and serde_json renders the value as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecastRecord {
    /// Forecast hour (hourly-aligned timestamp)
    pub ds: NaiveDateTime,
    /// Forecast demand in MW
    pub forecast_load_mw: f64,
    /// Seasonal renewable baseload in MW for the timestamp's month
    pub renewable_baseload_mw: f64,
    /// Fossil share of the load in MW, clipped at zero
    pub fossil_fuel_mw: f64,
    /// Carbon intensity in gCO2/kWh (NaN when load <= 0)
    pub carbon_intensity: f64,
    /// Green/dirty label, populated by classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_type: Option<WindowType>,
    /// Hour of day (0-23)
    pub hour: u32,
    /// Minute of hour (always 0 for hourly data, kept for derivation parity)
    pub minute: u32,
    /// Minutes since midnight (0-1439), used for time-range filtering
    pub time_minutes: u32,
}

impl HourlyForecastRecord {
    /// Build a record from a forecast point and the month's renewable
    /// baseload. Fossil power is clipped at zero so renewables exceeding
    /// the load never produce a negative share.
    pub fn new(
        ds: NaiveDateTime,
        forecast_load_mw: f64,
        renewable_baseload_mw: f64,
        emission_factor_g_per_kwh: f64,
    ) -> Self {
        let fossil_fuel_mw = (forecast_load_mw - renewable_baseload_mw).max(0.0);
        let carbon_intensity = if forecast_load_mw > 0.0 {
            fossil_fuel_mw * emission_factor_g_per_kwh / forecast_load_mw
        } else {
            f64::NAN
        };

        let hour = ds.hour();
        let minute = ds.minute();

        Self {
            ds,
            forecast_load_mw,
            renewable_baseload_mw,
            fossil_fuel_mw,
            carbon_intensity,
            window_type: None,
            hour,
            minute,
            time_minutes: hour * 60 + minute,
        }
    }

    /// Whether this hour carries the green label.
    pub fn is_green(&self) -> bool {
        matches!(self.window_type, Some(WindowType::GreenWindow))
    }

    /// Label the record expects consumers to read; unclassified records
    /// report as dirty.
    pub fn window_type_or_dirty(&self) -> WindowType {
        self.window_type.unwrap_or(WindowType::DirtyWindow)
    }
}

/// Error constructing a [`ForecastSet`] from raw records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ForecastSetError {
    #[error("forecast set must contain exactly {expected} hourly records, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("forecast records must be strictly increasing by one hour (gap at index {index})")]
    NonHourlySpacing { index: usize },
}

/// A validated 24-hour forecast: exactly [`FORECAST_HOURS`] records,
/// strictly increasing by one hour with no gaps.
///
/// Anything else is rejected at this boundary rather than silently
/// truncated; the transform functions downstream assume the invariant.
#[derive(Debug, Clone)]
pub struct ForecastSet {
    records: Vec<HourlyForecastRecord>,
}

impl ForecastSet {
    pub fn new(records: Vec<HourlyForecastRecord>) -> Result<Self, ForecastSetError> {
        if records.len() != FORECAST_HOURS {
            return Err(ForecastSetError::WrongLength {
                expected: FORECAST_HOURS,
                actual: records.len(),
            });
        }

        for (index, pair) in records.windows(2).enumerate() {
            if pair[1].ds - pair[0].ds != TimeDelta::hours(1) {
                return Err(ForecastSetError::NonHourlySpacing { index: index + 1 });
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[HourlyForecastRecord] {
        &self.records
    }

    /// Mutable access for classification; the record set itself is never
    /// resized after construction.
    pub fn records_mut(&mut self) -> &mut [HourlyForecastRecord] {
        &mut self.records
    }

    pub fn into_records(self) -> Vec<HourlyForecastRecord> {
        self.records
    }

    /// First forecast timestamp.
    pub fn start(&self) -> NaiveDateTime {
        self.records[0].ds
    }

    /// Last forecast timestamp.
    pub fn end(&self) -> NaiveDateTime {
        self.records[self.records.len() - 1].ds
    }
}

/// Observed hourly load series used to anchor the forecast.
///
/// Construction applies the same cleaning the model trainer uses: sort by
/// timestamp, drop duplicate timestamps keeping the first, reindex to a
/// continuous hourly grid, and fill missing hours with the series mean.
#[derive(Debug, Clone, Default)]
pub struct LoadSeries {
    points: Vec<(NaiveDateTime, f64)>,
}

impl LoadSeries {
    pub fn from_raw(mut raw: Vec<(NaiveDateTime, f64)>) -> Self {
        raw.retain(|(_, value)| value.is_finite());
        raw.sort_by_key(|(ts, _)| *ts);
        raw.dedup_by_key(|(ts, _)| *ts);

        if raw.is_empty() {
            return Self { points: Vec::new() };
        }

        let mean = raw.iter().map(|(_, v)| v).sum::<f64>() / raw.len() as f64;

        let first = raw[0].0;
        let last = raw[raw.len() - 1].0;
        let mut points = Vec::new();
        let mut cursor = first;
        let mut source = raw.iter().peekable();
        while cursor <= last {
            let value = match source.peek() {
                Some((ts, v)) if *ts == cursor => {
                    let v = *v;
                    source.next();
                    v
                }
                _ => mean,
            };
            points.push((cursor, value));
            cursor = cursor + TimeDelta::hours(1);
        }

        Self { points }
    }

    pub fn points(&self) -> &[(NaiveDateTime, f64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Latest observed point; the forecast starts one hour after this.
    pub fn last(&self) -> Option<(NaiveDateTime, f64)> {
        self.points.last().copied()
    }
}

/// Monthly renewable baseload lookup table (month 1-12 -> average MW).
///
/// The table is produced offline by the supply model builder and may arrive
/// with string keys, zero-padded keys, or numeric keys depending on which
/// tool serialized it; lookups tolerate all three. Absent months resolve to
/// 0.0 rather than erroring. Serializes back to the flat `{"1": mw, ...}`
/// object shape the rest of the system reads.
#[derive(Debug, Clone, Default)]
pub struct SeasonalBaselineTable {
    months: BTreeMap<u32, f64>,
}

impl SeasonalBaselineTable {
    pub fn new(months: BTreeMap<u32, f64>) -> Self {
        Self { months }
    }

    /// Average renewable baseload for a month, or 0.0 when absent.
    pub fn lookup(&self, month: u32) -> f64 {
        self.months.get(&month).copied().unwrap_or(0.0)
    }

    /// Whether all 12 months are present.
    pub fn is_complete(&self) -> bool {
        (1..=12).all(|m| self.months.contains_key(&m))
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

impl Serialize for SeasonalBaselineTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.months.len()))?;
        for (month, value) in &self.months {
            map.serialize_entry(&month.to_string(), value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SeasonalBaselineTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: BTreeMap<String, f64> = BTreeMap::deserialize(deserializer)?;
        let mut months = BTreeMap::new();
        for (key, value) in raw {
            let month: u32 = key
                .trim()
                .parse()
                .map_err(|_| serde::de::Error::custom(format!("invalid month key '{}'", key)))?;
            if !(1..=12).contains(&month) {
                return Err(serde::de::Error::custom(format!(
                    "month key out of range: {}",
                    month
                )));
            }
            months.insert(month, value);
        }
        Ok(Self { months })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_fossil_never_negative() {
        let record = HourlyForecastRecord::new(ts(1, 0), 100.0, 250.0, 700.0);
        assert_eq!(record.fossil_fuel_mw, 0.0);
        assert_eq!(record.carbon_intensity, 0.0);
    }

    #[test]
    fn test_carbon_intensity_formula() {
        let record = HourlyForecastRecord::new(ts(1, 0), 1000.0, 300.0, 700.0);
        assert_eq!(record.fossil_fuel_mw, 700.0);
        assert!((record.carbon_intensity - 490.0).abs() < 1e-9);
    }

    #[test]
    fn test_carbon_intensity_nan_for_zero_load() {
        let record = HourlyForecastRecord::new(ts(1, 0), 0.0, 50.0, 700.0);
        assert!(record.carbon_intensity.is_nan());
    }

    #[test]
    fn test_nan_carbon_intensity_serializes_as_null() {
        let record = HourlyForecastRecord::new(ts(1, 0), 0.0, 50.0, 700.0);
        let value = serde_json::to_value(&record).unwrap();
        assert!(value["carbon_intensity"].is_null());
    }

    #[test]
    fn test_time_minutes_derivation() {
        let record = HourlyForecastRecord::new(ts(1, 18), 500.0, 100.0, 700.0);
        assert_eq!(record.hour, 18);
        assert_eq!(record.minute, 0);
        assert_eq!(record.time_minutes, 1080);
    }

    #[test]
    fn test_forecast_set_accepts_24_consecutive_hours() {
        let records: Vec<_> = (0..24)
            .map(|h| HourlyForecastRecord::new(ts(1, 0) + TimeDelta::hours(h), 500.0, 100.0, 700.0))
            .collect();
        let set = ForecastSet::new(records).unwrap();
        assert_eq!(set.records().len(), 24);
        assert_eq!(set.start(), ts(1, 0));
        assert_eq!(set.end(), ts(1, 23));
    }

    #[test]
    fn test_forecast_set_rejects_wrong_length() {
        let records: Vec<_> = (0..23)
            .map(|h| HourlyForecastRecord::new(ts(1, 0) + TimeDelta::hours(h), 500.0, 100.0, 700.0))
            .collect();
        assert_eq!(
            ForecastSet::new(records).unwrap_err(),
            ForecastSetError::WrongLength {
                expected: 24,
                actual: 23
            }
        );
    }

    #[test]
    fn test_forecast_set_rejects_gaps() {
        let mut records: Vec<_> = (0..24)
            .map(|h| HourlyForecastRecord::new(ts(1, 0) + TimeDelta::hours(h), 500.0, 100.0, 700.0))
            .collect();
        records[10].ds = records[10].ds + TimeDelta::hours(1);
        assert!(matches!(
            ForecastSet::new(records).unwrap_err(),
            ForecastSetError::NonHourlySpacing { .. }
        ));
    }

    #[test]
    fn test_load_series_sorts_and_dedups() {
        let series = LoadSeries::from_raw(vec![
            (ts(1, 2), 300.0),
            (ts(1, 0), 100.0),
            (ts(1, 1), 200.0),
            (ts(1, 1), 999.0),
        ]);
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[1], (ts(1, 1), 200.0));
        assert_eq!(series.last(), Some((ts(1, 2), 300.0)));
    }

    #[test]
    fn test_load_series_fills_gaps_with_mean() {
        let series = LoadSeries::from_raw(vec![(ts(1, 0), 100.0), (ts(1, 3), 200.0)]);
        assert_eq!(series.len(), 4);
        // Missing hours 1 and 2 are filled with the mean of observed values.
        assert_eq!(series.points()[1], (ts(1, 1), 150.0));
        assert_eq!(series.points()[2], (ts(1, 2), 150.0));
    }

    #[test]
    fn test_load_series_drops_non_finite_values() {
        let series = LoadSeries::from_raw(vec![(ts(1, 0), 100.0), (ts(1, 1), f64::NAN)]);
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_baseline_lookup_defaults_to_zero() {
        let table = SeasonalBaselineTable::default();
        assert_eq!(table.lookup(6), 0.0);
    }

    #[test]
    fn test_baseline_accepts_string_and_padded_keys() {
        let table: SeasonalBaselineTable =
            serde_json::from_str(r#"{"1": 210.5, "02": 195.0, " 3": 180.0}"#).unwrap();
        assert_eq!(table.lookup(1), 210.5);
        assert_eq!(table.lookup(2), 195.0);
        assert_eq!(table.lookup(3), 180.0);
        assert_eq!(table.lookup(4), 0.0);
    }

    #[test]
    fn test_baseline_rejects_out_of_range_month() {
        let result: Result<SeasonalBaselineTable, _> = serde_json::from_str(r#"{"13": 100.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_baseline_completeness() {
        let months: BTreeMap<u32, f64> = (1..=12).map(|m| (m, m as f64 * 10.0)).collect();
        let table = SeasonalBaselineTable::new(months);
        assert!(table.is_complete());
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn test_baseline_serializes_as_flat_map() {
        let mut months = BTreeMap::new();
        months.insert(1u32, 210.5);
        months.insert(12u32, 220.0);
        let table = SeasonalBaselineTable::new(months);

        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(value, serde_json::json!({"1": 210.5, "12": 220.0}));
    }

    #[test]
    fn test_window_type_wire_format() {
        assert_eq!(
            serde_json::to_value(WindowType::GreenWindow).unwrap(),
            "green_window"
        );
        assert_eq!(
            serde_json::to_value(WindowType::DirtyWindow).unwrap(),
            "dirty_window"
        );
    }
}
