//! 24-hour forecast assembly with carbon accounting.
//!
//! Combines the observed load history, the trained demand model, and the
//! seasonal renewable baseline into a validated [`ForecastSet`]. A model
//! that cannot be loaded or misbehaves is recovered locally with a
//! persistence forecast; missing history or baseline data is not
//! recoverable and propagates to the caller.

use chrono::{Datelike, NaiveDateTime, TimeDelta};
use log::warn;

use crate::models::{ForecastSet, ForecastSetError, HourlyForecastRecord, SeasonalBaselineTable};
use crate::sources::{FullDataSource, SourceError};

/// Number of hourly steps forecast per call.
pub const FORECAST_STEPS: usize = crate::models::forecast::FORECAST_HOURS;

/// Carbon accounting constants, injected rather than read from globals.
#[derive(Debug, Clone)]
pub struct CarbonConfig {
    /// Emission factor applied to the fossil share of generation, in
    /// gCO2/kWh. A fixed domain constant for the served grid, not a
    /// per-call parameter.
    pub emission_factor_g_per_kwh: f64,
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            emission_factor_g_per_kwh: 700.0,
        }
    }
}

/// Error producing a forecast set.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Malformed(#[from] ForecastSetError),
}

/// Generate the classified-ready forecast for the next 24 hours.
///
/// The forecast is anchored at the most recent observed load point and
/// starts one hour after it. Forecast values are rounded to two decimals
/// before carbon accounting, matching the persisted data shapes.
pub fn generate_forecast(
    sources: &dyn FullDataSource,
    carbon: &CarbonConfig,
) -> Result<ForecastSet, ForecastError> {
    let history = sources.load_history()?;
    let baseline = sources.load_baseline()?;

    let (anchor, last_load) = history
        .last()
        .ok_or_else(|| SourceError::configuration("load history is empty"))?;

    let values = forecast_values(sources, last_load);
    let start = anchor + TimeDelta::hours(1);
    let records = build_forecast_records(start, &values, &baseline, carbon);

    Ok(ForecastSet::new(records)?)
}

/// Ask the model for the next [`FORECAST_STEPS`] values, falling back to a
/// flat persistence forecast at the last observed load when the model is
/// missing, fails, or returns the wrong number of points.
fn forecast_values(sources: &dyn FullDataSource, last_load: f64) -> Vec<f64> {
    match sources.load_model() {
        Ok(model) => match model.forecast(FORECAST_STEPS) {
            Ok(values) if values.len() == FORECAST_STEPS => values,
            Ok(values) => {
                warn!(
                    "model '{}' returned {} points instead of {}, using persistence fallback",
                    model.name(),
                    values.len(),
                    FORECAST_STEPS
                );
                vec![last_load; FORECAST_STEPS]
            }
            Err(e) => {
                warn!(
                    "model '{}' forecasting failed, using persistence fallback: {}",
                    model.name(),
                    e
                );
                vec![last_load; FORECAST_STEPS]
            }
        },
        Err(e) => {
            warn!("could not load demand model, using persistence fallback: {}", e);
            vec![last_load; FORECAST_STEPS]
        }
    }
}

/// Build hourly records from forecast values starting at `start`.
pub fn build_forecast_records(
    start: NaiveDateTime,
    values: &[f64],
    baseline: &SeasonalBaselineTable,
    carbon: &CarbonConfig,
) -> Vec<HourlyForecastRecord> {
    values
        .iter()
        .enumerate()
        .map(|(step, value)| {
            let ds = start + TimeDelta::hours(step as i64);
            let load = round2(*value);
            let renewable = baseline.lookup(ds.month());
            HourlyForecastRecord::new(ds, load, renewable, carbon.emission_factor_g_per_kwh)
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
#[path = "forecast_tests.rs"]
mod forecast_tests;
