//! Core domain types for the carbon-window engine.

pub mod forecast;
pub mod time;

pub use forecast::{
    ForecastSet, ForecastSetError, HourlyForecastRecord, LoadSeries, SeasonalBaselineTable,
    WindowType,
};
pub use time::{minutes_to_time, time_to_minutes, TimeParseError};
