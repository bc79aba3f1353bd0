//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::compute::ClassificationSummary;
pub use crate::routes::compute::ComputeGreenWindowData;
pub use crate::routes::compute::ComputedGreenWindow;
pub use crate::routes::compute::Forecast24hData;
pub use crate::routes::green_windows::GreenWindowDto;
pub use crate::routes::green_windows::GreenWindowsData;
pub use crate::routes::helpers::WindowBreakdown;
pub use crate::routes::optimize::OptimalWindowDto;
pub use crate::routes::optimize::OptimizeData;
pub use crate::routes::predict::ForecastSummary;
pub use crate::routes::predict::HourlyForecastEntry;
pub use crate::routes::predict::PredictDemandData;
pub use crate::routes::ranges::AvailableTimeRangesData;
pub use crate::routes::ranges::TimeRange;
pub use crate::routes::schedule::ScheduleData;
pub use crate::routes::schedule::ScheduledTaskDto;

pub use crate::models::{
    ForecastSet, HourlyForecastRecord, LoadSeries, SeasonalBaselineTable, WindowType,
};
pub use crate::services::green_window::{
    ArtifactRow, CompleteClassification, ForecastPeriod, GreenWindowArtifact,
    HourlyClassification,
};
