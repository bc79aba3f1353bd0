//! Service layer for the carbon-window engine.
//!
//! This module contains the algorithmic core: forecast assembly with carbon
//! accounting, green/dirty classification, best-window selection, the
//! range-constrained optimizer, savings accounting, and batch schedule
//! validation. Everything here is a synchronous, pure-or-read-only
//! transform over an in-memory record set; I/O stays in the sources layer.

pub mod classify;

pub mod forecast;

pub mod green_window;

pub mod optimizer;

pub mod savings;
pub mod scheduling;

pub use classify::{baseline_threshold, classify_records};
pub use forecast::{generate_forecast, CarbonConfig, ForecastError, FORECAST_STEPS};
pub use green_window::{
    build_complete_classification, build_green_window_artifact, compute_and_persist,
    select_best_window, BestWindow, CompleteClassification, ForecastPeriod, GreenWindowArtifact,
};
pub use optimizer::{
    filter_by_range, find_day_windows, optimize_windows, DayWindowsOutcome, OptimizeError,
    OptimizeOutcome, OptimizerConfig, RangeQuery, SelectedWindow,
};
pub use savings::{renewable_percentage, AppliancePowerTable};
pub use scheduling::{
    validate_schedule, BatchReport, PlacementRequest, RejectReason, ScheduledTask, UserPreferences,
};
