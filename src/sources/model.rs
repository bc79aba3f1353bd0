//! Demand forecast model abstraction.
//!
//! The forecasting model is trained offline and surfaced to this backend as
//! a file; the core only depends on the narrow [`DemandModel`] interface so
//! the storage format and model family can change independently.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// A loaded demand forecasting model.
///
/// `forecast` returns one value per hourly step, starting at the hour after
/// the anchor point. Failures here are recoverable: the forecast service
/// falls back to a persistence forecast instead of surfacing the error.
pub trait DemandModel: Send + Sync {
    /// Model family name, for logging.
    fn name(&self) -> &str;

    /// Produce `steps` hourly demand values in MW.
    fn forecast(&self, steps: usize) -> Result<Vec<f64>>;
}

/// Seasonal-profile demand model.
///
/// The serialized model carries a mean demand level and 24 multiplicative
/// hourly factors (the trained daily shape), plus the hour of day the
/// forecast starts at. This is the shape the offline trainer exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalProfileModel {
    /// Mean demand level in MW
    pub level_mw: f64,
    /// Multiplicative factor per hour of day (index 0 = midnight)
    pub hourly_factors: Vec<f64>,
    /// Hour of day of the first forecast step (0-23)
    pub start_hour: u32,
}

impl DemandModel for SeasonalProfileModel {
    fn name(&self) -> &str {
        "seasonal_profile"
    }

    fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        ensure!(
            self.hourly_factors.len() == 24,
            "model must carry 24 hourly factors, found {}",
            self.hourly_factors.len()
        );
        ensure!(self.start_hour < 24, "start_hour out of range");
        ensure!(
            self.level_mw.is_finite() && self.level_mw > 0.0,
            "model level must be positive"
        );

        let values = (0..steps)
            .map(|step| {
                let hour = (self.start_hour as usize + step) % 24;
                self.level_mw * self.hourly_factors[hour]
            })
            .collect();
        Ok(values)
    }
}
