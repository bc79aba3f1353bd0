//! In-memory data sources for unit testing and local development.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use parking_lot::RwLock;

use crate::models::{LoadSeries, SeasonalBaselineTable};

use super::error::{SourceError, SourceResult};
use super::model::{DemandModel, SeasonalProfileModel};
use super::{BaselineSource, HistorySource, ModelSource};

/// In-memory implementation of all data source traits.
///
/// Starts empty; tests seed it with whatever history, model, and baseline
/// the scenario needs. An unseeded component reports `DataUnavailable`,
/// matching the behavior of a missing file in the production backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    inner: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    history: Option<LoadSeries>,
    model: Option<SeasonalProfileModel>,
    baseline: Option<SeasonalBaselineTable>,
}

impl InMemoryDataSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_history(&self, raw: Vec<(NaiveDateTime, f64)>) {
        self.inner.write().history = Some(LoadSeries::from_raw(raw));
    }

    pub fn set_model(&self, model: SeasonalProfileModel) {
        self.inner.write().model = Some(model);
    }

    pub fn clear_model(&self) {
        self.inner.write().model = None;
    }

    pub fn set_baseline(&self, months: BTreeMap<u32, f64>) {
        self.inner.write().baseline = Some(SeasonalBaselineTable::new(months));
    }

    /// Seed a flat monthly baseline, a constant-level model, and a short
    /// history ending at `anchor`. Convenience for tests.
    pub fn seed_constant(&self, anchor: NaiveDateTime, load_mw: f64, baseline_mw: f64) {
        self.set_history(vec![(anchor, load_mw)]);
        self.set_model(SeasonalProfileModel {
            level_mw: load_mw,
            hourly_factors: vec![1.0; 24],
            start_hour: 0,
        });
        self.set_baseline((1..=12).map(|m| (m, baseline_mw)).collect());
    }
}

impl HistorySource for InMemoryDataSource {
    fn load_history(&self) -> SourceResult<LoadSeries> {
        self.inner
            .read()
            .history
            .clone()
            .ok_or_else(|| SourceError::unavailable("<in-memory history>"))
    }
}

impl ModelSource for InMemoryDataSource {
    fn load_model(&self) -> SourceResult<Box<dyn DemandModel>> {
        let state = self.inner.read();
        match &state.model {
            Some(model) => Ok(Box::new(model.clone())),
            None => Err(SourceError::unavailable("<in-memory model>")),
        }
    }
}

impl BaselineSource for InMemoryDataSource {
    fn load_baseline(&self) -> SourceResult<SeasonalBaselineTable> {
        self.inner
            .read()
            .baseline
            .clone()
            .ok_or_else(|| SourceError::unavailable("<in-memory baseline>"))
    }
}
