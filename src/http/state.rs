//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use crate::api::PredictDemandData;
use crate::services::forecast::CarbonConfig;
use crate::services::optimizer::OptimizerConfig;
use crate::services::savings::AppliancePowerTable;
use crate::sources::{ArtifactStore, AuraConfig, FullDataSource};

/// Immutable engine configuration injected into the services.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub carbon: CarbonConfig,
    pub powers: AppliancePowerTable,
    pub optimizer: OptimizerConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            carbon: CarbonConfig::default(),
            powers: AppliancePowerTable::default(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

/// Short-lived cache for the prediction payload.
///
/// Forecast generation reads files and reruns the whole carbon pipeline;
/// within the freshness window the previous payload is served as-is. The
/// policy lives here in the HTTP layer, not in the core.
#[derive(Clone)]
pub struct ForecastCache {
    inner: Arc<RwLock<Option<CacheEntry>>>,
    ttl: Duration,
}

struct CacheEntry {
    created: Instant,
    payload: PredictDemandData,
}

impl ForecastCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// The cached payload, if still fresh.
    pub fn get(&self) -> Option<PredictDemandData> {
        let guard = self.inner.read();
        guard
            .as_ref()
            .filter(|entry| entry.created.elapsed() < self.ttl)
            .map(|entry| entry.payload.clone())
    }

    pub fn store(&self, payload: PredictDemandData) {
        *self.inner.write() = Some(CacheEntry {
            created: Instant::now(),
            payload,
        });
    }

    pub fn invalidate(&self) {
        *self.inner.write() = None;
    }
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Data sources for history, model, and baseline
    pub sources: Arc<dyn FullDataSource>,
    /// Engine constants injected into the services
    pub engine: Arc<EngineConfig>,
    /// Store for the persisted computation artifacts
    pub artifacts: ArtifactStore,
    /// Freshness-bounded prediction cache
    pub cache: ForecastCache,
}

impl AppState {
    /// Create application state from a data source and the parsed
    /// configuration.
    pub fn new(sources: Arc<dyn FullDataSource>, config: &AuraConfig) -> Self {
        Self {
            sources,
            engine: Arc::new(EngineConfig::default()),
            artifacts: ArtifactStore::new(config.paths.outputs.clone()),
            cache: ForecastCache::new(Duration::from_secs(config.cache.ttl_secs)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::green_window::ForecastPeriod;

    fn payload() -> PredictDemandData {
        PredictDemandData {
            forecast_period: ForecastPeriod {
                start: chrono::NaiveDateTime::default(),
                end: chrono::NaiveDateTime::default(),
                baseline_threshold: 100.0,
                current_month: 1,
            },
            hourly_forecast: vec![],
            summary: crate::api::ForecastSummary {
                total_hours: 0,
                avg_demand_mw: 0.0,
                avg_carbon_intensity: 0.0,
                green_windows: 0,
                dirty_windows: 0,
            },
        }
    }

    #[test]
    fn test_cache_hit_within_ttl() {
        let cache = ForecastCache::new(Duration::from_secs(60));
        assert!(cache.get().is_none());
        cache.store(payload());
        assert!(cache.get().is_some());
    }

    #[test]
    fn test_cache_expires() {
        let cache = ForecastCache::new(Duration::from_millis(0));
        cache.store(payload());
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_cache_invalidate() {
        let cache = ForecastCache::new(Duration::from_secs(60));
        cache.store(payload());
        cache.invalidate();
        assert!(cache.get().is_none());
    }
}
