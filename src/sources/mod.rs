//! Data source layer for the forecast inputs.
//!
//! The core never reads files or sockets directly: the observed load
//! history, the trained demand model, and the seasonal baseline table are
//! reached through narrow loader traits with swappable backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, batch computation)        │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services/) - Carbon math, selection      │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Source Traits (sources/) - Abstract loader interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┼───────────────────┐
//!     │  File backend │ In-memory backend │ Remote backend
//!     └───────────────┴───────────────────┘
//! ```
//!
//! The module includes:
//! - loader traits ([`HistorySource`], [`ModelSource`], [`BaselineSource`])
//! - `file`: production file-backed sources
//! - `local`: in-memory sources for unit testing and local development
//! - `remote`: HTTP-backed sources (optional feature)
//! - `factory`: factory for creating source instances from configuration
//! - `artifacts`: persisted JSON artifact store for the batch path

#[cfg(not(any(feature = "file-source", feature = "local-source", feature = "remote-source")))]
compile_error!("Enable at least one data source backend feature.");

pub mod artifacts;
pub mod config;
pub mod error;
pub mod factory;
pub mod model;

#[cfg(feature = "file-source")]
pub mod file;
#[cfg(feature = "local-source")]
pub mod local;
#[cfg(feature = "remote-source")]
pub mod remote;

pub use artifacts::{calculate_checksum, ArtifactStore, CLASSIFICATION_FILE, GREEN_WINDOW_FILE};
pub use config::AuraConfig;
pub use error::{SourceError, SourceResult};
pub use factory::{SourceFactory, SourceType};
#[cfg(feature = "file-source")]
pub use file::FileDataSource;
#[cfg(feature = "local-source")]
pub use local::InMemoryDataSource;
pub use model::{DemandModel, SeasonalProfileModel};
#[cfg(feature = "remote-source")]
pub use remote::RemoteDataSource;

use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};

use crate::models::{LoadSeries, SeasonalBaselineTable};

/// Source of the cleaned observed hourly load series.
pub trait HistorySource: Send + Sync {
    fn load_history(&self) -> SourceResult<LoadSeries>;
}

/// Source of the trained demand forecasting model.
pub trait ModelSource: Send + Sync {
    fn load_model(&self) -> SourceResult<Box<dyn DemandModel>>;
}

/// Source of the monthly renewable baseline table.
pub trait BaselineSource: Send + Sync {
    fn load_baseline(&self) -> SourceResult<SeasonalBaselineTable>;
}

/// Combined interface the application layers depend on.
pub trait FullDataSource: HistorySource + ModelSource + BaselineSource {}

impl<T: HistorySource + ModelSource + BaselineSource> FullDataSource for T {}

/// Global data source instance initialized once per process.
static SOURCES: OnceLock<Arc<dyn FullDataSource>> = OnceLock::new();

/// Initialize the global data source singleton from configuration.
pub fn init_sources() -> Result<()> {
    if SOURCES.get().is_some() {
        return Ok(());
    }

    let sources = SourceFactory::from_default_config()
        .map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = SOURCES.set(sources);
    Ok(())
}

/// Get a reference to the global data source instance.
pub fn get_sources() -> Result<&'static Arc<dyn FullDataSource>> {
    if SOURCES.get().is_none() {
        let _ = init_sources();
    }

    SOURCES
        .get()
        .context("Data sources not initialized. Call init_sources() first.")
}
