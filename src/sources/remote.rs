//! HTTP-backed data sources.
//!
//! Fetches the observed load history, trained model, and seasonal baseline
//! from a grid data service instead of local files. The endpoints serve the
//! same JSON shapes the file backend reads.

use chrono::NaiveDateTime;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::models::{LoadSeries, SeasonalBaselineTable};

use super::error::{SourceError, SourceResult};
use super::model::{DemandModel, SeasonalProfileModel};
use super::{BaselineSource, HistorySource, ModelSource};

/// One observed load point as served by the history endpoint.
#[derive(Debug, Clone, Deserialize)]
struct HistoryPoint {
    ds: NaiveDateTime,
    load_mw: f64,
}

/// Remote implementation of all data source traits.
pub struct RemoteDataSource {
    base_url: String,
    client: Client,
}

impl RemoteDataSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> SourceResult<T> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SourceError::Remote(format!("request to {} failed: {}", url, e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::unavailable(url));
        }
        if !response.status().is_success() {
            return Err(SourceError::Remote(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .map_err(|e| SourceError::Remote(format!("invalid JSON from {}: {}", url, e)))
    }
}

impl HistorySource for RemoteDataSource {
    fn load_history(&self) -> SourceResult<LoadSeries> {
        let points: Vec<HistoryPoint> = self.get_json("history")?;
        let series = LoadSeries::from_raw(points.into_iter().map(|p| (p.ds, p.load_mw)).collect());
        if series.is_empty() {
            return Err(SourceError::Remote("history endpoint returned no usable points".into()));
        }
        Ok(series)
    }
}

impl ModelSource for RemoteDataSource {
    fn load_model(&self) -> SourceResult<Box<dyn DemandModel>> {
        let model: SeasonalProfileModel = self.get_json("model")?;
        Ok(Box::new(model))
    }
}

impl BaselineSource for RemoteDataSource {
    fn load_baseline(&self) -> SourceResult<SeasonalBaselineTable> {
        self.get_json("seasonal-baseline")
    }
}
