//! Data source configuration file support.
//!
//! This module provides utilities for reading data source configuration
//! from TOML configuration files, with environment variable overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::SourceError;
use super::factory::SourceType;

/// Data source configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuraConfig {
    pub source: SourceSettings,
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Source backend selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    #[serde(rename = "type")]
    pub source_type: String,
    /// Base URL for the remote backend (required when type = "remote")
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Paths for the file-backed data sources and persisted artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    #[serde(default = "default_history_path")]
    pub history: PathBuf,
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
    #[serde(default = "default_baseline_path")]
    pub baseline: PathBuf,
    #[serde(default = "default_outputs_dir")]
    pub outputs: PathBuf,
}

/// Forecast cache settings for the HTTP layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_history_path() -> PathBuf {
    PathBuf::from("data/hourly_load_data.csv")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("outputs/aura_model.json")
}

fn default_baseline_path() -> PathBuf {
    PathBuf::from("outputs/seasonal_baseline.json")
}

fn default_outputs_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_cache_ttl_secs() -> u64 {
    900
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            history: default_history_path(),
            model: default_model_path(),
            baseline: default_baseline_path(),
            outputs: default_outputs_dir(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl Default for AuraConfig {
    fn default() -> Self {
        Self {
            source: SourceSettings {
                source_type: "file".to_string(),
                base_url: None,
            },
            paths: PathSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl AuraConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| SourceError::configuration(format!("Failed to read config file: {}", e)))?;

        let config: AuraConfig = toml::from_str(&content)
            .map_err(|e| SourceError::configuration(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `aura.toml` in the current directory, `config/`, and
    /// the parent directory. Falls back to defaults when no file exists.
    pub fn from_default_location() -> Self {
        let search_paths = [
            PathBuf::from("aura.toml"),
            PathBuf::from("config/aura.toml"),
            PathBuf::from("../aura.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return config,
                    Err(e) => {
                        log::warn!("ignoring unreadable config {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    /// Get the configured source type, with `AURA_SOURCE` taking precedence.
    pub fn source_type(&self) -> Result<SourceType, String> {
        if let Ok(val) = std::env::var("AURA_SOURCE") {
            return SourceType::from_str(&val);
        }
        SourceType::from_str(&self.source.source_type)
    }
}
