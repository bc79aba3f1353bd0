//! Data source factory for dependency injection.
//!
//! This module provides utilities for creating and configuring data source
//! instances based on runtime configuration.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::config::AuraConfig;
use super::error::{SourceError, SourceResult};
#[cfg(feature = "file-source")]
use super::file::FileDataSource;
#[cfg(feature = "local-source")]
use super::local::InMemoryDataSource;
#[cfg(feature = "remote-source")]
use super::remote::RemoteDataSource;
use super::FullDataSource;

/// Data source backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// File-backed sources (CSV history, JSON model and baseline)
    File,
    /// In-memory sources for testing and development
    Local,
    /// HTTP-backed sources
    Remote,
}

impl FromStr for SourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "files" => Ok(Self::File),
            "local" | "memory" => Ok(Self::Local),
            "remote" | "http" => Ok(Self::Remote),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

/// Factory for creating data source instances.
pub struct SourceFactory;

impl SourceFactory {
    /// Create a data source based on the parsed configuration.
    pub fn create(config: &AuraConfig) -> SourceResult<Arc<dyn FullDataSource>> {
        let source_type = config
            .source_type()
            .map_err(SourceError::configuration)?;

        match source_type {
            SourceType::File => {
                #[cfg(feature = "file-source")]
                {
                    Ok(Arc::new(FileDataSource::new(&config.paths)) as Arc<dyn FullDataSource>)
                }
                #[cfg(not(feature = "file-source"))]
                {
                    Err(SourceError::configuration(
                        "File source feature not enabled",
                    ))
                }
            }
            SourceType::Local => {
                #[cfg(feature = "local-source")]
                {
                    Ok(Self::create_local())
                }
                #[cfg(not(feature = "local-source"))]
                {
                    Err(SourceError::configuration(
                        "Local source feature not enabled",
                    ))
                }
            }
            SourceType::Remote => {
                #[cfg(feature = "remote-source")]
                {
                    let base_url = config.source.base_url.clone().ok_or_else(|| {
                        SourceError::configuration(
                            "Remote source requires 'source.base_url' setting",
                        )
                    })?;
                    Ok(Arc::new(RemoteDataSource::new(base_url)) as Arc<dyn FullDataSource>)
                }
                #[cfg(not(feature = "remote-source"))]
                {
                    Err(SourceError::configuration(
                        "Remote source feature not enabled",
                    ))
                }
            }
        }
    }

    /// Create an in-memory data source.
    #[cfg(feature = "local-source")]
    pub fn create_local() -> Arc<dyn FullDataSource> {
        Arc::new(InMemoryDataSource::new())
    }

    /// Create a data source from the default configuration file location
    /// and environment overrides.
    pub fn from_default_config() -> SourceResult<Arc<dyn FullDataSource>> {
        let config = AuraConfig::from_default_location();
        Self::create(&config)
    }

    /// Create a data source from a TOML configuration file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> SourceResult<Arc<dyn FullDataSource>> {
        let config = AuraConfig::from_file(path)?;
        Self::create(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_type_from_str() {
        assert_eq!(SourceType::from_str("file").unwrap(), SourceType::File);
        assert_eq!(SourceType::from_str("local").unwrap(), SourceType::Local);
        assert_eq!(SourceType::from_str("Memory").unwrap(), SourceType::Local);
        assert_eq!(SourceType::from_str("remote").unwrap(), SourceType::Remote);
        assert!(SourceType::from_str("invalid").is_err());
    }

    #[cfg(feature = "local-source")]
    #[test]
    fn test_create_local_source() {
        use super::super::HistorySource;
        let source = SourceFactory::create_local();
        // Unseeded local source exists but has no data yet.
        assert!(source.load_history().is_err());
    }

    #[cfg(feature = "local-source")]
    #[test]
    fn test_create_from_config() {
        let config: AuraConfig = toml::from_str(
            r#"
            [source]
            type = "local"
            "#,
        )
        .unwrap();
        assert!(SourceFactory::create(&config).is_ok());
    }

    #[test]
    fn test_remote_requires_base_url() {
        let config: AuraConfig = toml::from_str(
            r#"
            [source]
            type = "remote"
            "#,
        )
        .unwrap();
        let result = SourceFactory::create(&config);
        assert!(result.is_err());
    }
}
