//! Persisted artifact storage for the batch computation path.
//!
//! The green-window computation writes two JSON artifacts that the read
//! endpoints serve without recomputation. Writes are deduplicated by
//! checksum so repeated computations over unchanged inputs do not touch
//! the files (and their mtimes) at all.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use super::error::{SourceError, SourceResult};

/// File name of the selected green window artifact.
pub const GREEN_WINDOW_FILE: &str = "aura_green_window.json";

/// File name of the complete 24-hour classification artifact.
pub const CLASSIFICATION_FILE: &str = "complete_window_classification.json";

/// Calculate the SHA-256 checksum of serialized artifact content.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// JSON artifact store rooted at the outputs directory.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    outputs_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(outputs_dir: impl Into<PathBuf>) -> Self {
        Self {
            outputs_dir: outputs_dir.into(),
        }
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.outputs_dir.join(name)
    }

    /// Serialize and write an artifact, skipping the write when the
    /// existing file already has identical content.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> SourceResult<()> {
        let path = self.path_of(name);
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| SourceError::parse(&path, e))?;

        if let Ok(existing) = fs::read_to_string(&path) {
            if calculate_checksum(&existing) == calculate_checksum(&content) {
                log::debug!("artifact {} unchanged, skipping write", name);
                return Ok(());
            }
        }

        fs::create_dir_all(&self.outputs_dir)
            .map_err(|e| SourceError::io(&self.outputs_dir, e))?;
        fs::write(&path, content).map_err(|e| SourceError::io(&path, e))?;
        Ok(())
    }

    /// Read and deserialize an artifact; `DataUnavailable` when it has not
    /// been computed yet.
    pub fn read_json<T: DeserializeOwned>(&self, name: &str) -> SourceResult<T> {
        let path = self.path_of(name);
        if !path.exists() {
            return Err(SourceError::unavailable(&path));
        }
        let content = fs::read_to_string(&path).map_err(|e| SourceError::io(&path, e))?;
        serde_json::from_str(&content).map_err(|e| SourceError::parse(&path, e))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_of(name).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        value: i64,
    }

    #[test]
    fn test_checksum_consistency() {
        let content = r#"{"test": "data"}"#;
        assert_eq!(calculate_checksum(content), calculate_checksum(content));
        assert_ne!(
            calculate_checksum(content),
            calculate_checksum(r#"{"test": "other"}"#)
        );
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        store.write_json("payload.json", &Payload { value: 7 }).unwrap();
        let read: Payload = store.read_json("payload.json").unwrap();
        assert_eq!(read, Payload { value: 7 });
    }

    #[test]
    fn test_unchanged_write_is_skipped() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());

        store.write_json("payload.json", &Payload { value: 7 }).unwrap();
        let mtime = fs::metadata(store.path_of("payload.json"))
            .unwrap()
            .modified()
            .unwrap();

        store.write_json("payload.json", &Payload { value: 7 }).unwrap();
        let mtime_after = fs::metadata(store.path_of("payload.json"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(mtime, mtime_after);
    }

    #[test]
    fn test_missing_artifact_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let store = ArtifactStore::new(dir.path());
        let err = store.read_json::<Payload>("absent.json").unwrap_err();
        assert!(err.is_unavailable());
    }
}
