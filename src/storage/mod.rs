//! Persistent Store: the history log and favorites set.
//!
//! Handlers depend on the [`WeatherStore`] trait rather than on file paths, so
//! tests can run against [`MemoryStore`] while production uses [`FileStore`].
//!
//! `FileStore` performs whole-file read-modify-write with no atomic rename and
//! no cross-process locking; a crash mid-write can corrupt a file and two
//! processes sharing the same directory can lose updates. Known limitation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Local;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Error, Result};
use crate::provider::WeatherSnapshot;

/// One past weather query. Append-only; entries are never mutated or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// City that was queried.
    pub city: String,
    /// Temperature at query time, degrees Celsius.
    pub temperature: f64,
    /// Condition description at query time.
    pub description: String,
    /// ISO-8601 local creation time.
    pub timestamp: String,
}

impl HistoryEntry {
    /// Record a snapshot with the current local time.
    pub fn record(snapshot: &WeatherSnapshot) -> Self {
        Self {
            city: snapshot.city.clone(),
            temperature: snapshot.temperature,
            description: snapshot.description.clone(),
            timestamp: Local::now().to_rfc3339(),
        }
    }
}

/// Persistence interface for the history log and favorites set.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Load the full history collection.
    async fn load_history(&self) -> Result<Vec<HistoryEntry>>;

    /// Replace the full history collection.
    async fn save_history(&self, entries: &[HistoryEntry]) -> Result<()>;

    /// Load the full favorites collection.
    async fn load_favorites(&self) -> Result<Vec<String>>;

    /// Replace the full favorites collection.
    async fn save_favorites(&self, favorites: &[String]) -> Result<()>;
}

/// Store backed by two JSON files.
///
/// Both files must pre-exist and contain valid JSON; absence or corruption
/// surfaces as [`Error::Storage`] at first use and is never auto-repaired.
#[derive(Debug, Clone)]
pub struct FileStore {
    history_path: PathBuf,
    favorites_path: PathBuf,
}

impl FileStore {
    /// Create a store over explicit file paths.
    pub fn new(history_path: impl Into<PathBuf>, favorites_path: impl Into<PathBuf>) -> Self {
        Self {
            history_path: history_path.into(),
            favorites_path: favorites_path.into(),
        }
    }

    /// Create a store over `history.json` and `favorites.json` in a directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("history.json"), dir.join("favorites.json"))
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::storage(format!("failed to read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::storage(format!("invalid JSON in {}: {e}", path.display())))
    }

    async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        let raw = serde_json::to_string_pretty(value)?;
        tokio::fs::write(path, raw)
            .await
            .map_err(|e| Error::storage(format!("failed to write {}: {e}", path.display())))
    }
}

#[async_trait]
impl WeatherStore for FileStore {
    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Self::read_json(&self.history_path).await
    }

    async fn save_history(&self, entries: &[HistoryEntry]) -> Result<()> {
        Self::write_json(&self.history_path, &entries).await
    }

    async fn load_favorites(&self) -> Result<Vec<String>> {
        Self::read_json(&self.favorites_path).await
    }

    async fn save_favorites(&self, favorites: &[String]) -> Result<()> {
        Self::write_json(&self.favorites_path, &favorites).await
    }
}

/// In-memory store. Primarily a test double for the dispatcher suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    history: RwLock<Vec<HistoryEntry>>,
    favorites: RwLock<Vec<String>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn load_history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self.history.read().await.clone())
    }

    async fn save_history(&self, entries: &[HistoryEntry]) -> Result<()> {
        *self.history.write().await = entries.to_vec();
        Ok(())
    }

    async fn load_favorites(&self) -> Result<Vec<String>> {
        Ok(self.favorites.read().await.clone())
    }

    async fn save_favorites(&self, favorites: &[String]) -> Result<()> {
        *self.favorites.write().await = favorites.to_vec();
        Ok(())
    }
}
