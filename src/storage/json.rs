//! JSON file-based counter store.
//!
//! This module provides a simple, human-readable counter store using JSON
//! serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! # Performance Characteristics
//!
//! - **Read**: loads entire file into memory once
//! - **Write**: serializes and writes the entire dataset on every increment
//! - **Best for**: a single user's search history

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{MovieScoutError, MovieSummary, Result};
use crate::storage::backend::CounterStore;
use crate::storage::models::{sort_by_count, SearchCounterRecord};

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// All counters, keyed by search term.
    #[serde(default)]
    searches: HashMap<String, SearchCounterRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: 1,
            searches: HashMap::new(),
        }
    }
}

/// In-memory cache plus dirty flag, guarded together.
#[derive(Debug)]
struct Inner {
    data: StorageData,
    dirty: bool,
}

/// JSON file counter store.
///
/// The entire dataset is kept in memory and persisted on every modification.
/// File writes run on tokio's blocking pool while the async lock is held.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "searches": {
///     "batman": {
///       "search_term": "batman",
///       "count": 3,
///       "movie_id": 268,
///       "poster_url": "https://image.tmdb.org/t/p/w500/abc.jpg",
///       "created_at": 1700000000,
///       "updated_at": 1700000300
///     }
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonCounterStore {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    inner: Mutex<Inner>,
}

impl JsonCounterStore {
    /// Creates or opens a JSON counter store.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the
    /// file is created on the first write. Parent directories are created
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON counter store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty counter store");
            StorageData::default()
        };

        tracing::debug!(search_count = data.searches.len(), "counter store initialized");

        Ok(Self {
            file_path,
            inner: Mutex::new(Inner { data, dirty: false }),
        })
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| MovieScoutError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            searches = data.searches.len(),
            "loaded counter data"
        );

        Ok(data)
    }

    fn encode(data: &StorageData) -> Result<String> {
        serde_json::to_string_pretty(data)
            .map_err(|e| MovieScoutError::Storage(format!("failed to serialize JSON: {e}")))
    }

    /// Writes to a temporary file first, then renames it over the target path.
    fn write_atomic(file_path: &Path, json: &str) -> Result<()> {
        let tmp_path = file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, file_path)?;
        Ok(())
    }

    /// Saves dirty data to disk on the blocking pool.
    ///
    /// The caller keeps holding the lock, so writes land in increment order.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename fails.
    async fn persist(&self, inner: &mut Inner) -> Result<()> {
        if !inner.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = Self::encode(&inner.data)?;
        let file_path = self.file_path.clone();
        tokio::task::spawn_blocking(move || Self::write_atomic(&file_path, &json))
            .await
            .map_err(|e| MovieScoutError::Storage(format!("counter write task failed: {e}")))??;

        inner.dirty = false;
        tracing::debug!(path = ?self.file_path, "counter store saved");
        Ok(())
    }
}

#[async_trait]
impl CounterStore for JsonCounterStore {
    #[tracing::instrument(name = "json_increment_search_count", level = "debug", skip(self, movie), fields(movie_id = movie.id))]
    async fn increment_search_count(&self, term: &str, movie: &MovieSummary) -> Result<()> {
        let mut inner = self.inner.lock().await;

        let count = if let Some(existing) = inner.data.searches.get_mut(term) {
            existing.bump(movie);
            existing.count
        } else {
            inner
                .data
                .searches
                .insert(term.to_string(), SearchCounterRecord::new(term, movie));
            1
        };

        inner.dirty = true;
        self.persist(&mut inner).await?;

        tracing::debug!(count = count, "search count recorded");
        Ok(())
    }

    #[tracing::instrument(name = "json_list_top_searches", level = "debug", skip(self))]
    async fn list_top_searches(&self, limit: usize) -> Result<Vec<SearchCounterRecord>> {
        let mut records: Vec<SearchCounterRecord> =
            self.inner.lock().await.data.searches.values().cloned().collect();
        sort_by_count(&mut records);
        records.truncate(limit);

        tracing::debug!(count = records.len(), "retrieved top searches");
        Ok(records)
    }
}

impl Drop for JsonCounterStore {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        if inner.dirty {
            tracing::debug!("saving dirty data on drop");
            let saved = Self::encode(&inner.data).and_then(|json| Self::write_atomic(&self.file_path, &json));
            if let Err(e) = saved {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
