//! Storage layer for per-term search counters.
//!
//! This module provides the counter store abstraction the aggregator writes to
//! and the trending loader reads from, plus its two backends.
//!
//! # Modules
//!
//! - `backend`: `CounterStore` trait abstraction for backend implementations
//! - `json`: JSON file-based store
//! - `appwrite`: Appwrite-compatible REST document store
//! - `models`: Storage record types separate from domain models

pub mod appwrite;
pub mod backend;
pub mod json;
pub mod models;

pub use appwrite::{AppwriteConfig, AppwriteCounterStore};
pub use backend::CounterStore;
pub use json::JsonCounterStore;
pub use models::{sort_by_count, SearchCounterRecord};

use std::sync::Arc;

use crate::domain::Result;
use crate::Config;

/// Builds the counter store the configuration selects.
///
/// An `appwrite` section selects the REST backend; otherwise counters are kept
/// in the JSON file at [`Config::store_path`].
///
/// # Errors
///
/// Returns an error if the selected backend cannot be initialized.
pub fn open(config: &Config) -> Result<Arc<dyn CounterStore>> {
    if let Some(appwrite) = &config.appwrite {
        tracing::debug!(endpoint = %appwrite.endpoint, "using appwrite counter store");
        return Ok(Arc::new(AppwriteCounterStore::new(appwrite.clone())?));
    }

    let path = config.resolved_store_path();
    tracing::debug!(path = ?path, "using JSON counter store");
    Ok(Arc::new(JsonCounterStore::new(path)?))
}
