//! Counter store abstraction.
//!
//! This module defines the [`CounterStore`] trait that abstracts over the
//! analytics backends recording per-term search counts. The trait is minimal:
//! each method maps to exactly one use in the runtime (the aggregator and the
//! trending loader).

use async_trait::async_trait;

use crate::domain::{MovieSummary, Result};
use crate::storage::models::SearchCounterRecord;

/// Persistent per-term search counters.
///
/// Implementations are shared between concurrently running tasks behind an
/// `Arc`, hence `&self` receivers and the `Send + Sync` bound.
///
/// # Implementations
///
/// - [`JsonCounterStore`](crate::storage::JsonCounterStore): local JSON file with atomic writes
/// - [`AppwriteCounterStore`](crate::storage::AppwriteCounterStore): Appwrite-compatible REST document store
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increments the counter for `term`, creating it with `count = 1` when
    /// absent, and associates it with `movie`'s id and poster.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable or rejects the write.
    async fn increment_search_count(&self, term: &str, movie: &MovieSummary) -> Result<()>;

    /// Returns up to `limit` records ordered by count, descending.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    async fn list_top_searches(&self, limit: usize) -> Result<Vec<SearchCounterRecord>>;
}
