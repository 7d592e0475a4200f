//! One-shot load of the most searched terms.

use crate::domain::TrendingEntry;
use crate::storage::CounterStore;

/// Reads the top `limit` counters and ranks them from 1.
///
/// A failing store yields an empty list; the error is logged.
#[tracing::instrument(skip(store))]
pub async fn load_once(store: &dyn CounterStore, limit: usize) -> Vec<TrendingEntry> {
    match store.list_top_searches(limit).await {
        Ok(records) => {
            let entries: Vec<TrendingEntry> = records
                .into_iter()
                .take(limit)
                .enumerate()
                .map(|(index, record)| record.into_trending(index + 1))
                .collect();
            tracing::debug!(entry_count = entries.len(), "trending loaded");
            entries
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to load trending searches");
            Vec::new()
        }
    }
}
