//! Fire-and-forget recording of successful searches.
//!
//! Every successful, non-empty search adds one to its term's counter. The
//! write runs as a detached task; its failure is logged and never reaches the
//! user or the application state.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::Instrument;

use crate::domain::MovieSummary;
use crate::storage::CounterStore;

/// Increments the counter for `term`, logging instead of propagating failures.
pub async fn record(store: &dyn CounterStore, term: &str, movie: &MovieSummary) {
    match store.increment_search_count(term, movie).await {
        Ok(()) => {
            tracing::debug!(term = %term, movie_id = movie.id, "search count recorded");
        }
        Err(e) => {
            tracing::warn!(error = %e, term = %term, "failed to record search count");
        }
    }
}

/// Spawns [`record`] onto `tasks` without waiting for it.
pub fn spawn(tasks: &mut JoinSet<()>, store: Arc<dyn CounterStore>, term: String, movie: MovieSummary) {
    let span = tracing::debug_span!("record_search", term = %term, movie_id = movie.id);
    tasks.spawn(
        async move {
            record(store.as_ref(), &term, &movie).await;
        }
        .instrument(span),
    );
}
