//! Storage record models for the counter store.
//!
//! These types are separate from the domain models to keep a clear boundary
//! between what is persisted and what the orchestration core works with.

use serde::{Deserialize, Serialize};

use crate::domain::{MovieSummary, TrendingEntry};

/// Per-term search counter as persisted by a counter store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCounterRecord {
    /// The search term, used as given as the record key.
    pub search_term: String,

    /// Number of successful searches recorded for the term.
    pub count: u32,

    /// Catalog id of the top result of the most recent search.
    pub movie_id: i64,

    /// Poster of the top result of the most recent search.
    pub poster_url: Option<String>,

    /// Unix timestamp when the term was first recorded.
    pub created_at: i64,

    /// Unix timestamp of the most recent increment.
    pub updated_at: i64,
}

impl SearchCounterRecord {
    /// Creates a first-time record with `count = 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviescout::storage::SearchCounterRecord;
    /// use moviescout::MovieSummary;
    ///
    /// let record = SearchCounterRecord::new("batman", &MovieSummary::new(1, "Batman"));
    /// assert_eq!(record.count, 1);
    /// assert_eq!(record.movie_id, 1);
    /// ```
    #[must_use]
    pub fn new(search_term: impl Into<String>, movie: &MovieSummary) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            search_term: search_term.into(),
            count: 1,
            movie_id: movie.id,
            poster_url: movie.poster_url(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Counts one more search and re-associates the record with `movie`.
    pub fn bump(&mut self, movie: &MovieSummary) {
        self.count = self.count.saturating_add(1);
        self.movie_id = movie.id;
        self.poster_url = movie.poster_url();
        self.updated_at = chrono::Utc::now().timestamp();
    }

    /// Converts the record into a trending entry at the given 1-based rank.
    #[must_use]
    pub fn into_trending(self, rank: usize) -> TrendingEntry {
        TrendingEntry {
            rank,
            term: self.search_term,
            movie_id: self.movie_id,
            poster_url: self.poster_url,
        }
    }
}

/// Orders records for the trending list: highest count first, most recently
/// updated first among equal counts.
pub fn sort_by_count(records: &mut [SearchCounterRecord]) {
    records.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.updated_at.cmp(&a.updated_at))
    });
}
