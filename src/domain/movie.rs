//! Movie and trending domain models.
//!
//! [`MovieSummary`] is the record the catalog returns for each title. The core
//! treats it as opaque: the handful of fields it names are typed for the view
//! model, everything else the catalog sends is kept in `extra` and passed
//! through untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Base URL the catalog's relative poster paths are resolved against.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// A single title as returned by the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: i64,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Relative poster path such as `/abc.jpg`, `None` when the title has no art.
    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub popularity: f64,

    #[serde(default)]
    pub vote_average: Option<f64>,

    /// Release date in `YYYY-MM-DD` form, empty or missing for unreleased titles.
    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub original_language: Option<String>,

    /// Every other field the catalog sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MovieSummary {
    /// Creates a summary carrying only an id and a title.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviescout::MovieSummary;
    ///
    /// let movie = MovieSummary::new(1, "Batman");
    /// assert_eq!(movie.title, "Batman");
    /// assert!(movie.poster_url().is_none());
    /// ```
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            popularity: 0.0,
            vote_average: None,
            release_date: None,
            original_language: None,
            extra: Map::new(),
        }
    }

    /// Sets the relative poster path.
    #[must_use]
    pub fn with_poster(mut self, poster_path: impl Into<String>) -> Self {
        self.poster_path = Some(poster_path.into());
        self
    }

    /// Returns the absolute poster URL, if the title has a poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
    }
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// One row of the trending list, ranked by how often its term was searched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingEntry {
    /// 1-based position in the order the counter store returned.
    pub rank: usize,

    /// The search term that was counted.
    pub term: String,

    /// Catalog id of the top result last associated with the term.
    pub movie_id: i64,

    /// Poster of the top result last associated with the term.
    pub poster_url: Option<String>,
}
