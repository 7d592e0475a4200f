//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single state container of a search
//! session. It is the single source of truth for everything presentation sees.
//!
//! # Single Writer
//!
//! Every field is written only by [`handle_event`](crate::app::handle_event)
//! running on the runtime's event loop. Background tasks never hold a
//! reference to the state; they post completion events instead. The fetch
//! fields (`load_state`, `error_message`, `movie_list`) change only through
//! [`AppState::begin_fetch`], [`AppState::apply_results`] and
//! [`AppState::apply_failure`].
//!
//! # Generations
//!
//! Each fetch gets a generation number one higher than the previous. With
//! `discard_stale_responses` enabled, a completion is applied only if it
//! carries the latest generation, so a slow response for an old term cannot
//! overwrite a newer one.

use crate::app::load::{LoadState, FETCH_ERROR_MESSAGE};
use crate::domain::{MovieSummary, TrendingEntry};
use crate::ui::viewmodel::{MovieCard, MovieSection, RenderState, TrendingItem, UIViewModel};

/// Central application state container.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Live search box contents, updated on every keystroke.
    pub search_term: String,

    /// Last search term that stayed unchanged for the quiet period.
    pub debounced_term: String,

    /// Current result set; replaced only by a successful fetch.
    pub movie_list: Vec<MovieSummary>,

    /// Trending list, set once per session.
    pub trending_movies: Vec<TrendingEntry>,

    pub load_state: LoadState,

    /// Present only while `load_state` is [`LoadState::Error`].
    pub error_message: Option<String>,

    /// Generation of the most recently issued fetch, 0 before the first.
    pub latest_generation: u64,

    /// Highest generation whose completion has arrived.
    pub settled_generation: u64,

    /// Whether completions of superseded fetches are dropped.
    pub discard_stale_responses: bool,

    /// Set by the first `Started` event.
    pub started: bool,

    /// Set once the trending list has been applied.
    pub trending_loaded: bool,

    /// No further search terms will arrive; quit once the latest fetch lands.
    pub input_closed: bool,
}

impl AppState {
    /// Creates an idle state with empty terms and results.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviescout::{AppState, LoadState};
    ///
    /// let state = AppState::new(true);
    /// assert_eq!(state.load_state, LoadState::Idle);
    /// assert!(state.debounced_term.is_empty());
    /// ```
    #[must_use]
    pub const fn new(discard_stale_responses: bool) -> Self {
        Self {
            search_term: String::new(),
            debounced_term: String::new(),
            movie_list: Vec::new(),
            trending_movies: Vec::new(),
            load_state: LoadState::Idle,
            error_message: None,
            latest_generation: 0,
            settled_generation: 0,
            discard_stale_responses,
            started: false,
            trending_loaded: false,
            input_closed: false,
        }
    }

    /// Enters `Loading` for a new fetch and returns its generation.
    ///
    /// Clears the error message; the result set is left as it is until the
    /// fetch completes.
    pub fn begin_fetch(&mut self) -> u64 {
        self.error_message = None;
        self.load_state = LoadState::Loading;
        self.latest_generation += 1;
        self.latest_generation
    }

    /// Marks the completion of `generation` as arrived.
    pub fn settle(&mut self, generation: u64) {
        self.settled_generation = self.settled_generation.max(generation);
    }

    /// Whether the most recently issued fetch is still outstanding.
    ///
    /// Unlike `load_state`, this is not fooled by a stale completion applied
    /// with the guard disabled.
    #[must_use]
    pub const fn fetch_pending(&self) -> bool {
        self.settled_generation < self.latest_generation
    }

    /// Whether a completion tagged `generation` should be applied.
    #[must_use]
    pub const fn accepts(&self, generation: u64) -> bool {
        !self.discard_stale_responses || generation == self.latest_generation
    }

    /// Replaces the result set and enters `Success`.
    pub fn apply_results(&mut self, movies: Vec<MovieSummary>) {
        self.movie_list = movies;
        self.error_message = None;
        self.load_state = LoadState::Success;
    }

    /// Enters `Error` with the fixed user-facing message, keeping the result set.
    pub fn apply_failure(&mut self) {
        self.error_message = Some(FETCH_ERROR_MESSAGE.to_string());
        self.load_state = LoadState::Error;
    }

    /// Snapshot of the fields presentation renders from.
    #[must_use]
    pub fn render_state(&self) -> RenderState {
        RenderState {
            movie_list: self.movie_list.clone(),
            trending_movies: self.trending_movies.clone(),
            is_loading: self.load_state.is_loading(),
            error_message: self.error_message.clone(),
            search_term: self.search_term.clone(),
        }
    }

    /// Computes the display-ready view model.
    ///
    /// The movie section follows the screen's precedence: a spinner while
    /// loading, else the error message if any, else the cards.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let movies = if self.load_state.is_loading() {
            MovieSection::Loading
        } else if let Some(message) = &self.error_message {
            MovieSection::Error(message.clone())
        } else {
            MovieSection::Cards(self.movie_list.iter().map(Self::compute_card).collect())
        };

        let trending = self
            .trending_movies
            .iter()
            .map(|entry| TrendingItem {
                rank: entry.rank,
                term: entry.term.clone(),
                poster_url: entry.poster_url.clone(),
            })
            .collect();

        UIViewModel {
            search_term: self.search_term.clone(),
            trending,
            movies,
        }
    }

    fn compute_card(movie: &MovieSummary) -> MovieCard {
        let rating = movie
            .vote_average
            .filter(|v| *v > 0.0)
            .map_or_else(|| "N/A".to_string(), |v| format!("{v:.1}"));

        let year = movie
            .release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .filter(|year| !year.is_empty())
            .map_or_else(|| "N/A".to_string(), ToString::to_string);

        MovieCard {
            id: movie.id,
            title: movie.title.clone(),
            rating,
            language: movie.original_language.clone().unwrap_or_default(),
            year,
            poster_url: movie.poster_url(),
        }
    }
}
