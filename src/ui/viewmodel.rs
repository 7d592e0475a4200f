//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application state.
//! View models are optimized for rendering and contain pre-computed display
//! information like formatted ratings and poster URLs.
//!
//! # Architecture
//!
//! [`RenderState`] is the raw snapshot the orchestration core exposes to
//! presentation. [`UIViewModel`] is derived from the same state via
//! `AppState::compute_viewmodel()` and consumed by the renderer. Neither
//! contains business logic.

use crate::domain::{MovieSummary, TrendingEntry};

/// Snapshot of the state fields a presentation layer reads.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub movie_list: Vec<MovieSummary>,
    pub trending_movies: Vec<TrendingEntry>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub search_term: String,
}

/// Complete view model for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    /// Current search box contents.
    pub search_term: String,

    /// Trending section; hidden by the renderer when empty.
    pub trending: Vec<TrendingItem>,

    /// The "All Movies" section.
    pub movies: MovieSection,
}

/// One row of the trending section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingItem {
    /// 1-based position.
    pub rank: usize,
    pub term: String,
    pub poster_url: Option<String>,
}

/// What the movie section shows, in precedence order.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieSection {
    /// A fetch is in flight.
    Loading,

    /// The last fetch failed; carries the user-facing message.
    Error(String),

    /// Result cards, possibly none.
    Cards(Vec<MovieCard>),
}

/// Display information for a single movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,

    /// Vote average with one decimal, or `N/A`.
    pub rating: String,

    /// Original language code, empty if unknown.
    pub language: String,

    /// Release year, or `N/A`.
    pub year: String,

    /// Full poster URL; `None` means the placeholder image.
    pub poster_url: Option<String>,
}
