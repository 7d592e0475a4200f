//! Fetch lifecycle state.
//!
//! # State Machine
//!
//! ```text
//! Idle ──► Loading ──► Success ──┐
//!             ▲    └─► Error ────┤
//!             └──── next fetch ◄─┘
//! ```
//!
//! Only the fetch path of the event handler moves between these states.

/// User-facing message shown whenever a catalog fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Error fetching movies. Please try again later.";

/// Lifecycle of the current catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No fetch has started yet.
    #[default]
    Idle,

    /// A fetch is in flight; the loading indicator is shown.
    Loading,

    /// The last applied fetch succeeded and replaced the result set.
    Success,

    /// The last applied fetch failed; the previous result set is kept.
    Error,
}

impl LoadState {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}
