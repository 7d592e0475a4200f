//! Actions representing side effects to be executed by the runtime.
//!
//! This module defines the [`Action`] type, which represents imperative commands
//! produced by the event handler after processing input or completion events.
//! Actions bridge pure state transitions and effectful operations like timers,
//! catalog requests, and counter store writes.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! [`Runtime`](crate::worker::Runtime) executes them in order; none of them
//! touches [`AppState`](crate::app::AppState) directly, results come back as
//! new events.

use crate::catalog::QueryDescriptor;
use crate::domain::MovieSummary;

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// (Re)starts the debounce timer for the latest search term, cancelling
    /// any pending one.
    ScheduleDebounce {
        /// Search term to emit once the quiet period elapses.
        term: String,
    },

    /// Runs a catalog query in the background.
    Fetch {
        /// Generation tag the completion must carry back.
        generation: u64,
        /// What to ask the catalog.
        descriptor: QueryDescriptor,
    },

    /// Records a successful search in the counter store, fire-and-forget.
    RecordSearch {
        /// The search term, as typed.
        term: String,
        /// Top result of the search.
        movie: MovieSummary,
    },

    /// Loads the trending list from the counter store.
    LoadTrending,

    /// Stops the event loop.
    Quit,
}
