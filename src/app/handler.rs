//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes input, timer and
//! completion events, translating them into state changes and action
//! sequences. It is the only code that writes [`AppState`].
//!
//! # Architecture
//!
//! 1. Events arrive from the input source or from background tasks
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Trigger Policy
//!
//! A debounced term triggers a fetch only when it differs from the previous
//! debounced term and is either empty (popular listing) or at least
//! [`MIN_SEARCH_TERM_LEN`] characters long. One and two character terms are
//! ignored outright.

use crate::app::{Action, AppState};
use crate::catalog::{build, QueryDescriptor};
use crate::domain::error::Result;
use crate::domain::{MovieSummary, TrendingEntry};

/// Shortest non-empty term that is sent to the catalog.
pub const MIN_SEARCH_TERM_LEN: usize = 3;

/// Result of a background catalog fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The catalog answered with a (possibly empty) result list.
    Loaded(Vec<MovieSummary>),

    /// The catalog was unreachable or answered with a non-success status.
    Failed {
        /// Underlying cause, for logging only.
        cause: String,
    },
}

/// Events triggered by input, timers, or background task completions.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Session start: loads trending and fetches the popular listing.
    Started,

    /// The search box now holds this text.
    SearchTermChanged(String),

    /// The search term has been stable for the quiet period.
    DebounceElapsed(String),

    /// A catalog fetch issued by an [`Action::Fetch`] finished.
    FetchCompleted {
        generation: u64,
        descriptor: QueryDescriptor,
        outcome: FetchOutcome,
    },

    /// The trending loader finished; empty on failure.
    TrendingLoaded(Vec<TrendingEntry>),

    /// The input source is exhausted. A term still waiting out its quiet
    /// period is acted on at once, and the session stops when the latest
    /// fetch has completed.
    InputClosed,

    /// Stop processing events.
    Quit,
}

/// Whether a debounced term is worth a catalog request.
///
/// # Examples
///
/// ```
/// use moviescout::app::should_fetch;
///
/// assert!(should_fetch(""));
/// assert!(!should_fetch("du"));
/// assert!(should_fetch("dun"));
/// ```
#[must_use]
pub fn should_fetch(term: &str) -> bool {
    let len = term.chars().count();
    len == 0 || len >= MIN_SEARCH_TERM_LEN
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// A tuple of whether presentation should re-render and the actions to run
/// in sequence.
///
/// # Errors
///
/// Reserved for transitions that cannot be applied; none of the current
/// events fail.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Started => {
            if state.started {
                tracing::debug!("session already started");
                return Ok((false, vec![]));
            }
            state.started = true;

            let descriptor = build(&state.debounced_term);
            let generation = state.begin_fetch();
            tracing::debug!(generation = generation, "session started");

            Ok((
                true,
                vec![
                    Action::LoadTrending,
                    Action::Fetch {
                        generation,
                        descriptor,
                    },
                ],
            ))
        }
        Event::SearchTermChanged(term) => {
            tracing::trace!(term = %term, "search term updated");
            state.search_term.clone_from(term);
            Ok((true, vec![Action::ScheduleDebounce { term: term.clone() }]))
        }
        Event::DebounceElapsed(term) => Ok(apply_debounced(state, term)),
        Event::FetchCompleted {
            generation,
            descriptor,
            outcome,
        } => {
            let is_latest = *generation == state.latest_generation;
            if is_latest {
                state.settle(*generation);
            }
            let finishing = is_latest && state.input_closed;

            let (render, mut actions) = apply_completion(state, *generation, descriptor, outcome);
            if finishing {
                tracing::debug!("latest fetch landed after input closed");
                actions.push(Action::Quit);
            }
            Ok((render, actions))
        }
        Event::TrendingLoaded(entries) => {
            if state.trending_loaded {
                tracing::debug!("trending already loaded, ignoring");
                return Ok((false, vec![]));
            }
            state.trending_loaded = true;
            state.trending_movies.clone_from(entries);
            Ok((true, vec![]))
        }
        Event::InputClosed => {
            state.input_closed = true;

            let pending = state.search_term.clone();
            let (render, mut actions) = if pending == state.debounced_term {
                (false, vec![])
            } else {
                tracing::debug!(term = %pending, "flushing pending term on input close");
                apply_debounced(state, &pending)
            };

            if !state.fetch_pending() {
                actions.push(Action::Quit);
            }
            Ok((render, actions))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// Applies a term that has been stable for the quiet period.
fn apply_debounced(state: &mut AppState, term: &str) -> (bool, Vec<Action>) {
    if term == state.debounced_term {
        tracing::debug!("debounced term unchanged");
        return (false, vec![]);
    }
    state.debounced_term = term.to_string();

    if !should_fetch(term) {
        tracing::debug!(term = %term, "term below minimum length, fetch suppressed");
        return (false, vec![]);
    }

    let descriptor = build(term);
    let generation = state.begin_fetch();
    tracing::debug!(
        generation = generation,
        mode = ?descriptor.mode(),
        "fetch scheduled"
    );

    (
        true,
        vec![Action::Fetch {
            generation,
            descriptor,
        }],
    )
}

/// Applies a fetch completion unless it is stale.
fn apply_completion(
    state: &mut AppState,
    generation: u64,
    descriptor: &QueryDescriptor,
    outcome: &FetchOutcome,
) -> (bool, Vec<Action>) {
    if !state.accepts(generation) {
        tracing::debug!(
            generation = generation,
            latest = state.latest_generation,
            "discarding stale fetch result"
        );
        return (false, vec![]);
    }

    match outcome {
        FetchOutcome::Loaded(movies) => {
            tracing::debug!(result_count = movies.len(), "fetch succeeded");
            state.apply_results(movies.clone());

            let actions = match movies.first() {
                Some(top) if descriptor.is_search() => vec![Action::RecordSearch {
                    term: descriptor.term().to_string(),
                    movie: top.clone(),
                }],
                _ => vec![],
            };
            (true, actions)
        }
        FetchOutcome::Failed { cause } => {
            tracing::error!(cause = %cause, term = %descriptor.term(), "Error fetching movies");
            state.apply_failure();
            (true, vec![])
        }
    }
}
