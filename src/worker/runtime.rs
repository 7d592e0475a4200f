//! Event loop owning the application state and executing actions.
//!
//! The [`Runtime`] is the single writer of [`AppState`]. Input and background
//! completions arrive as [`Event`]s on one channel; each is handed to
//! [`handle_event`] and the returned [`Action`]s are executed here, spawning
//! tasks that report back through the same channel.
//!
//! ```text
//! RuntimeHandle ─┐
//! Debouncer ─────┼──► events ──► handle_event ──► actions ──► tasks
//! fetch tasks ───┤                                              │
//! trending task ─┘◄─────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::Instrument;

use crate::app::{handle_event, Action, AppState, Event};
use crate::catalog::CatalogApi;
use crate::domain::{MovieScoutError, Result};
use crate::storage::CounterStore;
use crate::ui::viewmodel::RenderState;
use crate::worker::debounce::Debouncer;
use crate::worker::{aggregator, fetch, trending};
use crate::Config;

/// Cloneable input side of a [`Runtime`].
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    sender: mpsc::UnboundedSender<Event>,
}

impl RuntimeHandle {
    /// Reports new search box contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime has been dropped.
    pub fn set_search_term(&self, term: impl Into<String>) -> Result<()> {
        self.send(Event::SearchTermChanged(term.into()))
    }

    /// Reports that no more search terms will arrive.
    ///
    /// A term still inside its quiet period is searched right away and the
    /// runtime stops once that search has completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime has been dropped.
    pub fn finish(&self) -> Result<()> {
        self.send(Event::InputClosed)
    }

    /// Asks the runtime to stop after the events already queued.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime has been dropped.
    pub fn quit(&self) -> Result<()> {
        self.send(Event::Quit)
    }

    fn send(&self, event: Event) -> Result<()> {
        self.sender
            .send(event)
            .map_err(|_| MovieScoutError::Runtime("runtime is no longer running".to_string()))
    }
}

/// Search session event loop.
pub struct Runtime {
    state: AppState,
    catalog: Arc<dyn CatalogApi>,
    store: Arc<dyn CounterStore>,
    trending_limit: usize,
    debouncer: Debouncer<Event>,
    sender: mpsc::UnboundedSender<Event>,
    events: mpsc::UnboundedReceiver<Event>,
    fetches: JoinSet<()>,
    recordings: JoinSet<()>,
    stopped: bool,
}

impl Runtime {
    /// Creates an idle runtime; nothing happens until [`Event::Started`] is
    /// dispatched.
    #[must_use]
    pub fn new(config: &Config, catalog: Arc<dyn CatalogApi>, store: Arc<dyn CounterStore>) -> Self {
        let (sender, events) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config.discard_stale_responses),
            catalog,
            store,
            trending_limit: config.trending_limit,
            debouncer: Debouncer::new(config.debounce_period(), sender.clone()),
            sender,
            events,
            fetches: JoinSet::new(),
            recordings: JoinSet::new(),
            stopped: false,
        }
    }

    #[must_use]
    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            sender: self.sender.clone(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn render_state(&self) -> RenderState {
        self.state.render_state()
    }

    /// Whether a [`Action::Quit`] has been executed.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Handles one event and executes the resulting actions.
    ///
    /// Returns whether presentation should re-render.
    ///
    /// # Errors
    ///
    /// Returns an error if the event handler rejects the event.
    pub fn dispatch(&mut self, event: &Event) -> Result<bool> {
        let (should_render, actions) = handle_event(&mut self.state, event)?;
        tracing::debug!(
            action_count = actions.len(),
            should_render = should_render,
            "event handled successfully"
        );

        for action in actions {
            self.execute_action(action);
        }
        Ok(should_render)
    }

    /// Waits for the next event and dispatches it.
    ///
    /// Returns `Ok(None)` once the runtime has stopped, otherwise the render
    /// flag of the processed event. Cancel safe.
    ///
    /// # Errors
    ///
    /// Returns an error if the event handler rejects the event.
    pub async fn step(&mut self) -> Result<Option<bool>> {
        if self.stopped {
            return Ok(None);
        }
        self.reap_finished();

        let Some(event) = self.events.recv().await else {
            return Ok(None);
        };
        let should_render = self.dispatch(&event)?;

        if self.stopped {
            Ok(None)
        } else {
            Ok(Some(should_render))
        }
    }

    /// Stops the runtime: cancels the debounce timer, abandons in-flight
    /// fetches and waits for pending search recordings to land.
    pub async fn shutdown(mut self) {
        self.debouncer.cancel();
        self.fetches.shutdown().await;

        let pending = self.recordings.len();
        tracing::debug!(pending = pending, "waiting for search recordings");
        while let Some(result) = self.recordings.join_next().await {
            if let Err(e) = result {
                tracing::warn!(error = %e, "search recording task failed");
            }
        }
    }

    #[tracing::instrument(skip(self), level = "debug")]
    fn execute_action(&mut self, action: Action) {
        match action {
            Action::ScheduleDebounce { term } => {
                self.debouncer.observe(Event::DebounceElapsed(term));
            }
            Action::Fetch { generation, descriptor } => {
                let catalog = Arc::clone(&self.catalog);
                let sender = self.sender.clone();
                let span = tracing::debug_span!(
                    "fetch_movies",
                    generation = generation,
                    mode = ?descriptor.mode()
                );

                self.fetches.spawn(
                    async move {
                        let outcome = fetch::run(catalog.as_ref(), &descriptor).await;
                        let event = Event::FetchCompleted {
                            generation,
                            descriptor,
                            outcome,
                        };
                        if sender.send(event).is_err() {
                            tracing::debug!("runtime gone, dropping fetch result");
                        }
                    }
                    .instrument(span),
                );
            }
            Action::RecordSearch { term, movie } => {
                aggregator::spawn(&mut self.recordings, Arc::clone(&self.store), term, movie);
            }
            Action::LoadTrending => {
                let store = Arc::clone(&self.store);
                let sender = self.sender.clone();
                let limit = self.trending_limit;

                self.fetches.spawn(
                    async move {
                        let entries = trending::load_once(store.as_ref(), limit).await;
                        if sender.send(Event::TrendingLoaded(entries)).is_err() {
                            tracing::debug!("runtime gone, dropping trending list");
                        }
                    }
                    .in_current_span(),
                );
            }
            Action::Quit => {
                tracing::debug!("runtime stopping");
                self.debouncer.cancel();
                self.stopped = true;
            }
        }
    }

    fn reap_finished(&mut self) {
        while let Some(result) = self.fetches.try_join_next() {
            if let Err(e) = result {
                tracing::warn!(error = %e, "background task failed");
            }
        }
        while let Some(result) = self.recordings.try_join_next() {
            if let Err(e) = result {
                tracing::warn!(error = %e, "search recording task failed");
            }
        }
    }
}
