//! In-memory fakes and runtime drivers shared by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{timeout, timeout_at, Instant};

use moviescout::catalog::{CatalogApi, CatalogPage};
use moviescout::storage::{CounterStore, SearchCounterRecord};
use moviescout::worker::Runtime;
use moviescout::{Config, MovieScoutError, MovieSummary, Result};

/// What the fake catalog answers for one term.
#[derive(Debug, Clone)]
pub enum Reply {
    Movies(Vec<MovieSummary>),
    Status(u16),
}

#[derive(Debug, Clone)]
struct Scripted {
    delay: Duration,
    reply: Reply,
}

/// Catalog answering from a per-term script; unscripted terms get an empty page.
/// The popular listing is scripted under the empty term.
#[derive(Debug, Default)]
pub struct FakeCatalog {
    script: Mutex<HashMap<String, Scripted>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, term: &str, reply: Reply) {
        self.respond_after(term, Duration::ZERO, reply);
    }

    pub fn respond_after(&self, term: &str, delay: Duration, reply: Reply) {
        self.script
            .lock()
            .unwrap()
            .insert(term.to_string(), Scripted { delay, reply });
    }

    /// Terms requested so far, in order; `""` is the popular listing.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, term: &str) -> Result<CatalogPage> {
        self.calls.lock().unwrap().push(term.to_string());
        let scripted = self.script.lock().unwrap().get(term).cloned();

        let Some(Scripted { delay, reply }) = scripted else {
            return Ok(CatalogPage::of(vec![]));
        };
        tokio::time::sleep(delay).await;
        match reply {
            Reply::Movies(movies) => Ok(CatalogPage::of(movies)),
            Reply::Status(status) => Err(MovieScoutError::CatalogStatus { status }),
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn search_movies(&self, term: &str) -> Result<CatalogPage> {
        self.answer(term).await
    }

    async fn list_popular(&self) -> Result<CatalogPage> {
        self.answer("").await
    }
}

/// Counter store recording increments and serving a fixed top list.
#[derive(Debug, Default)]
pub struct FakeStore {
    increments: Mutex<Vec<(String, i64)>>,
    top: Mutex<Vec<SearchCounterRecord>>,
    failing: AtomicBool,
    list_calls: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let store = Self::default();
        store.failing.store(true, Ordering::SeqCst);
        Arc::new(store)
    }

    pub fn with_top(records: Vec<SearchCounterRecord>) -> Arc<Self> {
        let store = Self::default();
        *store.top.lock().unwrap() = records;
        Arc::new(store)
    }

    pub fn increments(&self) -> Vec<(String, i64)> {
        self.increments.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CounterStore for FakeStore {
    async fn increment_search_count(&self, term: &str, movie: &MovieSummary) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MovieScoutError::Storage("store offline".to_string()));
        }
        self.increments.lock().unwrap().push((term.to_string(), movie.id));
        Ok(())
    }

    async fn list_top_searches(&self, limit: usize) -> Result<Vec<SearchCounterRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(MovieScoutError::Storage("store offline".to_string()));
        }
        Ok(self.top.lock().unwrap().iter().take(limit).cloned().collect())
    }
}

pub fn record(term: &str, count: u32) -> SearchCounterRecord {
    let mut record = SearchCounterRecord::new(term, &MovieSummary::new(i64::from(count), term));
    record.count = count;
    record
}

pub fn runtime(config: &Config, catalog: &Arc<FakeCatalog>, store: &Arc<FakeStore>) -> Runtime {
    Runtime::new(config, catalog.clone(), store.clone())
}

/// Processes events until none arrives within a generous window, i.e. until
/// every timer and background task has finished.
pub async fn settle(runtime: &mut Runtime) {
    loop {
        match timeout(Duration::from_secs(60), runtime.step()).await {
            Ok(Ok(Some(_))) => {}
            Ok(Ok(None)) | Err(_) => break,
            Ok(Err(e)) => panic!("event handling failed: {e}"),
        }
    }
}

/// Processes events for `duration` of (paused) time.
pub async fn run_for(runtime: &mut Runtime, duration: Duration) {
    let deadline = Instant::now() + duration;
    loop {
        match timeout_at(deadline, runtime.step()).await {
            Ok(Ok(Some(_))) => {}
            Ok(Ok(None)) | Err(_) => break,
            Ok(Err(e)) => panic!("event handling failed: {e}"),
        }
    }
}

/// Types `text` one character at a time, `gap` apart.
pub async fn type_slowly(runtime: &mut Runtime, text: &str, gap: Duration) {
    let mut term = String::new();
    for c in text.chars() {
        term.push(c);
        runtime
            .dispatch(&moviescout::Event::SearchTermChanged(term.clone()))
            .unwrap();
        run_for(runtime, gap).await;
    }
}
