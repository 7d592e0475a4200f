//! MovieScout: debounced movie search with trending search tracking.
//!
//! MovieScout sits between a search box and a movie catalog:
//! - Keystrokes are debounced so only a term that stays unchanged for the
//!   quiet period reaches the catalog
//! - Terms of one or two characters never trigger a request; an empty term
//!   lists popular movies
//! - Every successful search bumps a per-term counter in a counter store
//! - The most searched terms are loaded once per session as a trending list
//! - Slow responses for superseded terms are discarded

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI shim (main.rs)                                 │  ← stdin / stdout
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Worker Layer (worker/)                             │  ← tokio runtime
//! │  - Event loop, debounce timer, background tasks     │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling and trigger policy                │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Catalog Layer │   │ Storage Layer │
//! │ (ui/)         │   │ (catalog/)    │   │ (storage/)    │
//! │ - View models │   │ - Query build │   │ - JSON file   │
//! │ - Text render │   │ - TMDB client │   │ - Appwrite    │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure & Observability             │
//! │  - Movie types and errors (domain/)                 │
//! │  - Data directory resolution (infrastructure/)      │
//! │  - File-based OTLP tracing (observability/)         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! [`Config`] is read from `~/.config/moviescout/config.toml` (or
//! `$MOVIESCOUT_CONFIG`) and then overridden by `MOVIESCOUT_*` environment
//! variables:
//!
//! ```toml
//! api_key = "..."
//! debounce_ms = 800
//! trending_limit = 5
//!
//! [appwrite]
//! endpoint = "https://cloud.appwrite.io/v1"
//! project_id = "..."
//! database_id = "..."
//! collection_id = "..."
//! ```
//!
//! # Example
//!
//! ```
//! use moviescout::{handle_event, Action, AppState, Event};
//!
//! let mut state = AppState::new(true);
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed("du".to_string()))?;
//! assert!(actions.is_empty());
//!
//! let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed("dune".to_string()))?;
//! assert!(matches!(actions[0], Action::Fetch { .. }));
//! # Ok::<(), moviescout::MovieScoutError>(())
//! ```

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

#[cfg(test)]
mod test_support;

pub use app::{handle_event, Action, AppState, Event, FetchOutcome, LoadState};
pub use domain::{MovieScoutError, MovieSummary, Result, TrendingEntry};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::catalog::DEFAULT_API_BASE_URL;
use crate::storage::AppwriteConfig;

/// Prefix of environment variables overriding configuration keys.
pub const ENV_PREFIX: &str = "MOVIESCOUT_";

/// Runtime configuration.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration (though the TMDB client needs `api_key` or
/// `api_read_token`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog API root. Default: `https://api.themoviedb.org/3`
    pub api_base_url: String,

    /// TMDB v3 API key, sent as the `api_key` query parameter.
    pub api_key: Option<String>,

    /// TMDB v4 read access token, sent as a bearer token.
    pub api_read_token: Option<String>,

    /// Quiet period before a search term is acted on. Default: 800
    pub debounce_ms: u64,

    /// Number of trending terms shown. Default: 5
    pub trending_limit: usize,

    /// Drop completions of superseded fetches. Default: `true`
    ///
    /// With `false`, whichever fetch completes last wins, even if it was
    /// issued for an older term.
    pub discard_stale_responses: bool,

    /// JSON counter file. Default: `<data_dir>/searches.json`
    pub store_path: Option<PathBuf>,

    /// Selects the Appwrite counter store instead of the JSON file.
    pub appwrite: Option<AppwriteConfig>,

    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Also log to stderr. Default: `false`
    pub log_to_stderr: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_key: None,
            api_read_token: None,
            debounce_ms: 800,
            trending_limit: 5,
            discard_stale_responses: true,
            store_path: None,
            appwrite: None,
            trace_level: None,
            log_to_stderr: false,
        }
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`MovieScoutError::Config`] if the document is malformed.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| MovieScoutError::Config(e.to_string()))
    }

    /// Loads the configuration file and applies environment overrides.
    ///
    /// `path`, else `$MOVIESCOUT_CONFIG`, names a file that must exist. With
    /// neither set the default location is used if it exists, otherwise the
    /// defaults are.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read, or if the
    /// file is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(infrastructure::get_explicit_config_file);
        let mut config = Self::read_file(explicit.as_deref(), &infrastructure::get_config_file())?;

        config.apply_overrides(&env_overrides());
        Ok(config)
    }

    fn read_file(explicit: Option<&Path>, fallback: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => path,
            None if fallback.exists() => fallback,
            None => return Ok(Self::default()),
        };

        tracing::debug!(path = ?path, "loading config file");
        let source = std::fs::read_to_string(path)
            .map_err(|e| MovieScoutError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    /// Applies string overrides keyed by field name.
    ///
    /// # Parsing Rules
    ///
    /// - `debounce_ms`, `trending_limit`: integers; unparsable values are ignored
    /// - `discard_stale_responses`, `log_to_stderr`: `true`/`false`/`1`/`0`
    /// - `api_key`, `api_read_token`, `trace_level`, `store_path`: empty clears
    /// - `appwrite_endpoint`, `appwrite_project_id`, `appwrite_database_id`,
    ///   `appwrite_collection_id`, `appwrite_api_key`: merged into `appwrite`
    ///   once endpoint, project, database and collection are all known
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use moviescout::Config;
    ///
    /// let mut overrides = BTreeMap::new();
    /// overrides.insert("debounce_ms".to_string(), "250".to_string());
    /// overrides.insert("trending_limit".to_string(), "many".to_string());
    ///
    /// let mut config = Config::default();
    /// config.apply_overrides(&overrides);
    /// assert_eq!(config.debounce_ms, 250);
    /// assert_eq!(config.trending_limit, 5);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        let text = |key: &str| overrides.get(key).map(|v| v.trim().to_string());
        let optional = |key: &str| text(key).map(|v| Some(v).filter(|v| !v.is_empty()));

        if let Some(url) = text("api_base_url").filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(key) = optional("api_key") {
            self.api_key = key;
        }
        if let Some(token) = optional("api_read_token") {
            self.api_read_token = token;
        }
        if let Some(level) = optional("trace_level") {
            self.trace_level = level;
        }
        if let Some(path) = optional("store_path") {
            self.store_path = path.map(|p| PathBuf::from(infrastructure::expand_tilde(&p)));
        }

        if let Some(value) = text("debounce_ms") {
            match value.parse() {
                Ok(ms) => self.debounce_ms = ms,
                Err(_) => tracing::debug!(value = %value, "ignoring invalid debounce_ms"),
            }
        }
        if let Some(value) = text("trending_limit") {
            match value.parse() {
                Ok(limit) => self.trending_limit = limit,
                Err(_) => tracing::debug!(value = %value, "ignoring invalid trending_limit"),
            }
        }
        if let Some(flag) = text("discard_stale_responses").and_then(|v| parse_flag(&v)) {
            self.discard_stale_responses = flag;
        }
        if let Some(flag) = text("log_to_stderr").and_then(|v| parse_flag(&v)) {
            self.log_to_stderr = flag;
        }

        self.apply_appwrite_overrides(overrides);
    }

    fn apply_appwrite_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        let get = |field: &str| {
            overrides
                .get(&format!("appwrite_{field}"))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let current = self.appwrite.as_ref();
        let pick = |field: &str, existing: Option<&String>| get(field).or_else(|| existing.cloned());

        let endpoint = pick("endpoint", current.map(|c| &c.endpoint));
        let project_id = pick("project_id", current.map(|c| &c.project_id));
        let database_id = pick("database_id", current.map(|c| &c.database_id));
        let collection_id = pick("collection_id", current.map(|c| &c.collection_id));
        let api_key = get("api_key").or_else(|| current.and_then(|c| c.api_key.clone()));

        if let (Some(endpoint), Some(project_id), Some(database_id), Some(collection_id)) =
            (endpoint, project_id, database_id, collection_id)
        {
            self.appwrite = Some(AppwriteConfig {
                endpoint,
                project_id,
                database_id,
                collection_id,
                api_key,
            });
        }
    }

    /// JSON counter file location.
    #[must_use]
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path
            .clone()
            .unwrap_or_else(|| infrastructure::get_data_dir().join("searches.json"))
    }

    #[must_use]
    pub const fn debounce_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Collects `MOVIESCOUT_*` environment variables as lowercase override keys.
#[must_use]
pub fn env_overrides() -> BTreeMap<String, String> {
    overrides_from_vars(std::env::vars())
}

fn overrides_from_vars(vars: impl IntoIterator<Item = (String, String)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(ENV_PREFIX)
                .map(|field| (field.to_ascii_lowercase(), value))
        })
        .collect()
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
