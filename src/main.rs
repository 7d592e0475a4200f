//! Command-line entry point.
//!
//! Thin shell around the library: every line read from stdin is taken as the
//! new contents of the search box, and the view is re-rendered to stdout
//! whenever the state changes. At end of input the last line is searched
//! without waiting out the quiet period, then the program exits.
//!
//! # Usage
//!
//! ```text
//! moviescout [CONFIG_FILE]
//! ```
//!
//! Without `CONFIG_FILE`, `~/.config/moviescout/config.toml` is used when it
//! exists. `MOVIESCOUT_*` environment variables override file values, e.g.
//! `MOVIESCOUT_API_KEY`.
//!
//! # Lifecycle
//!
//! 1. **Load**: Read config, initialize tracing
//! 2. **Wire**: Build the TMDB client and the configured counter store
//! 3. **Start**: Load trending searches and the popular listing
//! 4. **Loop**: Feed stdin lines to the runtime, render on change
//! 5. **Shutdown**: Wait for pending search recordings

#![allow(clippy::multiple_crate_versions)]

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use moviescout::catalog::{CatalogApi, TmdbCatalog};
use moviescout::worker::{Runtime, RuntimeHandle};
use moviescout::{observability, storage, ui, Config, Event, Result};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("moviescout: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;
    observability::init_tracing(&config);

    tracing::debug!(
        debounce_ms = config.debounce_ms,
        trending_limit = config.trending_limit,
        discard_stale_responses = config.discard_stale_responses,
        "parsed configuration"
    );

    let catalog: Arc<dyn CatalogApi> = Arc::new(TmdbCatalog::new(&config)?);
    let store = storage::open(&config)?;
    let mut runtime = Runtime::new(&config, catalog, store);

    spawn_input_reader(runtime.handle());

    if runtime.dispatch(&Event::Started)? {
        draw(&runtime)?;
    }
    while let Some(should_render) = runtime.step().await? {
        if should_render {
            draw(&runtime)?;
        }
    }

    tracing::debug!("input closed, shutting down");
    runtime.shutdown().await;
    Ok(())
}

/// Forwards stdin lines as search terms; finishes on end of input.
fn spawn_input_reader(handle: RuntimeHandle) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let closed = loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if handle.set_search_term(line).is_err() {
                        return;
                    }
                }
                Ok(None) => break handle.finish(),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read input");
                    break handle.quit();
                }
            }
        };
        if let Err(e) = closed {
            tracing::debug!(error = %e, "runtime already stopped");
        }
    });
}

fn draw(runtime: &Runtime) -> Result<()> {
    let viewmodel = runtime.state().compute_viewmodel();
    let mut out = std::io::stdout().lock();
    writeln!(out)?;
    ui::render(&viewmodel, &mut out)?;
    Ok(())
}
