//! Catalog fetch for one query descriptor.
//!
//! The state half of a fetch (entering `Loading`, applying results or the
//! error message) belongs to the event handler; this is the remote half,
//! which folds every failure into a [`FetchOutcome`].

use crate::app::FetchOutcome;
use crate::catalog::{execute, CatalogApi, QueryDescriptor};

/// Runs `descriptor` against the catalog.
pub async fn run(catalog: &dyn CatalogApi, descriptor: &QueryDescriptor) -> FetchOutcome {
    match execute(catalog, descriptor).await {
        Ok(movies) => {
            tracing::debug!(result_count = movies.len(), "catalog fetch finished");
            FetchOutcome::Loaded(movies)
        }
        Err(e) => FetchOutcome::Failed { cause: e.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{build, CatalogPage};
    use crate::domain::{MovieScoutError, MovieSummary, Result};
    use async_trait::async_trait;

    struct Down;

    #[async_trait]
    impl CatalogApi for Down {
        async fn search_movies(&self, _term: &str) -> Result<CatalogPage> {
            Err(MovieScoutError::CatalogStatus { status: 500 })
        }

        async fn list_popular(&self) -> Result<CatalogPage> {
            Ok(CatalogPage {
                results: None,
                ..CatalogPage::default()
            })
        }
    }

    #[tokio::test]
    async fn status_failure_becomes_failed_outcome() {
        let outcome = run(&Down, &build("heat")).await;
        assert!(matches!(outcome, FetchOutcome::Failed { cause } if cause.contains("500")));
    }

    #[tokio::test]
    async fn null_results_load_as_empty() {
        assert_eq!(run(&Down, &build("")).await, FetchOutcome::Loaded(Vec::<MovieSummary>::new()));
    }
}
