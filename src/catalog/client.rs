//! Catalog API abstraction.
//!
//! [`CatalogApi`] is the seam between the orchestration core and whatever
//! serves movie metadata. The runtime only ever calls [`execute`], which picks
//! the endpoint a [`QueryDescriptor`] implies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::query::{QueryDescriptor, QueryMode};
use crate::domain::{MovieSummary, Result};

/// One page of catalog results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub page: Option<u32>,

    /// Missing and `null` are both treated as "no results".
    #[serde(default)]
    pub results: Option<Vec<MovieSummary>>,

    #[serde(default)]
    pub total_results: Option<u64>,
}

impl CatalogPage {
    /// Builds a page holding the given results.
    #[must_use]
    pub fn of(results: Vec<MovieSummary>) -> Self {
        Self {
            page: Some(1),
            results: Some(results),
            total_results: None,
        }
    }

    /// Consumes the page, yielding its results or an empty list.
    #[must_use]
    pub fn into_results(self) -> Vec<MovieSummary> {
        self.results.unwrap_or_default()
    }
}

/// Remote movie-metadata service.
///
/// Both operations fail with
/// [`MovieScoutError::CatalogStatus`](crate::MovieScoutError::CatalogStatus) on a
/// non-success status, or a transport error when the service is unreachable.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Searches titles matching `term`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    async fn search_movies(&self, term: &str) -> Result<CatalogPage>;

    /// Lists titles sorted by descending popularity.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    async fn list_popular(&self) -> Result<CatalogPage>;
}

/// Executes a descriptor against the catalog and returns its result list.
///
/// # Errors
///
/// Propagates the catalog's error unchanged.
pub async fn execute(catalog: &dyn CatalogApi, descriptor: &QueryDescriptor) -> Result<Vec<MovieSummary>> {
    let page = match descriptor.mode() {
        QueryMode::Search => catalog.search_movies(descriptor.term()).await?,
        QueryMode::Popular => catalog.list_popular().await?,
    };
    Ok(page.into_results())
}
