//! HTTP client for a TMDB-compatible catalog.
//!
//! Search maps to `GET {base}/search/movie?query=…` and the popular listing to
//! `GET {base}/discover/movie?sort_by=popularity.desc`. Query values are
//! percent-encoded by `reqwest`. No request timeout is imposed beyond the
//! transport default.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;

use crate::catalog::client::{CatalogApi, CatalogPage};
use crate::catalog::query::POPULAR_SORT_ORDER;
use crate::domain::{MovieScoutError, Result};
use crate::Config;

/// Default catalog API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB catalog client.
///
/// Authenticates with an `api_key` query parameter, a bearer read token, or
/// both, whichever the configuration provides.
#[derive(Debug, Clone)]
pub struct TmdbCatalog {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    read_token: Option<String>,
}

impl TmdbCatalog {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed or neither an
    /// API key nor a read token is configured.
    pub fn new(config: &Config) -> Result<Self> {
        if config.api_key.is_none() && config.api_read_token.is_none() {
            return Err(MovieScoutError::Config(
                "either api_key or api_read_token must be set".to_string(),
            ));
        }

        let client = Client::builder().build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            read_token: config.api_read_token.clone(),
        })
    }

    /// Issues a GET against `path` and decodes the page.
    async fn get_page(&self, path: &str, query: &[(&str, &str)]) -> Result<CatalogPage> {
        let url = format!("{}/{path}", self.base_url);

        let mut req = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query);
        if let Some(key) = &self.api_key {
            req = req.query(&[("api_key", key.as_str())]);
        }
        if let Some(token) = &self.read_token {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();

        if status.is_success() {
            let page: CatalogPage = response.json().await?;
            tracing::debug!(
                path = %path,
                result_count = page.results.as_ref().map_or(0, Vec::len),
                "catalog page received"
            );
            Ok(page)
        } else {
            tracing::debug!(path = %path, status = status.as_u16(), "catalog returned non-success status");
            Err(MovieScoutError::CatalogStatus {
                status: status.as_u16(),
            })
        }
    }
}

#[async_trait]
impl CatalogApi for TmdbCatalog {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn search_movies(&self, term: &str) -> Result<CatalogPage> {
        self.get_page("search/movie", &[("query", term)]).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_popular(&self) -> Result<CatalogPage> {
        self.get_page("discover/movie", &[("sort_by", POPULAR_SORT_ORDER)])
            .await
    }
}
