//! Appwrite-compatible REST counter store.
//!
//! Counters live as documents in one collection, one document per search
//! term, with the attributes `searchTerm`, `count`, `movie_id` and
//! `poster_url`. Queries use the JSON query syntax of the databases API.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{MovieScoutError, MovieSummary, Result};
use crate::storage::backend::CounterStore;
use crate::storage::models::SearchCounterRecord;

/// Connection settings for an Appwrite project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppwriteConfig {
    /// API root, e.g. `https://cloud.appwrite.io/v1`.
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    /// Server API key; omit when the collection grants guest access.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// A counter document as the databases API returns it.
#[derive(Debug, Clone, Deserialize)]
struct CounterDocument {
    #[serde(rename = "$id")]
    id: String,
    #[serde(rename = "searchTerm")]
    search_term: String,
    #[serde(default)]
    count: u32,
    #[serde(default)]
    movie_id: i64,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(rename = "$createdAt", default)]
    created_at: Option<String>,
    #[serde(rename = "$updatedAt", default)]
    updated_at: Option<String>,
}

impl CounterDocument {
    fn into_record(self) -> SearchCounterRecord {
        SearchCounterRecord {
            search_term: self.search_term,
            count: self.count,
            movie_id: self.movie_id,
            poster_url: self.poster_url,
            created_at: parse_timestamp(self.created_at.as_deref()),
            updated_at: parse_timestamp(self.updated_at.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<CounterDocument>,
}

/// Parses an RFC 3339 timestamp into Unix seconds, 0 when absent or malformed.
fn parse_timestamp(raw: Option<&str>) -> i64 {
    raw.and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
        .map_or(0, |dt| dt.timestamp())
}

/// Query matching the document for exactly `term`.
fn equal_term_query(term: &str) -> String {
    json!({ "method": "equal", "attribute": "searchTerm", "values": [term] }).to_string()
}

/// Queries selecting the `limit` highest counts.
fn top_searches_queries(limit: usize) -> Vec<String> {
    vec![
        json!({ "method": "orderDesc", "attribute": "count" }).to_string(),
        json!({ "method": "limit", "values": [limit] }).to_string(),
    ]
}

/// Document body for a counter associated with `movie`.
fn counter_data(term: &str, count: u32, movie: &MovieSummary) -> Value {
    json!({
        "searchTerm": term,
        "count": count,
        "movie_id": movie.id,
        "poster_url": movie.poster_url(),
    })
}

/// REST client for counters stored in an Appwrite collection.
#[derive(Debug, Clone)]
pub struct AppwriteCounterStore {
    client: Client,
    config: AppwriteConfig,
}

impl AppwriteCounterStore {
    /// Creates a store client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AppwriteConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, config })
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            self.config.collection_id
        )
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let req = req.header("X-Appwrite-Project", &self.config.project_id);
        match &self.config.api_key {
            Some(key) => req.header("X-Appwrite-Key", key),
            None => req,
        }
    }

    /// Sends a request and fails on non-success statuses.
    async fn send(&self, req: RequestBuilder, operation: &str) -> Result<reqwest::Response> {
        let response = self.authorize(req).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(MovieScoutError::Storage(format!(
                "{operation} failed ({status}): {body}"
            )))
        }
    }

    async fn list_documents(&self, queries: &[String], operation: &str) -> Result<Vec<CounterDocument>> {
        let params: Vec<(&str, &str)> = queries.iter().map(|q| ("queries[]", q.as_str())).collect();
        let req = self.client.get(self.documents_url()).query(&params);
        let list: DocumentList = self.send(req, operation).await?.json().await?;
        Ok(list.documents)
    }
}

#[async_trait]
impl CounterStore for AppwriteCounterStore {
    #[tracing::instrument(level = "debug", skip(self, movie), fields(movie_id = movie.id))]
    async fn increment_search_count(&self, term: &str, movie: &MovieSummary) -> Result<()> {
        let existing = self
            .list_documents(&[equal_term_query(term)], "find counter")
            .await?
            .into_iter()
            .next();

        if let Some(doc) = existing {
            let count = doc.count.saturating_add(1);
            let url = format!("{}/{}", self.documents_url(), doc.id);
            let req = self
                .client
                .patch(url)
                .json(&json!({ "data": counter_data(term, count, movie) }));
            self.send(req, "update counter").await?;
            tracing::debug!(count = count, "search count updated");
        } else {
            let req = self.client.post(self.documents_url()).json(&json!({
                "documentId": "unique()",
                "data": counter_data(term, 1, movie),
            }));
            self.send(req, "create counter").await?;
            tracing::debug!("search count created");
        }

        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn list_top_searches(&self, limit: usize) -> Result<Vec<SearchCounterRecord>> {
        let documents = self
            .list_documents(&top_searches_queries(limit), "list top searches")
            .await?;
        tracing::debug!(count = documents.len(), "retrieved top searches");
        Ok(documents.into_iter().map(CounterDocument::into_record).collect())
    }
}
