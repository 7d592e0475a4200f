//! Error types for MovieScout.
//!
//! This module defines the centralized error type [`MovieScoutError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for MovieScout operations.
///
/// Most variants wrap underlying errors from external crates using `#[from]` for
/// automatic conversion. None of these errors ever reach the presentation layer
/// directly: the runtime converts catalog failures into
/// [`LoadState::Error`](crate::app::LoadState::Error) and only logs counter store
/// failures.
///
/// # Examples
///
/// ```
/// use moviescout::MovieScoutError;
///
/// fn validate_config() -> Result<(), MovieScoutError> {
///     Err(MovieScoutError::Config("debounce_ms must be a number".to_string()))
/// }
///
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MovieScoutError {
    /// The catalog API answered with a non-success HTTP status.
    #[error("Catalog request failed with status {status}")]
    CatalogStatus {
        /// HTTP status code returned by the catalog.
        status: u16,
    },

    /// The HTTP transport failed (connection, TLS, body decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Counter store operation failed.
    ///
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The event loop could not deliver or receive an event.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// A specialized `Result` type for MovieScout operations.
pub type Result<T> = std::result::Result<T, MovieScoutError>;
