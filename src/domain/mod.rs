//! Domain layer for MovieScout.
//!
//! This module contains the core domain types, independent of the catalog
//! transport, the counter store backend, or the runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Catalog titles and trending entries

pub mod error;
pub mod movie;

pub use error::{MovieScoutError, Result};
pub use movie::{MovieSummary, TrendingEntry, POSTER_BASE_URL};
