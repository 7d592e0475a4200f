//! Catalog layer: query descriptors and the remote movie-metadata service.
//!
//! # Modules
//!
//! - [`query`]: Descriptor type and the pure builder mapping a term to a query
//! - [`client`]: `CatalogApi` trait and descriptor execution
//! - [`tmdb`]: `reqwest`-based TMDB client

pub mod client;
pub mod query;
pub mod tmdb;

pub use client::{execute, CatalogApi, CatalogPage};
pub use query::{build, QueryDescriptor, QueryMode, POPULAR_SORT_ORDER};
pub use tmdb::{TmdbCatalog, DEFAULT_API_BASE_URL};
