//! Asynchronous side of the search session.
//!
//! Everything here runs on tokio: the debounce timer, catalog fetches, search
//! recording and the trending load. None of it touches application state
//! directly; results come back to the [`Runtime`] as events.
//!
//! # Architecture
//!
//! - `debounce`: Cancellable trailing-edge timer
//! - `fetch`: Remote half of a catalog fetch
//! - `aggregator`: Fire-and-forget search counter writes
//! - `trending`: One-shot top searches load
//! - `runtime`: Event loop and action execution

pub mod aggregator;
pub mod debounce;
pub mod fetch;
pub mod runtime;
pub mod trending;

pub use debounce::Debouncer;
pub use runtime::{Runtime, RuntimeHandle};
