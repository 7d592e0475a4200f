//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (which owns timers, tasks and the
//! event channel) and the domain/catalog/storage layers. It is pure: nothing
//! here awaits or performs I/O.
//!
//! # Architecture
//!
//! ```text
//! Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                       ↑                                          ↓
//!                       └────── Timer / Fetch / Trending events ───┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and the fetch trigger policy
//! - [`load`]: Fetch lifecycle state and the user-facing error message
//! - [`state`]: Central state container and view model computation

pub mod actions;
pub mod handler;
pub mod load;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, should_fetch, Event, FetchOutcome, MIN_SEARCH_TERM_LEN};
pub use load::{LoadState, FETCH_ERROR_MESSAGE};
pub use state::AppState;
