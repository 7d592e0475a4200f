//! Presentation layer.
//!
//! Transforms application state into a view model and writes it out as text.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Plain-text rendering of a view model

pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{MovieCard, MovieSection, RenderState, TrendingItem, UIViewModel};
