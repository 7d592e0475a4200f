//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where MovieScout keeps its files: the counter store,
//! the trace export, and the optional config file.

pub mod paths;

pub use paths::{expand_tilde, get_config_file, get_data_dir, get_explicit_config_file};
