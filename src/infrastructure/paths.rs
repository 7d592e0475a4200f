//! Path resolution for data and configuration files.
//!
//! Locations follow the XDG base directory conventions and can be overridden
//! through environment variables.

use std::env;
use std::path::PathBuf;

/// Overrides the data directory when set.
pub const DATA_DIR_ENV: &str = "MOVIESCOUT_DATA_DIR";

/// Overrides the configuration file when set.
pub const CONFIG_FILE_ENV: &str = "MOVIESCOUT_CONFIG";

const APP_DIR: &str = "moviescout";

/// Returns the data directory for MovieScout storage.
///
/// Resolution order:
///
/// 1. `$MOVIESCOUT_DATA_DIR`
/// 2. `$XDG_DATA_HOME/moviescout`
/// 3. `~/.local/share/moviescout`
///
/// The JSON counter file `searches.json` and the trace export live here.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    resolve_data_dir(
        env::var(DATA_DIR_ENV).ok(),
        env::var("XDG_DATA_HOME").ok(),
        env::var("HOME").ok(),
    )
}

/// Returns `$MOVIESCOUT_CONFIG` with a leading `~` expanded, if set.
///
/// A file named this way is required to exist, like one given on the
/// command line.
#[must_use]
pub fn get_explicit_config_file() -> Option<PathBuf> {
    non_empty(env::var(CONFIG_FILE_ENV).ok()).map(|path| PathBuf::from(expand_tilde(&path)))
}

/// Returns the default configuration file path:
/// `$XDG_CONFIG_HOME/moviescout/config.toml`, else
/// `~/.config/moviescout/config.toml`. It is read only if it exists.
#[must_use]
pub fn get_config_file() -> PathBuf {
    let base = non_empty(env::var("XDG_CONFIG_HOME").ok()).map_or_else(
        || home_dir(env::var("HOME").ok()).join(".config"),
        PathBuf::from,
    );
    base.join(APP_DIR).join("config.toml")
}

fn resolve_data_dir(explicit: Option<String>, xdg_data_home: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = non_empty(explicit) {
        return PathBuf::from(expand_tilde(&dir));
    }
    if let Some(dir) = non_empty(xdg_data_home) {
        return PathBuf::from(dir).join(APP_DIR);
    }
    home_dir(home).join(".local").join("share").join(APP_DIR)
}

fn home_dir(home: Option<String>) -> PathBuf {
    non_empty(home).map_or_else(|| PathBuf::from("."), PathBuf::from)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Expands a leading `~` to the user's home directory.
///
/// # Examples
///
/// ```
/// use moviescout::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// assert_eq!(expand_tilde("relative/~"), "relative/~");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = non_empty(env::var("HOME").ok()) else {
        return path.to_string();
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}
