//! Hire Box: a terminal job and internship board.
//!
//! Hire Box lists job postings from a REST posting store, lets the user
//! narrow them with an instant search, opens a detail view per posting, and
//! gates the real apply link behind a short timed delay with progress feedback.
//! When the store is unreachable it keeps working from a fixed sample set.

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Driver (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← Executes actions
//! │  - Timer queue, history, analytics, metadata, links │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Router, views, apply gate                        │
//! │  - Event handling, view model computation           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (store/)      │   │ (worker/)     │
//! │ - Rendering   │   │ - REST client │   │ - Background  │
//! │ - Theming     │   │ - Fallback    │   │   fetches     │
//! │ - Components  │   │ - Gateway     │   │ - Responses   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - Error types, Posting model (domain/)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotated JSON file     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! From a TOML file (`~/.config/hirebox/config.toml`):
//!
//! ```toml
//! store_url = "https://example.supabase.co"
//! api_key = "public-anon-key"
//! table = "jobs"
//! request_timeout_secs = 10
//! theme = "rose-light"
//! trace_level = "debug"
//! ```
//!
//! or from `HIREBOX_*` environment variables, which take precedence.
//!
//! # Example
//!
//! ```rust
//! use hirebox::runtime::Environment;
//! use hirebox::{initialize, Config, Event};
//!
//! // No store configured: the listing is served from fallback data.
//! let mut runtime = initialize(&Config::default(), Environment::headless("/"));
//! runtime.start()?;
//! runtime.dispatch(&Event::Navigate("/about".to_string()))?;
//! assert_eq!(runtime.history().current_path(), "/about");
//! # Ok::<(), hirebox::HireBoxError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod store;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, AppState, Event, InputMode, SearchFocus};
pub use domain::{HireBoxError, Posting, Result};
pub use runtime::Runtime;
pub use store::rest::DEFAULT_TABLE;
pub use store::DataGateway;
pub use ui::Theme;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Prefix of the environment variables read by [`Config::from_env`].
pub const ENV_PREFIX: &str = "HIREBOX_";

/// Default store request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Application configuration.
///
/// Every source produces the same flat key set:
///
/// | key | field |
/// |---|---|
/// | `store_url` | [`Config::store_url`] |
/// | `api_key` | [`Config::api_key`] |
/// | `table` | [`Config::table`] |
/// | `request_timeout_secs` | [`Config::request_timeout_secs`] |
/// | `theme` | [`Config::theme_name`] |
/// | `theme_file` | [`Config::theme_file`] |
/// | `trace_level` | [`Config::trace_level`] |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the posting store, without the `/rest/v1` suffix.
    ///
    /// When this or `api_key` is missing every query is served from
    /// fallback data.
    pub store_url: Option<String>,

    /// Key sent as both `apikey` and bearer token.
    pub api_key: Option<String>,

    /// Posting table name. Default: `"jobs"`
    pub table: String,

    /// Per-request timeout in seconds. Default: 10. Zero counts as unset.
    pub request_timeout_secs: u64,

    /// Built-in theme name to use.
    ///
    /// Options: `rose-dark`, `rose-light`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_url: None,
            api_key: None,
            table: DEFAULT_TABLE.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

/// Shape of the TOML configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    store_url: Option<String>,
    api_key: Option<String>,
    table: Option<String>,
    request_timeout_secs: Option<u64>,
    theme: Option<String>,
    theme_file: Option<String>,
    trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a flat key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - Empty or whitespace-only values count as unset
    /// - `request_timeout_secs`: falls back to 10 on parse error or zero
    /// - `table`: falls back to `"jobs"`
    /// - Unknown keys are ignored
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use hirebox::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("store_url".to_string(), "https://db.example".to_string());
    /// map.insert("request_timeout_secs".to_string(), "3".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.store_url.as_deref(), Some("https://db.example"));
    /// assert_eq!(config.request_timeout_secs, 3);
    /// assert_eq!(config.table, "jobs");
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()).map(String::from);

        Self {
            store_url: get("store_url"),
            api_key: get("api_key"),
            table: get("table").unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            request_timeout_secs: get("request_timeout_secs")
                .as_deref()
                .and_then(parse_timeout)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Reads `HIREBOX_*` variables from the process environment.
    ///
    /// `HIREBOX_STORE_URL` maps to `store_url`, `HIREBOX_THEME` to `theme`, and
    /// so on.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// As [`Config::from_env`], over an explicit variable list.
    #[must_use]
    pub fn from_vars(vars: impl IntoIterator<Item = (String, String)>) -> Self {
        Self::from_map(&env_map(vars))
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`HireBoxError::Io`] if the file cannot be read and
    /// [`HireBoxError::Config`] if it is not valid configuration TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let file: FileConfig =
            toml::from_str(&contents).map_err(|e| HireBoxError::Config(format!("failed to parse config TOML: {e}")))?;

        let mut map = BTreeMap::new();
        let mut put = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                map.insert(key.to_string(), value);
            }
        };
        put("store_url", file.store_url);
        put("api_key", file.api_key);
        put("table", file.table);
        put("request_timeout_secs", file.request_timeout_secs.map(|n| n.to_string()));
        put("theme", file.theme);
        put("theme_file", file.theme_file);
        put("trace_level", file.trace_level);

        Ok(Self::from_map(&map))
    }

    /// Loads the file at `path` if it exists, then overlays `HIREBOX_*`
    /// variables.
    ///
    /// # Errors
    ///
    /// Propagates [`Config::from_file`] errors for a file that exists but
    /// cannot be read or parsed.
    pub fn load(path: Option<&Path>, vars: impl IntoIterator<Item = (String, String)>) -> Result<Self> {
        let base = match path {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Self::default(),
        };
        Ok(base.overlay(&env_map(vars)))
    }

    /// Replaces fields whose keys are set in `map`.
    fn overlay(self, map: &BTreeMap<String, String>) -> Self {
        let set = Self::from_map(map);
        let has = |key: &str| map.get(key).is_some_and(|v| !v.trim().is_empty());

        Self {
            store_url: set.store_url.or(self.store_url),
            api_key: set.api_key.or(self.api_key),
            table: if has("table") { set.table } else { self.table },
            request_timeout_secs: map
                .get("request_timeout_secs")
                .and_then(|v| parse_timeout(v))
                .unwrap_or(self.request_timeout_secs),
            theme_name: set.theme_name.or(self.theme_name),
            theme_file: set.theme_file.or(self.theme_file),
            trace_level: set.trace_level.or(self.trace_level),
        }
    }
}

/// A positive number of seconds. Zero would make every store query time out.
fn parse_timeout(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok().filter(|secs| *secs > 0)
}

/// Keeps `HIREBOX_*` variables, keyed by their lowercased suffix.
fn env_map(vars: impl IntoIterator<Item = (String, String)>) -> BTreeMap<String, String> {
    vars.into_iter()
        .filter_map(|(key, value)| key.strip_prefix(ENV_PREFIX).map(|suffix| (suffix.to_ascii_lowercase(), value)))
        .collect()
}

/// Resolves the configured theme: file first, then built-in name, then default.
///
/// A theme that cannot be loaded is logged and replaced by the default.
#[must_use]
pub fn load_theme(config: &Config) -> Theme {
    if let Some(theme_file) = &config.theme_file {
        return Theme::from_file(theme_file).unwrap_or_else(|e| {
            tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
            Theme::default()
        });
    }

    config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
        Theme::from_name(theme_name).unwrap_or_else(|| {
            tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
            Theme::default()
        })
    })
}

/// Builds a [`Runtime`] from configuration and a browsing environment.
///
/// The gateway is built with [`DataGateway::from_config`]; call
/// [`Runtime::start`] to mount the first view.
#[must_use]
pub fn initialize(config: &Config, env: runtime::Environment) -> Runtime {
    tracing::debug!(configured = config.store_url.is_some(), table = %config.table, "initializing hirebox");
    Runtime::new(load_theme(config), DataGateway::from_config(config), env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.table, "jobs");
        assert_eq!(config.request_timeout_secs, 10);
        assert!(config.store_url.is_none());
    }

    #[test]
    fn map_ignores_blank_values_and_bad_numbers() {
        let mut map = BTreeMap::new();
        map.insert("api_key".to_string(), "   ".to_string());
        map.insert("request_timeout_secs".to_string(), "soon".to_string());
        map.insert("theme".to_string(), "rose-light".to_string());

        let config = Config::from_map(&map);
        assert!(config.api_key.is_none());
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.theme_name.as_deref(), Some("rose-light"));
    }

    #[test]
    fn zero_timeout_counts_as_unset() {
        let mut map = BTreeMap::new();
        map.insert("request_timeout_secs".to_string(), "0".to_string());
        assert_eq!(Config::from_map(&map).request_timeout_secs, DEFAULT_TIMEOUT_SECS);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = 0").unwrap();
        assert_eq!(Config::from_file(file.path()).unwrap().request_timeout_secs, DEFAULT_TIMEOUT_SECS);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "request_timeout_secs = 4").unwrap();
        let config = Config::load(Some(file.path()), vars(&[("HIREBOX_REQUEST_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.request_timeout_secs, 4);
    }

    #[test]
    fn env_vars_use_prefix() {
        let config = Config::from_vars(vars(&[
            ("HIREBOX_STORE_URL", "https://db.example"),
            ("HIREBOX_TABLE", "openings"),
            ("STORE_URL", "https://ignored.example"),
        ]));
        assert_eq!(config.store_url.as_deref(), Some("https://db.example"));
        assert_eq!(config.table, "openings");
    }

    #[test]
    fn file_config_parses() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "store_url = \"https://db.example\"\nrequest_timeout_secs = 4\ntheme = \"rose-light\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.store_url.as_deref(), Some("https://db.example"));
        assert_eq!(config.request_timeout_secs, 4);
        assert_eq!(config.theme_name.as_deref(), Some("rose-light"));
    }

    #[test]
    fn unknown_file_keys_are_config_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scan_depth = 4").unwrap();
        assert!(matches!(Config::from_file(file.path()), Err(HireBoxError::Config(_))));
    }

    #[test]
    fn env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "table = \"jobs_v2\"\ntrace_level = \"debug\"").unwrap();

        let config = Config::load(Some(file.path()), vars(&[("HIREBOX_TRACE_LEVEL", "warn")])).unwrap();
        assert_eq!(config.table, "jobs_v2");
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }

    #[test]
    fn theme_resolution_falls_back_to_default() {
        let config = Config { theme_name: Some("neon".to_string()), ..Config::default() };
        assert_eq!(load_theme(&config).name, "rose-dark");

        let config = Config { theme_name: Some("rose-light".to_string()), ..Config::default() };
        assert_eq!(load_theme(&config).name, "rose-light");

        let config = Config { theme_file: Some("/nonexistent/theme.toml".to_string()), ..Config::default() };
        assert_eq!(load_theme(&config), Theme::default());
    }
}
