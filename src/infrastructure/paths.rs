//! Filesystem locations used by the application.

use std::path::PathBuf;

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "hirebox";

/// Returns the directory for trace files and other local data.
///
/// Resolves to the platform data directory (e.g. `~/.local/share/hirebox` on
/// Linux) and falls back to `./.hirebox` when the platform has none.
///
/// # Examples
///
/// ```
/// use hirebox::infrastructure::data_dir;
///
/// assert!(data_dir().ends_with("hirebox") || data_dir().ends_with(".hirebox"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(".").join(format!(".{APP_DIR_NAME}")), |dir| dir.join(APP_DIR_NAME))
}

/// Returns the default location of the optional TOML configuration file.
#[must_use]
pub fn config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join("config.toml"))
}
