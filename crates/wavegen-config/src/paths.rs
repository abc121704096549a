//! Platform-specific configuration paths.
//!
//! - Linux: `~/.config/wavegen/wavegen.toml`
//! - macOS: `~/Library/Application Support/wavegen/wavegen.toml`
//! - Windows: `%APPDATA%\wavegen\wavegen.toml`

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "wavegen";

/// File name of the session configuration.
pub const CONFIG_FILE_NAME: &str = "wavegen.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default configuration file path (it may not exist).
pub fn default_config_path() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Pick the configuration file to load.
///
/// An explicit path always wins, even if it does not exist (loading it will
/// then fail loudly). Otherwise the default path is used only when present.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let path = default_config_path();
            path.is_file().then_some(path)
        }
    }
}
