//! Platform-specific location of the settings file.
//!
//! # Directory Structure
//!
//! - **User config**: `~/.config/contour/` (Linux), `~/Library/Application Support/contour/` (macOS), `%APPDATA%\contour\` (Windows)
//! - **Settings file**: `settings.toml` inside the user config directory
//!
//! # Example
//!
//! ```rust,no_run
//! use contour_config::paths;
//!
//! let settings = paths::load_or_default(None);
//! println!("{} envelope panels", settings.envelopes.names.len());
//! ```

use std::path::{Path, PathBuf};

use crate::EditorSettings;

/// Application name used for directory paths.
const APP_NAME: &str = "contour";

/// File name of the settings file.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// # Platform Paths
///
/// - Linux: `~/.config/contour/`
/// - macOS: `~/Library/Application Support/contour/`
/// - Windows: `%APPDATA%\contour\`
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default settings file path.
pub fn settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Ensure the user config directory exists.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_user_config_dir() -> Result<PathBuf, crate::ConfigError> {
    let dir = user_config_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| crate::ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// Load settings from `path`, or from [`settings_path`] when `None`.
///
/// Never fails: a missing default file is silent, while an unreadable,
/// unparsable or invalid file is logged and replaced by the defaults.
/// An explicit `path` that does not exist is logged too.
pub fn load_or_default(path: Option<&Path>) -> EditorSettings {
    let (path, explicit) = match path {
        Some(p) => (p.to_path_buf(), true),
        None => (settings_path(), false),
    };

    if !explicit && !path.is_file() {
        tracing::debug!(path = %path.display(), "no settings file, using defaults");
        return EditorSettings::default();
    }

    let loaded = EditorSettings::load(&path).and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    });

    match loaded {
        Ok(settings) => {
            tracing::info!(path = %path.display(), "loaded settings");
            settings
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring settings file, using defaults");
            EditorSettings::default()
        }
    }
}
