//! Settings for the contour envelope editor.
//!
//! This crate owns the editor's TOML settings file: window size, graph sizes
//! (hit radius, handle radius, outline width, readout font) and the list of
//! envelope panels to show. Parameter values themselves are not stored here;
//! they belong to the host.
//!
//! # Features
//!
//! - **Settings file**: Load, save and validate [`EditorSettings`]
//! - **Paths**: Platform-specific config directory and settings file
//! - **Graph style**: Convert settings into the core [`contour_core::GraphStyle`]
//!
//! # Example
//!
//! ```rust,no_run
//! use contour_config::{EditorSettings, settings_path};
//!
//! let mut settings = EditorSettings::load(settings_path()).unwrap_or_default();
//! settings.graph.hit_radius = 12.0;
//! settings.validate().unwrap();
//! settings.save(settings_path()).unwrap();
//! ```

mod error;
mod settings;

/// Platform-specific paths for the settings file.
pub mod paths;

pub use error::ConfigError;
pub use paths::{ensure_user_config_dir, load_or_default, settings_path, user_config_dir};
pub use settings::{
    EditorSettings, EnvelopeSettings, GraphSettings, MAX_ENVELOPES, WindowSettings,
};
