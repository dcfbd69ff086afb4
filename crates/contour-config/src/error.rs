//! Error types for settings operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("cannot read settings file '{path}': {source}")]
    ReadFile {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Settings file could not be written.
    #[error("cannot write settings file '{path}': {source}")]
    WriteFile {
        /// Settings file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid TOML or has wrongly typed keys.
    #[error("malformed settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Settings could not be encoded as TOML.
    #[error("cannot encode settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A setting holds a value the editor cannot use.
    #[error("invalid setting '{key}': {reason}")]
    InvalidSetting {
        /// Dotted key of the offending setting (e.g. `graph.hit_radius`).
        key: String,
        /// Description of why the value is rejected.
        reason: String,
    },

    /// Settings directory could not be created.
    #[error("cannot create settings directory '{path}': {source}")]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// [`ConfigError::ReadFile`] for `path`.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::WriteFile`] for `path`.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::CreateDir`] for `path`.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// [`ConfigError::InvalidSetting`] for the dotted `key`.
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn denied() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn helpers_keep_the_path() {
        let err = ConfigError::read_file("/etc/contour/settings.toml", denied());
        assert!(matches!(err, ConfigError::ReadFile { ref path, .. } if path.ends_with("settings.toml")));

        let err = ConfigError::create_dir("/etc/contour", denied());
        assert!(matches!(err, ConfigError::CreateDir { ref path, .. } if path.ends_with("contour")));
    }

    #[test]
    fn write_error_names_the_file() {
        let msg = ConfigError::write_file("/a/settings.toml", denied()).to_string();
        assert_eq!(msg, "cannot write settings file '/a/settings.toml': denied");
    }

    #[test]
    fn invalid_setting_display() {
        let err = ConfigError::invalid("graph.hit_radius", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid setting 'graph.hit_radius': must be positive"
        );
    }

    #[test]
    fn io_variants_expose_source() {
        assert!(ConfigError::read_file("/x", denied()).source().is_some());
        assert!(ConfigError::write_file("/x", denied()).source().is_some());
        assert!(ConfigError::create_dir("/x", denied()).source().is_some());
    }

    #[test]
    fn invalid_setting_has_no_source() {
        assert!(ConfigError::invalid("k", "r").source().is_none());
    }
}
