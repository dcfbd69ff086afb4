//! Editor settings file format and operations.

use contour_core::GraphStyle;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Most envelope panels one editor window shows.
pub const MAX_ENVELOPES: usize = 4;

/// Editor settings, stored as TOML.
///
/// Every section and key is optional; missing values take their defaults.
///
/// # TOML Format
///
/// ```toml
/// [window]
/// width = 840.0
/// height = 560.0
///
/// [graph]
/// hit_radius = 10.0
/// handle_radius = 3.0
/// stroke_width = 2.0
/// readout_font_size = 14.0
///
/// [envelopes]
/// names = ["Amp", "Filter", "Mod", "Global"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct EditorSettings {
    /// Initial window size.
    pub window: WindowSettings,
    /// Graph drawing and hit testing.
    pub graph: GraphSettings,
    /// Which envelope panels to show.
    pub envelopes: EnvelopeSettings,
}

/// `[window]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    /// Initial inner width in logical pixels.
    pub width: f32,
    /// Initial inner height in logical pixels.
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 840.0,
            height: 560.0,
        }
    }
}

/// `[graph]` section.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphSettings {
    /// Grab tolerance around each handle.
    pub hit_radius: f32,
    /// Radius of the drawn handle markers.
    pub handle_radius: f32,
    /// Curve outline width.
    pub stroke_width: f32,
    /// Font size of the drag readout.
    pub readout_font_size: f32,
}

impl Default for GraphSettings {
    fn default() -> Self {
        let style = GraphStyle::default();
        Self {
            hit_radius: style.hit_radius,
            handle_radius: style.handle_radius,
            stroke_width: style.stroke_width,
            readout_font_size: style.readout_font_size,
        }
    }
}

/// `[envelopes]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvelopeSettings {
    /// Panel titles, one panel per name. Envelope numbers follow the order.
    pub names: Vec<String>,
}

impl Default for EnvelopeSettings {
    fn default() -> Self {
        Self {
            names: ["Amp", "Filter", "Mod", "Global"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl EditorSettings {
    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value is usable. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("window.width", self.window.width)?;
        positive("window.height", self.window.height)?;
        positive("graph.hit_radius", self.graph.hit_radius)?;
        positive("graph.handle_radius", self.graph.handle_radius)?;
        positive("graph.stroke_width", self.graph.stroke_width)?;
        positive("graph.readout_font_size", self.graph.readout_font_size)?;

        if self.graph.hit_radius < self.graph.handle_radius {
            return Err(ConfigError::invalid(
                "graph.hit_radius",
                format!(
                    "{} is smaller than handle_radius {}",
                    self.graph.hit_radius, self.graph.handle_radius
                ),
            ));
        }

        let count = self.envelopes.names.len();
        if count == 0 || count > MAX_ENVELOPES {
            return Err(ConfigError::invalid(
                "envelopes.names",
                format!("expected 1 to {MAX_ENVELOPES} names, got {count}"),
            ));
        }
        if let Some(i) = self.envelopes.names.iter().position(|n| n.trim().is_empty()) {
            return Err(ConfigError::invalid(
                "envelopes.names",
                format!("name {} is empty", i + 1),
            ));
        }
        Ok(())
    }

    /// Keep only the first `count` envelopes, padding with numbered names
    /// when fewer are configured. `count` is clamped to `1..=MAX_ENVELOPES`.
    pub fn with_envelope_count(mut self, count: usize) -> Self {
        let count = count.clamp(1, MAX_ENVELOPES);
        let names = &mut self.envelopes.names;
        names.truncate(count);
        while names.len() < count {
            names.push(format!("Envelope {}", names.len() + 1));
        }
        self
    }

    /// Core drawing style with the configured sizes.
    pub fn to_graph_style(&self) -> GraphStyle {
        GraphStyle {
            hit_radius: self.graph.hit_radius,
            handle_radius: self.graph.handle_radius,
            stroke_width: self.graph.stroke_width,
            readout_font_size: self.graph.readout_font_size,
            ..GraphStyle::default()
        }
    }
}

fn positive(key: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, format!("{value} is not a positive number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = EditorSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.envelopes.names.len(), 4);
        assert_eq!(settings.graph.hit_radius, 10.0);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let settings = EditorSettings::from_toml("[graph]\nhit_radius = 14.0\n").unwrap();
        assert_eq!(settings.graph.hit_radius, 14.0);
        assert_eq!(settings.graph.handle_radius, 3.0);
        assert_eq!(settings.window, WindowSettings::default());
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EditorSettings::from_toml("").unwrap(), EditorSettings::default());
    }

    #[test]
    fn toml_round_trip() {
        let mut settings = EditorSettings::default();
        settings.window.width = 1024.0;
        settings.envelopes.names = vec!["Amp".into()];
        let text = settings.to_toml().unwrap();
        assert_eq!(EditorSettings::from_toml(&text).unwrap(), settings);
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut settings = EditorSettings::default();
        settings.graph.stroke_width = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidSetting { ref key, .. }) if key == "graph.stroke_width"
        ));

        let mut settings = EditorSettings::default();
        settings.window.height = f32::NAN;
        assert!(settings.validate().is_err());

        let mut settings = EditorSettings::default();
        settings.graph.hit_radius = 2.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidSetting { ref key, .. }) if key == "graph.hit_radius"
        ));
    }

    #[test]
    fn validate_checks_envelope_names() {
        let mut settings = EditorSettings::default();
        settings.envelopes.names.clear();
        assert!(settings.validate().is_err());

        settings.envelopes.names = vec!["A".into(); 5];
        assert!(settings.validate().is_err());

        settings.envelopes.names = vec!["Amp".into(), "  ".into()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn envelope_count_truncates_and_pads() {
        let settings = EditorSettings::default().with_envelope_count(2);
        assert_eq!(settings.envelopes.names, vec!["Amp", "Filter"]);

        let mut one = EditorSettings::default();
        one.envelopes.names = vec!["Amp".into()];
        let three = one.with_envelope_count(3);
        assert_eq!(three.envelopes.names, vec!["Amp", "Envelope 2", "Envelope 3"]);

        assert_eq!(EditorSettings::default().with_envelope_count(0).envelopes.names.len(), 1);
        assert_eq!(EditorSettings::default().with_envelope_count(9).envelopes.names.len(), 4);
    }

    #[test]
    fn graph_style_carries_configured_sizes() {
        let mut settings = EditorSettings::default();
        settings.graph.handle_radius = 5.0;
        settings.graph.readout_font_size = 18.0;
        let style = settings.to_graph_style();
        assert_eq!(style.handle_radius, 5.0);
        assert_eq!(style.readout_font_size, 18.0);
        assert_eq!(style.readout_offset, GraphStyle::default().readout_offset);
    }
}
