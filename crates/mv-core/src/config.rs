//! Viewer configuration
//!
//! Settings are serialized as RON and can be loaded from disk or from raw
//! bytes (for WASM builds where there is no filesystem).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    HOVER_BASE_INTENSITY, HOVER_HIGHLIGHT_COLOR, HOVER_PULSE_AMPLITUDE, HOVER_PULSE_FREQUENCY,
    MOVABLE_MARKER, VISIBILITY_THRESHOLD,
};
use crate::error::ConfigError;

/// Selection eligibility settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// Name substring that grants translate/rotate
    pub movable_marker: String,
    /// Objects at or below this opacity cannot be picked
    pub visibility_threshold: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            movable_marker: MOVABLE_MARKER.to_string(),
            visibility_threshold: VISIBILITY_THRESHOLD,
        }
    }
}

/// Hover highlight settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HoverConfig {
    pub base_intensity: f32,
    pub pulse_amplitude: f32,
    /// Angular frequency of the pulse in rad/s
    pub pulse_frequency: f32,
    /// Emissive colour applied while hovered (RGB)
    pub highlight_color: [f32; 3],
    /// Whether hovering highlights objects in viewer mode too
    pub hover_in_viewer_mode: bool,
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            base_intensity: HOVER_BASE_INTENSITY,
            pulse_amplitude: HOVER_PULSE_AMPLITUDE,
            pulse_frequency: HOVER_PULSE_FREQUENCY,
            highlight_color: HOVER_HIGHLIGHT_COLOR,
            hover_in_viewer_mode: true,
        }
    }
}

impl HoverConfig {
    /// Emissive intensity `elapsed` seconds after the hover began
    pub fn pulse_intensity(&self, elapsed: f32) -> f32 {
        self.base_intensity + self.pulse_amplitude * (self.pulse_frequency * elapsed).sin()
    }
}

/// Transform gizmo settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GizmoConfig {
    /// World-space scale applied to handle geometry
    pub size: f32,
}

impl Default for GizmoConfig {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

/// UI theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UiConfig {
    pub theme: UiTheme,
}

/// Complete viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ViewerConfig {
    pub selection: SelectionConfig,
    pub hover: HoverConfig,
    pub gizmo: GizmoConfig,
    pub ui: UiConfig,
}

impl ViewerConfig {
    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))?;
        Ok(())
    }

    /// Serialize configuration to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        ron::from_str(&content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }

    /// Load configuration from bytes (for WASM support)
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, ConfigError> {
        let content =
            std::str::from_utf8(data).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))
    }
}
