//! Interaction mode state

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModeParseError;

/// Active interaction mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    /// Look only: the gizmo is hidden and the camera orbits freely
    #[default]
    Viewer,
    /// Drag the selected object along an axis
    Translate,
    /// Spin the selected object around an axis
    Rotate,
}

impl InteractionMode {
    /// All modes in toolbar order
    pub const ALL: [InteractionMode; 3] = [
        InteractionMode::Viewer,
        InteractionMode::Translate,
        InteractionMode::Rotate,
    ];

    /// True for the modes that bind the gizmo to an object
    pub fn is_manipulating(&self) -> bool {
        match self {
            InteractionMode::Viewer => false,
            InteractionMode::Translate | InteractionMode::Rotate => true,
        }
    }

    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Viewer => "viewer",
            InteractionMode::Translate => "translate",
            InteractionMode::Rotate => "rotate",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viewer" | "view" => Ok(InteractionMode::Viewer),
            // "transform" is the legacy toolbar name for translate
            "translate" | "transform" => Ok(InteractionMode::Translate),
            "rotate" => Ok(InteractionMode::Rotate),
            _ => Err(ModeParseError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_viewer() {
        assert_eq!(InteractionMode::default(), InteractionMode::Viewer);
        assert!(!InteractionMode::Viewer.is_manipulating());
        assert!(InteractionMode::Translate.is_manipulating());
        assert!(InteractionMode::Rotate.is_manipulating());
    }

    #[test]
    fn test_parse_mode_names() {
        assert_eq!("viewer".parse(), Ok(InteractionMode::Viewer));
        assert_eq!("Translate".parse(), Ok(InteractionMode::Translate));
        assert_eq!("transform".parse(), Ok(InteractionMode::Translate));
        assert_eq!(" rotate ".parse(), Ok(InteractionMode::Rotate));
    }

    #[test]
    fn test_parse_unknown_mode_is_error() {
        let err = "scale".parse::<InteractionMode>().unwrap_err();
        assert_eq!(err, ModeParseError("scale".to_string()));
        assert!(err.to_string().contains("scale"));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for mode in InteractionMode::ALL {
            assert_eq!(mode.to_string().parse::<InteractionMode>(), Ok(mode));
        }
    }
}
