//! Error types shared across the viewer crates

use uuid::Uuid;

use crate::mode::InteractionMode;

/// Reasons an object cannot be hovered, selected or attached to the gizmo
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SelectionError {
    #[error("object {0} is not in the scene")]
    NotFound(Uuid),
    #[error("object '{0}' has no material")]
    NoMaterial(String),
    #[error("object '{name}' is invisible (opacity {opacity:.3})")]
    Invisible { name: String, opacity: f32 },
    #[error("object '{name}' is not movable in {mode} mode")]
    NotMovable { name: String, mode: InteractionMode },
}

/// Failed to parse an interaction mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown interaction mode '{0}' (expected viewer, translate or rotate)")]
pub struct ModeParseError(pub String);

/// Configuration-related errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}
