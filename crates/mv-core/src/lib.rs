//! Core data model for the anatomy model viewer
//!
//! Scene objects, selection eligibility, candidate publishing, initial
//! transform snapshots and configuration. Nothing here touches the screen.

pub mod bounds;
pub mod candidates;
pub mod config;
pub mod constants;
pub mod error;
pub mod mode;
pub mod object;
pub mod observer;
pub mod policy;
pub mod ray;
pub mod scene;
pub mod snapshot;
pub mod theme;

pub use bounds::BoundingBox;
pub use candidates::{CandidateSet, CandidateSource};
pub use config::{GizmoConfig, HoverConfig, SelectionConfig, UiConfig, UiTheme, ViewerConfig};
pub use error::{ConfigError, ModeParseError, SelectionError};
pub use mode::InteractionMode;
pub use object::{EmissiveState, Material, Pose, SceneObject};
pub use observer::{
    ManipulationFlag, ManipulationObserver, OrbitToggle, SelectionCallback, SelectionEvents,
    SubscriptionId,
};
pub use policy::SelectionPolicy;
pub use ray::Ray;
pub use scene::Scene;
pub use snapshot::InitialTransforms;
pub use theme::ThemeProvider;
