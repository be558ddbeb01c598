//! Anatomy Model Viewer Frontend
//!
//! egui application that lets users pick, highlight and move the organs
//! of a 3D anatomy model.

pub mod actions;
pub mod app;
pub mod config;
pub mod demo;
pub mod panels;
pub mod state;
pub mod theme;

// Re-exports for convenience
pub use app::MedicalViewerApp;
pub use config::{ConfigManager, SharedConfig};
pub use state::{AppAction, AppState, GizmoAdapter, PointerDown, SelectionController};
