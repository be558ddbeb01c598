//! UI panels

mod viewport;

pub use viewport::{ViewTransform, ViewportPanel, material_color};
