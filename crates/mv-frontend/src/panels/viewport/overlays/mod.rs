//! Floating overlays drawn on top of the viewport

mod mode_toolbar;

pub use mode_toolbar::{render_mode_toolbar, toolbar_modes};
