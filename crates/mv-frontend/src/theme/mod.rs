//! Theme module for UI styling
//!
//! The active theme lives in the shared config, so switching it takes
//! effect on the next frame without restarting.

pub mod palette;
mod visuals;

use mv_core::ThemeProvider;

use crate::config::{SharedConfig, UiTheme};
use palette::Palette;

/// Apply the current theme to egui context
pub fn apply_theme(ctx: &egui::Context, config: &SharedConfig) {
    let is_dark = is_dark_theme(config);
    ctx.set_visuals(visuals::visuals(Palette::for_theme(is_dark), is_dark));
}

/// Create an overlay frame with standard styling
pub fn overlay_frame(is_dark: bool) -> egui::Frame {
    let palette = Palette::for_theme(is_dark);
    egui::Frame::popup(&egui::Style::default())
        .fill(palette.overlay_bg())
        .corner_radius(4.0)
        .stroke(egui::Stroke::new(1.0, palette.border_normal))
}

/// Get whether the current theme is dark
pub fn is_dark_theme(config: &SharedConfig) -> bool {
    config.read().config().ui.theme == UiTheme::Dark
}

/// [`ThemeProvider`] backed by the shared config
#[derive(Clone)]
pub struct ConfigTheme {
    config: SharedConfig,
}

impl ConfigTheme {
    pub fn new(config: SharedConfig) -> Self {
        Self { config }
    }
}

impl ThemeProvider for ConfigTheme {
    fn is_dark_mode(&self) -> bool {
        is_dark_theme(&self.config)
    }
}
