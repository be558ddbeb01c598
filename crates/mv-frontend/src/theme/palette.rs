//! Color palette for the viewer UI

use egui::Color32;

/// Colors for one UI theme
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Viewport background
    pub bg_base: Color32,
    /// Panel background
    pub bg_panel: Color32,
    /// Overlays and popups
    pub bg_elevated: Color32,
    /// Input fields and inactive buttons
    pub bg_input: Color32,
    pub bg_hover: Color32,
    pub border_subtle: Color32,
    pub border_normal: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    /// Selection and active mode button
    pub accent: Color32,
    pub accent_subtle: Color32,
    /// Text on top of `accent`
    pub on_accent: Color32,
    /// Overlay fill alpha
    pub overlay_alpha: u8,
}

pub const DARK: Palette = Palette {
    bg_base: Color32::from_rgb(18, 20, 24),
    bg_panel: Color32::from_rgb(28, 30, 36),
    bg_elevated: Color32::from_rgb(36, 39, 46),
    bg_input: Color32::from_rgb(44, 47, 56),
    bg_hover: Color32::from_rgb(56, 60, 72),
    border_subtle: Color32::from_rgb(48, 52, 62),
    border_normal: Color32::from_rgb(66, 70, 84),
    text_primary: Color32::from_rgb(228, 230, 236),
    text_secondary: Color32::from_rgb(150, 156, 170),
    accent: Color32::from_rgb(64, 172, 220),
    accent_subtle: Color32::from_rgba_premultiplied(64, 172, 220, 32),
    on_accent: Color32::from_rgb(228, 230, 236),
    overlay_alpha: 220,
};

pub const LIGHT: Palette = Palette {
    bg_base: Color32::from_rgb(236, 239, 243),
    bg_panel: Color32::from_rgb(248, 249, 251),
    bg_elevated: Color32::WHITE,
    bg_input: Color32::from_rgb(238, 240, 244),
    bg_hover: Color32::from_rgb(226, 230, 236),
    border_subtle: Color32::from_rgb(216, 220, 228),
    border_normal: Color32::from_rgb(192, 198, 210),
    text_primary: Color32::from_rgb(28, 30, 36),
    text_secondary: Color32::from_rgb(92, 98, 110),
    accent: Color32::from_rgb(24, 128, 180),
    accent_subtle: Color32::from_rgba_premultiplied(24, 128, 180, 40),
    on_accent: Color32::WHITE,
    overlay_alpha: 240,
};

impl Palette {
    pub fn for_theme(is_dark: bool) -> &'static Palette {
        if is_dark { &DARK } else { &LIGHT }
    }

    /// Semi-transparent elevated background for viewport overlays
    pub fn overlay_bg(&self) -> Color32 {
        with_alpha(self.bg_elevated, self.overlay_alpha)
    }
}

// Gizmo handles (XYZ = RGB)

/// X axis
pub const AXIS_X: Color32 = Color32::from_rgb(240, 80, 80);
/// Y axis
pub const AXIS_Y: Color32 = Color32::from_rgb(90, 220, 110);
/// Z axis
pub const AXIS_Z: Color32 = Color32::from_rgb(80, 150, 250);
/// Handle being dragged
pub const AXIS_ACTIVE: Color32 = Color32::from_rgb(255, 220, 60);

/// Outline of the selected object
pub const SELECTION_OUTLINE: Color32 = Color32::from_rgb(255, 200, 70);

/// Semi-transparent version of a color
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
