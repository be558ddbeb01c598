//! egui visuals built from a [`Palette`]

use egui::{Color32, CornerRadius, Shadow, Stroke, Visuals, style::WidgetVisuals};

use super::palette::Palette;

fn widget(v: &mut WidgetVisuals, bg: Color32, weak_bg: Color32, border: Stroke, fg: Stroke) {
    v.bg_fill = bg;
    v.weak_bg_fill = weak_bg;
    v.bg_stroke = border;
    v.fg_stroke = fg;
    v.corner_radius = CornerRadius::same(4);
}

/// Visuals for the given palette
pub fn visuals(p: &Palette, is_dark: bool) -> Visuals {
    let mut v = if is_dark {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    v.panel_fill = p.bg_panel;
    v.window_fill = p.bg_elevated;
    v.extreme_bg_color = p.bg_base;
    v.faint_bg_color = p.bg_input;

    v.selection.bg_fill = p.accent_subtle;
    v.selection.stroke = Stroke::new(1.0, p.accent);
    v.hyperlink_color = p.accent;
    v.override_text_color = Some(p.text_primary);

    let subtle = Stroke::new(1.0, p.border_subtle);
    widget(
        &mut v.widgets.noninteractive,
        p.bg_input,
        p.bg_panel,
        subtle,
        Stroke::new(1.0, p.text_secondary),
    );
    widget(
        &mut v.widgets.inactive,
        p.bg_input,
        p.bg_input,
        subtle,
        Stroke::new(1.0, p.text_primary),
    );
    widget(
        &mut v.widgets.hovered,
        p.bg_hover,
        p.bg_hover,
        Stroke::new(1.0, p.border_normal),
        Stroke::new(1.5, p.text_primary),
    );
    widget(
        &mut v.widgets.active,
        p.accent,
        p.accent,
        Stroke::new(1.0, p.accent),
        Stroke::new(2.0, p.on_accent),
    );
    widget(
        &mut v.widgets.open,
        p.bg_elevated,
        p.bg_elevated,
        Stroke::new(1.0, p.border_normal),
        Stroke::new(1.0, p.text_primary),
    );

    v.window_corner_radius = CornerRadius::same(6);
    v.window_stroke = subtle;
    v.window_shadow = Shadow {
        offset: [0, 4],
        blur: 16,
        spread: 0,
        color: Color32::from_black_alpha(if is_dark { 80 } else { 30 }),
    };
    v.popup_shadow = Shadow {
        offset: [0, 2],
        blur: 8,
        spread: 0,
        color: Color32::from_black_alpha(if is_dark { 60 } else { 20 }),
    };

    v.button_frame = true;
    v.text_cursor.stroke = Stroke::new(2.0, p.text_primary);

    v
}
