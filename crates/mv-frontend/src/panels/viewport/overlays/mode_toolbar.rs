//! Interaction mode toolbar overlay for the viewport

use mv_core::{InteractionMode, ThemeProvider};

use crate::state::{AppAction, AppState};
use crate::theme::{overlay_frame, palette::Palette};

const BUTTON_SIZE: egui::Vec2 = egui::vec2(24.0, 24.0);

/// Modes offered by the toolbar. Transform modes need a selection.
pub fn toolbar_modes(has_selection: bool) -> &'static [InteractionMode] {
    if has_selection {
        &InteractionMode::ALL
    } else {
        &[InteractionMode::Viewer]
    }
}

fn mode_icon(mode: InteractionMode) -> (&'static str, &'static str) {
    match mode {
        InteractionMode::Viewer => ("👁", "View (V)"),
        InteractionMode::Translate => ("↔", "Move (T)"),
        InteractionMode::Rotate => ("⟳", "Rotate (R)"),
    }
}

/// Thin arrow used to collapse and expand the toolbar
fn collapse_arrow(ui: &mut egui::Ui, palette: &Palette, pointing_right: bool) -> egui::Response {
    let (response, painter) = ui.allocate_painter(egui::vec2(10.0, 24.0), egui::Sense::click());
    if response.hovered() {
        painter.rect_filled(response.rect, 2.0, palette.bg_hover);
    }

    let center = response.rect.center();
    let (dx, dy) = if pointing_right { (3.0, 5.0) } else { (-3.0, 5.0) };
    let tip = egui::pos2(center.x + dx, center.y);
    let top = egui::pos2(center.x - dx, center.y - dy);
    let bottom = egui::pos2(center.x - dx, center.y + dy);

    let color = if response.hovered() {
        palette.text_primary
    } else {
        palette.text_secondary
    };
    painter.line_segment([top, tip], egui::Stroke::new(1.0, color));
    painter.line_segment([tip, bottom], egui::Stroke::new(1.0, color));
    response
}

/// Render the mode toolbar in the top-left corner and queue the chosen actions
pub fn render_mode_toolbar(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    state: &mut AppState,
    theme: &dyn ThemeProvider,
    collapsed: &mut bool,
) {
    let is_dark = theme.is_dark_mode();
    let palette = Palette::for_theme(is_dark);
    let pos = egui::pos2(rect.left() + 10.0, rect.top() + 10.0);

    egui::Area::new(egui::Id::new("mode_toolbar"))
        .fixed_pos(pos)
        .order(egui::Order::Foreground)
        .show(ui.ctx(), |ui| {
            overlay_frame(is_dark).inner_margin(2.0).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 2.0;

                    if *collapsed {
                        if collapse_arrow(ui, palette, true)
                            .on_hover_text("Show tools")
                            .clicked()
                        {
                            *collapsed = false;
                        }
                        return;
                    }

                    let current = state.controller.mode();
                    let has_selection = state.selection.lock().is_some();
                    for &mode in toolbar_modes(has_selection) {
                        let (icon, hint) = mode_icon(mode);
                        let button = egui::Button::new(icon)
                            .selected(current == mode)
                            .min_size(BUTTON_SIZE);
                        if ui.add(button).on_hover_text(hint).clicked() {
                            state.queue_action(AppAction::SetMode(mode));
                        }
                    }

                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(4.0);

                    let reset = egui::Button::new("⟲").min_size(BUTTON_SIZE);
                    if ui.add(reset).on_hover_text("Reset to origin").clicked() {
                        state.queue_action(AppAction::ResetToOrigin);
                    }
                    let save = egui::Button::new("📌").min_size(BUTTON_SIZE);
                    if ui.add(save).on_hover_text("Save pose as origin").clicked() {
                        state.queue_action(AppAction::SaveCurrentAsOrigin);
                    }
                    let theme_icon = if is_dark { "☀" } else { "🌙" };
                    let toggle = egui::Button::new(theme_icon).min_size(BUTTON_SIZE);
                    if ui.add(toggle).on_hover_text("Toggle theme").clicked() {
                        state.queue_action(AppAction::ToggleTheme);
                    }

                    ui.add_space(4.0);
                    ui.separator();
                    ui.add_space(2.0);

                    if collapse_arrow(ui, palette, false)
                        .on_hover_text("Hide tools")
                        .clicked()
                    {
                        *collapsed = true;
                    }
                });
            });
        });
}
