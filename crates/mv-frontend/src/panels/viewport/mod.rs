//! 3D Viewport panel

mod draw;
mod overlays;

use mv_core::{InteractionMode, ThemeProvider};
use mv_renderer::PointerEvent;

use crate::actions::shortcut_action;
use crate::state::AppState;
use crate::theme::ConfigTheme;
use crate::theme::palette::Palette;

pub use draw::{ViewTransform, material_color};
use overlays::render_mode_toolbar;

const ORBIT_SENSITIVITY: f32 = 0.005;

/// 3D viewport panel
pub struct ViewportPanel {
    theme: ConfigTheme,
    toolbar_collapsed: bool,
    /// The current primary press started on a gizmo handle
    gizmo_press: bool,
}

impl ViewportPanel {
    pub fn new(theme: ConfigTheme) -> Self {
        Self {
            theme,
            toolbar_collapsed: false,
            gizmo_press: false,
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, state: &mut AppState) {
        let available_size = ui.available_size();
        if available_size.x < 1.0 || available_size.y < 1.0 {
            return;
        }

        let (response, painter) =
            ui.allocate_painter(available_size, egui::Sense::click_and_drag());
        let rect = response.rect;
        state.camera.update_aspect(rect.width() / rect.height());

        let to_pointer = |pos: egui::Pos2| {
            PointerEvent::new(pos.x - rect.min.x, pos.y - rect.min.y, rect.width(), rect.height())
        };

        // Hover highlight, frozen while a handle is dragged
        match response.hover_pos() {
            Some(pos) if !state.controller.gizmo().is_dragging() => {
                state
                    .controller
                    .on_pointer_move(&mut state.scene, &state.camera, to_pointer(pos));
            }
            Some(_) => {}
            None => state.controller.on_pointer_leave(&mut state.scene),
        }

        // A press on a gizmo handle starts a drag; anything else waits for
        // the click so orbit drags don't change the selection
        let pressed = response.hovered() && ui.input(|i| i.pointer.primary_pressed());
        if pressed && let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
            let pointer = to_pointer(pos);
            let ray = state.camera.pointer_ray(&pointer);
            self.gizmo_press = !state.controller.gizmo().raycast_gizmo(&ray).is_empty();
            if self.gizmo_press {
                state
                    .controller
                    .on_pointer_down(&state.scene, &state.camera, pointer);
            }
        }

        if response.clicked()
            && !self.gizmo_press
            && let Some(pos) = response.interact_pointer_pos()
        {
            state
                .controller
                .on_click(&state.scene, &state.camera, to_pointer(pos));
        }

        if response.dragged_by(egui::PointerButton::Primary)
            && let Some(pos) = response.interact_pointer_pos()
        {
            let consumed =
                state
                    .controller
                    .on_pointer_drag(&mut state.scene, &state.camera, to_pointer(pos));
            if !consumed && !self.gizmo_press && state.orbit.is_enabled() {
                let delta = response.drag_delta();
                state
                    .camera
                    .orbit(-delta.x * ORBIT_SENSITIVITY, delta.y * ORBIT_SENSITIVITY);
            }
        }

        if (response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle))
            && state.orbit.is_enabled()
        {
            let delta = response.drag_delta();
            state.camera.pan(delta.x, delta.y);
        }

        if ui.input(|i| i.pointer.primary_released()) {
            state.controller.on_pointer_up();
            self.gizmo_press = false;
        }

        // Zoom with scroll
        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll_delta != 0.0 {
                state.camera.zoom(scroll_delta * 0.01);
            }
            if let Some(action) = ui.input(shortcut_action) {
                state.queue_action(action);
            }
        }

        response.context_menu(|ui| {
            if ui.button("Reset View").clicked() {
                state.camera.fit_all(glam::Vec3::ZERO, 1.5);
                ui.close_menu();
            }
        });

        // Scene
        let is_dark = self.theme.is_dark_mode();
        let palette = Palette::for_theme(is_dark);
        painter.rect_filled(rect, 0.0, palette.bg_base);

        let view = ViewTransform {
            camera: &state.camera,
            rect,
        };
        draw::draw_scene(
            &painter,
            &view,
            &state.scene,
            state.scene.roots(),
            state.controller.selected(),
        );
        draw::draw_gizmo(&painter, &view, state.controller.gizmo().widget());

        // Status line
        let mode = state.controller.mode();
        let status = match (mode, state.selected_name()) {
            (InteractionMode::Viewer, None) => "View mode".to_string(),
            (_, None) => format!("{} mode: nothing selected", mode_label(mode)),
            (_, Some(name)) => format!("{} mode: {}", mode_label(mode), name),
        };
        painter.text(
            rect.left_bottom() + egui::vec2(10.0, -10.0),
            egui::Align2::LEFT_BOTTOM,
            status,
            egui::FontId::proportional(13.0),
            palette.text_secondary,
        );

        render_mode_toolbar(
            ui,
            rect,
            state,
            &self.theme,
            &mut self.toolbar_collapsed,
        );

        // Keep the hover pulse animating
        if state.controller.hovered().is_some() {
            ui.ctx().request_repaint();
        }
    }
}

fn mode_label(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::Viewer => "View",
        InteractionMode::Translate => "Move",
        InteractionMode::Rotate => "Rotate",
    }
}
