//! Action handling module
//!
//! Toolbar buttons and keyboard shortcuts queue [`AppAction`]s on the
//! [`AppState`]; they are processed once per frame before the viewport
//! handles pointer input.

use mv_core::InteractionMode;

use crate::config::{SharedConfig, UiTheme};
use crate::state::{AppAction, AppState};

/// Context for action handlers
pub struct ActionContext<'a> {
    pub state: &'a mut AppState,
    pub config: &'a SharedConfig,
}

impl<'a> ActionContext<'a> {
    pub fn new(state: &'a mut AppState, config: &'a SharedConfig) -> Self {
        Self { state, config }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &mut ActionContext) {
    let state = &mut *ctx.state;
    match action {
        AppAction::SetMode(mode) => match mode {
            InteractionMode::Viewer => state.controller.set_view_mode(&mut state.scene),
            InteractionMode::Translate => state.controller.set_translate_mode(&mut state.scene),
            InteractionMode::Rotate => state.controller.set_rotate_mode(&mut state.scene),
        },
        AppAction::ResetToOrigin => state.controller.reset_to_origin(&mut state.scene),
        AppAction::SaveCurrentAsOrigin => state.controller.save_current_as_origin(&state.scene),
        AppAction::ToggleTheme => {
            let mut config = ctx.config.write();
            let next = match config.config().ui.theme {
                UiTheme::Dark => UiTheme::Light,
                UiTheme::Light => UiTheme::Dark,
            };
            config.set_theme(next);
            if let Err(e) = config.save() {
                tracing::error!("Failed to save config: {}", e);
            }
        }
    }
}

/// Drain and dispatch all pending actions
pub fn process_actions(state: &mut AppState, config: &SharedConfig) {
    let actions = state.take_pending_actions();
    if actions.is_empty() {
        return;
    }
    let mut ctx = ActionContext::new(state, config);
    for action in actions {
        tracing::debug!("Processing {:?}", action);
        dispatch_action(action, &mut ctx);
    }
}

/// Keyboard shortcut for an action, checked when no text field has focus
pub fn shortcut_action(input: &egui::InputState) -> Option<AppAction> {
    if input.modifiers.any() {
        return None;
    }
    if input.key_pressed(egui::Key::V) || input.key_pressed(egui::Key::Escape) {
        Some(AppAction::SetMode(InteractionMode::Viewer))
    } else if input.key_pressed(egui::Key::T) {
        Some(AppAction::SetMode(InteractionMode::Translate))
    } else if input.key_pressed(egui::Key::R) {
        Some(AppAction::SetMode(InteractionMode::Rotate))
    } else {
        None
    }
}
