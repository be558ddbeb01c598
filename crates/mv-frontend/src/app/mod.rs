//! Main application module

use mv_core::UiTheme;

use crate::actions::process_actions;
use crate::config::{ConfigManager, SharedConfig};
use crate::demo::build_demo_model;
use crate::panels::ViewportPanel;
use crate::state::AppState;
use crate::theme::{ConfigTheme, apply_theme};

/// Main application
pub struct MedicalViewerApp {
    state: AppState,
    config: SharedConfig,
    viewport: ViewportPanel,
    /// Theme last pushed to egui
    applied_theme: UiTheme,
}

impl MedicalViewerApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ConfigManager::from_env().into_shared();
        apply_theme(&cc.egui_ctx, &config);
        let applied_theme = config.read().config().ui.theme;

        let model = build_demo_model();
        let mut state = AppState::new(model.scene, config.read().config());
        state.publish_candidates(model.candidates);
        state.camera.fit_all(glam::Vec3::ZERO, 1.5);

        tracing::info!("Viewer ready");

        Self {
            state,
            viewport: ViewportPanel::new(ConfigTheme::new(config.clone())),
            config,
            applied_theme,
        }
    }

    /// Re-apply visuals after a theme switch
    fn sync_theme(&mut self, ctx: &egui::Context) {
        let theme = self.config.read().config().ui.theme;
        if theme != self.applied_theme {
            apply_theme(ctx, &self.config);
            self.applied_theme = theme;
        }
    }
}

impl eframe::App for MedicalViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process pending actions
        process_actions(&mut self.state, &self.config);
        self.sync_theme(ctx);

        let dt = ctx.input(|i| i.stable_dt);
        self.state.controller.update(&mut self.state.scene, dt);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport.ui(ui, &mut self.state);
            });
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        if let Err(e) = self.config.read().save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }
}
