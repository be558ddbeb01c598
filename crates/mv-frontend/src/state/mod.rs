//! Application state module

mod gizmo_adapter;
mod selection;

pub use gizmo_adapter::GizmoAdapter;
pub use selection::{PointerDown, SelectionController};

use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use mv_core::{
    CandidateSource, InteractionMode, ManipulationFlag, Scene, SelectionPolicy, ViewerConfig,
};
use mv_renderer::{Camera, OrbitControls, TransformGizmo};

/// Actions that can be performed on the app state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Switch interaction mode
    SetMode(InteractionMode),
    /// Put every candidate back to its initial pose
    ResetToOrigin,
    /// Make the current poses the new initial poses
    SaveCurrentAsOrigin,
    /// Flip between dark and light theme
    ToggleTheme,
}

/// Latest selection as reported by the controller
pub type SharedSelection = Arc<Mutex<Option<Uuid>>>;

/// Everything the viewport works on
pub struct AppState {
    pub scene: Scene,
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub manipulation: ManipulationFlag,
    pub candidates: CandidateSource,
    pub controller: SelectionController,
    /// Mirrors the controller's selection through its primary callback
    pub selection: SharedSelection,
    pending_actions: Vec<AppAction>,
}

impl AppState {
    /// Wire the controller, gizmo and camera around `scene`
    pub fn new(scene: Scene, config: &ViewerConfig) -> Self {
        let orbit = OrbitControls::new();
        let manipulation = ManipulationFlag::new();
        let candidates = CandidateSource::new();

        let gizmo = GizmoAdapter::new(
            TransformGizmo::new(config.gizmo.size),
            SelectionPolicy::from(&config.selection),
            Box::new(manipulation.clone()),
            Box::new(orbit.clone()),
        );
        let mut controller = SelectionController::new(gizmo, config, candidates.clone());

        let selection: SharedSelection = Arc::new(Mutex::new(None));
        let sink = selection.clone();
        controller.set_on_select_callback(move |id| *sink.lock() = id);

        Self {
            scene,
            camera: Camera::new(16.0 / 9.0),
            orbit,
            manipulation,
            candidates,
            controller,
            selection,
            pending_actions: Vec::new(),
        }
    }

    /// Publish the pickable objects. Observed on the next frame.
    pub fn publish_candidates(&self, ids: impl IntoIterator<Item = Uuid>) {
        self.candidates.publish(ids);
    }

    pub fn selected_name(&self) -> Option<&str> {
        let id = (*self.selection.lock())?;
        self.scene.get(id).map(|object| object.name.as_str())
    }

    /// Queue an action
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }
}
