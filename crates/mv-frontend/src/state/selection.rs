//! Pointer-driven selection, hover highlighting and mode switching

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};

use glam::Vec3;
use uuid::Uuid;

use mv_core::{
    CandidateSet, CandidateSource, EmissiveState, HoverConfig, InitialTransforms, InteractionMode,
    Ray, Scene, SelectionPolicy, SubscriptionId, ViewerConfig,
};
use mv_renderer::{
    Camera, GizmoAxis, GizmoWidget, Intersection, PointerEvent, TransformGizmo, intersect_objects,
};

use super::gizmo_adapter::GizmoAdapter;

/// What a primary-button press landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    /// A gizmo handle. `None` if the handle could not start a drag.
    Gizmo(Option<GizmoAxis>),
    /// The scene. Carries the selection after the press.
    Scene(Option<Uuid>),
}

#[derive(Debug, Clone, Copy)]
struct HoverState {
    object: Uuid,
    started_at: f64,
}

/// Turns pointer events into selection, hover and gizmo actions
pub struct SelectionController<W: GizmoWidget = TransformGizmo> {
    gizmo: GizmoAdapter<W>,
    policy: SelectionPolicy,
    hover_config: HoverConfig,
    mode: InteractionMode,
    selected: Option<Uuid>,
    hover: Option<HoverState>,
    /// Emissive state before the first hover, per object
    hover_originals: HashMap<Uuid, EmissiveState>,
    source: CandidateSource,
    candidates: CandidateSet,
    initial: InitialTransforms,
    /// Seconds accumulated from `update`
    clock: f64,
    events: mv_core::SelectionEvents,
    primary_callback: Option<SubscriptionId>,
}

impl<W: GizmoWidget> SelectionController<W> {
    pub fn new(gizmo: GizmoAdapter<W>, config: &ViewerConfig, source: CandidateSource) -> Self {
        Self {
            gizmo,
            policy: SelectionPolicy::from(&config.selection),
            hover_config: config.hover.clone(),
            mode: InteractionMode::Viewer,
            selected: None,
            hover: None,
            hover_originals: HashMap::new(),
            source,
            candidates: CandidateSet::default(),
            initial: InitialTransforms::new(),
            clock: 0.0,
            events: mv_core::SelectionEvents::new(),
            primary_callback: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn selected(&self) -> Option<Uuid> {
        self.selected
    }

    pub fn hovered(&self) -> Option<Uuid> {
        self.hover.map(|h| h.object)
    }

    pub fn gizmo(&self) -> &GizmoAdapter<W> {
        &self.gizmo
    }

    /// Candidate list as of the last `update`
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn initial_transforms(&self) -> &InitialTransforms {
        &self.initial
    }

    // ========== Pointer input ==========

    /// Update the hover highlight for the object under the pointer
    pub fn on_pointer_move(&mut self, scene: &mut Scene, camera: &Camera, pointer: PointerEvent) {
        let ray = camera.pointer_ray(&pointer);
        let previous = self.hover;
        self.clear_hover(scene);

        if self.mode == InteractionMode::Viewer && !self.hover_config.hover_in_viewer_mode {
            return;
        }
        let Some(hit) = self.pick(scene, &ray) else {
            return;
        };
        if let Err(e) = self.policy.check_hoverable(scene, hit.object) {
            tracing::trace!("Not hoverable: {}", e);
            return;
        }

        // Staying on the same object keeps the pulse phase
        let started_at = match previous {
            Some(h) if h.object == hit.object => h.started_at,
            _ => self.clock,
        };
        let intensity = self
            .hover_config
            .pulse_intensity((self.clock - started_at) as f32);

        let Some(material) = scene
            .get_mut(hit.object)
            .and_then(|object| object.material.as_mut())
        else {
            return;
        };
        self.hover_originals
            .entry(hit.object)
            .or_insert_with(|| material.emissive_state());
        material.set_emissive_state(EmissiveState {
            color: self.hover_config.highlight_color,
            intensity,
        });

        self.hover = Some(HoverState {
            object: hit.object,
            started_at,
        });
    }

    /// Pointer left the viewport
    pub fn on_pointer_leave(&mut self, scene: &mut Scene) {
        self.clear_hover(scene);
    }

    /// Select the nearest eligible object under the pointer, or nothing
    pub fn on_click(&mut self, scene: &Scene, camera: &Camera, pointer: PointerEvent) {
        let ray = camera.pointer_ray(&pointer);
        self.select_at(scene, &ray);
    }

    /// Primary press. Gizmo handles win over meshes behind them.
    pub fn on_pointer_down(
        &mut self,
        scene: &Scene,
        camera: &Camera,
        pointer: PointerEvent,
    ) -> PointerDown {
        let ray = camera.pointer_ray(&pointer);

        if !self.gizmo.raycast_gizmo(&ray).is_empty() {
            let axis = self.gizmo.begin_drag(&ray);
            tracing::debug!("Pointer down on gizmo handle {:?}", axis);
            return PointerDown::Gizmo(axis);
        }

        self.select_at(scene, &ray);
        PointerDown::Scene(self.selected)
    }

    /// Forward a drag to the gizmo. Returns false when no gizmo drag is
    /// active, so the caller may orbit the camera instead.
    pub fn on_pointer_drag(&mut self, scene: &mut Scene, camera: &Camera, pointer: PointerEvent) -> bool {
        if !self.gizmo.is_dragging() {
            return false;
        }
        let ray = camera.pointer_ray(&pointer);
        self.gizmo.drag(scene, &ray);
        true
    }

    pub fn on_pointer_up(&mut self) {
        self.gizmo.end_drag();
    }

    fn pick(&self, scene: &Scene, ray: &Ray) -> Option<Intersection> {
        intersect_objects(scene, ray, self.candidates.iter(), true)
            .into_iter()
            .next()
    }

    fn select_at(&mut self, scene: &Scene, ray: &Ray) {
        let target = self.pick(scene, ray).map(|hit| hit.object);
        self.select(scene, target);
    }

    /// Make `target` the selection. Invisible or unknown objects select
    /// nothing. Subscribers are notified either way.
    pub fn select(&mut self, scene: &Scene, target: Option<Uuid>) {
        let target = target.filter(|&id| match self.policy.check_visible(scene, id) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Selection ignored: {}", e);
                false
            }
        });

        self.selected = target;
        match target {
            Some(id) => {
                tracing::debug!("Selected {}", id);
                self.gizmo.register_candidate(scene, id);
            }
            None => {
                self.gizmo.detach();
                self.gizmo.clear_candidate();
            }
        }
        self.events.emit(target);
    }

    fn clear_hover(&mut self, scene: &mut Scene) {
        let Some(hover) = self.hover.take() else {
            return;
        };
        let Some(original) = self.hover_originals.get(&hover.object) else {
            return;
        };
        if let Some(material) = scene
            .get_mut(hover.object)
            .and_then(|object| object.material.as_mut())
        {
            material.set_emissive_state(*original);
        }
    }

    // ========== Modes ==========

    pub fn set_mode(&mut self, scene: &mut Scene, mode: InteractionMode) {
        tracing::info!("Interaction mode: {}", mode);
        self.mode = mode;
        if mode == InteractionMode::Viewer {
            self.clear_hover(scene);
        }
        self.gizmo.set_mode(scene, mode);
    }

    pub fn set_translate_mode(&mut self, scene: &mut Scene) {
        self.set_mode(scene, InteractionMode::Translate);
    }

    pub fn set_rotate_mode(&mut self, scene: &mut Scene) {
        self.set_mode(scene, InteractionMode::Rotate);
    }

    pub fn set_view_mode(&mut self, scene: &mut Scene) {
        self.set_mode(scene, InteractionMode::Viewer);
    }

    // ========== Poses ==========

    /// Restore every candidate and its descendants to their snapshot pose
    /// and return to viewer mode. Objects without a snapshot keep their pose,
    /// which becomes their snapshot.
    pub fn reset_to_origin(&mut self, scene: &mut Scene) {
        self.gizmo.end_drag();

        let mut restored = 0;
        for id in self.managed_objects(scene) {
            let Some(object) = scene.get_mut(id) else {
                continue;
            };
            match self.initial.get(id) {
                Some(pose) => {
                    object.pose = *pose;
                    restored += 1;
                }
                None => {
                    tracing::warn!(
                        "No initial transform for '{}', keeping its current pose",
                        object.name
                    );
                    self.initial.record(id, object.pose);
                }
            }
        }
        tracing::info!("Reset {} objects to their initial pose", restored);

        self.set_view_mode(scene);
    }

    /// Replace the snapshots of all candidates and their descendants with
    /// their current pose
    pub fn save_current_as_origin(&mut self, scene: &Scene) {
        let mut saved = 0;
        for id in self.managed_objects(scene) {
            if let Some(object) = scene.get(id) {
                self.initial.record(id, object.pose);
                saved += 1;
            }
        }
        tracing::info!("Saved {} poses as origin", saved);
    }

    /// Candidates plus every pickable descendant, each listed once
    fn managed_objects(&self, scene: &Scene) -> Vec<Uuid> {
        for id in self.candidates.iter().filter(|id| !scene.contains(*id)) {
            tracing::warn!("Candidate object {} is not in the scene", id);
        }
        scene.expand_subtrees(self.candidates.iter())
    }

    // ========== Per frame ==========

    /// Advance the clock by `dt` seconds and run the per-frame work
    pub fn update(&mut self, scene: &mut Scene, dt: f32) {
        self.clock += f64::from(dt.max(0.0));
        self.refresh_candidates(scene);

        if self.mode == InteractionMode::Rotate
            && let Some(object) = self.selected.and_then(|id| scene.get_mut(id))
        {
            let r = object.pose.rotation;
            object.pose.rotation = Vec3::new(wrap_angle(r.x), wrap_angle(r.y), wrap_angle(r.z));
        }

        if let Some(hover) = self.hover {
            let intensity = self
                .hover_config
                .pulse_intensity((self.clock - hover.started_at) as f32);
            if let Some(material) = scene
                .get_mut(hover.object)
                .and_then(|object| object.material.as_mut())
            {
                material.emissive_intensity = intensity;
            }
        }

        if self.mode.is_manipulating() {
            self.gizmo.update(scene);
        }
    }

    fn refresh_candidates(&mut self, scene: &Scene) {
        if self.source.version() == self.candidates.version() {
            return;
        }
        self.candidates = self.source.snapshot();
        let captured = self
            .initial
            .capture_missing(scene, self.managed_objects(scene));
        tracing::debug!(
            "Candidate set v{}: {} objects, {} new snapshots",
            self.candidates.version(),
            self.candidates.len(),
            captured
        );
    }

    // ========== Notifications ==========

    pub fn subscribe(&mut self, callback: impl FnMut(Option<Uuid>) + 'static) -> SubscriptionId {
        self.events.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    /// Register the primary selection callback, replacing the previous one.
    /// Other subscribers are unaffected.
    pub fn set_on_select_callback(&mut self, callback: impl FnMut(Option<Uuid>) + 'static) {
        if let Some(previous) = self.primary_callback.take() {
            self.events.unsubscribe(previous);
        }
        self.primary_callback = Some(self.events.subscribe(callback));
    }

    /// Restore hover materials and release the gizmo
    pub fn dispose(mut self, scene: &mut Scene) {
        self.clear_hover(scene);
        self.gizmo.dispose();
    }
}

/// Fold an angle outside `[-2π, 2π]` back into `(-π, π]`
fn wrap_angle(angle: f32) -> f32 {
    if angle.abs() <= TAU {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
