//! Gizmo ownership and mode gating
//!
//! The adapter owns the single gizmo widget. Every attach, detach and mode
//! change goes through it so at most one object is manipulated at a time.
//! Failures are logged and leave the gizmo detached; nothing here returns
//! an error to the caller.

use uuid::Uuid;

use mv_core::{InteractionMode, ManipulationObserver, OrbitToggle, Ray, Scene, SelectionPolicy};
use mv_renderer::{
    GizmoAxis, GizmoHit, GizmoOperation, GizmoTransform, GizmoWidget, TransformGizmo,
};

/// Owns the transform gizmo and the current interaction mode
pub struct GizmoAdapter<W: GizmoWidget = TransformGizmo> {
    widget: W,
    policy: SelectionPolicy,
    mode: InteractionMode,
    /// Last object offered for manipulation
    candidate: Option<Uuid>,
    dragging: bool,
    observer: Box<dyn ManipulationObserver>,
    orbit: Box<dyn OrbitToggle>,
}

impl<W: GizmoWidget> GizmoAdapter<W> {
    /// Create an adapter in viewer mode with the gizmo hidden
    pub fn new(
        mut widget: W,
        policy: SelectionPolicy,
        observer: Box<dyn ManipulationObserver>,
        orbit: Box<dyn OrbitToggle>,
    ) -> Self {
        widget.set_visible(false);
        Self {
            widget,
            policy,
            mode: InteractionMode::Viewer,
            candidate: None,
            dragging: false,
            observer,
            orbit,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn candidate(&self) -> Option<Uuid> {
        self.candidate
    }

    /// Object currently bound to the gizmo
    pub fn attached(&self) -> Option<Uuid> {
        self.widget.attached()
    }

    pub fn is_visible(&self) -> bool {
        self.widget.is_visible()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }

    /// Offer `id` for manipulation. Attaches right away unless in viewer mode.
    pub fn register_candidate(&mut self, scene: &Scene, id: Uuid) {
        if self.candidate == Some(id) {
            tracing::debug!("Object {} is already the gizmo candidate", id);
            return;
        }
        if let Err(e) = self.policy.check_visible(scene, id) {
            tracing::warn!("Ignoring gizmo candidate: {}", e);
            return;
        }

        self.candidate = Some(id);
        if self.mode.is_manipulating() && !self.attach(scene, id) {
            self.detach();
        }
    }

    /// Forget the candidate so a later mode switch has nothing to attach
    pub fn clear_candidate(&mut self) {
        self.candidate = None;
    }

    /// Bind the gizmo to `id`. Returns false if the object is ineligible or
    /// the widget refused the bind; the gizmo is left as it was in the
    /// first case and detached in the second.
    pub fn attach(&mut self, scene: &Scene, id: Uuid) -> bool {
        if let Err(e) = self.policy.check_attachable(scene, id, self.mode) {
            tracing::warn!("Gizmo attach rejected: {}", e);
            return false;
        }

        if self.widget.attached().is_some_and(|current| current != id) {
            self.detach();
        }

        self.observer.set_manipulation_active(true);
        if let Err(e) = self.widget.attach(scene, id) {
            tracing::error!("Gizmo bind failed: {}", e);
            self.observer.set_manipulation_active(false);
            self.widget.set_visible(false);
            return false;
        }
        self.widget.set_visible(true);

        tracing::debug!("Gizmo attached to {} ({} mode)", id, self.mode);
        true
    }

    /// Unbind and hide the gizmo. Safe to call when nothing is attached.
    pub fn detach(&mut self) {
        if self.dragging {
            self.set_dragging(false);
        }
        self.widget.detach();
        self.widget.set_visible(false);
        self.observer.set_manipulation_active(false);
    }

    pub fn set_mode(&mut self, scene: &Scene, mode: InteractionMode) {
        self.end_drag();
        tracing::debug!("Interaction mode {} -> {}", self.mode, mode);
        self.mode = mode;

        let operation = match mode {
            InteractionMode::Viewer => {
                self.detach();
                self.orbit.set_enabled(true);
                self.observer.set_manipulation_active(false);
                return;
            }
            InteractionMode::Translate => GizmoOperation::Translate,
            InteractionMode::Rotate => GizmoOperation::Rotate,
        };

        self.widget.set_operation(operation);
        match self.candidate {
            Some(id) => {
                if !self.attach(scene, id) {
                    self.detach();
                }
            }
            None => {
                tracing::info!("No object selected for {} mode", mode);
                self.detach();
            }
        }
    }

    /// Gizmo handles crossed by `ray`, nearest first. Empty while hidden.
    pub fn raycast_gizmo(&self, ray: &Ray) -> Vec<GizmoHit> {
        if !self.widget.is_visible() {
            return Vec::new();
        }
        self.widget.hit_test(ray)
    }

    /// Start dragging the handle under `ray`
    pub fn begin_drag(&mut self, ray: &Ray) -> Option<GizmoAxis> {
        if !self.mode.is_manipulating() || !self.widget.is_visible() {
            return None;
        }
        let axis = self.widget.begin_drag(ray)?;
        self.set_dragging(true);
        Some(axis)
    }

    pub fn drag(&mut self, scene: &mut Scene, ray: &Ray) -> Option<GizmoTransform> {
        if !self.dragging {
            return None;
        }
        self.widget.drag(scene, ray)
    }

    pub fn end_drag(&mut self) {
        if self.dragging {
            self.widget.end_drag();
            self.set_dragging(false);
        }
    }

    fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
        self.orbit.set_enabled(!dragging);
        tracing::debug!("Gizmo dragging: {}", dragging);
    }

    /// Per-frame widget sync
    pub fn update(&mut self, scene: &Scene) {
        self.widget.update(scene);
        // The widget drops targets that left the scene
        if self.widget.is_visible() && self.widget.attached().is_none() {
            self.detach();
        }
    }

    /// Detach and release the widget
    pub fn dispose(mut self) {
        self.detach();
        self.widget.dispose();
        tracing::info!("Gizmo disposed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use mv_core::{BoundingBox, ManipulationFlag, Material, SceneObject};
    use mv_renderer::{GizmoError, OrbitControls};

    struct Fixture {
        scene: Scene,
        liver: Uuid,
        plain: Uuid,
        ghost: Uuid,
        flag: ManipulationFlag,
        orbit: OrbitControls,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::new();
        let cube = BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5));
        let liver = scene.add(SceneObject::mesh("liver_mov", cube));
        let plain = scene.add(SceneObject::mesh("gallbladder", cube));
        let ghost = scene.add(
            SceneObject::mesh("capsule_mov", cube).with_material(Material::default().opacity(0.005)),
        );
        Fixture {
            scene,
            liver,
            plain,
            ghost,
            flag: ManipulationFlag::new(),
            orbit: OrbitControls::new(),
        }
    }

    fn adapter<W: GizmoWidget>(f: &Fixture, widget: W) -> GizmoAdapter<W> {
        GizmoAdapter::new(
            widget,
            SelectionPolicy::default(),
            Box::new(f.flag.clone()),
            Box::new(f.orbit.clone()),
        )
    }

    /// Widget whose bind always throws
    struct BrokenGizmo(TransformGizmo);

    impl GizmoWidget for BrokenGizmo {
        fn attach(&mut self, _scene: &Scene, _target: Uuid) -> Result<(), GizmoError> {
            Err(GizmoError::Disposed)
        }
        fn detach(&mut self) {
            self.0.detach()
        }
        fn attached(&self) -> Option<Uuid> {
            self.0.attached()
        }
        fn set_visible(&mut self, visible: bool) {
            self.0.set_visible(visible)
        }
        fn is_visible(&self) -> bool {
            self.0.is_visible()
        }
        fn set_operation(&mut self, operation: GizmoOperation) {
            self.0.set_operation(operation)
        }
        fn operation(&self) -> GizmoOperation {
            self.0.operation()
        }
        fn hit_test(&self, ray: &Ray) -> Vec<GizmoHit> {
            self.0.hit_test(ray)
        }
        fn begin_drag(&mut self, ray: &Ray) -> Option<GizmoAxis> {
            self.0.begin_drag(ray)
        }
        fn drag(&mut self, scene: &mut Scene, ray: &Ray) -> Option<GizmoTransform> {
            self.0.drag(scene, ray)
        }
        fn end_drag(&mut self) {
            self.0.end_drag()
        }
        fn is_dragging(&self) -> bool {
            self.0.is_dragging()
        }
        fn update(&mut self, scene: &Scene) {
            self.0.update(scene)
        }
        fn dispose(&mut self) {
            self.0.dispose()
        }
    }

    fn down_z(x: f32) -> Ray {
        Ray::new(Vec3::new(x, 0.0, 5.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_viewer_mode_candidate_does_not_attach() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.register_candidate(&f.scene, f.liver);

        assert_eq!(gizmo.candidate(), Some(f.liver));
        assert!(gizmo.attached().is_none());
        assert!(!gizmo.is_visible());
        assert!(!f.flag.get());
    }

    #[test]
    fn test_translate_mode_attaches_candidate() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.register_candidate(&f.scene, f.liver);
        gizmo.set_mode(&f.scene, InteractionMode::Translate);

        assert_eq!(gizmo.attached(), Some(f.liver));
        assert!(gizmo.is_visible());
        assert!(f.flag.get());
        assert_eq!(gizmo.widget().operation(), GizmoOperation::Translate);
    }

    #[test]
    fn test_invisible_object_never_attaches() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        for mode in InteractionMode::ALL {
            gizmo.set_mode(&f.scene, mode);
            assert!(!gizmo.attach(&f.scene, f.ghost));
            gizmo.register_candidate(&f.scene, f.ghost);
            assert!(gizmo.attached().is_none());
            assert!(!gizmo.is_visible());
            assert!(!f.flag.get());
        }
        assert!(gizmo.candidate().is_none());
    }

    #[test]
    fn test_non_movable_rejected_while_manipulating() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());

        gizmo.register_candidate(&f.scene, f.plain);
        assert_eq!(gizmo.candidate(), Some(f.plain));

        for mode in [InteractionMode::Translate, InteractionMode::Rotate] {
            gizmo.set_mode(&f.scene, mode);
            assert!(!gizmo.attach(&f.scene, f.plain));
            assert!(gizmo.attached().is_none());
            assert!(!f.flag.get());
        }
    }

    #[test]
    fn test_attach_replaces_previous_target() {
        let mut f = fixture();
        let kidney = f.scene.add(SceneObject::mesh(
            "kidney_mov",
            BoundingBox::new(Vec3::ZERO, Vec3::ONE),
        ));
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.set_mode(&f.scene, InteractionMode::Rotate);

        gizmo.register_candidate(&f.scene, f.liver);
        assert_eq!(gizmo.attached(), Some(f.liver));
        gizmo.register_candidate(&f.scene, kidney);
        assert_eq!(gizmo.attached(), Some(kidney));
        assert!(f.flag.get());
    }

    #[test]
    fn test_ineligible_candidate_releases_previous_target() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.set_mode(&f.scene, InteractionMode::Translate);
        gizmo.register_candidate(&f.scene, f.liver);
        assert_eq!(gizmo.attached(), Some(f.liver));

        gizmo.register_candidate(&f.scene, f.plain);
        assert!(gizmo.attached().is_none());
        assert!(!gizmo.is_visible());
        assert!(!f.flag.get());
    }

    #[test]
    fn test_bind_failure_reverts_manipulation_flag() {
        let f = fixture();
        let mut gizmo = adapter(&f, BrokenGizmo(TransformGizmo::default()));
        gizmo.register_candidate(&f.scene, f.liver);
        gizmo.set_mode(&f.scene, InteractionMode::Translate);

        assert!(!gizmo.attach(&f.scene, f.liver));
        assert!(!f.flag.get());
        assert!(!gizmo.is_visible());
        assert_eq!(gizmo.mode(), InteractionMode::Translate);
    }

    #[test]
    fn test_viewer_mode_always_hides_gizmo() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.register_candidate(&f.scene, f.liver);
        gizmo.set_mode(&f.scene, InteractionMode::Translate);
        assert!(gizmo.begin_drag(&down_z(0.5)).is_some());
        assert!(!f.orbit.is_enabled());

        gizmo.set_mode(&f.scene, InteractionMode::Viewer);
        assert!(!gizmo.is_visible());
        assert!(!f.flag.get());
        assert!(f.orbit.is_enabled());
        assert!(!gizmo.is_dragging());
    }

    #[test]
    fn test_detach_is_idempotent() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.detach();
        gizmo.detach();
        assert!(gizmo.attached().is_none());
        assert!(!f.flag.get());
    }

    #[test]
    fn test_drag_toggles_orbit_camera() {
        let mut f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.register_candidate(&f.scene, f.liver);
        gizmo.set_mode(&f.scene, InteractionMode::Translate);

        assert!(!gizmo.raycast_gizmo(&down_z(0.5)).is_empty());
        assert_eq!(gizmo.begin_drag(&down_z(0.5)), Some(GizmoAxis::X));
        assert!(!f.orbit.is_enabled());

        gizmo.drag(&mut f.scene, &down_z(1.0)).unwrap();
        assert!((f.scene.get(f.liver).unwrap().pose.position.x - 0.5).abs() < 1e-5);

        gizmo.end_drag();
        assert!(f.orbit.is_enabled());
        assert!(!gizmo.is_dragging());
    }

    #[test]
    fn test_raycast_empty_while_hidden() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.register_candidate(&f.scene, f.liver);
        assert!(gizmo.raycast_gizmo(&down_z(0.5)).is_empty());
        assert!(gizmo.begin_drag(&down_z(0.5)).is_none());
    }

    #[test]
    fn test_update_detaches_removed_target() {
        let mut f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.register_candidate(&f.scene, f.liver);
        gizmo.set_mode(&f.scene, InteractionMode::Translate);

        f.scene.remove(f.liver);
        gizmo.update(&f.scene);
        assert!(!gizmo.is_visible());
        assert!(!f.flag.get());
    }

    #[test]
    fn test_dispose_clears_manipulation() {
        let f = fixture();
        let mut gizmo = adapter(&f, TransformGizmo::default());
        gizmo.register_candidate(&f.scene, f.liver);
        gizmo.set_mode(&f.scene, InteractionMode::Translate);
        gizmo.dispose();
        assert!(!f.flag.get());
    }
}
