//! Transform gizmo
//!
//! [`GizmoWidget`] is the seam between the interaction layer and whatever
//! draws and picks the gizmo handles. [`TransformGizmo`] is the built-in
//! implementation: three arrows in translate mode, three rings in rotate
//! mode, centred on the attached object's origin.

mod collision;

pub use collision::{ray_cylinder_intersection, ray_ring_intersection};

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use uuid::Uuid;

use mv_core::{Ray, Scene};

use crate::constants::gizmo as constants;

/// Which handle set the gizmo shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoOperation {
    #[default]
    Translate,
    Rotate,
}

/// Which axis is being manipulated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    /// All axes
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    /// Component index (0, 1, 2)
    pub fn index(&self) -> usize {
        match self {
            GizmoAxis::X => 0,
            GizmoAxis::Y => 1,
            GizmoAxis::Z => 2,
        }
    }

    /// World direction of the axis
    pub fn direction(&self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }

    /// Angle of `offset` around this axis
    fn angle_of(&self, offset: Vec3) -> f32 {
        match self {
            GizmoAxis::X => offset.z.atan2(offset.y),
            GizmoAxis::Y => offset.x.atan2(offset.z),
            GizmoAxis::Z => offset.y.atan2(offset.x),
        }
    }
}

/// A ray hit on a gizmo handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoHit {
    /// Handle that was hit
    pub axis: GizmoAxis,
    /// Distance along the ray
    pub distance: f32,
}

/// Transform delta applied by one drag step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoTransform {
    /// World-space translation
    Translation(Vec3),
    /// Angle in radians around an axis
    Rotation(GizmoAxis, f32),
}

/// Gizmo widget failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GizmoError {
    /// The target is not part of the scene
    #[error("cannot attach gizmo: object {0} is not in the scene")]
    TargetNotFound(Uuid),
    /// The widget was disposed
    #[error("gizmo has been disposed")]
    Disposed,
}

/// Operations the interaction layer needs from a transform gizmo
pub trait GizmoWidget {
    /// Bind the gizmo to `target`
    fn attach(&mut self, scene: &Scene, target: Uuid) -> Result<(), GizmoError>;
    /// Unbind; ends any drag in progress
    fn detach(&mut self);
    /// Currently bound object
    fn attached(&self) -> Option<Uuid>;
    /// Show or hide the handles
    fn set_visible(&mut self, visible: bool);
    /// Whether the handles are shown
    fn is_visible(&self) -> bool;
    /// Switch between arrows and rings
    fn set_operation(&mut self, operation: GizmoOperation);
    /// Current handle set
    fn operation(&self) -> GizmoOperation;
    /// All handles crossed by `ray`, nearest first
    fn hit_test(&self, ray: &Ray) -> Vec<GizmoHit>;
    /// Start dragging the nearest handle under `ray`
    fn begin_drag(&mut self, ray: &Ray) -> Option<GizmoAxis>;
    /// Continue a drag, applying the delta to the bound object
    fn drag(&mut self, scene: &mut Scene, ray: &Ray) -> Option<GizmoTransform>;
    /// Finish the current drag
    fn end_drag(&mut self);
    /// Whether a drag is in progress
    fn is_dragging(&self) -> bool;
    /// Per-frame sync with the bound object
    fn update(&mut self, scene: &Scene);
    /// Release resources; further attaches fail
    fn dispose(&mut self);
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    axis: GizmoAxis,
    plane_normal: Vec3,
    last_point: Vec3,
    last_angle: f32,
}

/// Built-in arrow/ring transform gizmo
#[derive(Debug, Clone)]
pub struct TransformGizmo {
    target: Option<Uuid>,
    visible: bool,
    operation: GizmoOperation,
    size: f32,
    position: Vec3,
    drag: Option<DragState>,
    disposed: bool,
}

impl Default for TransformGizmo {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl TransformGizmo {
    /// Create a hidden, detached gizmo with the given handle size
    pub fn new(size: f32) -> Self {
        Self {
            target: None,
            visible: false,
            operation: GizmoOperation::default(),
            size: size.max(1e-3),
            position: Vec3::ZERO,
            drag: None,
            disposed: false,
        }
    }

    /// World-space centre of the handles
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Handle scale
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Axis being dragged, if any
    pub fn drag_axis(&self) -> Option<GizmoAxis> {
        self.drag.map(|d| d.axis)
    }

    fn hit_axis(&self, ray: &Ray, axis: GizmoAxis) -> Option<f32> {
        match self.operation {
            GizmoOperation::Translate => ray_cylinder_intersection(
                ray,
                self.position,
                self.position + axis.direction() * constants::ARROW_LENGTH * self.size,
                constants::HIT_RADIUS * self.size,
            ),
            GizmoOperation::Rotate => ray_ring_intersection(
                ray,
                self.position,
                axis.direction(),
                constants::RING_RADIUS * self.size,
                constants::RING_HIT_THICKNESS * self.size,
            ),
        }
    }

    /// Of the two planes containing `axis`, the one facing the view best
    fn drag_plane_normal(axis: GizmoAxis, view_dir: Vec3) -> Vec3 {
        match axis {
            GizmoAxis::X => {
                if view_dir.y.abs() > view_dir.z.abs() {
                    Vec3::Y
                } else {
                    Vec3::Z
                }
            }
            GizmoAxis::Y => {
                if view_dir.x.abs() > view_dir.z.abs() {
                    Vec3::X
                } else {
                    Vec3::Z
                }
            }
            GizmoAxis::Z => {
                if view_dir.x.abs() > view_dir.y.abs() {
                    Vec3::X
                } else {
                    Vec3::Y
                }
            }
        }
    }

    fn drag_translate(
        &mut self,
        scene: &mut Scene,
        target: Uuid,
        ray: &Ray,
        mut state: DragState,
    ) -> Option<GizmoTransform> {
        let current = ray.intersect_plane(self.position, state.plane_normal)?;
        let axis_dir = state.axis.direction();
        let world_delta = axis_dir * (current - state.last_point).dot(axis_dir);

        let local_delta = scene
            .parent_world_matrix(target)
            .inverse()
            .transform_vector3(world_delta);
        scene.get_mut(target)?.pose.position += local_delta;

        self.position += world_delta;
        state.last_point = current;
        self.drag = Some(state);
        Some(GizmoTransform::Translation(world_delta))
    }

    fn drag_rotate(
        &mut self,
        scene: &mut Scene,
        target: Uuid,
        ray: &Ray,
        mut state: DragState,
    ) -> Option<GizmoTransform> {
        let current = ray.intersect_plane(self.position, state.plane_normal)?;
        let angle = state.axis.angle_of(current - self.position);

        // Shortest way round, so crossing the atan2 seam doesn't jump a turn
        let mut delta = angle - state.last_angle;
        if delta > PI {
            delta -= TAU;
        } else if delta <= -PI {
            delta += TAU;
        }

        // Rotation accumulates on the matching Euler component
        scene.get_mut(target)?.pose.rotation[state.axis.index()] += delta;

        state.last_angle = angle;
        self.drag = Some(state);
        Some(GizmoTransform::Rotation(state.axis, delta))
    }
}

impl GizmoWidget for TransformGizmo {
    fn attach(&mut self, scene: &Scene, target: Uuid) -> Result<(), GizmoError> {
        if self.disposed {
            return Err(GizmoError::Disposed);
        }
        let world = scene
            .world_matrix(target)
            .ok_or(GizmoError::TargetNotFound(target))?;

        self.drag = None;
        self.target = Some(target);
        self.position = world.transform_point3(Vec3::ZERO);
        Ok(())
    }

    fn detach(&mut self) {
        self.target = None;
        self.drag = None;
    }

    fn attached(&self) -> Option<Uuid> {
        self.target
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_operation(&mut self, operation: GizmoOperation) {
        if self.operation != operation {
            self.drag = None;
            self.operation = operation;
        }
    }

    fn operation(&self) -> GizmoOperation {
        self.operation
    }

    fn hit_test(&self, ray: &Ray) -> Vec<GizmoHit> {
        if !self.visible || self.target.is_none() {
            return Vec::new();
        }

        let mut hits: Vec<GizmoHit> = GizmoAxis::ALL
            .into_iter()
            .filter_map(|axis| {
                self.hit_axis(ray, axis)
                    .map(|distance| GizmoHit { axis, distance })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }

    fn begin_drag(&mut self, ray: &Ray) -> Option<GizmoAxis> {
        let axis = self.hit_test(ray).first()?.axis;

        let plane_normal = match self.operation {
            GizmoOperation::Translate => Self::drag_plane_normal(axis, ray.direction),
            GizmoOperation::Rotate => axis.direction(),
        };
        let point = ray.intersect_plane(self.position, plane_normal)?;

        self.drag = Some(DragState {
            axis,
            plane_normal,
            last_point: point,
            last_angle: axis.angle_of(point - self.position),
        });
        Some(axis)
    }

    fn drag(&mut self, scene: &mut Scene, ray: &Ray) -> Option<GizmoTransform> {
        let state = self.drag?;
        let target = self.target?;
        match self.operation {
            GizmoOperation::Translate => self.drag_translate(scene, target, ray, state),
            GizmoOperation::Rotate => self.drag_rotate(scene, target, ray, state),
        }
    }

    fn end_drag(&mut self) {
        self.drag = None;
    }

    fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    fn update(&mut self, scene: &Scene) {
        let Some(target) = self.target else {
            return;
        };
        match scene.world_matrix(target) {
            Some(world) => self.position = world.transform_point3(Vec3::ZERO),
            None => {
                tracing::warn!("Gizmo target {} left the scene, detaching", target);
                self.detach();
            }
        }
    }

    fn dispose(&mut self) {
        self.detach();
        self.visible = false;
        self.disposed = true;
    }
}
