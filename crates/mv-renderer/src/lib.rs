//! Viewport math for the anatomy model viewer
//!
//! Camera and pointer rays, ray picking against scene objects, and the
//! transform gizmo widget.

pub mod camera;
pub mod constants;
pub mod gizmo;
pub mod picking;

pub use camera::{Camera, OrbitControls, PointerEvent};
pub use gizmo::{
    GizmoAxis, GizmoError, GizmoHit, GizmoOperation, GizmoTransform, GizmoWidget, TransformGizmo,
};
pub use picking::{Intersection, intersect_object, intersect_objects};
