//! Built-in abdominal demo model
//!
//! Stands in for a loaded anatomy model: a few organs as boxes, grouped
//! the way exported models usually are. Names carrying `_mov` can be
//! moved with the gizmo.

use glam::Vec3;
use uuid::Uuid;

use mv_core::{BoundingBox, Material, Pose, Scene, SceneObject};

/// Demo scene plus the IDs to publish as pick candidates
pub struct DemoModel {
    pub scene: Scene,
    pub candidates: Vec<Uuid>,
}

fn organ(name: &str, half_extents: Vec3, position: Vec3, color: [f32; 4]) -> SceneObject {
    SceneObject::mesh(name, BoundingBox::from_center_half_extents(Vec3::ZERO, half_extents))
        .with_material(Material::with_color(color))
        .with_pose(Pose::from_position(position))
}

/// Build the demo model (Z up)
pub fn build_demo_model() -> DemoModel {
    let mut scene = Scene::new();
    let mut candidates = Vec::new();

    candidates.push(scene.add(organ(
        "liver_mov",
        Vec3::new(0.7, 0.45, 0.35),
        Vec3::new(0.6, 0.1, 0.5),
        [0.55, 0.2, 0.15, 1.0],
    )));

    candidates.push(scene.add(organ(
        "gallbladder_mov",
        Vec3::new(0.12, 0.12, 0.2),
        Vec3::new(0.35, -0.45, 0.3),
        [0.35, 0.55, 0.25, 1.0],
    )));

    let kidneys = scene.add(SceneObject::group("kidneys"));
    for (name, x) in [("kidney_left_mov", -0.55), ("kidney_right_mov", 0.55)] {
        scene.add_child(
            kidneys,
            organ(
                name,
                Vec3::new(0.18, 0.12, 0.3),
                Vec3::new(x, 0.5, -0.35),
                [0.6, 0.25, 0.28, 1.0],
            ),
        );
    }
    candidates.push(kidneys);

    // Fixed structures: selectable, never movable
    let vessels = scene.add(SceneObject::group("vessels"));
    scene.add_child(
        vessels,
        organ(
            "aorta",
            Vec3::new(0.07, 0.07, 1.1),
            Vec3::new(-0.1, 0.35, 0.0),
            [0.8, 0.1, 0.12, 1.0],
        ),
    );
    scene.add_child(
        vessels,
        organ(
            "inferior_vena_cava",
            Vec3::new(0.08, 0.08, 1.0),
            Vec3::new(0.15, 0.35, 0.0),
            [0.25, 0.3, 0.75, 1.0],
        ),
    );
    candidates.push(vessels);

    // Nearly transparent: hit by rays but never selectable
    candidates.push(
        scene.add(
            organ(
                "fat_pad_mov",
                Vec3::new(0.3, 0.3, 0.3),
                Vec3::new(-1.2, -0.3, 0.3),
                [0.9, 0.85, 0.5, 1.0],
            )
            .with_material(Material::with_color([0.9, 0.85, 0.5, 1.0]).opacity(0.005)),
        ),
    );

    tracing::debug!(
        "Built demo model: {} objects, {} candidates",
        scene.len(),
        candidates.len()
    );
    DemoModel { scene, candidates }
}
