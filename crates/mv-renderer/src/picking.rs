//! Ray picking against scene objects.
//!
//! Objects are tested through their local-space bounding boxes: the ray is
//! moved into each object's local frame so rotated and scaled meshes are
//! handled without rebuilding world-space boxes.

use std::collections::HashSet;

use glam::Vec3;
use uuid::Uuid;

use mv_core::{Ray, Scene};

/// A ray hit on a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// The object that was hit (a descendant when testing recursively)
    pub object: Uuid,
    /// Distance from the ray origin
    pub distance: f32,
    /// World-space hit point
    pub point: Vec3,
}

/// Test a single object. Grouping nodes (no bounds) never report a hit.
pub fn intersect_object(scene: &Scene, ray: &Ray, id: Uuid) -> Option<Intersection> {
    let object = scene.get(id)?;
    let bounds = object.bounds?;
    let world = scene.world_matrix(id)?;

    // Collapsed (zero-scale) objects cannot be hit
    if world.determinant().abs() < 1e-12 {
        return None;
    }

    let local_ray = ray.transformed(&world.inverse());
    let distance = bounds.intersect_ray(&local_ray)?;

    Some(Intersection {
        object: id,
        distance,
        point: ray.at(distance),
    })
}

/// Test a list of objects, optionally including all descendants.
/// Results are sorted nearest first; unknown IDs are skipped with a warning.
pub fn intersect_objects(
    scene: &Scene,
    ray: &Ray,
    ids: impl IntoIterator<Item = Uuid>,
    recursive: bool,
) -> Vec<Intersection> {
    let mut seen = HashSet::new();
    let mut hits = Vec::new();

    for id in ids {
        if !scene.contains(id) {
            tracing::warn!("Skipping missing candidate object {}", id);
            continue;
        }

        let targets = if recursive { scene.subtree(id) } else { vec![id] };
        for target in targets {
            if !seen.insert(target) {
                continue;
            }
            if let Some(hit) = intersect_object(scene, ray, target) {
                hits.push(hit);
            }
        }
    }

    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
