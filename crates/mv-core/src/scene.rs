//! Scene graph storage

use std::collections::{HashMap, HashSet};

use glam::Mat4;
use uuid::Uuid;

use crate::object::SceneObject;

/// Owns every object in the viewer, keyed by ID for O(1) lookup
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: HashMap<Uuid, SceneObject>,
    /// Top-level objects in insertion order
    roots: Vec<Uuid>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level object, returns its ID
    pub fn add(&mut self, mut object: SceneObject) -> Uuid {
        let id = object.id;
        object.parent = None;
        self.objects.insert(id, object);
        self.roots.push(id);
        id
    }

    /// Add an object under `parent`. Returns `None` if the parent is unknown,
    /// is the object itself, or the object's ID is already in the scene.
    pub fn add_child(&mut self, parent: Uuid, mut object: SceneObject) -> Option<Uuid> {
        let id = object.id;
        if id == parent || self.objects.contains_key(&id) {
            return None;
        }
        let parent_obj = self.objects.get_mut(&parent)?;
        parent_obj.children.push(id);
        object.parent = Some(parent);
        self.objects.insert(id, object);
        Some(id)
    }

    /// Remove an object and its whole subtree
    pub fn remove(&mut self, id: Uuid) -> Option<SceneObject> {
        let object = self.objects.remove(&id)?;
        match object.parent.and_then(|p| self.objects.get_mut(&p)) {
            Some(parent) => parent.children.retain(|c| *c != id),
            None => self.roots.retain(|r| *r != id),
        }
        for child in &object.children {
            self.remove_subtree(*child);
        }
        Some(object)
    }

    fn remove_subtree(&mut self, id: Uuid) {
        if let Some(object) = self.objects.remove(&id) {
            for child in object.children {
                self.remove_subtree(child);
            }
        }
    }

    /// Get an object by ID
    pub fn get(&self, id: Uuid) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Get a mutable object by ID
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Whether the scene contains `id`
    pub fn contains(&self, id: Uuid) -> bool {
        self.objects.contains_key(&id)
    }

    /// Top-level object IDs
    pub fn roots(&self) -> &[Uuid] {
        &self.roots
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over all objects
    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.values()
    }

    /// First object with the given name
    pub fn find_by_name(&self, name: &str) -> Option<&SceneObject> {
        self.objects.values().find(|o| o.name == name)
    }

    /// World transform: product of the pose matrices from the root down
    pub fn world_matrix(&self, id: Uuid) -> Option<Mat4> {
        let object = self.objects.get(&id)?;
        let local = object.pose.matrix();
        match object.parent {
            Some(parent) => Some(self.world_matrix(parent).unwrap_or(Mat4::IDENTITY) * local),
            None => Some(local),
        }
    }

    /// World transform of the parent (identity for top-level objects)
    pub fn parent_world_matrix(&self, id: Uuid) -> Mat4 {
        self.objects
            .get(&id)
            .and_then(|o| o.parent)
            .and_then(|p| self.world_matrix(p))
            .unwrap_or(Mat4::IDENTITY)
    }

    /// `id` followed by all of its descendants, depth first
    pub fn subtree(&self, id: Uuid) -> Vec<Uuid> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(object) = self.objects.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(object.children.iter().rev());
        }
        out
    }

    /// Subtrees of all `ids` in order, each object listed once.
    /// IDs missing from the scene are skipped.
    pub fn expand_subtrees(&self, ids: impl IntoIterator<Item = Uuid>) -> Vec<Uuid> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for id in ids {
            for member in self.subtree(id) {
                if seen.insert(member) {
                    out.push(member);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::object::Pose;
    use glam::Vec3;

    fn cube(name: &str) -> SceneObject {
        SceneObject::mesh(name, BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5)))
    }

    #[test]
    fn test_add_child_links_parent() {
        let mut scene = Scene::new();
        let group = scene.add(SceneObject::group("kidneys"));
        let left = scene.add_child(group, cube("kidney_left_mov")).unwrap();

        assert_eq!(scene.get(left).unwrap().parent, Some(group));
        assert_eq!(scene.get(group).unwrap().children, vec![left]);
        assert_eq!(scene.roots(), &[group]);
        assert!(scene.add_child(uuid::Uuid::new_v4(), cube("orphan")).is_none());
    }

    #[test]
    fn test_add_child_rejects_self_parent_and_duplicates() {
        let mut scene = Scene::new();
        let group = scene.add(SceneObject::group("kidneys"));
        let left = scene.add_child(group, cube("kidney_left_mov")).unwrap();

        let looped = cube("loop_mov");
        let looped_id = looped.id;
        assert!(scene.add_child(looped_id, looped).is_none());
        assert!(!scene.contains(looped_id));

        let mut duplicate = cube("kidney_left_mov");
        duplicate.id = left;
        assert!(scene.add_child(group, duplicate).is_none());
        assert_eq!(scene.get(group).unwrap().children, vec![left]);
        assert!(scene.world_matrix(left).is_some());
    }

    #[test]
    fn test_world_matrix_composes_parents() {
        let mut scene = Scene::new();
        let group = scene.add(
            SceneObject::group("kidneys").with_pose(Pose::from_position(Vec3::new(1.0, 0.0, 0.0))),
        );
        let child = scene
            .add_child(
                group,
                cube("kidney_mov").with_pose(Pose::from_position(Vec3::new(0.0, 2.0, 0.0))),
            )
            .unwrap();

        let world = scene.world_matrix(child).unwrap();
        assert!(
            world
                .transform_point3(Vec3::ZERO)
                .abs_diff_eq(Vec3::new(1.0, 2.0, 0.0), 1e-6)
        );
        assert!(
            scene
                .parent_world_matrix(child)
                .transform_point3(Vec3::ZERO)
                .abs_diff_eq(Vec3::X, 1e-6)
        );
    }

    #[test]
    fn test_subtree_and_remove() {
        let mut scene = Scene::new();
        let group = scene.add(SceneObject::group("vessels"));
        let a = scene.add_child(group, cube("artery")).unwrap();
        let b = scene.add_child(a, cube("branch")).unwrap();

        assert_eq!(scene.subtree(group), vec![group, a, b]);
        assert_eq!(
            scene.expand_subtrees([a, group, uuid::Uuid::new_v4()]),
            vec![a, b, group]
        );

        scene.remove(a);
        assert!(!scene.contains(a));
        assert!(!scene.contains(b));
        assert!(scene.get(group).unwrap().children.is_empty());
        assert_eq!(scene.len(), 1);
    }
}
