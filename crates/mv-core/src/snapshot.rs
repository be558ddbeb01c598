//! Initial transform snapshots used by "reset to origin"

use std::collections::HashMap;

use uuid::Uuid;

use crate::object::Pose;
use crate::scene::Scene;

/// Starting pose of each object, captured once per ID
#[derive(Debug, Clone, Default)]
pub struct InitialTransforms {
    poses: HashMap<Uuid, Pose>,
}

impl InitialTransforms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `pose` unless an entry already exists. Returns true if recorded.
    pub fn record_if_missing(&mut self, id: Uuid, pose: Pose) -> bool {
        if self.poses.contains_key(&id) {
            return false;
        }
        self.poses.insert(id, pose);
        true
    }

    /// Record `pose`, replacing any existing entry
    pub fn record(&mut self, id: Uuid, pose: Pose) {
        self.poses.insert(id, pose);
    }

    /// Capture the current pose of every listed object that has no entry yet.
    /// IDs missing from the scene are skipped. Returns how many were recorded.
    pub fn capture_missing(&mut self, scene: &Scene, ids: impl IntoIterator<Item = Uuid>) -> usize {
        let mut recorded = 0;
        for id in ids {
            match scene.get(id) {
                Some(object) => {
                    if self.record_if_missing(id, object.pose) {
                        recorded += 1;
                    }
                }
                None => tracing::warn!("Skipping initial transform for missing object {}", id),
            }
        }
        recorded
    }

    pub fn get(&self, id: Uuid) -> Option<&Pose> {
        self.poses.get(&id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.poses.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }
}
