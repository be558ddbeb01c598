//! Eligibility rules for hover, selection and gizmo attachment.
//!
//! Opacity is always checked first and vetoes in every mode. The movable
//! marker only matters when attaching while translating or rotating.

use uuid::Uuid;

use crate::config::SelectionConfig;
use crate::error::SelectionError;
use crate::mode::InteractionMode;
use crate::object::SceneObject;
use crate::scene::Scene;

/// Name marker and opacity threshold used by the eligibility checks
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPolicy {
    pub movable_marker: String,
    pub visibility_threshold: f32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self::from(&SelectionConfig::default())
    }
}

impl From<&SelectionConfig> for SelectionPolicy {
    fn from(config: &SelectionConfig) -> Self {
        Self {
            movable_marker: config.movable_marker.clone(),
            visibility_threshold: config.visibility_threshold,
        }
    }
}

impl SelectionPolicy {
    /// The object exists and its opacity is above the threshold
    pub fn check_visible<'a>(
        &self,
        scene: &'a Scene,
        id: Uuid,
    ) -> Result<&'a SceneObject, SelectionError> {
        let object = scene.get(id).ok_or(SelectionError::NotFound(id))?;
        let opacity = object
            .opacity()
            .ok_or_else(|| SelectionError::NoMaterial(object.name.clone()))?;
        if opacity <= self.visibility_threshold {
            return Err(SelectionError::Invisible {
                name: object.name.clone(),
                opacity,
            });
        }
        Ok(object)
    }

    /// Visible, and movable if `mode` binds the gizmo
    pub fn check_attachable<'a>(
        &self,
        scene: &'a Scene,
        id: Uuid,
        mode: InteractionMode,
    ) -> Result<&'a SceneObject, SelectionError> {
        let object = self.check_visible(scene, id)?;
        if mode.is_manipulating() && !object.is_movable(&self.movable_marker) {
            return Err(SelectionError::NotMovable {
                name: object.name.clone(),
                mode,
            });
        }
        Ok(object)
    }

    /// Visible and movable, regardless of mode
    pub fn check_hoverable<'a>(
        &self,
        scene: &'a Scene,
        id: Uuid,
    ) -> Result<&'a SceneObject, SelectionError> {
        let object = self.check_visible(scene, id)?;
        if !object.is_movable(&self.movable_marker) {
            return Err(SelectionError::NotMovable {
                name: object.name.clone(),
                mode: InteractionMode::Viewer,
            });
        }
        Ok(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::object::Material;
    use glam::Vec3;

    fn scene_with(name: &str, opacity: f32) -> (Scene, Uuid) {
        let mut scene = Scene::new();
        let id = scene.add(
            SceneObject::mesh(name, BoundingBox::new(Vec3::ZERO, Vec3::ONE))
                .with_material(Material::default().opacity(opacity)),
        );
        (scene, id)
    }

    #[test]
    fn test_invisible_rejected_in_every_mode() {
        let policy = SelectionPolicy::default();
        let (scene, id) = scene_with("liver_mov", 0.005);
        for mode in InteractionMode::ALL {
            assert!(matches!(
                policy.check_attachable(&scene, id, mode),
                Err(SelectionError::Invisible { .. })
            ));
        }
    }

    #[test]
    fn test_marker_only_matters_when_manipulating() {
        let policy = SelectionPolicy::default();
        let (scene, id) = scene_with("liver", 1.0);
        assert!(policy.check_attachable(&scene, id, InteractionMode::Viewer).is_ok());
        assert!(matches!(
            policy.check_attachable(&scene, id, InteractionMode::Translate),
            Err(SelectionError::NotMovable { .. })
        ));
        assert!(matches!(
            policy.check_attachable(&scene, id, InteractionMode::Rotate),
            Err(SelectionError::NotMovable { .. })
        ));
    }

    #[test]
    fn test_opacity_checked_before_marker() {
        let policy = SelectionPolicy::default();
        let (scene, id) = scene_with("liver", 0.0);
        assert!(matches!(
            policy.check_attachable(&scene, id, InteractionMode::Translate),
            Err(SelectionError::Invisible { .. })
        ));
    }

    #[test]
    fn test_missing_and_materialless_objects() {
        let policy = SelectionPolicy::default();
        let mut scene = Scene::new();
        let group = scene.add(SceneObject::group("vessels_mov"));
        let missing = Uuid::new_v4();

        assert_eq!(
            policy.check_visible(&scene, missing).unwrap_err(),
            SelectionError::NotFound(missing)
        );
        assert!(matches!(
            policy.check_hoverable(&scene, group),
            Err(SelectionError::NoMaterial(_))
        ));
    }
}
