//! Scene objects, materials and poses

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bounds::BoundingBox;
use crate::constants::DEFAULT_COLOR;

/// Surface material of a mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base colour (RGBA)
    pub color: [f32; 4],
    /// Opacity in `[0, 1]`
    pub opacity: f32,
    /// Emissive colour (RGB)
    pub emissive: [f32; 3],
    /// Emissive intensity multiplier
    pub emissive_intensity: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            opacity: 1.0,
            emissive: [0.0; 3],
            emissive_intensity: 1.0,
        }
    }
}

impl Material {
    /// Opaque material with the given colour
    pub fn with_color(color: [f32; 4]) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Builder-style opacity override
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Current emissive state
    pub fn emissive_state(&self) -> EmissiveState {
        EmissiveState {
            color: self.emissive,
            intensity: self.emissive_intensity,
        }
    }

    /// Overwrite the emissive state
    pub fn set_emissive_state(&mut self, state: EmissiveState) {
        self.emissive = state.color;
        self.emissive_intensity = state.intensity;
    }
}

/// Emissive colour and intensity pair, recorded before a hover highlight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissiveState {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Local transform of an object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Euler angles (XYZ order) in radians. Not wrapped: continuous
    /// rotation drags accumulate here.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// Identity pose
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    /// Pose with only a translation
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    /// Rotation as a quaternion
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local transform matrix (scale, then rotate, then translate)
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

/// A scene-graph node that can be picked, hovered and transformed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: Uuid,
    pub name: String,
    /// `None` for grouping nodes that carry no mesh
    pub material: Option<Material>,
    pub pose: Pose,
    /// Local-space mesh bounds, `None` for grouping nodes
    pub bounds: Option<BoundingBox>,
    pub parent: Option<Uuid>,
    pub children: Vec<Uuid>,
}

impl SceneObject {
    /// Create a mesh object with a default material and the given local bounds
    pub fn mesh(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            material: Some(Material::default()),
            pose: Pose::IDENTITY,
            bounds: Some(bounds),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a grouping node without geometry or material
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            material: None,
            pose: Pose::IDENTITY,
            bounds: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Builder-style material override
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Builder-style pose override
    pub fn with_pose(mut self, pose: Pose) -> Self {
        self.pose = pose;
        self
    }

    /// Material opacity, `None` when there is no material
    pub fn opacity(&self) -> Option<f32> {
        self.material.as_ref().map(|m| m.opacity)
    }

    /// Whether the name carries the movable marker
    pub fn is_movable(&self, marker: &str) -> bool {
        self.name.contains(marker)
    }

    /// Whether the material opacity is above `threshold`.
    /// Objects without a material are never visible for picking purposes.
    pub fn is_visible(&self, threshold: f32) -> bool {
        self.opacity().is_some_and(|o| o > threshold)
    }
}
