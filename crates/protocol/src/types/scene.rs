//! Scene snapshot types for a UI layer.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::{InstanceKey, ModelId, SceneId};

/// Information about one scene and everything placed in it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneInfo {
    pub id: Option<SceneId>,
    pub name: String,
    pub scene_models: Vec<SceneModelInfo>,
}

/// A model as used within a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneModelInfo {
    pub model: ModelId,
    pub model_name: String,
    pub instances_nr_max: u32,
    pub is_static: bool,
    pub instances: Vec<InstanceInfo>,
}

/// A placed instance with its transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub key: InstanceKey,
    pub transform: Transform3D,
    pub visible: bool,
}

/// 3D transform with position, rotation, and scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    pub position: [f32; 3],
    pub rotation: [f32; 4], // Quaternion (x, y, z, w)
    pub scale: [f32; 3],
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::from_parts(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}

impl Transform3D {
    pub fn from_parts(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            position: position.to_array(),
            rotation: rotation.to_array(),
            scale: scale.to_array(),
        }
    }
}

/// An imported model and its selected collision shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: ModelId,
    pub name: String,
    pub primitive_3d: String,
    pub primitive_2d: String,
}
