//! Identity types for models, scenes and placed instances.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Editor-wide identifier of an imported model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModelId(pub u32);

/// Editor-wide identifier of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SceneId(pub u32);

/// Identifies "model X as used within scene Y".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneModelKey {
    pub scene: SceneId,
    pub model: ModelId,
}

/// Identifies a single placed copy of a model.
///
/// `index` comes from the owning scene model's index pool and may be reused
/// once the instance is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceKey {
    pub scene: SceneId,
    pub model: ModelId,
    pub index: u32,
}

impl InstanceKey {
    pub fn scene_model(&self) -> SceneModelKey {
        SceneModelKey {
            scene: self.scene,
            model: self.model,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "model#{}", self.0)
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scene#{}", self.0)
    }
}

impl fmt::Display for SceneModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.scene, self.model)
    }
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.scene, self.model, self.index)
    }
}
