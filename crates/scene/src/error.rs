//! Errors surfaced by the editor core.

use scenewright_protocol::{
    ImportError, InstanceKey, ModelId, PrimitiveDimension, SceneId, SceneModelKey,
};

use crate::index_pool::IndexPoolError;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Unknown model {0}")]
    UnknownModel(ModelId),

    #[error("Unknown scene {0}")]
    UnknownScene(SceneId),

    #[error("Unknown scene model {0}")]
    UnknownSceneModel(SceneModelKey),

    #[error("Unknown instance {0}")]
    UnknownInstance(InstanceKey),

    #[error("Model {model} has no {dimension:?} primitive at index {index}")]
    UnknownPrimitive {
        model: ModelId,
        dimension: PrimitiveDimension,
        index: usize,
    },

    #[error("Instance index error: {0}")]
    IndexPool(#[from] IndexPoolError),
}
