//! A scene: placed scene models plus the gizmo that manipulates them.

use glam::{Quat, Vec2, Vec3};
use scenewright_config::{GizmoConfig, SceneDefaults};
use scenewright_protocol::{
    AssetImporter, InstanceKey, ModelId, Renderer, SceneHandle, SceneId, SceneInfo,
    SceneModelKey,
};
use tracing::{debug, info};

use crate::error::EditorError;
use crate::gizmo::{GizmoMeshes, TransformGizmo};
use crate::instance::SceneModelInstance;
use crate::model::Model;
use crate::scene_model::SceneModel;

pub struct Scene {
    id: SceneId,
    name: String,
    handle: SceneHandle,
    scene_models: Vec<SceneModel>,
    gizmo: TransformGizmo,
}

impl Scene {
    /// Create the renderer scene and attach a hidden gizmo to it
    pub fn new(
        id: SceneId,
        name: &str,
        meshes: &GizmoMeshes,
        gizmo_config: GizmoConfig,
        renderer: &mut dyn Renderer,
    ) -> Self {
        let handle = renderer.create_scene();
        let gizmo = TransformGizmo::attach(handle, meshes, gizmo_config, renderer);
        info!("Added scene {} ({})", name, id);
        Self {
            id,
            name: name.to_string(),
            handle,
            scene_models: Vec::new(),
            gizmo,
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> SceneHandle {
        self.handle
    }

    pub fn scene_models(&self) -> &[SceneModel] {
        &self.scene_models
    }

    pub fn scene_model(&self, model: ModelId) -> Option<&SceneModel> {
        self.scene_models.iter().find(|m| m.model() == model)
    }

    pub fn scene_model_mut(&mut self, model: ModelId) -> Option<&mut SceneModel> {
        self.scene_models.iter_mut().find(|m| m.model() == model)
    }

    pub fn contains_model(&self, model: ModelId) -> bool {
        self.scene_model(model).is_some()
    }

    pub fn gizmo(&self) -> &TransformGizmo {
        &self.gizmo
    }

    pub fn gizmo_mut(&mut self) -> &mut TransformGizmo {
        &mut self.gizmo
    }

    /// Start using `model` in this scene.
    ///
    /// Returns `None` when the model is already present.
    pub fn add_scene_model(
        &mut self,
        model: &Model,
        importer: &mut dyn AssetImporter,
        defaults: &SceneDefaults,
    ) -> Option<&mut SceneModel> {
        if self.contains_model(model.id()) {
            return None;
        }
        let key = SceneModelKey {
            scene: self.id,
            model: model.id(),
        };
        let generator = importer.scene_model_asset_generator(&self.name, model.name());
        self.scene_models
            .push(SceneModel::new(key, model.name(), model.mesh(), generator, defaults));
        debug!("Scene {} now uses {}", self.name, model.name());
        self.scene_models.last_mut()
    }

    /// Dispose a scene model and all of its instances
    pub fn remove_scene_model(
        &mut self,
        model: ModelId,
        renderer: &mut dyn Renderer,
    ) -> Result<(), EditorError> {
        let position = self
            .scene_models
            .iter()
            .position(|m| m.model() == model)
            .ok_or(EditorError::UnknownSceneModel(SceneModelKey {
                scene: self.id,
                model,
            }))?;
        let scene_model = self.scene_models.remove(position);
        if self.gizmo.target().is_some_and(|key| key.model == model) {
            self.gizmo.unbind(renderer);
        }
        debug!("Scene {} dropped {}", self.name, scene_model.model_name());
        scene_model.dispose(renderer);
        Ok(())
    }

    /// Place a copy of `model`, which must already be used by the scene
    pub fn add_instance(
        &mut self,
        model: ModelId,
        translation: Vec3,
        scale: Vec3,
        rotation: Quat,
        renderer: &mut dyn Renderer,
    ) -> Result<InstanceKey, EditorError> {
        let handle = self.handle;
        let scene = self.id;
        let scene_model = self
            .scene_model_mut(model)
            .ok_or(EditorError::UnknownSceneModel(SceneModelKey { scene, model }))?;
        Ok(scene_model.add_instance(handle, translation, scale, rotation, renderer))
    }

    pub fn remove_instance(
        &mut self,
        key: InstanceKey,
        renderer: &mut dyn Renderer,
    ) -> Result<(), EditorError> {
        let scene_model = self
            .scene_models
            .iter_mut()
            .find(|m| m.key() == key.scene_model())
            .ok_or(EditorError::UnknownInstance(key))?;
        scene_model.remove_instance(key.index, renderer)?;
        if self.gizmo.target() == Some(key) {
            self.gizmo.unbind(renderer);
        }
        Ok(())
    }

    pub fn instance(&self, key: InstanceKey) -> Option<&SceneModelInstance> {
        if key.scene != self.id {
            return None;
        }
        self.scene_model(key.model)?.instance(key.index)
    }

    pub fn instance_mut(&mut self, key: InstanceKey) -> Option<&mut SceneModelInstance> {
        if key.scene != self.id {
            return None;
        }
        self.scene_model_mut(key.model)?.instance_mut(key.index)
    }

    /// Feed a cursor move to the gizmo, moving its target
    pub fn drag_gizmo(&mut self, cursor: Vec2, renderer: &mut dyn Renderer) -> bool {
        let Some(key) = self.gizmo.target() else {
            return false;
        };
        let Some(instance) = self
            .scene_models
            .iter_mut()
            .find(|m| m.model() == key.model)
            .and_then(|m| m.instance_mut(key.index))
        else {
            return false;
        };
        self.gizmo.drag(cursor, instance, renderer)
    }

    pub fn info(&self) -> SceneInfo {
        SceneInfo {
            id: Some(self.id),
            name: self.name.clone(),
            scene_models: self.scene_models.iter().map(SceneModel::info).collect(),
        }
    }

    /// Release the gizmo handles, every scene model, then the scene itself
    pub(crate) fn dispose(mut self, renderer: &mut dyn Renderer) {
        self.gizmo.unbind(renderer);
        self.gizmo.detach(renderer);
        for scene_model in self.scene_models.drain(..) {
            scene_model.dispose(renderer);
        }
        renderer.release_scene(self.handle);
        info!("Removed scene {} ({})", self.name, self.id);
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("scene_models", &self.scene_models)
            .field("gizmo_target", &self.gizmo.target())
            .finish()
    }
}
