//! A model as used within one scene.

use glam::{Quat, Vec3};
use scenewright_config::SceneDefaults;
use scenewright_protocol::{
    AssetGenerator, InstanceKey, InstanceTransform, MeshHandle, ModelId, Renderer, SceneHandle,
    SceneModelInfo, SceneModelKey,
};
use tracing::debug;

use crate::error::EditorError;
use crate::index_pool::IndexPool;
use crate::instance::SceneModelInstance;

/// "Model X inside scene Y": the pool of instance indices plus every placed
/// copy, and the asset generator for the scene-specific asset.
pub struct SceneModel {
    key: SceneModelKey,
    model_name: String,
    mesh: MeshHandle,
    pool: IndexPool,
    instances_nr_max: u32,
    is_static: bool,
    instances: Vec<SceneModelInstance>,
    asset_generator: Box<dyn AssetGenerator>,
}

impl SceneModel {
    pub(crate) fn new(
        key: SceneModelKey,
        model_name: &str,
        mesh: MeshHandle,
        mut asset_generator: Box<dyn AssetGenerator>,
        defaults: &SceneDefaults,
    ) -> Self {
        asset_generator.set_instances_nr_max(defaults.instances_nr_max);
        asset_generator.set_is_static(defaults.is_static);
        Self {
            key,
            model_name: model_name.to_string(),
            mesh,
            pool: IndexPool::new(),
            instances_nr_max: defaults.instances_nr_max,
            is_static: defaults.is_static,
            instances: Vec::new(),
            asset_generator,
        }
    }

    pub fn key(&self) -> SceneModelKey {
        self.key
    }

    pub fn model(&self) -> ModelId {
        self.key.model
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn instances_nr_max(&self) -> u32 {
        self.instances_nr_max
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn set_instances_nr_max(&mut self, instances_nr_max: u32) -> bool {
        if self.instances_nr_max == instances_nr_max {
            return false;
        }
        self.instances_nr_max = instances_nr_max;
        self.asset_generator.set_instances_nr_max(instances_nr_max);
        true
    }

    pub fn set_is_static(&mut self, is_static: bool) -> bool {
        if self.is_static == is_static {
            return false;
        }
        self.is_static = is_static;
        self.asset_generator.set_is_static(is_static);
        true
    }

    pub fn instances(&self) -> &[SceneModelInstance] {
        &self.instances
    }

    pub fn instance(&self, index: u32) -> Option<&SceneModelInstance> {
        self.instances.iter().find(|i| i.index() == index)
    }

    pub fn instance_mut(&mut self, index: u32) -> Option<&mut SceneModelInstance> {
        self.instances.iter_mut().find(|i| i.index() == index)
    }

    pub fn contains(&self, key: InstanceKey) -> bool {
        key.scene_model() == self.key && self.instance(key.index).is_some()
    }

    /// Place a new copy of the model
    pub fn add_instance(
        &mut self,
        scene: SceneHandle,
        translation: Vec3,
        scale: Vec3,
        rotation: Quat,
        renderer: &mut dyn Renderer,
    ) -> InstanceKey {
        let index = self.pool.acquire();
        let key = InstanceKey {
            scene: self.key.scene,
            model: self.key.model,
            index,
        };
        let placement = InstanceTransform {
            translation,
            scale,
            rotation,
        };
        self.instances
            .push(SceneModelInstance::new(key, scene, self.mesh, placement, renderer));
        debug!("Added instance {}", key);
        key
    }

    /// Release an instance and return its index to the pool
    pub fn remove_instance(
        &mut self,
        index: u32,
        renderer: &mut dyn Renderer,
    ) -> Result<(), EditorError> {
        let position = self
            .instances
            .iter()
            .position(|i| i.index() == index)
            .ok_or(EditorError::UnknownInstance(InstanceKey {
                scene: self.key.scene,
                model: self.key.model,
                index,
            }))?;
        let instance = self.instances.remove(position);
        instance.release(renderer);
        self.pool.release(index)?;
        Ok(())
    }

    pub fn info(&self) -> SceneModelInfo {
        SceneModelInfo {
            model: self.key.model,
            model_name: self.model_name.clone(),
            instances_nr_max: self.instances_nr_max,
            is_static: self.is_static,
            instances: self.instances.iter().map(SceneModelInstance::info).collect(),
        }
    }

    /// Release every instance, then the asset generator
    pub(crate) fn dispose(mut self, renderer: &mut dyn Renderer) {
        for instance in self.instances.drain(..) {
            instance.release(renderer);
        }
        self.asset_generator.dispose();
    }
}

impl PartialEq for SceneModel {
    fn eq(&self, other: &Self) -> bool {
        self.key.model == other.key.model
    }
}

impl std::fmt::Debug for SceneModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneModel")
            .field("key", &self.key)
            .field("model_name", &self.model_name)
            .field("instances", &self.instances.len())
            .field("instances_nr_max", &self.instances_nr_max)
            .field("is_static", &self.is_static)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{AssetCall, GeneratorLog, MockRenderer};
    use scenewright_protocol::SceneId;

    fn scene_model(log: &GeneratorLog) -> SceneModel {
        let key = SceneModelKey {
            scene: SceneId(1),
            model: ModelId(2),
        };
        SceneModel::new(
            key,
            "Crate",
            MeshHandle(7),
            log.generator("Level1/Crate"),
            &SceneDefaults::default(),
        )
    }

    #[test]
    fn test_defaults_pushed_to_generator() {
        let log = GeneratorLog::default();
        let _scene_model = scene_model(&log);
        let calls = log.calls_for("Level1/Crate");
        assert_eq!(
            calls,
            vec![
                AssetCall::InstancesNrMax(SceneDefaults::default().instances_nr_max),
                AssetCall::IsStatic(false),
            ]
        );
    }

    #[test]
    fn test_setters_push_only_changes() {
        let log = GeneratorLog::default();
        let mut scene_model = scene_model(&log);
        assert!(scene_model.set_is_static(true));
        assert!(!scene_model.set_is_static(true));
        assert!(scene_model.set_instances_nr_max(8));
        let calls = log.calls_for("Level1/Crate");
        assert_eq!(calls[2..], [AssetCall::IsStatic(true), AssetCall::InstancesNrMax(8)]);
    }

    #[test]
    fn test_instance_indices_are_recycled() {
        let log = GeneratorLog::default();
        let mut renderer = MockRenderer::new();
        let scene = renderer.create_scene();
        let mut scene_model = scene_model(&log);

        let a =
            scene_model.add_instance(scene, Vec3::ZERO, Vec3::ONE, Quat::IDENTITY, &mut renderer);
        let b = scene_model.add_instance(scene, Vec3::X, Vec3::ONE, Quat::IDENTITY, &mut renderer);
        assert_ne!(a.index, b.index);

        scene_model.remove_instance(a.index, &mut renderer).unwrap();
        assert!(!scene_model.contains(a));
        assert_eq!(renderer.live_instance_count(), 1);

        let c = scene_model.add_instance(scene, Vec3::Y, Vec3::ONE, Quat::IDENTITY, &mut renderer);
        assert_eq!(c.index, a.index);
    }

    #[test]
    fn test_remove_unknown_instance() {
        let log = GeneratorLog::default();
        let mut renderer = MockRenderer::new();
        let mut scene_model = scene_model(&log);
        assert!(matches!(
            scene_model.remove_instance(5, &mut renderer),
            Err(EditorError::UnknownInstance(_))
        ));
    }

    #[test]
    fn test_dispose_releases_everything() {
        let log = GeneratorLog::default();
        let mut renderer = MockRenderer::new();
        let scene = renderer.create_scene();
        let mut scene_model = scene_model(&log);
        scene_model.add_instance(scene, Vec3::ZERO, Vec3::ONE, Quat::IDENTITY, &mut renderer);
        scene_model.dispose(&mut renderer);

        assert_eq!(renderer.live_instance_count(), 0);
        assert_eq!(log.calls_for("Level1/Crate").last(), Some(&AssetCall::Dispose));
    }

    #[test]
    fn test_equality_by_model() {
        let log = GeneratorLog::default();
        let a = scene_model(&log);
        let mut b = scene_model(&log);
        b.set_is_static(true);
        assert_eq!(a, b);
    }
}
