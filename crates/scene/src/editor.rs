//! The editor façade: owns the collaborators, every model and scene, the
//! selection and the outbound event queue.
//!
//! A host forwards viewport input (`on_mouse_down`/`on_mouse_move`/
//! `on_mouse_up`, `camera`) and property edits, then drains
//! [`EditorEvent`]s after each call.

use std::collections::BTreeMap;
use std::path::Path;

use glam::{Quat, Vec2, Vec3};
use scenewright_config::EditorConfig;
use scenewright_protocol::{
    AssetImporter, CameraCommand, EditorEvent, GizmoHandle, ImportError, InstanceKey, ModelId,
    ModelInfo, OutboundEvents, PickTarget, PrimitiveDimension, Renderer, SceneId, SceneInfo,
    SceneModelKey,
};
use tracing::{debug, info, warn};

use crate::error::EditorError;
use crate::gizmo::GizmoMeshCache;
use crate::instance::SceneModelInstance;
use crate::model::Model;
use crate::primitives::{AvatarCache, Shape2D, Shape3D};
use crate::scene::Scene;
use crate::scene_model::SceneModel;

pub struct Editor<R: Renderer, I: AssetImporter> {
    renderer: R,
    importer: I,
    config: EditorConfig,
    avatars: AvatarCache,
    gizmo_meshes: GizmoMeshCache,
    models: BTreeMap<ModelId, Model>,
    scenes: BTreeMap<SceneId, Scene>,
    next_model_id: u32,
    next_scene_id: u32,
    selection: Option<InstanceKey>,
    events: OutboundEvents,
}

impl<R: Renderer, I: AssetImporter> Editor<R, I> {
    pub fn new(renderer: R, importer: I, config: EditorConfig) -> Self {
        Self {
            renderer,
            importer,
            config,
            avatars: AvatarCache::new(),
            gizmo_meshes: GizmoMeshCache::new(),
            models: BTreeMap::new(),
            scenes: BTreeMap::new(),
            next_model_id: 0,
            next_scene_id: 0,
            selection: None,
            events: OutboundEvents::default(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn importer(&self) -> &I {
        &self.importer
    }

    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(&id)
    }

    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.get(&id)
    }

    pub fn scene_model(&self, key: SceneModelKey) -> Option<&SceneModel> {
        self.scenes.get(&key.scene)?.scene_model(key.model)
    }

    pub fn instance(&self, key: InstanceKey) -> Option<&SceneModelInstance> {
        self.scenes.get(&key.scene)?.instance(key)
    }

    pub fn selection(&self) -> Option<InstanceKey> {
        self.selection
    }

    /// Events queued since the last drain
    pub fn pending_events(&self) -> &[EditorEvent] {
        self.events.peek()
    }

    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.events.drain()
    }

    // ========================================================================
    // Models
    // ========================================================================

    /// Import the mesh at `path`. A model whose name is already known is
    /// returned as is.
    pub fn import_model(&mut self, path: impl AsRef<Path>) -> Result<ModelId, EditorError> {
        let imported = self.importer.import_model(path.as_ref())?;
        if let Some(existing) = self.models.values().find(|m| m.name() == imported.name) {
            debug!("Model {} already imported", imported.name);
            return Ok(existing.id());
        }
        if imported.geometry.vertices.is_empty() {
            return Err(ImportError::EmptyMesh(imported.name).into());
        }

        let id = ModelId(self.next_model_id);
        self.next_model_id += 1;
        let model = Model::new(id, imported, &mut self.renderer, &mut self.importer, &self.avatars);
        self.events.send(EditorEvent::ModelImported {
            id,
            name: model.name().to_string(),
        });
        self.models.insert(id, model);
        Ok(id)
    }

    /// Remove a model from every scene using it, then release it
    pub fn remove_model(&mut self, id: ModelId) -> Result<(), EditorError> {
        if !self.models.contains_key(&id) {
            return Err(EditorError::UnknownModel(id));
        }
        if self.selection.is_some_and(|key| key.model == id) {
            self.select(None)?;
        }
        for scene in self.scenes.values_mut() {
            if scene.contains_model(id) {
                scene.remove_scene_model(id, &mut self.renderer)?;
                self.events.send(EditorEvent::SceneModelRemoved(SceneModelKey {
                    scene: scene.id(),
                    model: id,
                }));
            }
        }

        let model = self.models.remove(&id).ok_or(EditorError::UnknownModel(id))?;
        self.importer.remove_model(model.name());
        model.dispose(&mut self.renderer);
        self.events.send(EditorEvent::ModelRemoved { id });
        Ok(())
    }

    pub fn model_info(&self, id: ModelId) -> Result<ModelInfo, EditorError> {
        self.model_ref(id).map(Model::info)
    }

    pub fn set_preview_rotation(&mut self, id: ModelId, rotation: Quat) -> Result<(), EditorError> {
        self.model_mut(id)?.set_preview_rotation(rotation);
        Ok(())
    }

    /// Choose which candidate of `dimension` is baked into the model asset
    pub fn select_primitive(
        &mut self,
        id: ModelId,
        dimension: PrimitiveDimension,
        index: usize,
    ) -> Result<bool, EditorError> {
        let model = self.models.get_mut(&id).ok_or(EditorError::UnknownModel(id))?;
        match dimension {
            PrimitiveDimension::ThreeD => model.select_primitive_3d(index, &mut self.events),
            PrimitiveDimension::TwoD => model.select_primitive_2d(index, &mut self.events),
        }
    }

    pub fn edit_primitive_3d(
        &mut self,
        id: ModelId,
        index: usize,
        edit: impl FnOnce(&mut Shape3D) -> bool,
    ) -> Result<bool, EditorError> {
        let model = self.models.get_mut(&id).ok_or(EditorError::UnknownModel(id))?;
        model.edit_primitive_3d(index, edit, &mut self.events)
    }

    pub fn edit_primitive_2d(
        &mut self,
        id: ModelId,
        index: usize,
        edit: impl FnOnce(&mut Shape2D) -> bool,
    ) -> Result<bool, EditorError> {
        let model = self.models.get_mut(&id).ok_or(EditorError::UnknownModel(id))?;
        model.edit_primitive_2d(index, edit, &mut self.events)
    }

    /// Ask the importer to write every imported model below `destination`
    pub fn save(&mut self, destination: impl AsRef<Path>) -> Result<(), EditorError> {
        let destination = destination.as_ref();
        self.importer.save_imported_models(destination)?;
        info!("Saved {} models to {}", self.models.len(), destination.display());
        Ok(())
    }

    // ========================================================================
    // Scenes
    // ========================================================================

    pub fn add_scene(&mut self, name: &str) -> SceneId {
        let id = SceneId(self.next_scene_id);
        self.next_scene_id += 1;
        let meshes = self
            .gizmo_meshes
            .get_or_upload(&mut self.renderer, &self.config.gizmo);
        let scene = Scene::new(id, name, &meshes, self.config.gizmo.clone(), &mut self.renderer);
        self.scenes.insert(id, scene);
        self.events.send(EditorEvent::SceneAdded {
            id,
            name: name.to_string(),
        });
        id
    }

    /// Dispose every scene model, instance and gizmo handle of a scene
    pub fn remove_scene(&mut self, id: SceneId) -> Result<(), EditorError> {
        if !self.scenes.contains_key(&id) {
            return Err(EditorError::UnknownScene(id));
        }
        if self.selection.is_some_and(|key| key.scene == id) {
            self.select(None)?;
        }
        let scene = self.scenes.remove(&id).ok_or(EditorError::UnknownScene(id))?;
        scene.dispose(&mut self.renderer);
        self.events.send(EditorEvent::SceneRemoved { id });
        Ok(())
    }

    pub fn scene_info(&self, id: SceneId) -> Result<SceneInfo, EditorError> {
        self.scenes
            .get(&id)
            .map(Scene::info)
            .ok_or(EditorError::UnknownScene(id))
    }

    /// Use `model` in `scene`. Repeated calls return the existing key.
    pub fn add_scene_model(
        &mut self,
        scene: SceneId,
        model: ModelId,
    ) -> Result<SceneModelKey, EditorError> {
        let model_ref = self.models.get(&model).ok_or(EditorError::UnknownModel(model))?;
        let scene_ref = self.scenes.get_mut(&scene).ok_or(EditorError::UnknownScene(scene))?;
        let key = SceneModelKey { scene, model };
        if scene_ref
            .add_scene_model(model_ref, &mut self.importer, &self.config.scene)
            .is_some()
        {
            self.events.send(EditorEvent::SceneModelAdded(key));
        }
        Ok(key)
    }

    pub fn remove_scene_model(&mut self, key: SceneModelKey) -> Result<(), EditorError> {
        if self.selection.is_some_and(|selected| selected.scene_model() == key) {
            self.select(None)?;
        }
        let scene = self
            .scenes
            .get_mut(&key.scene)
            .ok_or(EditorError::UnknownScene(key.scene))?;
        scene.remove_scene_model(key.model, &mut self.renderer)?;
        self.events.send(EditorEvent::SceneModelRemoved(key));
        Ok(())
    }

    pub fn set_instances_nr_max(
        &mut self,
        key: SceneModelKey,
        instances_nr_max: u32,
    ) -> Result<bool, EditorError> {
        Ok(self.scene_model_mut(key)?.set_instances_nr_max(instances_nr_max))
    }

    pub fn set_is_static(
        &mut self,
        key: SceneModelKey,
        is_static: bool,
    ) -> Result<bool, EditorError> {
        Ok(self.scene_model_mut(key)?.set_is_static(is_static))
    }

    // ========================================================================
    // Instances
    // ========================================================================

    pub fn add_instance(
        &mut self,
        key: SceneModelKey,
        translation: Vec3,
        scale: Vec3,
        rotation: Quat,
    ) -> Result<InstanceKey, EditorError> {
        let scene = self
            .scenes
            .get_mut(&key.scene)
            .ok_or(EditorError::UnknownScene(key.scene))?;
        let instance =
            scene.add_instance(key.model, translation, scale, rotation, &mut self.renderer)?;
        self.events.send(EditorEvent::InstanceAdded(instance));
        Ok(instance)
    }

    pub fn remove_instance(&mut self, key: InstanceKey) -> Result<(), EditorError> {
        if self.selection == Some(key) {
            self.select(None)?;
        }
        let scene = self
            .scenes
            .get_mut(&key.scene)
            .ok_or(EditorError::UnknownScene(key.scene))?;
        scene.remove_instance(key, &mut self.renderer)?;
        self.events.send(EditorEvent::InstanceRemoved(key));
        Ok(())
    }

    pub fn set_instance_translation(
        &mut self,
        key: InstanceKey,
        translation: Vec3,
    ) -> Result<bool, EditorError> {
        self.edit_instance(key, |instance, renderer, events| {
            instance.set_translation(translation, renderer, events)
        })
    }

    pub fn set_instance_scale(
        &mut self,
        key: InstanceKey,
        scale: Vec3,
    ) -> Result<bool, EditorError> {
        self.edit_instance(key, |instance, renderer, events| {
            instance.set_scale(scale, renderer, events)
        })
    }

    pub fn set_instance_rotation(
        &mut self,
        key: InstanceKey,
        rotation: Quat,
    ) -> Result<bool, EditorError> {
        self.edit_instance(key, |instance, renderer, events| {
            instance.set_rotation(rotation, renderer, events)
        })
    }

    /// Set the rotation from XYZ Euler angles in degrees
    pub fn set_instance_euler_angles(
        &mut self,
        key: InstanceKey,
        degrees: Vec3,
    ) -> Result<bool, EditorError> {
        self.edit_instance(key, |instance, renderer, events| {
            instance.set_euler_angles(degrees, renderer, events)
        })
    }

    pub fn set_instance_visible(
        &mut self,
        key: InstanceKey,
        visible: bool,
    ) -> Result<bool, EditorError> {
        self.edit_instance(key, |instance, renderer, events| {
            instance.set_visible(visible, renderer, events)
        })
    }

    /// Run a property edit, then re-sync the gizmo if it is bound to `key`
    fn edit_instance(
        &mut self,
        key: InstanceKey,
        edit: impl FnOnce(&mut SceneModelInstance, &mut dyn Renderer, &mut OutboundEvents) -> bool,
    ) -> Result<bool, EditorError> {
        let scene = self
            .scenes
            .get_mut(&key.scene)
            .ok_or(EditorError::UnknownScene(key.scene))?;
        let instance = scene
            .instance_mut(key)
            .ok_or(EditorError::UnknownInstance(key))?;
        let changed = edit(instance, &mut self.renderer, &mut self.events);
        if changed {
            let placement = instance.placement();
            scene.gizmo_mut().follow(key, placement, &mut self.renderer);
        }
        Ok(changed)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Move the selection, highlighting the new instance and binding its
    /// scene's gizmo to it. `None` clears the selection.
    pub fn select(&mut self, key: Option<InstanceKey>) -> Result<(), EditorError> {
        if key == self.selection {
            return Ok(());
        }
        if let Some(key) = key {
            self.instance(key).ok_or(EditorError::UnknownInstance(key))?;
        }

        if let Some(previous) = self.selection.take() {
            if let Some(scene) = self.scenes.get_mut(&previous.scene) {
                if let Some(instance) = scene.instance(previous) {
                    instance.dim(&mut self.renderer);
                }
                scene.gizmo_mut().unbind(&mut self.renderer);
            }
        }

        if let Some(key) = key {
            let scene = self
                .scenes
                .get_mut(&key.scene)
                .ok_or(EditorError::UnknownScene(key.scene))?;
            let instance = scene.instance(key).ok_or(EditorError::UnknownInstance(key))?;
            instance.highlight(&mut self.renderer);
            let placement = instance.placement();
            scene.gizmo_mut().bind(key, placement, &mut self.renderer);
            info!("Selected {}", key);
        } else {
            info!("Selection cleared");
        }

        self.selection = key;
        self.events.send(EditorEvent::SelectionChanged { selected: key });
        Ok(())
    }

    // ========================================================================
    // Viewport input
    // ========================================================================

    /// Pick under the cursor: a gizmo handle starts a drag, an instance is
    /// selected, empty space clears the selection.
    pub fn on_mouse_down(
        &mut self,
        scene: SceneId,
        cursor: Vec2,
    ) -> Result<Option<PickTarget>, EditorError> {
        let scene_ref = self.scenes.get_mut(&scene).ok_or(EditorError::UnknownScene(scene))?;
        let pick = self.renderer.cursor_select(scene_ref.handle(), cursor);
        match pick {
            Some(PickTarget::Gizmo(handle)) => {
                if scene_ref.gizmo_mut().press(handle, cursor, &self.renderer) {
                    self.events.send(EditorEvent::GizmoHandleChanged { handle });
                }
            }
            Some(PickTarget::Instance(key)) if key.scene == scene => self.select(Some(key))?,
            Some(PickTarget::Instance(key)) => {
                warn!("Pick in {} reported instance {} of another scene", scene, key);
            }
            None => self.select(None)?,
        }
        Ok(pick)
    }

    /// Drag the held gizmo handle, if any. Returns whether the target moved.
    pub fn on_mouse_move(&mut self, scene: SceneId, cursor: Vec2) -> Result<bool, EditorError> {
        let scene = self.scenes.get_mut(&scene).ok_or(EditorError::UnknownScene(scene))?;
        Ok(scene.drag_gizmo(cursor, &mut self.renderer))
    }

    pub fn on_mouse_up(&mut self, scene: SceneId) -> Result<(), EditorError> {
        let handle = self.scene_mut(scene)?.gizmo_mut().deactivate();
        if handle != GizmoHandle::None {
            self.events.send(EditorEvent::GizmoHandleChanged {
                handle: GizmoHandle::None,
            });
        }
        Ok(())
    }

    /// Forward a camera command, then keep the gizmo at constant screen size
    pub fn camera(&mut self, scene: SceneId, command: CameraCommand) -> Result<(), EditorError> {
        let scene = self.scenes.get_mut(&scene).ok_or(EditorError::UnknownScene(scene))?;
        let handle = scene.handle();
        match command {
            CameraCommand::Orbit { delta_x, delta_y } => {
                self.renderer.rotate_camera(handle, Vec2::new(delta_x, delta_y));
            }
            CameraCommand::Pan { delta_x, delta_y } => {
                self.renderer.pan_camera(handle, Vec2::new(delta_x, delta_y));
            }
            CameraCommand::Zoom { delta } => self.renderer.zoom_camera(handle, delta),
        }
        scene.gizmo_mut().update_scale(&mut self.renderer);
        Ok(())
    }

    /// Release every scene, model and gizmo mesh, handing the collaborators
    /// back to the host.
    pub fn shutdown(mut self) -> (R, I) {
        self.selection = None;
        for (_, scene) in std::mem::take(&mut self.scenes) {
            scene.dispose(&mut self.renderer);
        }
        for (_, model) in std::mem::take(&mut self.models) {
            model.dispose(&mut self.renderer);
        }
        self.gizmo_meshes.release(&mut self.renderer);
        info!("Editor shut down");
        (self.renderer, self.importer)
    }

    fn model_ref(&self, id: ModelId) -> Result<&Model, EditorError> {
        self.models.get(&id).ok_or(EditorError::UnknownModel(id))
    }

    fn model_mut(&mut self, id: ModelId) -> Result<&mut Model, EditorError> {
        self.models.get_mut(&id).ok_or(EditorError::UnknownModel(id))
    }

    fn scene_mut(&mut self, id: SceneId) -> Result<&mut Scene, EditorError> {
        self.scenes.get_mut(&id).ok_or(EditorError::UnknownScene(id))
    }

    fn scene_model_mut(&mut self, key: SceneModelKey) -> Result<&mut SceneModel, EditorError> {
        self.scene_mut(key.scene)?
            .scene_model_mut(key.model)
            .ok_or(EditorError::UnknownSceneModel(key))
    }
}

impl<R: Renderer, I: AssetImporter> std::fmt::Debug for Editor<R, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("models", &self.models)
            .field("scenes", &self.scenes)
            .field("selection", &self.selection)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{AssetCall, GeneratorLog, MockImporter, MockRenderer, box_mesh};

    type TestEditor = Editor<MockRenderer, MockImporter>;

    fn editor() -> (TestEditor, GeneratorLog) {
        let log = GeneratorLog::default();
        let mut importer = MockImporter::new(log.clone());
        importer.register("assets/Crate.obj", "Crate", box_mesh(Vec3::ONE));
        importer.register("assets/Barrel.obj", "Barrel", box_mesh(Vec3::new(1.0, 2.0, 1.0)));
        let editor = Editor::new(MockRenderer::new(), importer, EditorConfig::default());
        (editor, log)
    }

    /// "Crate" placed once in "Level1"
    fn placed(editor: &mut TestEditor) -> (ModelId, SceneId, InstanceKey) {
        let model = editor.import_model("assets/Crate.obj").unwrap();
        let scene = editor.add_scene("Level1");
        let key = editor.add_scene_model(scene, model).unwrap();
        let instance = editor
            .add_instance(key, Vec3::ZERO, Vec3::ONE, Quat::IDENTITY)
            .unwrap();
        (model, scene, instance)
    }

    fn click(editor: &mut TestEditor, scene: SceneId, pick: Option<PickTarget>, cursor: Vec2) {
        editor.renderer_mut().next_pick = pick;
        editor.on_mouse_down(scene, cursor).unwrap();
    }

    #[test]
    fn test_drag_crate_along_x() {
        let (mut editor, _) = editor();
        let model = editor.import_model("assets/Crate.obj").unwrap();
        let scene = editor.add_scene("Level1");
        let first = editor.add_scene_model(scene, model).unwrap();
        let second = editor.add_scene_model(scene, model).unwrap();
        assert_eq!(first, second);
        assert_eq!(editor.scene(scene).unwrap().scene_models().len(), 1);
        let added = editor
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, EditorEvent::SceneModelAdded(_)))
            .count();
        assert_eq!(added, 1);

        let instance = editor
            .add_instance(first, Vec3::ZERO, Vec3::ONE, Quat::IDENTITY)
            .unwrap();
        click(&mut editor, scene, Some(PickTarget::Instance(instance)), Vec2::ZERO);
        assert_eq!(editor.selection(), Some(instance));
        editor.drain_events();

        click(
            &mut editor,
            scene,
            Some(PickTarget::Gizmo(GizmoHandle::TranslateX)),
            Vec2::ZERO,
        );
        editor.on_mouse_move(scene, Vec2::new(3.0, 0.0)).unwrap();
        editor.on_mouse_up(scene).unwrap();

        let translation = editor.instance(instance).unwrap().translation();
        assert!(translation.abs_diff_eq(Vec3::new(3.0, 0.0, 0.0), 1e-4));

        // Nothing snaps back once the handle is released
        assert!(!editor.on_mouse_move(scene, Vec2::new(-4.0, 0.0)).unwrap());
        let after = editor.instance(instance).unwrap().translation();
        assert_eq!(after, translation);

        let events = editor.drain_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, EditorEvent::InstanceTransformChanged { .. })));
        assert_eq!(
            events,
            vec![
                EditorEvent::GizmoHandleChanged {
                    handle: GizmoHandle::TranslateX
                },
                EditorEvent::GizmoHandleChanged {
                    handle: GizmoHandle::None
                },
            ]
        );
    }

    #[test]
    fn test_import_is_idempotent() {
        let (mut editor, _) = editor();
        let first = editor.import_model("assets/Crate.obj").unwrap();
        let second = editor.import_model("assets/Crate.obj").unwrap();
        assert_eq!(first, second);
        assert_eq!(editor.models().count(), 1);
        assert_eq!(editor.importer().parse_count, 1);
        assert_eq!(editor.renderer().live_mesh_count(), 1);
    }

    #[test]
    fn test_import_unknown_path() {
        let (mut editor, _) = editor();
        assert!(matches!(
            editor.import_model("assets/Missing.obj"),
            Err(EditorError::Import(ImportError::NotFound(_)))
        ));
        assert!(editor.drain_events().is_empty());
    }

    #[test]
    fn test_pick_selects_and_highlights() {
        let (mut editor, _) = editor();
        let (model, scene, first) = placed(&mut editor);
        let key = SceneModelKey { scene, model };
        let second = editor
            .add_instance(key, Vec3::X, Vec3::ONE, Quat::IDENTITY)
            .unwrap();

        click(&mut editor, scene, Some(PickTarget::Instance(first)), Vec2::ZERO);
        click(&mut editor, scene, Some(PickTarget::Instance(second)), Vec2::ZERO);

        let renderer = editor.renderer();
        let first_handle = editor.instance(first).unwrap().handle();
        let second_handle = editor.instance(second).unwrap().handle();
        assert!(!renderer.instance(first_handle).highlighted);
        assert!(renderer.instance(second_handle).highlighted);
        assert_eq!(editor.scene(scene).unwrap().gizmo().target(), Some(second));

        // Clicking empty space clears the selection and hides the handles
        click(&mut editor, scene, None, Vec2::ZERO);
        assert_eq!(editor.selection(), None);
        assert!(editor.renderer().gizmo_instances().all(|i| !i.visible));
        assert!(!editor.renderer().instance(second_handle).highlighted);
    }

    #[test]
    fn test_property_edit_notifies_and_moves_gizmo() {
        let (mut editor, _) = editor();
        let (_, scene, instance) = placed(&mut editor);
        editor.select(Some(instance)).unwrap();
        editor.drain_events();

        let target = Vec3::new(1.0, 2.0, 0.0);
        assert!(editor.set_instance_translation(instance, target).unwrap());
        assert!(!editor.set_instance_translation(instance, target).unwrap());
        assert!(matches!(
            editor.drain_events().as_slice(),
            [EditorEvent::InstanceTransformChanged { key, .. }] if *key == instance
        ));
        assert!(editor
            .renderer()
            .gizmo_instances()
            .all(|i| i.transform.translation == target));
        assert_eq!(editor.scene(scene).unwrap().gizmo().target(), Some(instance));
    }

    #[test]
    fn test_euler_angles_round_trip_through_instance() {
        let (mut editor, _) = editor();
        let (_, _, instance) = placed(&mut editor);
        editor
            .set_instance_euler_angles(instance, Vec3::new(0.0, 0.0, 90.0))
            .unwrap();
        let angles = editor.instance(instance).unwrap().euler_angles();
        assert!(angles.abs_diff_eq(Vec3::new(0.0, 0.0, 90.0), 1e-3));
    }

    #[test]
    fn test_hide_instance() {
        let (mut editor, _) = editor();
        let (_, _, instance) = placed(&mut editor);
        assert!(editor.set_instance_visible(instance, false).unwrap());
        let handle = editor.instance(instance).unwrap().handle();
        assert!(!editor.renderer().instance(handle).visible);
    }

    #[test]
    fn test_remove_selected_instance_clears_selection() {
        let (mut editor, _) = editor();
        let (_, scene, instance) = placed(&mut editor);
        editor.select(Some(instance)).unwrap();
        editor.remove_instance(instance).unwrap();

        assert_eq!(editor.selection(), None);
        assert!(!editor.scene(scene).unwrap().gizmo().is_bound());
        assert_eq!(editor.renderer().model_instances().count(), 0);
        assert!(matches!(
            editor.remove_instance(instance),
            Err(EditorError::UnknownInstance(_))
        ));
    }

    #[test]
    fn test_remove_selected_scene_model() {
        let (mut editor, log) = editor();
        let (model, scene, instance) = placed(&mut editor);
        editor.select(Some(instance)).unwrap();
        editor.drain_events();

        let key = SceneModelKey { scene, model };
        editor.remove_scene_model(key).unwrap();
        assert_eq!(editor.selection(), None);
        assert!(!editor.scene(scene).unwrap().gizmo().is_bound());
        assert!(editor.scene(scene).unwrap().scene_models().is_empty());
        assert_eq!(editor.renderer().model_instances().count(), 0);
        assert_eq!(log.calls_for("Level1/Crate").last(), Some(&AssetCall::Dispose));
        assert!(editor.drain_events().contains(&EditorEvent::SceneModelRemoved(key)));
        assert!(matches!(
            editor.remove_scene_model(key),
            Err(EditorError::UnknownSceneModel(_))
        ));
    }

    #[test]
    fn test_removed_index_is_reused() {
        let (mut editor, _) = editor();
        let (model, scene, instance) = placed(&mut editor);
        editor.remove_instance(instance).unwrap();
        let again = editor
            .add_instance(SceneModelKey { scene, model }, Vec3::ZERO, Vec3::ONE, Quat::IDENTITY)
            .unwrap();
        assert_eq!(again.index, instance.index);
    }

    #[test]
    fn test_remove_model_cascades() {
        let (mut editor, log) = editor();
        let (model, scene, instance) = placed(&mut editor);
        let other = editor.add_scene("Level2");
        editor.add_scene_model(other, model).unwrap();
        editor.select(Some(instance)).unwrap();

        editor.remove_model(model).unwrap();
        assert_eq!(editor.selection(), None);
        assert!(editor.scene(scene).unwrap().scene_models().is_empty());
        assert!(editor.scene(other).unwrap().scene_models().is_empty());
        assert_eq!(editor.renderer().model_instances().count(), 0);
        assert_eq!(editor.importer().removed, vec!["Crate".to_string()]);
        for owner in ["Crate", "Level1/Crate", "Level2/Crate"] {
            assert_eq!(log.calls_for(owner).last(), Some(&AssetCall::Dispose), "{owner}");
        }
        assert!(matches!(
            editor.drain_events().last(),
            Some(EditorEvent::ModelRemoved { id }) if *id == model
        ));
    }

    #[test]
    fn test_remove_scene_releases_renderer_state() {
        let (mut editor, _) = editor();
        let (_, scene, instance) = placed(&mut editor);
        editor.select(Some(instance)).unwrap();
        editor.remove_scene(scene).unwrap();

        assert_eq!(editor.selection(), None);
        assert_eq!(editor.renderer().live_scene_count(), 0);
        assert_eq!(editor.renderer().live_instance_count(), 0);
        assert!(matches!(
            editor.remove_scene(scene),
            Err(EditorError::UnknownScene(_))
        ));
    }

    #[test]
    fn test_gizmo_meshes_shared_between_scenes() {
        let (mut editor, _) = editor();
        editor.add_scene("Level1");
        editor.add_scene("Level2");
        assert_eq!(editor.renderer().meshes_uploaded, 9);
        assert_eq!(editor.renderer().gizmo_instances().count(), 54);
    }

    #[test]
    fn test_scene_model_settings_reach_generator() {
        let (mut editor, log) = editor();
        let (model, scene, _) = placed(&mut editor);
        let key = SceneModelKey { scene, model };
        assert!(editor.set_instances_nr_max(key, 8).unwrap());
        assert!(!editor.set_instances_nr_max(key, 8).unwrap());
        assert!(editor.set_is_static(key, true).unwrap());

        let calls = log.calls_for("Level1/Crate");
        assert_eq!(
            &calls[calls.len() - 2..],
            &[AssetCall::InstancesNrMax(8), AssetCall::IsStatic(true)]
        );
        let info = editor.scene_info(scene).unwrap();
        assert_eq!(info.scene_models[0].instances_nr_max, 8);
        assert!(info.scene_models[0].is_static);
    }

    #[test]
    fn test_select_primitive_reaches_model_generator() {
        let (mut editor, log) = editor();
        let model = editor.import_model("assets/Barrel.obj").unwrap();
        assert!(editor
            .select_primitive(model, PrimitiveDimension::ThreeD, 3)
            .unwrap());
        assert!(matches!(
            log.calls_for("Barrel").last(),
            Some(AssetCall::Capsule { .. })
        ));
        assert_eq!(editor.model_info(model).unwrap().primitive_3d, "Capsule");
        assert!(matches!(
            editor.select_primitive(ModelId(42), PrimitiveDimension::TwoD, 0),
            Err(EditorError::UnknownModel(ModelId(42)))
        ));
    }

    #[test]
    fn test_camera_zoom_rescales_gizmo() {
        let (mut editor, _) = editor();
        let (_, scene, instance) = placed(&mut editor);
        editor.select(Some(instance)).unwrap();
        let before = editor.scene(scene).unwrap().gizmo().handle_scale();

        editor
            .camera(scene, CameraCommand::Zoom { delta: -10.0 })
            .unwrap();
        let after = editor.scene(scene).unwrap().gizmo().handle_scale();
        assert!((after - 2.0 * before).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_ids() {
        let (mut editor, _) = editor();
        let scene = editor.add_scene("Level1");
        assert!(matches!(
            editor.add_scene_model(scene, ModelId(3)),
            Err(EditorError::UnknownModel(_))
        ));
        assert!(matches!(
            editor.on_mouse_move(SceneId(9), Vec2::ZERO),
            Err(EditorError::UnknownScene(_))
        ));
        let ghost = InstanceKey {
            scene,
            model: ModelId(0),
            index: 0,
        };
        assert!(matches!(
            editor.select(Some(ghost)),
            Err(EditorError::UnknownInstance(_))
        ));
    }

    #[test]
    fn test_save_delegates_to_importer() {
        let (mut editor, _) = editor();
        editor.import_model("assets/Crate.obj").unwrap();
        editor.save("out/assets").unwrap();
        assert_eq!(
            editor.importer().saved_to,
            vec![std::path::PathBuf::from("out/assets")]
        );
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let (mut editor, log) = editor();
        let (_, _, instance) = placed(&mut editor);
        editor.select(Some(instance)).unwrap();

        let (renderer, _) = editor.shutdown();
        assert_eq!(renderer.live_mesh_count(), 0);
        assert_eq!(renderer.live_scene_count(), 0);
        assert_eq!(renderer.live_instance_count(), 0);
        assert_eq!(log.calls_for("Crate").last(), Some(&AssetCall::Dispose));
    }
}
