//! In-memory collaborators for unit tests.
//!
//! The mock renderer keeps a flat camera at `(0, 0, -10)` looking down +Z.
//! Cursor `(x, y)` maps to the ray direction `normalize(0.1x, 0.1y, 1)`, so on
//! the `z = 0` plane the cursor lands exactly on world `(x, y, 0)`.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use glam::{Quat, Vec2, Vec3};
use scenewright_protocol::{
    AssetGenerator, AssetImporter, BoundingSphere, CollisionSink, Color, ImportError,
    ImportedMesh, InstanceHandle, InstanceTransform, MeshGeometry, MeshHandle, PickTarget,
    Renderer, RendererId, SceneHandle, Topology,
};

// ============================================================================
// Renderer
// ============================================================================

#[derive(Debug, Clone)]
pub struct MockMesh {
    pub geometry: MeshGeometry,
    pub color: Color,
    pub bounds: BoundingSphere,
    pub is_opaque: bool,
}

#[derive(Debug, Clone)]
pub struct MockInstance {
    pub scene: SceneHandle,
    pub mesh: MeshHandle,
    pub transform: InstanceTransform,
    pub pick: PickTarget,
    pub visible: bool,
    pub highlighted: bool,
}

#[derive(Debug)]
pub struct MockRenderer {
    id: RendererId,
    next_handle: u64,
    meshes: HashMap<MeshHandle, MockMesh>,
    scenes: HashSet<SceneHandle>,
    instances: HashMap<InstanceHandle, MockInstance>,
    pub camera_position: Vec3,
    pub fov: f32,
    /// What the next `cursor_select` reports
    pub next_pick: Option<PickTarget>,
    pub meshes_uploaded: usize,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::with_id(RendererId(0))
    }

    pub fn with_id(id: RendererId) -> Self {
        Self {
            id,
            next_handle: 1,
            meshes: HashMap::new(),
            scenes: HashSet::new(),
            instances: HashMap::new(),
            camera_position: Vec3::new(0.0, 0.0, -10.0),
            fov: 60f32.to_radians(),
            next_pick: None,
            meshes_uploaded: 0,
        }
    }

    fn next(&mut self) -> u64 {
        let handle = self.next_handle;
        self.next_handle += 1;
        handle
    }

    pub fn instance(&self, handle: InstanceHandle) -> &MockInstance {
        &self.instances[&handle]
    }

    pub fn mesh(&self, handle: MeshHandle) -> &MockMesh {
        &self.meshes[&handle]
    }

    pub fn live_mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn live_scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn live_instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Live instances whose pick target is an editor instance
    pub fn model_instances(&self) -> impl Iterator<Item = &MockInstance> {
        self.instances
            .values()
            .filter(|i| matches!(i.pick, PickTarget::Instance(_)))
    }

    pub fn gizmo_instances(&self) -> impl Iterator<Item = &MockInstance> {
        self.instances
            .values()
            .filter(|i| matches!(i.pick, PickTarget::Gizmo(_)))
    }

    fn instance_mut(&mut self, handle: InstanceHandle) -> &mut MockInstance {
        self.instances
            .get_mut(&handle)
            .unwrap_or_else(|| panic!("unknown instance {handle:?}"))
    }
}

impl Renderer for MockRenderer {
    fn id(&self) -> RendererId {
        self.id
    }

    fn add_model(
        &mut self,
        geometry: &MeshGeometry,
        color: Color,
        bounds: BoundingSphere,
        is_opaque: bool,
    ) -> MeshHandle {
        let handle = MeshHandle(self.next());
        self.meshes.insert(
            handle,
            MockMesh {
                geometry: geometry.clone(),
                color,
                bounds,
                is_opaque,
            },
        );
        self.meshes_uploaded += 1;
        handle
    }

    fn remove_model(&mut self, mesh: MeshHandle) {
        assert!(self.meshes.remove(&mesh).is_some(), "unknown mesh {mesh:?}");
    }

    fn create_scene(&mut self) -> SceneHandle {
        let handle = SceneHandle(self.next());
        self.scenes.insert(handle);
        handle
    }

    fn release_scene(&mut self, scene: SceneHandle) {
        assert!(
            self.instances.values().all(|i| i.scene != scene),
            "scene {scene:?} released with live instances"
        );
        assert!(self.scenes.remove(&scene), "unknown scene {scene:?}");
    }

    fn create_instance(
        &mut self,
        scene: SceneHandle,
        mesh: MeshHandle,
        transform: &InstanceTransform,
        pick: PickTarget,
    ) -> InstanceHandle {
        let handle = InstanceHandle(self.next());
        self.instances.insert(
            handle,
            MockInstance {
                scene,
                mesh,
                transform: *transform,
                pick,
                visible: true,
                highlighted: false,
            },
        );
        handle
    }

    fn set_translation(&mut self, instance: InstanceHandle, translation: Vec3) {
        self.instance_mut(instance).transform.translation = translation;
    }

    fn set_scale(&mut self, instance: InstanceHandle, scale: Vec3) {
        self.instance_mut(instance).transform.scale = scale;
    }

    fn set_rotation(&mut self, instance: InstanceHandle, rotation: Quat) {
        self.instance_mut(instance).transform.rotation = rotation;
    }

    fn show(&mut self, instance: InstanceHandle) {
        self.instance_mut(instance).visible = true;
    }

    fn hide(&mut self, instance: InstanceHandle) {
        self.instance_mut(instance).visible = false;
    }

    fn highlight(&mut self, instance: InstanceHandle) {
        self.instance_mut(instance).highlighted = true;
    }

    fn dim(&mut self, instance: InstanceHandle) {
        self.instance_mut(instance).highlighted = false;
    }

    fn release_instance(&mut self, instance: InstanceHandle) {
        assert!(
            self.instances.remove(&instance).is_some(),
            "unknown instance {instance:?}"
        );
    }

    fn cursor_select(&mut self, _scene: SceneHandle, _cursor: Vec2) -> Option<PickTarget> {
        self.next_pick.take()
    }

    fn cursor_ray_direction(&self, _scene: SceneHandle, cursor: Vec2) -> Vec3 {
        Vec3::new(cursor.x * 0.1, cursor.y * 0.1, 1.0).normalize()
    }

    fn screen_vec_to_world_vec(&self, _scene: SceneHandle, delta: Vec2) -> Vec3 {
        delta.extend(0.0)
    }

    fn camera_position(&self, _scene: SceneHandle) -> Vec3 {
        self.camera_position
    }

    fn camera_fov(&self, _scene: SceneHandle) -> f32 {
        self.fov
    }

    fn rotate_camera(&mut self, _scene: SceneHandle, delta: Vec2) {
        let rotation = Quat::from_rotation_y(delta.x.to_radians());
        self.camera_position = rotation * self.camera_position;
    }

    fn pan_camera(&mut self, _scene: SceneHandle, delta: Vec2) {
        self.camera_position += delta.extend(0.0);
    }

    fn zoom_camera(&mut self, _scene: SceneHandle, delta: f32) {
        self.camera_position.z += delta;
    }
}

// ============================================================================
// Asset generators
// ============================================================================

/// Everything an asset generator was told, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetCall {
    Clear3D,
    Clear2D,
    Box { center: Vec3, scale: Vec3 },
    Sphere { center: Vec3, radius: f32 },
    Capsule { center: Vec3, axis: Vec3, height: f32, radius: f32 },
    Rect { center: Vec2, scale: Vec2 },
    Circle { center: Vec2, radius: f32 },
    Stadium { center: Vec2, axis: Vec2, height: f32, radius: f32 },
    InstancesNrMax(u32),
    IsStatic(bool),
    Dispose,
}

/// Shared record of every generator call, keyed by generator owner.
#[derive(Debug, Clone, Default)]
pub struct GeneratorLog {
    calls: Rc<RefCell<Vec<(String, AssetCall)>>>,
}

impl GeneratorLog {
    pub fn generator(&self, owner: &str) -> Box<dyn AssetGenerator> {
        Box::new(MockAssetGenerator {
            owner: owner.to_string(),
            log: self.clone(),
        })
    }

    pub fn calls_for(&self, owner: &str) -> Vec<AssetCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|(o, _)| o == owner)
            .map(|(_, call)| call.clone())
            .collect()
    }

    fn push(&self, owner: &str, call: AssetCall) {
        self.calls.borrow_mut().push((owner.to_string(), call));
    }
}

pub struct MockAssetGenerator {
    owner: String,
    log: GeneratorLog,
}

impl CollisionSink for MockAssetGenerator {
    fn clear_collision_primitive_3d(&mut self) {
        self.log.push(&self.owner, AssetCall::Clear3D);
    }

    fn clear_collision_primitive_2d(&mut self) {
        self.log.push(&self.owner, AssetCall::Clear2D);
    }

    fn assign_collision_box(&mut self, center: Vec3, scale: Vec3) {
        self.log.push(&self.owner, AssetCall::Box { center, scale });
    }

    fn assign_collision_sphere(&mut self, center: Vec3, radius: f32) {
        self.log.push(&self.owner, AssetCall::Sphere { center, radius });
    }

    fn assign_collision_capsule(&mut self, center: Vec3, axis: Vec3, height: f32, radius: f32) {
        self.log.push(
            &self.owner,
            AssetCall::Capsule {
                center,
                axis,
                height,
                radius,
            },
        );
    }

    fn assign_collision_rect(&mut self, center: Vec2, scale: Vec2) {
        self.log.push(&self.owner, AssetCall::Rect { center, scale });
    }

    fn assign_collision_circle(&mut self, center: Vec2, radius: f32) {
        self.log.push(&self.owner, AssetCall::Circle { center, radius });
    }

    fn assign_collision_stadium(&mut self, center: Vec2, axis: Vec2, height: f32, radius: f32) {
        self.log.push(
            &self.owner,
            AssetCall::Stadium {
                center,
                axis,
                height,
                radius,
            },
        );
    }
}

impl AssetGenerator for MockAssetGenerator {
    fn set_instances_nr_max(&mut self, instances_nr_max: u32) {
        self.log
            .push(&self.owner, AssetCall::InstancesNrMax(instances_nr_max));
    }

    fn set_is_static(&mut self, is_static: bool) {
        self.log.push(&self.owner, AssetCall::IsStatic(is_static));
    }

    fn dispose(&mut self) {
        self.log.push(&self.owner, AssetCall::Dispose);
    }
}

// ============================================================================
// Importer
// ============================================================================

/// Importer serving meshes registered up front.
#[derive(Debug)]
pub struct MockImporter {
    sources: HashMap<PathBuf, ImportedMesh>,
    imported: HashMap<String, ImportedMesh>,
    pub parse_count: usize,
    pub saved_to: Vec<PathBuf>,
    pub removed: Vec<String>,
    log: GeneratorLog,
}

impl MockImporter {
    pub fn new(log: GeneratorLog) -> Self {
        Self {
            sources: HashMap::new(),
            imported: HashMap::new(),
            parse_count: 0,
            saved_to: Vec::new(),
            removed: Vec::new(),
            log,
        }
    }

    pub fn register(&mut self, path: &str, name: &str, geometry: MeshGeometry) {
        self.sources.insert(
            PathBuf::from(path),
            ImportedMesh {
                name: name.to_string(),
                geometry,
            },
        );
    }
}

impl AssetImporter for MockImporter {
    fn import_model(&mut self, path: &Path) -> Result<ImportedMesh, ImportError> {
        let source = self
            .sources
            .get(path)
            .ok_or_else(|| ImportError::NotFound(path.to_path_buf()))?;
        if let Some(cached) = self.imported.get(&source.name) {
            return Ok(cached.clone());
        }
        self.parse_count += 1;
        self.imported.insert(source.name.clone(), source.clone());
        Ok(source.clone())
    }

    fn remove_model(&mut self, name: &str) {
        self.imported.remove(name);
        self.removed.push(name.to_string());
    }

    fn save_imported_models(&mut self, destination: &Path) -> Result<(), ImportError> {
        self.saved_to.push(destination.to_path_buf());
        Ok(())
    }

    fn model_asset_generator(&mut self, model_name: &str) -> Box<dyn AssetGenerator> {
        self.log.generator(model_name)
    }

    fn scene_model_asset_generator(
        &mut self,
        scene_name: &str,
        model_name: &str,
    ) -> Box<dyn AssetGenerator> {
        self.log.generator(&format!("{scene_name}/{model_name}"))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Axis-aligned box mesh of the given size centered at the origin
pub fn box_mesh(size: Vec3) -> MeshGeometry {
    let half = size * 0.5;
    let mut mesh = MeshGeometry::new(Topology::Triangles);
    for i in 0..8u32 {
        mesh.push_vertex(Vec3::new(
            if i & 1 == 0 { -half.x } else { half.x },
            if i & 2 == 0 { -half.y } else { half.y },
            if i & 4 == 0 { -half.z } else { half.z },
        ));
    }
    for [a, b, c] in [
        [0, 2, 1], [1, 2, 3], [4, 5, 6], [5, 7, 6],
        [0, 1, 4], [1, 5, 4], [2, 6, 3], [3, 6, 7],
        [0, 4, 2], [2, 4, 6], [1, 3, 5], [3, 7, 5],
    ] {
        mesh.push_triangle(a, b, c);
    }
    mesh
}
