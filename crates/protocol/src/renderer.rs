//! The rendering and picking backend as seen by the editor core.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::commands::GizmoHandle;
use crate::geometry::{BoundingSphere, Color, MeshGeometry};
use crate::types::InstanceKey;

/// Distinguishes renderer instances so per-renderer caches can be keyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RendererId(pub u32);

/// A mesh uploaded to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshHandle(pub u64);

/// A renderer-side scene (camera plus instances).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneHandle(pub u64);

/// A mesh placed in a renderer scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceHandle(pub u64);

/// What a renderer instance stands for when the cursor picks it.
///
/// The renderer reports this back from [`Renderer::cursor_select`] instead of
/// invoking a callback, so the core dispatches picks by pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickTarget {
    Instance(InstanceKey),
    Gizmo(GizmoHandle),
}

/// Initial placement of a renderer instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstanceTransform {
    pub translation: Vec3,
    pub scale: Vec3,
    pub rotation: Quat,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Rendering/picking backend consumed by the core.
///
/// All calls are synchronous and happen on the thread delivering input events.
pub trait Renderer {
    /// Identity of this renderer, used to key per-renderer caches
    fn id(&self) -> RendererId;

    /// Upload a mesh and return its handle
    fn add_model(
        &mut self,
        geometry: &MeshGeometry,
        color: Color,
        bounds: BoundingSphere,
        is_opaque: bool,
    ) -> MeshHandle;

    /// Release a mesh previously returned by [`Renderer::add_model`]
    fn remove_model(&mut self, mesh: MeshHandle);

    fn create_scene(&mut self) -> SceneHandle;

    /// Release a scene; every instance in it must already be released
    fn release_scene(&mut self, scene: SceneHandle);

    /// Place `mesh` in `scene`; picks of the instance report `pick`
    fn create_instance(
        &mut self,
        scene: SceneHandle,
        mesh: MeshHandle,
        transform: &InstanceTransform,
        pick: PickTarget,
    ) -> InstanceHandle;

    fn set_translation(&mut self, instance: InstanceHandle, translation: Vec3);
    fn set_scale(&mut self, instance: InstanceHandle, scale: Vec3);
    fn set_rotation(&mut self, instance: InstanceHandle, rotation: Quat);

    fn show(&mut self, instance: InstanceHandle);
    fn hide(&mut self, instance: InstanceHandle);
    fn highlight(&mut self, instance: InstanceHandle);
    fn dim(&mut self, instance: InstanceHandle);
    fn release_instance(&mut self, instance: InstanceHandle);

    /// Pick whatever lies under the cursor, if anything
    fn cursor_select(&mut self, scene: SceneHandle, cursor: Vec2) -> Option<PickTarget>;

    /// World-space direction of the ray leaving the camera through `cursor`
    fn cursor_ray_direction(&self, scene: SceneHandle, cursor: Vec2) -> Vec3;

    /// Convert a screen-space displacement into a world-space vector
    fn screen_vec_to_world_vec(&self, scene: SceneHandle, delta: Vec2) -> Vec3;

    fn camera_position(&self, scene: SceneHandle) -> Vec3;

    /// Vertical field of view in radians
    fn camera_fov(&self, scene: SceneHandle) -> f32;

    fn rotate_camera(&mut self, scene: SceneHandle, delta: Vec2);
    fn pan_camera(&mut self, scene: SceneHandle, delta: Vec2);
    fn zoom_camera(&mut self, scene: SceneHandle, delta: f32);
}
