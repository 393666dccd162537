//! A single placed copy of a model inside a scene.

use glam::{EulerRot, Quat, Vec3};
use scenewright_protocol::{
    EditorEvent, InstanceHandle, InstanceInfo, InstanceKey, InstanceTransform, MeshHandle,
    OutboundEvents, PickTarget, Renderer, SceneHandle, Transform3D,
};

/// One placed copy of a model.
///
/// Every setter writes straight through to the renderer. The plain setters
/// also queue [`EditorEvent::InstanceTransformChanged`] for the property
/// editing surface; the `*_silent` variants are what the gizmo uses while
/// dragging and queue nothing.
#[derive(Debug)]
pub struct SceneModelInstance {
    key: InstanceKey,
    translation: Vec3,
    scale: Vec3,
    rotation: Quat,
    visible: bool,
    handle: InstanceHandle,
}

impl SceneModelInstance {
    pub(crate) fn new(
        key: InstanceKey,
        scene: SceneHandle,
        mesh: MeshHandle,
        placement: InstanceTransform,
        renderer: &mut dyn Renderer,
    ) -> Self {
        let handle = renderer.create_instance(scene, mesh, &placement, PickTarget::Instance(key));
        Self {
            key,
            translation: placement.translation,
            scale: placement.scale,
            rotation: placement.rotation,
            visible: true,
            handle,
        }
    }

    pub fn key(&self) -> InstanceKey {
        self.key
    }

    pub fn index(&self) -> u32 {
        self.key.index
    }

    pub fn handle(&self) -> InstanceHandle {
        self.handle
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rotation as XYZ Euler angles in degrees
    pub fn euler_angles(&self) -> Vec3 {
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    pub fn placement(&self) -> InstanceTransform {
        InstanceTransform {
            translation: self.translation,
            scale: self.scale,
            rotation: self.rotation,
        }
    }

    pub fn transform(&self) -> Transform3D {
        Transform3D::from_parts(self.translation, self.rotation, self.scale)
    }

    pub fn info(&self) -> InstanceInfo {
        InstanceInfo {
            key: self.key,
            transform: self.transform(),
            visible: self.visible,
        }
    }

    // ------------------------------------------------------------------
    // Property editing
    // ------------------------------------------------------------------

    pub fn set_translation(
        &mut self,
        translation: Vec3,
        renderer: &mut dyn Renderer,
        events: &mut OutboundEvents,
    ) -> bool {
        let changed = self.set_translation_silent(translation, renderer);
        if changed {
            self.notify_transform(events);
        }
        changed
    }

    pub fn set_scale(
        &mut self,
        scale: Vec3,
        renderer: &mut dyn Renderer,
        events: &mut OutboundEvents,
    ) -> bool {
        let changed = self.set_scale_silent(scale, renderer);
        if changed {
            self.notify_transform(events);
        }
        changed
    }

    pub fn set_rotation(
        &mut self,
        rotation: Quat,
        renderer: &mut dyn Renderer,
        events: &mut OutboundEvents,
    ) -> bool {
        let changed = self.set_rotation_silent(rotation, renderer);
        if changed {
            self.notify_transform(events);
        }
        changed
    }

    /// Set the rotation from XYZ Euler angles in degrees
    pub fn set_euler_angles(
        &mut self,
        degrees: Vec3,
        renderer: &mut dyn Renderer,
        events: &mut OutboundEvents,
    ) -> bool {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            degrees.x.to_radians(),
            degrees.y.to_radians(),
            degrees.z.to_radians(),
        );
        self.set_rotation(rotation, renderer, events)
    }

    pub fn set_visible(
        &mut self,
        visible: bool,
        renderer: &mut dyn Renderer,
        events: &mut OutboundEvents,
    ) -> bool {
        if self.visible == visible {
            return false;
        }
        self.visible = visible;
        if visible {
            renderer.show(self.handle);
        } else {
            renderer.hide(self.handle);
        }
        events.send(EditorEvent::InstanceVisibilityChanged {
            key: self.key,
            visible,
        });
        true
    }

    // ------------------------------------------------------------------
    // Gizmo writes
    // ------------------------------------------------------------------

    pub fn set_translation_silent(
        &mut self,
        translation: Vec3,
        renderer: &mut dyn Renderer,
    ) -> bool {
        if self.translation == translation {
            return false;
        }
        self.translation = translation;
        renderer.set_translation(self.handle, translation);
        true
    }

    pub fn set_scale_silent(&mut self, scale: Vec3, renderer: &mut dyn Renderer) -> bool {
        if self.scale == scale {
            return false;
        }
        self.scale = scale;
        renderer.set_scale(self.handle, scale);
        true
    }

    pub fn set_rotation_silent(&mut self, rotation: Quat, renderer: &mut dyn Renderer) -> bool {
        if self.rotation == rotation {
            return false;
        }
        self.rotation = rotation;
        renderer.set_rotation(self.handle, rotation);
        true
    }

    // ------------------------------------------------------------------
    // Selection display
    // ------------------------------------------------------------------

    pub(crate) fn highlight(&self, renderer: &mut dyn Renderer) {
        renderer.highlight(self.handle);
    }

    pub(crate) fn dim(&self, renderer: &mut dyn Renderer) {
        renderer.dim(self.handle);
    }

    /// Release the renderer instance
    pub(crate) fn release(self, renderer: &mut dyn Renderer) {
        renderer.release_instance(self.handle);
    }

    fn notify_transform(&self, events: &mut OutboundEvents) {
        events.send(EditorEvent::InstanceTransformChanged {
            key: self.key,
            transform: self.transform(),
        });
    }
}
