//! Gizmo input handling: handle press, cursor drag and release

use glam::Vec2;
use scenewright_protocol::{GizmoHandle, Renderer};
use tracing::{debug, warn};

use crate::gizmo_raycast::Ray;
use crate::instance::SceneModelInstance;

use super::TransformGizmo;
use super::state::DragState;
use super::transform::{begin_drag, drag_step};

impl TransformGizmo {
    fn cursor_ray(&self, cursor: Vec2, renderer: &dyn Renderer) -> Ray {
        Ray::new(
            renderer.camera_position(self.scene),
            renderer.cursor_ray_direction(self.scene, cursor),
        )
    }

    /// Start dragging `handle` from `cursor`.
    ///
    /// Returns false when nothing is bound or `handle` is `None`.
    pub fn press(&mut self, handle: GizmoHandle, cursor: Vec2, renderer: &dyn Renderer) -> bool {
        if !self.is_bound() {
            warn!("Gizmo: {:?} picked while unbound", handle);
            return false;
        }
        let camera = renderer.camera_position(self.scene);
        let ray = self.cursor_ray(cursor, renderer);
        self.drag = begin_drag(handle, &self.anchor, camera, &ray, cursor);
        if self.drag.is_active() {
            debug!("Gizmo: started {:?} at {}", handle, cursor);
        }
        self.drag.is_active()
    }

    /// Apply one cursor move to `instance`, the bound target.
    ///
    /// Writes go through the instance's silent setters so the property
    /// editing surface is not notified. Returns whether anything moved.
    pub fn drag(
        &mut self,
        cursor: Vec2,
        instance: &mut SceneModelInstance,
        renderer: &mut dyn Renderer,
    ) -> bool {
        if !self.drag.is_active() || self.target != Some(instance.key()) {
            return false;
        }
        let ray = self.cursor_ray(cursor, renderer);
        let scene = self.scene;
        let sensitivity = self.config.rotate_sensitivity;
        let Some(delta) = drag_step(&mut self.drag, &ray, cursor, sensitivity, |screen| {
            renderer.screen_vec_to_world_vec(scene, screen)
        }) else {
            return false;
        };

        let mut placement = instance.placement();
        delta.apply(&mut placement);
        let moved = instance.set_translation_silent(placement.translation, renderer)
            | instance.set_scale_silent(placement.scale, renderer)
            | instance.set_rotation_silent(placement.rotation, renderer);

        self.anchor = instance.placement();
        self.sync(renderer);
        moved
    }

    /// Let go of the held handle; the last applied delta stays.
    /// Returns the handle that was held.
    pub fn deactivate(&mut self) -> GizmoHandle {
        let handle = self.drag.handle();
        if handle != GizmoHandle::None {
            debug!("Gizmo: released {:?}", handle);
        }
        self.drag = DragState::Idle;
        handle
    }
}
