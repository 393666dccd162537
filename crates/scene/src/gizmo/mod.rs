//! Transform gizmo: pickable arrows, squares and rings around the bound
//! instance.
//!
//! Handles (27 renderer instances built from 9 shared meshes):
//! - Arrow per axis = translate along the axis
//! - Short arrow with a cube head per axis = scale along the axis
//! - Square per axis = translate in the plane normal to that axis
//! - Ring per axis = rotate about the axis
//!
//! Picking is done by the renderer, which reports `PickTarget::Gizmo`.
//! Handle parts are world aligned except the scale arrows, which follow the
//! instance rotation. Handles keep a constant screen size by scaling with
//! camera distance.

mod input;
mod render;
mod state;
mod transform;

use glam::Vec3;
use scenewright_config::GizmoConfig;
use scenewright_protocol::{
    GizmoHandle, InstanceHandle, InstanceKey, InstanceTransform, PickTarget, Renderer,
    SceneHandle,
};
use tracing::debug;

pub use render::{
    GizmoGeometry, GizmoMeshCache, GizmoMeshes, HandleLayout, HandlePart, axis_orientation,
    handle_layout,
};
pub use state::DragState;
pub use transform::{DragDelta, begin_drag, drag_step, handle_scale};

/// A handle part instanced in the renderer
#[derive(Debug, Clone, Copy)]
struct PlacedPart {
    layout: HandleLayout,
    instance: InstanceHandle,
}

/// The manipulator of one scene.
#[derive(Debug)]
pub struct TransformGizmo {
    scene: SceneHandle,
    parts: Vec<PlacedPart>,
    target: Option<InstanceKey>,
    /// Last known placement of the target
    anchor: InstanceTransform,
    drag: DragState,
    scale: f32,
    config: GizmoConfig,
}

impl TransformGizmo {
    /// Instance every handle part in `scene`, hidden until bound
    pub fn attach(
        scene: SceneHandle,
        meshes: &GizmoMeshes,
        config: GizmoConfig,
        renderer: &mut dyn Renderer,
    ) -> Self {
        let parts = handle_layout()
            .into_iter()
            .map(|layout| {
                let placement = InstanceTransform {
                    rotation: layout.orientation,
                    ..InstanceTransform::default()
                };
                let instance = renderer.create_instance(
                    scene,
                    meshes.get(layout.part),
                    &placement,
                    PickTarget::Gizmo(layout.handle),
                );
                renderer.hide(instance);
                PlacedPart { layout, instance }
            })
            .collect();

        Self {
            scene,
            parts,
            target: None,
            anchor: InstanceTransform::default(),
            drag: DragState::Idle,
            scale: 1.0,
            config,
        }
    }

    pub fn target(&self) -> Option<InstanceKey> {
        self.target
    }

    pub fn is_bound(&self) -> bool {
        self.target.is_some()
    }

    /// Handle currently held, `GizmoHandle::None` at rest
    pub fn active_handle(&self) -> GizmoHandle {
        self.drag.handle()
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    /// Current world scale of the handles
    pub fn handle_scale(&self) -> f32 {
        self.scale
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// Show the handles around `key`, replacing any previous target
    pub fn bind(
        &mut self,
        key: InstanceKey,
        placement: InstanceTransform,
        renderer: &mut dyn Renderer,
    ) {
        debug!("Gizmo: bound to {}", key);
        self.target = Some(key);
        self.anchor = placement;
        self.drag = DragState::Idle;
        for part in &self.parts {
            renderer.show(part.instance);
        }
        self.sync(renderer);
    }

    /// Hide the handles and forget the target
    pub fn unbind(&mut self, renderer: &mut dyn Renderer) {
        if let Some(key) = self.target.take() {
            debug!("Gizmo: unbound from {}", key);
        }
        self.drag = DragState::Idle;
        for part in &self.parts {
            renderer.hide(part.instance);
        }
    }

    /// Re-sync after the target was moved by something other than the gizmo.
    /// Ignored unless `key` is the bound target.
    pub fn follow(
        &mut self,
        key: InstanceKey,
        placement: InstanceTransform,
        renderer: &mut dyn Renderer,
    ) {
        if self.target != Some(key) {
            return;
        }
        self.anchor = placement;
        self.sync(renderer);
    }

    /// Recompute handle size, e.g. after the camera moved
    pub fn update_scale(&mut self, renderer: &mut dyn Renderer) {
        if self.is_bound() {
            self.sync(renderer);
        }
    }

    /// Release every handle instance
    pub(crate) fn detach(self, renderer: &mut dyn Renderer) {
        for part in self.parts {
            renderer.release_instance(part.instance);
        }
    }

    fn sync(&mut self, renderer: &mut dyn Renderer) {
        let camera = renderer.camera_position(self.scene);
        let fov = renderer.camera_fov(self.scene);
        self.scale = handle_scale(
            fov,
            self.config.handle_fov_fraction,
            camera.distance(self.anchor.translation),
        );

        let scale = Vec3::splat(self.scale);
        for part in &self.parts {
            let rotation = if part.layout.handle.is_scale() {
                self.anchor.rotation * part.layout.orientation
            } else {
                part.layout.orientation
            };
            renderer.set_translation(part.instance, self.anchor.translation);
            renderer.set_rotation(part.instance, rotation);
            renderer.set_scale(part.instance, scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockRenderer;
    use glam::Quat;
    use scenewright_protocol::{ModelId, SceneId};

    fn key() -> InstanceKey {
        InstanceKey {
            scene: SceneId(0),
            model: ModelId(0),
            index: 0,
        }
    }

    fn gizmo(renderer: &mut MockRenderer) -> TransformGizmo {
        let scene = renderer.create_scene();
        let config = GizmoConfig::default();
        let meshes = GizmoMeshCache::new().get_or_upload(renderer, &config);
        TransformGizmo::attach(scene, &meshes, config, renderer)
    }

    #[test]
    fn test_attach_creates_hidden_handles() {
        let mut renderer = MockRenderer::new();
        let gizmo = gizmo(&mut renderer);
        assert_eq!(gizmo.part_count(), 27);
        assert_eq!(renderer.gizmo_instances().count(), 27);
        assert!(renderer.gizmo_instances().all(|i| !i.visible));
    }

    #[test]
    fn test_bind_shows_and_positions_handles() {
        let mut renderer = MockRenderer::new();
        let mut gizmo = gizmo(&mut renderer);
        let placement = InstanceTransform {
            translation: Vec3::new(1.0, 2.0, 0.0),
            ..InstanceTransform::default()
        };
        gizmo.bind(key(), placement, &mut renderer);

        assert!(renderer.gizmo_instances().all(|i| i.visible));
        assert!(renderer
            .gizmo_instances()
            .all(|i| i.transform.translation == placement.translation));

        let distance = renderer.camera_position.distance(placement.translation);
        let expected = (0.2 * renderer.fov).tan() * distance;
        assert!((gizmo.handle_scale() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_unbind_hides_handles() {
        let mut renderer = MockRenderer::new();
        let mut gizmo = gizmo(&mut renderer);
        gizmo.bind(key(), InstanceTransform::default(), &mut renderer);
        gizmo.unbind(&mut renderer);
        assert!(gizmo.target().is_none());
        assert!(renderer.gizmo_instances().all(|i| !i.visible));
    }

    #[test]
    fn test_follow_ignores_other_instances() {
        let mut renderer = MockRenderer::new();
        let mut gizmo = gizmo(&mut renderer);
        gizmo.bind(key(), InstanceTransform::default(), &mut renderer);

        let other = InstanceKey { index: 1, ..key() };
        let moved = InstanceTransform {
            translation: Vec3::X * 3.0,
            ..InstanceTransform::default()
        };
        gizmo.follow(other, moved, &mut renderer);
        assert!(renderer
            .gizmo_instances()
            .all(|i| i.transform.translation == Vec3::ZERO));

        gizmo.follow(key(), moved, &mut renderer);
        assert!(renderer
            .gizmo_instances()
            .all(|i| i.transform.translation == moved.translation));
    }

    #[test]
    fn test_only_scale_handles_follow_rotation() {
        let mut renderer = MockRenderer::new();
        let mut gizmo = gizmo(&mut renderer);
        let rotation = Quat::from_rotation_y(0.5);
        gizmo.bind(
            key(),
            InstanceTransform {
                rotation,
                ..InstanceTransform::default()
            },
            &mut renderer,
        );

        for instance in renderer.gizmo_instances() {
            let PickTarget::Gizmo(handle) = instance.pick else {
                unreachable!();
            };
            let base = axis_orientation(handle.axis().unwrap());
            let expected = if handle.is_scale() { rotation * base } else { base };
            assert!(instance.transform.rotation.abs_diff_eq(expected, 1e-5), "{handle:?}");
        }
    }

    #[test]
    fn test_camera_zoom_rescales() {
        let mut renderer = MockRenderer::new();
        let mut gizmo = gizmo(&mut renderer);
        gizmo.bind(key(), InstanceTransform::default(), &mut renderer);
        let before = gizmo.handle_scale();

        renderer.camera_position = Vec3::new(0.0, 0.0, -20.0);
        gizmo.update_scale(&mut renderer);
        assert!((gizmo.handle_scale() - 2.0 * before).abs() < 1e-5);
    }

    #[test]
    fn test_detach_releases_handles() {
        let mut renderer = MockRenderer::new();
        let gizmo = gizmo(&mut renderer);
        gizmo.detach(&mut renderer);
        assert_eq!(renderer.gizmo_instances().count(), 0);
    }
}
