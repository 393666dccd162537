//! Drag math: turning cursor rays into translation, scale and rotation deltas

use glam::{Quat, Vec2, Vec3};
use scenewright_protocol::{GizmoHandle, GizmoMode, InstanceTransform};
use tracing::debug;

use crate::gizmo_raycast::{Plane, Ray, perpendicular};

use super::state::DragState;

/// Change to apply to the bound instance after one cursor move
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragDelta {
    Translate(Vec3),
    Scale(Vec3),
    Rotate(Quat),
}

impl DragDelta {
    /// Apply to a placement. Rotations are premultiplied and renormalized.
    pub fn apply(self, placement: &mut InstanceTransform) {
        match self {
            DragDelta::Translate(delta) => placement.translation += delta,
            DragDelta::Scale(delta) => placement.scale += delta,
            DragDelta::Rotate(delta) => {
                placement.rotation = (delta * placement.rotation).normalize();
            }
        }
    }
}

/// Drag state recorded when `handle` is pressed.
///
/// `ray` is the cursor ray at press time and `camera` the camera position.
pub fn begin_drag(
    handle: GizmoHandle,
    placement: &InstanceTransform,
    camera: Vec3,
    ray: &Ray,
    cursor: Vec2,
) -> DragState {
    let Some(axis) = handle.axis().map(|a| a.unit()) else {
        return DragState::Idle;
    };
    let position = placement.translation;

    match handle.mode() {
        GizmoMode::None => DragState::Idle,
        GizmoMode::Translate | GizmoMode::Scale => {
            // Scale handles follow the instance orientation
            let drag_axis = if handle.is_scale() {
                placement.rotation * axis
            } else {
                axis
            };
            let plane = Plane::containing_axis(position, drag_axis, camera);
            let reference = plane.intersect(ray).unwrap_or(position);
            DragState::Axis {
                handle,
                axis,
                drag_axis,
                plane,
                reference,
            }
        }
        GizmoMode::TranslatePlane => {
            let plane = Plane::new(position, axis);
            let reference = plane.intersect(ray).unwrap_or(position);
            DragState::Plane {
                handle,
                plane,
                reference,
            }
        }
        GizmoMode::Rotate => {
            let plane = Plane::new(position, axis);
            let reference = plane
                .intersect(ray)
                .and_then(|hit| (hit - position).try_normalize())
                .or_else(|| (position - camera).try_normalize())
                .unwrap_or_else(|| perpendicular(axis));
            DragState::Rotate {
                handle,
                axis,
                reference,
                cursor,
            }
        }
    }
}

/// Advance the drag by one cursor move and return the delta to apply.
///
/// `screen_to_world` converts a screen displacement (Y already flipped) to a
/// world vector; only rotation uses it. Returns `None` while idle or when
/// the ray misses the constraint plane.
pub fn drag_step(
    state: &mut DragState,
    ray: &Ray,
    cursor: Vec2,
    rotate_sensitivity: f32,
    screen_to_world: impl FnOnce(Vec2) -> Vec3,
) -> Option<DragDelta> {
    match state {
        DragState::Idle => None,
        DragState::Axis {
            handle,
            axis,
            drag_axis,
            plane,
            reference,
        } => {
            let hit = plane.intersect(ray)?;
            let amount = (hit - *reference).dot(*drag_axis);
            *reference = hit;
            debug!("Gizmo: {:?} drag by {:.4}", handle, amount);
            if handle.is_scale() {
                Some(DragDelta::Scale(*axis * amount))
            } else {
                Some(DragDelta::Translate(*axis * amount))
            }
        }
        DragState::Plane {
            handle,
            plane,
            reference,
        } => {
            let hit = plane.intersect(ray)?;
            let displacement = hit - *reference;
            *reference = hit;
            debug!("Gizmo: {:?} drag by {}", handle, displacement);
            Some(DragDelta::Translate(displacement))
        }
        DragState::Rotate {
            handle,
            axis,
            reference,
            cursor: last,
        } => {
            let delta = cursor - *last;
            *last = cursor;
            // Screen Y grows downwards
            let world = screen_to_world(Vec2::new(delta.x, -delta.y)) * rotate_sensitivity;
            let angle = reference.cross(world).dot(*axis);
            debug!("Gizmo: {:?} rotate by {:.4} rad", handle, angle);
            Some(DragDelta::Rotate(Quat::from_axis_angle(*axis, angle)))
        }
    }
}

/// World size of the handles for an instance at `distance` from the camera
pub fn handle_scale(fov: f32, fov_fraction: f32, distance: f32) -> f32 {
    (fov_fraction * fov).tan() * distance
}
