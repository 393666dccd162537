//! Drag state of the active gizmo handle

use glam::{Vec2, Vec3};
use scenewright_protocol::GizmoHandle;

use crate::gizmo_raycast::Plane;

/// What the gizmo remembers between cursor moves while a handle is held.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No handle held; cursor moves are ignored
    #[default]
    Idle,
    /// Translate or scale along one axis
    Axis {
        handle: GizmoHandle,
        /// World axis as stored on the instance (unrotated)
        axis: Vec3,
        /// Axis the cursor is projected onto; rotated for scale handles
        drag_axis: Vec3,
        plane: Plane,
        reference: Vec3,
    },
    /// Translate within the plane normal to the excluded axis
    Plane {
        handle: GizmoHandle,
        plane: Plane,
        reference: Vec3,
    },
    /// Rotate about an axis from 2D cursor motion
    Rotate {
        handle: GizmoHandle,
        axis: Vec3,
        /// Unit vector from the instance towards the grab point
        reference: Vec3,
        cursor: Vec2,
    },
}

impl DragState {
    /// The held handle, or `GizmoHandle::None` when idle
    pub fn handle(&self) -> GizmoHandle {
        match self {
            DragState::Idle => GizmoHandle::None,
            DragState::Axis { handle, .. }
            | DragState::Plane { handle, .. }
            | DragState::Rotate { handle, .. } => *handle,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }
}
