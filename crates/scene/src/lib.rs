//! Scene graph and transform gizmo for Scenewright
//!
//! This crate is the editor core: imported [`Model`]s with their collision
//! primitive candidates, [`Scene`]s that place models as
//! [`SceneModelInstance`]s, and the [`TransformGizmo`] that turns cursor
//! motion into translation, scale and rotation of the selected instance.
//!
//! Rendering, picking and file import live behind the traits in
//! `scenewright-protocol`; the [`Editor`] owns one implementation of each
//! and queues [`EditorEvent`](scenewright_protocol::EditorEvent)s for a UI.

mod bounds;
mod editor;
mod error;
mod gizmo;
mod gizmo_raycast;
mod index_pool;
mod instance;
mod model;
mod primitives;
mod scene;
mod scene_model;
#[cfg(test)]
mod testing;

pub use bounds::{Aabb, BoundingCapsule, MeshBounds};
pub use editor::Editor;
pub use error::EditorError;
pub use gizmo::{
    DragDelta, DragState, GizmoGeometry, GizmoMeshCache, GizmoMeshes, HandleLayout, HandlePart,
    TransformGizmo, axis_orientation, begin_drag, drag_step, handle_layout, handle_scale,
};
pub use gizmo_raycast::{Plane, Ray, perpendicular};
pub use index_pool::{IndexPool, IndexPoolError};
pub use instance::SceneModelInstance;
pub use model::Model;
pub use primitives::{
    Avatar, AvatarCache, AvatarTransform, BoxShape, CapsuleShape, CircleShape,
    CollisionPrimitive, CollisionPrimitive2D, CollisionPrimitive3D, PrimitiveKind, RectShape,
    Shape, Shape2D, Shape3D, SphereShape, StadiumShape,
};
pub use scene::Scene;
pub use scene_model::SceneModel;
