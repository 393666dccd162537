//! Ray and plane math used while dragging gizmo handles.
//!
//! Picking itself is done by the renderer; these helpers only turn a cursor
//! ray into a point on the constraint plane of the active handle.

use glam::Vec3;

/// Epsilon for floating point comparisons
const EPSILON: f32 = 1e-6;

/// A world-space ray leaving the camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// An infinite plane through `point`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Plane containing the line through `point` along `axis` and facing the
    /// camera as much as possible.
    ///
    /// The normal is `axis × (axis × (camera − point))`. When the camera looks
    /// straight down the axis that product vanishes and any perpendicular of
    /// the axis is used instead.
    pub fn containing_axis(point: Vec3, axis: Vec3, camera: Vec3) -> Self {
        let normal = axis.cross(axis.cross(camera - point));
        let normal = normal
            .try_normalize()
            .unwrap_or_else(|| perpendicular(axis));
        Self { point, normal }
    }

    /// Where `ray` crosses this plane, or `None` when it runs parallel to it
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3> {
        let denom = ray.direction.dot(self.normal);
        if denom.abs() < EPSILON {
            return None;
        }
        let t = (self.point - ray.origin).dot(self.normal) / denom;
        Some(ray.at(t))
    }
}

/// Some unit vector perpendicular to `v`.
pub fn perpendicular(v: Vec3) -> Vec3 {
    let arbitrary = if v.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
    v.cross(arbitrary).try_normalize().unwrap_or(Vec3::Z)
}
