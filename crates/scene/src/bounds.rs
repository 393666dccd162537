//! Bounding volumes of an imported mesh, used to seed collision candidates.

use glam::Vec3;
use scenewright_protocol::{BoundingSphere, MeshGeometry};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Capsule enclosing a mesh.
///
/// `height` is the length of the cylindrical section between the two
/// hemisphere centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCapsule {
    pub center: Vec3,
    pub axis: Vec3,
    pub height: f32,
    pub radius: f32,
}

/// Every bounding volume derived from a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshBounds {
    pub aabb: Aabb,
    pub sphere: BoundingSphere,
    pub capsule: BoundingCapsule,
}

impl MeshBounds {
    /// Compute bounds from mesh vertices. Empty meshes collapse to the origin.
    pub fn from_geometry(geometry: &MeshGeometry) -> Self {
        let mut positions = geometry.positions().peekable();
        if positions.peek().is_none() {
            return Self::degenerate();
        }

        let (min, max) = positions.fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), p| (min.min(p), max.max(p)),
        );
        let aabb = Aabb { min, max };
        let sphere = geometry.bounding_sphere();
        let capsule = bounding_capsule(geometry, &aabb);

        Self {
            aabb,
            sphere,
            capsule,
        }
    }

    fn degenerate() -> Self {
        Self {
            aabb: Aabb {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            },
            sphere: BoundingSphere::default(),
            capsule: BoundingCapsule {
                center: Vec3::ZERO,
                axis: Vec3::Y,
                height: 0.0,
                radius: 0.0,
            },
        }
    }
}

/// Capsule along the longest box extent, wide enough for every vertex.
fn bounding_capsule(geometry: &MeshGeometry, aabb: &Aabb) -> BoundingCapsule {
    let size = aabb.size();
    let axis = if size.x >= size.y && size.x >= size.z {
        Vec3::X
    } else if size.y >= size.z {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let center = aabb.center();

    // Split each vertex offset into its axial and radial parts
    let offsets: Vec<(f32, f32)> = geometry
        .positions()
        .map(|p| {
            let offset = p - center;
            let axial = offset.dot(axis);
            (axial, (offset - axis * axial).length())
        })
        .collect();
    let radius = offsets.iter().map(|&(_, radial)| radial).fold(0.0, f32::max);

    // Hemisphere centers sit just far enough out that every vertex is
    // within `radius` of the segment between them
    let half_height = offsets
        .iter()
        .map(|&(axial, radial)| {
            axial.abs() - (radius * radius - radial * radial).max(0.0).sqrt()
        })
        .fold(0.0, f32::max);

    BoundingCapsule {
        center,
        axis,
        height: 2.0 * half_height,
        radius,
    }
}
