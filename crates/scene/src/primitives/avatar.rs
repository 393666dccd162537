//! Render geometry ("avatars") shown for collision primitives.
//!
//! Every primitive kind has a fixed list of unit-sized wireframe templates.
//! The [`AvatarCache`] builds them once; primitives clone avatars out of it
//! and position each copy through its own [`AvatarTransform`].

use std::collections::HashMap;
use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use glam::{Quat, Vec3};
use scenewright_protocol::{MeshGeometry, Topology};

use super::PrimitiveKind;

/// Segments used for every template circle and arc
const CIRCLE_SEGMENTS: u32 = 32;

/// Placement of one avatar relative to its model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl AvatarTransform {
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (point * self.scale)
    }
}

impl Default for AvatarTransform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }
}

/// A template mesh plus its own transform.
///
/// Cloning shares the read-only template and copies the transform, so each
/// clone can be positioned independently.
#[derive(Debug, Clone)]
pub struct Avatar {
    template: Arc<MeshGeometry>,
    pub transform: AvatarTransform,
}

impl Avatar {
    pub fn template(&self) -> &MeshGeometry {
        &self.template
    }

    /// Template vertices with this avatar's transform applied
    pub fn world_positions(&self) -> Vec<Vec3> {
        self.template
            .positions()
            .map(|p| self.transform.transform_point(p))
            .collect()
    }
}

impl PartialEq for Avatar {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.template, &other.template) && self.transform == other.transform
    }
}

/// Per-kind avatar templates, built once at startup.
#[derive(Debug)]
pub struct AvatarCache {
    templates: HashMap<PrimitiveKind, Vec<Arc<MeshGeometry>>>,
}

impl Default for AvatarCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AvatarCache {
    pub fn new() -> Self {
        let mut templates = HashMap::new();
        templates.insert(PrimitiveKind::None, Vec::new());
        templates.insert(PrimitiveKind::Box, vec![Arc::new(wire_cube())]);
        templates.insert(PrimitiveKind::Sphere, vec![Arc::new(wire_sphere())]);
        templates.insert(
            PrimitiveKind::Capsule,
            vec![
                Arc::new(wire_cylinder()),
                Arc::new(wire_hemisphere(1.0)),
                Arc::new(wire_hemisphere(-1.0)),
            ],
        );
        templates.insert(PrimitiveKind::Rect, vec![Arc::new(wire_square())]);
        templates.insert(
            PrimitiveKind::Circle,
            vec![Arc::new(wire_arc(0.0, TAU, Vec3::X, Vec3::Y))],
        );
        templates.insert(
            PrimitiveKind::Stadium,
            vec![
                Arc::new(stadium_sides()),
                Arc::new(wire_arc(-PI / 2.0, PI / 2.0, Vec3::X, Vec3::Y)),
                Arc::new(wire_arc(PI / 2.0, 3.0 * PI / 2.0, Vec3::X, Vec3::Y)),
            ],
        );
        Self { templates }
    }

    /// Fresh avatars for `kind`, all at the identity transform
    pub fn avatars(&self, kind: PrimitiveKind) -> Vec<Avatar> {
        self.templates
            .get(&kind)
            .map(|templates| {
                templates
                    .iter()
                    .map(|template| Avatar {
                        template: Arc::clone(template),
                        transform: AvatarTransform::default(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn template_count(&self, kind: PrimitiveKind) -> usize {
        self.templates.get(&kind).map_or(0, Vec::len)
    }
}

// ============================================================================
// Template builders (unit size, centered at the origin)
// ============================================================================

fn wire_cube() -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    for i in 0..8u32 {
        let corner = Vec3::new(
            if i & 1 == 0 { -0.5 } else { 0.5 },
            if i & 2 == 0 { -0.5 } else { 0.5 },
            if i & 4 == 0 { -0.5 } else { 0.5 },
        );
        mesh.push_vertex(corner);
    }
    // Corners differing in exactly one bit share an edge
    for a in 0..8u32 {
        for bit in [1, 2, 4] {
            let b = a | bit;
            if b != a {
                mesh.push_line(a, b);
            }
        }
    }
    mesh
}

/// Line strip along the arc from `start` to `end` radians in the plane
/// spanned by `u` and `v`.
fn append_arc(mesh: &mut MeshGeometry, start: f32, end: f32, u: Vec3, v: Vec3, offset: Vec3) {
    let first = mesh.vertices.len() as u32;
    for i in 0..=CIRCLE_SEGMENTS {
        let angle = start + (end - start) * (i as f32 / CIRCLE_SEGMENTS as f32);
        mesh.push_vertex(offset + u * angle.cos() + v * angle.sin());
    }
    for i in 0..CIRCLE_SEGMENTS {
        mesh.push_line(first + i, first + i + 1);
    }
}

fn wire_arc(start: f32, end: f32, u: Vec3, v: Vec3) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    append_arc(&mut mesh, start, end, u, v, Vec3::ZERO);
    mesh
}

/// Three great circles of the unit sphere
fn wire_sphere() -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    append_arc(&mut mesh, 0.0, TAU, Vec3::X, Vec3::Y, Vec3::ZERO);
    append_arc(&mut mesh, 0.0, TAU, Vec3::Y, Vec3::Z, Vec3::ZERO);
    append_arc(&mut mesh, 0.0, TAU, Vec3::Z, Vec3::X, Vec3::ZERO);
    mesh
}

/// Unit-radius cylinder of height 1 along Y
fn wire_cylinder() -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    append_arc(&mut mesh, 0.0, TAU, Vec3::X, Vec3::Z, Vec3::Y * 0.5);
    append_arc(&mut mesh, 0.0, TAU, Vec3::X, Vec3::Z, Vec3::Y * -0.5);
    for side in [Vec3::X, Vec3::NEG_X, Vec3::Z, Vec3::NEG_Z] {
        let top = mesh.push_vertex(side + Vec3::Y * 0.5);
        let bottom = mesh.push_vertex(side - Vec3::Y * 0.5);
        mesh.push_line(top, bottom);
    }
    mesh
}

/// Unit hemisphere bulging towards `sign * Y`
fn wire_hemisphere(sign: f32) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    let up = Vec3::Y * sign;
    append_arc(&mut mesh, 0.0, PI, Vec3::X, up, Vec3::ZERO);
    append_arc(&mut mesh, 0.0, PI, Vec3::Z, up, Vec3::ZERO);
    mesh
}

/// Unit square in the XY plane
fn wire_square() -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    let corners = [
        Vec3::new(-0.5, -0.5, 0.0),
        Vec3::new(0.5, -0.5, 0.0),
        Vec3::new(0.5, 0.5, 0.0),
        Vec3::new(-0.5, 0.5, 0.0),
    ];
    for corner in corners {
        mesh.push_vertex(corner);
    }
    for i in 0..4 {
        mesh.push_line(i, (i + 1) % 4);
    }
    mesh
}

/// The straight sides of a stadium: length 1 along X at y = ±1
fn stadium_sides() -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    for y in [1.0, -1.0] {
        let a = mesh.push_vertex(Vec3::new(-0.5, y, 0.0));
        let b = mesh.push_vertex(Vec3::new(0.5, y, 0.0));
        mesh.push_line(a, b);
    }
    mesh
}
