//! Gizmo handle geometry and its per-renderer mesh cache.
//!
//! Every handle shape is built along +X from the configured base length and
//! rotated into place per axis when instanced.

use std::collections::HashMap;
use std::f32::consts::{FRAC_PI_2, TAU};

use glam::{Quat, Vec3};
use scenewright_config::GizmoConfig;
use scenewright_protocol::{
    Color, GizmoAxis, GizmoHandle, MeshGeometry, MeshHandle, Renderer, RendererId, Topology,
};
use tracing::debug;

/// Arrow head cone height relative to the base length
const HEAD_HEIGHT_RATIO: f32 = 0.125;
/// Arrow head cone radius relative to the base length
const HEAD_RADIUS_RATIO: f32 = 0.05;
/// Scale arrow shaft length relative to the base length
const SCALE_SHAFT_RATIO: f32 = 0.5;
/// Side of the plane-translate square relative to the base length
const PLANE_SIDE_RATIO: f32 = 0.3;
/// Rotation ring radius relative to the base length
const RING_RADIUS_RATIO: f32 = 1.2;

/// Envelopes are this many head radii wide
const ENVELOPE_WIDTH_RATIO: f32 = 2.0;
/// Cross-section segments of the ring envelope torus
const ENVELOPE_TUBE_SEGMENTS: u32 = 6;

/// The nine shapes every gizmo is assembled from.
#[derive(Debug, Clone, PartialEq)]
pub struct GizmoGeometry {
    pub arrow_shaft: MeshGeometry,
    pub arrow_head: MeshGeometry,
    pub arrow_envelope: MeshGeometry,
    pub scale_shaft: MeshGeometry,
    pub scale_head: MeshGeometry,
    pub scale_envelope: MeshGeometry,
    pub plane: MeshGeometry,
    pub ring: MeshGeometry,
    pub ring_envelope: MeshGeometry,
}

impl GizmoGeometry {
    pub fn build(config: &GizmoConfig) -> Self {
        let length = config.base_length;
        let head_height = length * HEAD_HEIGHT_RATIO;
        let head_radius = length * HEAD_RADIUS_RATIO;
        let envelope = head_radius * ENVELOPE_WIDTH_RATIO;
        let scale_length = length * SCALE_SHAFT_RATIO;
        let ring_radius = length * RING_RADIUS_RATIO;

        Self {
            arrow_shaft: line(Vec3::ZERO, Vec3::X * (length - head_height)),
            arrow_head: cone(length - head_height, head_height, head_radius, config.cone_segments),
            arrow_envelope: prism(0.0, length, envelope),
            scale_shaft: line(Vec3::ZERO, Vec3::X * scale_length),
            scale_head: cube(Vec3::X * scale_length, head_radius),
            scale_envelope: prism(0.0, scale_length + head_radius, envelope),
            plane: square(length * PLANE_SIDE_RATIO),
            ring: ring(ring_radius, config.ring_segments),
            ring_envelope: torus(ring_radius, envelope, config.ring_segments),
        }
    }
}

/// Which of the nine meshes an instanced handle part uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlePart {
    ArrowShaft,
    ArrowHead,
    ArrowEnvelope,
    ScaleShaft,
    ScaleHead,
    ScaleEnvelope,
    Plane,
    Ring,
    RingEnvelope,
}

/// Renderer handles of the nine uploaded gizmo meshes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GizmoMeshes {
    pub arrow_shaft: MeshHandle,
    pub arrow_head: MeshHandle,
    pub arrow_envelope: MeshHandle,
    pub scale_shaft: MeshHandle,
    pub scale_head: MeshHandle,
    pub scale_envelope: MeshHandle,
    pub plane: MeshHandle,
    pub ring: MeshHandle,
    pub ring_envelope: MeshHandle,
}

impl GizmoMeshes {
    fn upload(geometry: &GizmoGeometry, renderer: &mut dyn Renderer) -> Self {
        let mut add = |mesh: &MeshGeometry, color: Color, is_opaque: bool| {
            renderer.add_model(mesh, color, mesh.bounding_sphere(), is_opaque)
        };
        Self {
            arrow_shaft: add(&geometry.arrow_shaft, Color::GIZMO_TRANSLATE, true),
            arrow_head: add(&geometry.arrow_head, Color::GIZMO_TRANSLATE, true),
            arrow_envelope: add(&geometry.arrow_envelope, Color::INVISIBLE, false),
            scale_shaft: add(&geometry.scale_shaft, Color::GIZMO_SCALE, true),
            scale_head: add(&geometry.scale_head, Color::GIZMO_SCALE, true),
            scale_envelope: add(&geometry.scale_envelope, Color::INVISIBLE, false),
            plane: add(&geometry.plane, Color::GIZMO_PLANE, true),
            ring: add(&geometry.ring, Color::GIZMO_ROTATE, true),
            ring_envelope: add(&geometry.ring_envelope, Color::INVISIBLE, false),
        }
    }

    pub fn get(&self, part: HandlePart) -> MeshHandle {
        match part {
            HandlePart::ArrowShaft => self.arrow_shaft,
            HandlePart::ArrowHead => self.arrow_head,
            HandlePart::ArrowEnvelope => self.arrow_envelope,
            HandlePart::ScaleShaft => self.scale_shaft,
            HandlePart::ScaleHead => self.scale_head,
            HandlePart::ScaleEnvelope => self.scale_envelope,
            HandlePart::Plane => self.plane,
            HandlePart::Ring => self.ring,
            HandlePart::RingEnvelope => self.ring_envelope,
        }
    }

    fn all(&self) -> [MeshHandle; 9] {
        [
            self.arrow_shaft,
            self.arrow_head,
            self.arrow_envelope,
            self.scale_shaft,
            self.scale_head,
            self.scale_envelope,
            self.plane,
            self.ring,
            self.ring_envelope,
        ]
    }
}

/// Gizmo meshes uploaded once per renderer.
#[derive(Debug, Default)]
pub struct GizmoMeshCache {
    meshes: HashMap<RendererId, GizmoMeshes>,
}

impl GizmoMeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Meshes for `renderer`, building and uploading them on first use
    pub fn get_or_upload(
        &mut self,
        renderer: &mut dyn Renderer,
        config: &GizmoConfig,
    ) -> GizmoMeshes {
        *self.meshes.entry(renderer.id()).or_insert_with(|| {
            debug!("Uploading gizmo meshes for renderer {:?}", renderer.id());
            GizmoMeshes::upload(&GizmoGeometry::build(config), renderer)
        })
    }

    /// Remove the meshes uploaded to `renderer`, if any
    pub fn release(&mut self, renderer: &mut dyn Renderer) {
        if let Some(meshes) = self.meshes.remove(&renderer.id()) {
            for mesh in meshes.all() {
                renderer.remove_model(mesh);
            }
        }
    }
}

/// One of the 27 instanced handle parts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleLayout {
    pub handle: GizmoHandle,
    pub part: HandlePart,
    /// Maps the +X-built shape onto the handle's axis
    pub orientation: Quat,
}

/// Orientation mapping +X onto `axis`
pub fn axis_orientation(axis: GizmoAxis) -> Quat {
    match axis {
        GizmoAxis::X => Quat::IDENTITY,
        GizmoAxis::Y => Quat::from_rotation_z(FRAC_PI_2),
        GizmoAxis::Z => Quat::from_rotation_y(-FRAC_PI_2),
    }
}

/// All handle parts in instancing order: translate triads, scale triads,
/// plane squares, then rings with their envelopes.
pub fn handle_layout() -> Vec<HandleLayout> {
    let mut layout = Vec::with_capacity(27);
    let mut push = |axis: GizmoAxis, handle: GizmoHandle, parts: &[HandlePart]| {
        for &part in parts {
            layout.push(HandleLayout {
                handle,
                part,
                orientation: axis_orientation(axis),
            });
        }
    };
    for axis in GizmoAxis::ALL {
        push(
            axis,
            GizmoHandle::translate(axis),
            &[HandlePart::ArrowShaft, HandlePart::ArrowHead, HandlePart::ArrowEnvelope],
        );
    }
    for axis in GizmoAxis::ALL {
        push(
            axis,
            GizmoHandle::scale(axis),
            &[HandlePart::ScaleShaft, HandlePart::ScaleHead, HandlePart::ScaleEnvelope],
        );
    }
    for axis in GizmoAxis::ALL {
        push(axis, GizmoHandle::plane_excluding(axis), &[HandlePart::Plane]);
    }
    for axis in GizmoAxis::ALL {
        push(
            axis,
            GizmoHandle::rotate(axis),
            &[HandlePart::Ring, HandlePart::RingEnvelope],
        );
    }
    layout
}

// ============================================================================
// Shape builders
// ============================================================================

fn line(from: Vec3, to: Vec3) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    let a = mesh.push_vertex(from);
    let b = mesh.push_vertex(to);
    mesh.push_line(a, b);
    mesh
}

/// Cone with its base at `x = start` and apex `height` further along +X
fn cone(start: f32, height: f32, radius: f32, segments: u32) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Triangles);
    let apex = mesh.push_vertex(Vec3::X * (start + height));
    let base_center = mesh.push_vertex(Vec3::X * start);
    let first = mesh.vertices.len() as u32;
    for i in 0..segments {
        let angle = TAU * i as f32 / segments as f32;
        mesh.push_vertex(Vec3::new(start, radius * angle.cos(), radius * angle.sin()));
    }
    for i in 0..segments {
        let a = first + i;
        let b = first + (i + 1) % segments;
        mesh.push_triangle(a, b, apex);
        mesh.push_triangle(b, a, base_center);
    }
    mesh
}

/// Axis-aligned cube of half extent `half` around `center`
fn cube(center: Vec3, half: f32) -> MeshGeometry {
    box_between(center - Vec3::splat(half), center + Vec3::splat(half))
}

/// Square prism from `x = start` to `x = end` with half width `half`
fn prism(start: f32, end: f32, half: f32) -> MeshGeometry {
    box_between(Vec3::new(start, -half, -half), Vec3::new(end, half, half))
}

fn box_between(min: Vec3, max: Vec3) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Triangles);
    for i in 0..8u32 {
        mesh.push_vertex(Vec3::new(
            if i & 1 == 0 { min.x } else { max.x },
            if i & 2 == 0 { min.y } else { max.y },
            if i & 4 == 0 { min.z } else { max.z },
        ));
    }
    const FACES: [[u32; 4]; 6] = [
        [0, 2, 6, 4],
        [1, 5, 7, 3],
        [0, 4, 5, 1],
        [2, 3, 7, 6],
        [0, 1, 3, 2],
        [4, 6, 7, 5],
    ];
    for [a, b, c, d] in FACES {
        mesh.push_triangle(a, b, c);
        mesh.push_triangle(a, c, d);
    }
    mesh
}

/// Square in the YZ plane (normal +X), offset from the origin by one side
fn square(side: f32) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Triangles);
    let near = side;
    let far = side * 2.0;
    let a = mesh.push_vertex(Vec3::new(0.0, near, near));
    let b = mesh.push_vertex(Vec3::new(0.0, far, near));
    let c = mesh.push_vertex(Vec3::new(0.0, far, far));
    let d = mesh.push_vertex(Vec3::new(0.0, near, far));
    // Both windings so the square is visible from either side
    mesh.push_triangle(a, b, c);
    mesh.push_triangle(a, c, d);
    mesh.push_triangle(a, c, b);
    mesh.push_triangle(a, d, c);
    mesh
}

/// Circle of line segments around +X
fn ring(radius: f32, segments: u32) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Lines);
    for i in 0..segments {
        let angle = TAU * i as f32 / segments as f32;
        mesh.push_vertex(Vec3::new(0.0, radius * angle.cos(), radius * angle.sin()));
    }
    for i in 0..segments {
        mesh.push_line(i, (i + 1) % segments);
    }
    mesh
}

/// Coarse torus around +X used as a ring's pick envelope
fn torus(radius: f32, tube: f32, segments: u32) -> MeshGeometry {
    let mut mesh = MeshGeometry::new(Topology::Triangles);
    let tube_segments = ENVELOPE_TUBE_SEGMENTS;
    for i in 0..segments {
        let around = TAU * i as f32 / segments as f32;
        let radial = Vec3::new(0.0, around.cos(), around.sin());
        for j in 0..tube_segments {
            let angle = TAU * j as f32 / tube_segments as f32;
            let offset = radial * angle.cos() + Vec3::X * angle.sin();
            mesh.push_vertex(radial * radius + offset * tube);
        }
    }
    let index = |i: u32, j: u32| (i % segments) * tube_segments + j % tube_segments;
    for i in 0..segments {
        for j in 0..tube_segments {
            let a = index(i, j);
            let b = index(i + 1, j);
            let c = index(i + 1, j + 1);
            let d = index(i, j + 1);
            mesh.push_triangle(a, b, c);
            mesh.push_triangle(a, c, d);
        }
    }
    mesh
}
