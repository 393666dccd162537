//! Geometry handed across the renderer boundary.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A single mesh vertex (GPU-compatible with bytemuck).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn new(position: Vec3) -> Self {
        Self {
            position: position.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// How the index buffer of a mesh is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Topology {
    /// Pairs of indices form line segments
    Lines,
    /// Triples of indices form triangles
    #[default]
    Triangles,
}

impl Topology {
    /// Number of indices per primitive
    pub fn indices_per_primitive(self) -> usize {
        match self {
            Topology::Lines => 2,
            Topology::Triangles => 3,
        }
    }
}

/// Linear RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const GIZMO_TRANSLATE: Color = Color::rgb(0.9, 0.2, 0.2);
    pub const GIZMO_SCALE: Color = Color::rgb(0.2, 0.9, 0.2);
    pub const GIZMO_ROTATE: Color = Color::rgb(0.2, 0.2, 0.9);
    pub const GIZMO_PLANE: Color = Color::rgb(0.9, 0.9, 0.2);
    /// Used for pick envelopes that should never show up on screen
    pub const INVISIBLE: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// Sphere enclosing a mesh, used by the renderer for culling and picking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Smallest origin-independent sphere around a vertex set: centered on the
    /// box center, radius reaching the farthest vertex.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        if vertices.is_empty() {
            return Self::default();
        }
        let (min, max) = vertices.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), v| (min.min(v.position()), max.max(v.position())),
        );
        let center = (min + max) * 0.5;
        let radius = vertices
            .iter()
            .map(|v| v.position().distance(center))
            .fold(0.0, f32::max);
        Self { center, radius }
    }
}

/// Vertex and index buffers plus their topology.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshGeometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl MeshGeometry {
    pub fn new(topology: Topology) -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            topology,
        }
    }

    /// Append a vertex and return its index
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        self.vertices.push(Vertex::new(position));
        (self.vertices.len() - 1) as u32
    }

    pub fn push_line(&mut self, a: u32, b: u32) {
        self.indices.extend_from_slice(&[a, b]);
    }

    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Number of line segments or triangles
    pub fn primitive_count(&self) -> usize {
        self.indices.len() / self.topology.indices_per_primitive()
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(Vertex::position)
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere::from_vertices(&self.vertices)
    }

    /// True when every index points at an existing vertex and the index count
    /// matches the topology.
    pub fn is_well_formed(&self) -> bool {
        self.indices.len() % self.topology.indices_per_primitive() == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }
}
