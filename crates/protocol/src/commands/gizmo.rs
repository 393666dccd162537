//! Gizmo handle and mode types.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Transform gizmo operation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    #[default]
    None,
    Translate,
    TranslatePlane,
    Rotate,
    Scale,
}

/// World axis a handle operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }
}

/// Which gizmo handle is being interacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GizmoHandle {
    #[default]
    None,
    // Translation arrows
    TranslateX,
    TranslateY,
    TranslateZ,
    // Scale arrows
    ScaleX,
    ScaleY,
    ScaleZ,
    // Plane squares, named after the plane they move in
    TranslateXY,
    TranslateXZ,
    TranslateYZ,
    // Rotation rings
    RotateX,
    RotateY,
    RotateZ,
}

impl GizmoHandle {
    pub fn translate(axis: GizmoAxis) -> Self {
        match axis {
            GizmoAxis::X => GizmoHandle::TranslateX,
            GizmoAxis::Y => GizmoHandle::TranslateY,
            GizmoAxis::Z => GizmoHandle::TranslateZ,
        }
    }

    pub fn scale(axis: GizmoAxis) -> Self {
        match axis {
            GizmoAxis::X => GizmoHandle::ScaleX,
            GizmoAxis::Y => GizmoHandle::ScaleY,
            GizmoAxis::Z => GizmoHandle::ScaleZ,
        }
    }

    /// Plane handle that excludes `axis`, e.g. Z gives the XY square.
    pub fn plane_excluding(axis: GizmoAxis) -> Self {
        match axis {
            GizmoAxis::X => GizmoHandle::TranslateYZ,
            GizmoAxis::Y => GizmoHandle::TranslateXZ,
            GizmoAxis::Z => GizmoHandle::TranslateXY,
        }
    }

    pub fn rotate(axis: GizmoAxis) -> Self {
        match axis {
            GizmoAxis::X => GizmoHandle::RotateX,
            GizmoAxis::Y => GizmoHandle::RotateY,
            GizmoAxis::Z => GizmoHandle::RotateZ,
        }
    }

    pub fn mode(&self) -> GizmoMode {
        match self {
            GizmoHandle::None => GizmoMode::None,
            GizmoHandle::TranslateX | GizmoHandle::TranslateY | GizmoHandle::TranslateZ => {
                GizmoMode::Translate
            }
            GizmoHandle::ScaleX | GizmoHandle::ScaleY | GizmoHandle::ScaleZ => GizmoMode::Scale,
            GizmoHandle::TranslateXY | GizmoHandle::TranslateXZ | GizmoHandle::TranslateYZ => {
                GizmoMode::TranslatePlane
            }
            GizmoHandle::RotateX | GizmoHandle::RotateY | GizmoHandle::RotateZ => {
                GizmoMode::Rotate
            }
        }
    }

    /// The axis this handle acts along (or around). For plane handles this is
    /// the excluded axis, i.e. the plane normal.
    pub fn axis(&self) -> Option<GizmoAxis> {
        match self {
            GizmoHandle::None => None,
            GizmoHandle::TranslateX
            | GizmoHandle::ScaleX
            | GizmoHandle::TranslateYZ
            | GizmoHandle::RotateX => Some(GizmoAxis::X),
            GizmoHandle::TranslateY
            | GizmoHandle::ScaleY
            | GizmoHandle::TranslateXZ
            | GizmoHandle::RotateY => Some(GizmoAxis::Y),
            GizmoHandle::TranslateZ
            | GizmoHandle::ScaleZ
            | GizmoHandle::TranslateXY
            | GizmoHandle::RotateZ => Some(GizmoAxis::Z),
        }
    }

    pub fn is_translate(&self) -> bool {
        self.mode() == GizmoMode::Translate
    }

    pub fn is_plane(&self) -> bool {
        self.mode() == GizmoMode::TranslatePlane
    }

    pub fn is_scale(&self) -> bool {
        self.mode() == GizmoMode::Scale
    }

    pub fn is_rotate(&self) -> bool {
        self.mode() == GizmoMode::Rotate
    }
}
